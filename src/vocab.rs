//! Vocabulary constants for GML-to-RDF conversion
//!
//! Input-side constants cover the OGC namespaces found in WFS/SOS payloads
//! (GML, O&M, OWS, xlink). Output-side constants cover the vocabularies the
//! EMF/O&M mapper set emits into: SOSA, OWL-Time, RDF/RDFS, and XSD.

/// GML namespace and structural element names
pub mod gml {
    /// GML 3.2 namespace IRI
    pub const NS: &str = "http://www.opengis.net/gml/3.2";

    /// gml:id attribute local name
    pub const ID: &str = "id";

    /// gml:boundedBy structural element (skipped by the driver)
    pub const BOUNDED_BY: &str = "boundedBy";

    /// Bounding-shape type name (skipped by the driver)
    pub const BOUNDING_SHAPE_TYPE: &str = "BoundingShapeType";

    /// Envelope type name (skipped by the driver)
    pub const ENVELOPE_TYPE: &str = "EnvelopeType";
}

/// OWS (OGC Web Services common) constants
pub mod ows {
    /// OWS 1.1 namespace IRI
    pub const NS: &str = "http://www.opengis.net/ows/1.1";

    /// Exception report root element name
    pub const EXCEPTION_REPORT: &str = "ExceptionReport";

    /// Exception report type name
    pub const EXCEPTION_REPORT_TYPE: &str = "ExceptionReportType";

    /// Nested exception element name
    pub const EXCEPTION: &str = "Exception";

    /// Exception message element name
    pub const EXCEPTION_TEXT: &str = "ExceptionText";
}

/// xlink namespace constants
pub mod xlink {
    /// xlink namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/xlink";

    /// xlink:href attribute local name
    pub const HREF: &str = "href";
}

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:seeAlso IRI
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
}

/// XSD datatype constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
}

/// SOSA (Sensor, Observation, Sample, Actuator) vocabulary constants
///
/// Target vocabulary for the O&M observation shapes.
pub mod sosa {
    /// SOSA namespace IRI
    pub const NS: &str = "http://www.w3.org/ns/sosa/";

    /// sosa:Observation class IRI
    pub const OBSERVATION: &str = "http://www.w3.org/ns/sosa/Observation";

    /// sosa:ObservationCollection class IRI (SSN extensions)
    pub const OBSERVATION_COLLECTION: &str = "http://www.w3.org/ns/sosa/ObservationCollection";

    /// sosa:FeatureOfInterest class IRI
    pub const FEATURE_OF_INTEREST_CLASS: &str = "http://www.w3.org/ns/sosa/FeatureOfInterest";

    /// sosa:ObservableProperty class IRI
    pub const OBSERVABLE_PROPERTY: &str = "http://www.w3.org/ns/sosa/ObservableProperty";

    /// sosa:Platform class IRI (monitoring facilities)
    pub const PLATFORM: &str = "http://www.w3.org/ns/sosa/Platform";

    /// sosa:Procedure class IRI
    pub const PROCEDURE: &str = "http://www.w3.org/ns/sosa/Procedure";

    /// sosa:isSampleOf property IRI (sampling features)
    pub const IS_SAMPLE_OF: &str = "http://www.w3.org/ns/sosa/isSampleOf";

    /// sosa:hasFeatureOfInterest property IRI
    pub const HAS_FEATURE_OF_INTEREST: &str = "http://www.w3.org/ns/sosa/hasFeatureOfInterest";

    /// sosa:observedProperty property IRI
    pub const OBSERVED_PROPERTY: &str = "http://www.w3.org/ns/sosa/observedProperty";

    /// sosa:phenomenonTime property IRI
    pub const PHENOMENON_TIME: &str = "http://www.w3.org/ns/sosa/phenomenonTime";

    /// sosa:resultTime property IRI
    pub const RESULT_TIME: &str = "http://www.w3.org/ns/sosa/resultTime";

    /// sosa:usedProcedure property IRI
    pub const USED_PROCEDURE: &str = "http://www.w3.org/ns/sosa/usedProcedure";

    /// sosa:hasResult property IRI
    pub const HAS_RESULT: &str = "http://www.w3.org/ns/sosa/hasResult";

    /// sosa:hasSimpleResult property IRI
    pub const HAS_SIMPLE_RESULT: &str = "http://www.w3.org/ns/sosa/hasSimpleResult";

    /// sosa:hasMember property IRI (collection membership)
    pub const HAS_MEMBER: &str = "http://www.w3.org/ns/sosa/hasMember";
}

/// OWL-Time vocabulary constants
pub mod time {
    /// OWL-Time namespace IRI
    pub const NS: &str = "http://www.w3.org/2006/time#";

    /// time:Interval class IRI
    pub const INTERVAL: &str = "http://www.w3.org/2006/time#Interval";

    /// time:hasBeginning property IRI
    pub const HAS_BEGINNING: &str = "http://www.w3.org/2006/time#hasBeginning";

    /// time:hasEnd property IRI
    pub const HAS_END: &str = "http://www.w3.org/2006/time#hasEnd";

    /// time:inXSDDateTime property IRI
    pub const IN_XSD_DATE_TIME: &str = "http://www.w3.org/2006/time#inXSDDateTime";
}

/// SKOS vocabulary constants (code-list values)
pub mod skos {
    /// skos:notation property IRI
    pub const NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";

    /// skos:exactMatch property IRI
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
}
