//! GML/WFS/SOS feature payloads to RDF
//!
//! This crate converts GML-encoded responses from geospatial web services
//! (WFS `GetFeature`, SOS `GetObservation` and friends) into RDF statements
//! written to a target named graph.
//!
//! # Pipeline
//!
//! 1. A [`SchemaSet`] is loaded from the service's XSD documents through a
//!    [`SchemaResolver`] (include- and import-aware).
//! 2. The [`FeatureTreeBuilder`] streams the payload, validating every
//!    element against the schema while building a generic, recursively
//!    typed [`ComplexFeature`] tree.
//! 3. The [`ConversionDriver`] walks the tree's top-level members,
//!    resolving a [`MapperStrategy`] per member type from the
//!    [`MapperRegistry`] and emitting statements into the
//!    [`ConversionContext`]'s [`RdfSink`], bracketed by exactly one
//!    begin/commit unit of work.
//!
//! Service-level error payloads (OWS `ExceptionReport`) are rejected before
//! the sink is opened; malformed or schema-invalid XML and unmapped
//! top-level types fail the whole conversion. See [`Gml2RdfError`].
//!
//! # Example
//!
//! ```
//! use gml2rdf::{convert, ConversionConfig, GraphCollectorSink, OntologyOption};
//! use gml2rdf::schema::{MapResolver, SchemaSet};
//!
//! let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                targetNamespace="http://www.opengis.net/gml/3.2"
//!                xmlns:gml="http://www.opengis.net/gml/3.2">
//!       <xs:element name="FeatureCollection"/>
//!       <xs:element name="featureMember"/>
//!       <xs:element name="TimePeriod" type="gml:TimePeriodType"/>
//!       <xs:element name="beginPosition" type="gml:TimePositionType"/>
//!       <xs:element name="endPosition" type="gml:TimePositionType"/>
//!     </xs:schema>"#;
//! let resolver = MapResolver::new().with("wfs.xsd", xsd);
//! let schema = SchemaSet::load("wfs.xsd", &resolver).unwrap();
//!
//! let payload = r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml/3.2">
//!       <gml:featureMember>
//!         <gml:TimePeriod gml:id="tp1">
//!           <gml:beginPosition>2020-01-01</gml:beginPosition>
//!           <gml:endPosition>2020-01-02</gml:endPosition>
//!         </gml:TimePeriod>
//!       </gml:featureMember>
//!     </gml:FeatureCollection>"#;
//!
//! let config = ConversionConfig {
//!     ontology: OntologyOption::EmfSosa,
//!     target_graph: "http://example.org/graph".to_string(),
//!     base_uri: "http://example.org/id".to_string(),
//! };
//! let mut sink = GraphCollectorSink::new();
//! convert(payload.as_bytes(), &schema, &mut sink, &config).unwrap();
//! assert!(!sink.statements().is_empty());
//! ```

pub mod builder;
pub mod context;
pub mod driver;
pub mod error;
pub mod feature;
pub mod mapper;
pub mod schema;
pub mod sink;
pub mod term;
pub mod vocab;

pub use builder::FeatureTreeBuilder;
pub use context::{ConversionConfig, ConversionContext};
pub use driver::ConversionDriver;
pub use error::{Gml2RdfError, Result};
pub use feature::{Attribute, ComplexFeature, SimpleAttribute};
pub use mapper::{default_registry, MapperRegistry, MapperStrategy, OntologyOption};
pub use schema::{SchemaResolver, SchemaSet};
pub use sink::{GraphCollectorSink, NQuadsWriterSink, RdfSink, Statement};
pub use term::RdfTerm;

/// Parse a payload and convert it in one step
///
/// Convenience over the builder/driver pair: builds the tree against
/// `schema`, selects the registry for the configured ontology option, and
/// runs the conversion into `sink`.
pub fn convert(
    input: &[u8],
    schema: &SchemaSet,
    sink: &mut dyn RdfSink,
    config: &ConversionConfig,
) -> Result<()> {
    let root = FeatureTreeBuilder::new(schema).parse(input)?;
    let registry = mapper::registry_for(config.ontology);
    let mut ctx = ConversionContext::for_config(sink, registry, config);
    ConversionDriver::convert(&root, &mut ctx)
}
