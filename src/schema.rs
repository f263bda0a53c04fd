//! XML Schema subset for streaming validation
//!
//! Loads the element declarations of an XSD document set and answers, for a
//! namespace-qualified element, whether it is declared and which XSD type it
//! declares. Include- and import-aware: `xs:include`/`xs:import` references
//! are followed through a [`SchemaResolver`] supplied by the caller.
//!
//! Not a general-purpose XSD validator, intentionally scoped to
//! declaration-level checks. Content-model (sequence/choice/occurrence)
//! validation is out of scope; well-formedness violations are caught by the
//! streaming parser itself.

use std::collections::{HashMap, HashSet};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Gml2RdfError, Result};

/// Supplies schema document text for a schema location
///
/// Implemented by the transport collaborator in production; tests use
/// [`MapResolver`].
pub trait SchemaResolver {
    /// Resolve a schema location to its document text
    fn resolve(&self, location: &str) -> Result<String>;
}

/// In-memory resolver backed by a location → document map
#[derive(Debug, Default)]
pub struct MapResolver {
    docs: HashMap<String, String>,
}

impl MapResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema document under a location key
    pub fn insert(&mut self, location: impl Into<String>, document: impl Into<String>) {
        self.docs.insert(location.into(), document.into());
    }

    /// Builder-style insert
    pub fn with(mut self, location: impl Into<String>, document: impl Into<String>) -> Self {
        self.insert(location, document);
        self
    }
}

impl SchemaResolver for MapResolver {
    fn resolve(&self, location: &str) -> Result<String> {
        self.docs
            .get(location)
            .cloned()
            .ok_or_else(|| Gml2RdfError::SchemaLoad(format!("unresolved schema location: {location}")))
    }
}

/// Element declarations of a loaded schema document set
///
/// Keyed by target namespace, then element local name; the value is the
/// declared XSD type's local name when the declaration carries a `type`
/// attribute.
#[derive(Debug, Default)]
pub struct SchemaSet {
    elements: HashMap<String, HashMap<String, Option<String>>>,
}

impl SchemaSet {
    /// Load a schema set starting from `root_location`
    ///
    /// Follows `xs:include` and `xs:import` schemaLocation references through
    /// the resolver. Already-visited locations are skipped, so circular
    /// includes terminate.
    pub fn load(root_location: &str, resolver: &dyn SchemaResolver) -> Result<Self> {
        let mut set = Self::default();
        let mut pending = vec![root_location.to_string()];
        let mut visited: HashSet<String> = HashSet::new();

        while let Some(location) = pending.pop() {
            if !visited.insert(location.clone()) {
                continue;
            }
            let document = resolver.resolve(&location)?;
            let referenced = set.scan_document(&location, &document)?;
            pending.extend(referenced);
        }

        tracing::debug!(
            namespaces = set.elements.len(),
            "schema set loaded"
        );
        Ok(set)
    }

    /// Whether `local` is a declared element of namespace `ns`
    pub fn is_declared(&self, ns: &str, local: &str) -> bool {
        self.elements
            .get(ns)
            .is_some_and(|decls| decls.contains_key(local))
    }

    /// Resolve a declared element to its type name
    ///
    /// Returns the declared XSD type's local name when the element
    /// declaration carries one, the element local name otherwise, and `None`
    /// when the element is not declared at all.
    pub fn element_type(&self, ns: &str, local: &str) -> Option<String> {
        let declared = self.elements.get(ns)?.get(local)?;
        Some(declared.clone().unwrap_or_else(|| local.to_string()))
    }

    /// Number of declared elements across all namespaces
    pub fn len(&self) -> usize {
        self.elements.values().map(|decls| decls.len()).sum()
    }

    /// Check if no elements are declared
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scan one XSD document, recording element declarations and returning
    /// the schemaLocations it references
    fn scan_document(&mut self, location: &str, document: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(document);
        let mut target_ns = String::new();
        let mut referenced = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let local = local_name(e.name().as_ref());
                    match local.as_str() {
                        "schema" => {
                            if let Some(ns) = attr_value(e, "targetNamespace") {
                                target_ns = ns;
                            }
                        }
                        "element" => {
                            // Only named declarations; references (ref=) point
                            // at declarations recorded elsewhere
                            if let Some(name) = attr_value(e, "name") {
                                let declared_type =
                                    attr_value(e, "type").map(|t| type_local_name(&t));
                                self.elements
                                    .entry(target_ns.clone())
                                    .or_default()
                                    .insert(name, declared_type);
                            }
                        }
                        "include" | "import" => {
                            if let Some(loc) = attr_value(e, "schemaLocation") {
                                referenced.push(loc);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Gml2RdfError::SchemaLoad(format!(
                        "invalid schema document {location}: {e}"
                    )))
                }
                _ => {}
            }
        }

        Ok(referenced)
    }
}

/// Local part of a qualified XML name
fn local_name(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    match name.rfind(':') {
        Some(pos) => name[pos + 1..].to_string(),
        None => name.to_string(),
    }
}

/// Local part of a prefixed type reference (e.g. `gml:TimePeriodType`)
fn type_local_name(qname: &str) -> String {
    match qname.rfind(':') {
        Some(pos) => qname[pos + 1..].to_string(),
        None => qname.to_string(),
    }
}

/// Value of a (non-namespaced) attribute on an XSD element
fn attr_value(e: &quick_xml::events::BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if local_name(attr.key.as_ref()) == name {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_XSD: &str = r#"<?xml version="1.0"?>
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                   targetNamespace="http://example.org/main"
                   xmlns:gml="http://www.opengis.net/gml/3.2">
          <xs:import namespace="http://www.opengis.net/gml/3.2"
                     schemaLocation="gml.xsd"/>
          <xs:include schemaLocation="extra.xsd"/>
          <xs:element name="FeatureCollection" type="gml:FeatureCollectionType"/>
          <xs:element name="member"/>
        </xs:schema>"#;

    const GML_XSD: &str = r#"<?xml version="1.0"?>
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                   targetNamespace="http://www.opengis.net/gml/3.2">
          <xs:element name="TimePeriod" type="gml:TimePeriodType"/>
        </xs:schema>"#;

    const EXTRA_XSD: &str = r#"<?xml version="1.0"?>
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                   targetNamespace="http://example.org/main">
          <xs:element name="extraElement"/>
        </xs:schema>"#;

    fn resolver() -> MapResolver {
        MapResolver::new()
            .with("main.xsd", MAIN_XSD)
            .with("gml.xsd", GML_XSD)
            .with("extra.xsd", EXTRA_XSD)
    }

    #[test]
    fn test_load_follows_includes_and_imports() {
        let set = SchemaSet::load("main.xsd", &resolver()).unwrap();
        assert!(set.is_declared("http://example.org/main", "FeatureCollection"));
        assert!(set.is_declared("http://example.org/main", "extraElement"));
        assert!(set.is_declared("http://www.opengis.net/gml/3.2", "TimePeriod"));
        assert!(!set.is_declared("http://example.org/main", "TimePeriod"));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_element_type_resolution() {
        let set = SchemaSet::load("main.xsd", &resolver()).unwrap();
        // Declared type wins
        assert_eq!(
            set.element_type("http://www.opengis.net/gml/3.2", "TimePeriod"),
            Some("TimePeriodType".to_string())
        );
        // No type attribute: element local name is the type name
        assert_eq!(
            set.element_type("http://example.org/main", "member"),
            Some("member".to_string())
        );
        // Undeclared element
        assert_eq!(set.element_type("http://example.org/main", "nope"), None);
    }

    #[test]
    fn test_unresolved_location_fails() {
        let resolver = MapResolver::new().with("main.xsd", MAIN_XSD);
        let err = SchemaSet::load("main.xsd", &resolver).unwrap_err();
        assert!(matches!(err, Gml2RdfError::SchemaLoad(_)));
    }

    #[test]
    fn test_circular_includes_terminate() {
        let a = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                     targetNamespace="http://example.org/a">
                     <xs:include schemaLocation="b.xsd"/>
                     <xs:element name="a"/>
                   </xs:schema>"#;
        let b = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                     targetNamespace="http://example.org/a">
                     <xs:include schemaLocation="a.xsd"/>
                     <xs:element name="b"/>
                   </xs:schema>"#;
        let resolver = MapResolver::new().with("a.xsd", a).with("b.xsd", b);
        let set = SchemaSet::load("a.xsd", &resolver).unwrap();
        assert!(set.is_declared("http://example.org/a", "a"));
        assert!(set.is_declared("http://example.org/a", "b"));
    }
}
