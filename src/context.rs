//! Per-conversion state
//!
//! A [`ConversionContext`] is created per conversion request and lives
//! exactly as long as the sink's unit of work. It owns the sink exclusively
//! for that span and shares the mapper registry by reference; nothing in it
//! survives across requests.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mapper::{MapperRegistry, MapperStrategy, OntologyOption};
use crate::sink::RdfSink;
use crate::term::RdfTerm;

/// Caller-facing conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Which fixed mapper set to populate the registry with
    pub ontology: OntologyOption,
    /// Named graph all statements are written into
    pub target_graph: String,
    /// Base URI subjects are derived from
    pub base_uri: String,
}

/// Per-conversion state shared with every recursive mapper invocation
pub struct ConversionContext<'a> {
    sink: &'a mut dyn RdfSink,
    target_graph: String,
    base_uri: String,
    registry: &'a MapperRegistry,
}

impl<'a> ConversionContext<'a> {
    /// Create a context for one conversion
    pub fn new(
        sink: &'a mut dyn RdfSink,
        registry: &'a MapperRegistry,
        target_graph: impl Into<String>,
        base_uri: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            target_graph: target_graph.into(),
            base_uri: base_uri.into(),
            registry,
        }
    }

    /// Create a context from a configuration record
    pub fn for_config(
        sink: &'a mut dyn RdfSink,
        registry: &'a MapperRegistry,
        config: &ConversionConfig,
    ) -> Self {
        Self::new(sink, registry, &config.target_graph, &config.base_uri)
    }

    /// The target named graph
    pub fn target_graph(&self) -> &str {
        &self.target_graph
    }

    /// The base URI for derived subjects
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Derive a URI under the base URI
    pub fn uri(&self, local: &str) -> String {
        if self.base_uri.ends_with('/') || self.base_uri.ends_with('#') {
            format!("{}{}", self.base_uri, local)
        } else {
            format!("{}/{}", self.base_uri, local)
        }
    }

    /// Resolve a mapper strategy; fails with `UnmappedType` on a miss
    ///
    /// The returned strategy borrows the registry, not the context, so it can
    /// be invoked with the context borrowed mutably.
    pub fn resolve(&self, type_name: &str) -> Result<&'a dyn MapperStrategy> {
        self.registry.resolve(type_name)
    }

    /// Resolve a mapper strategy, returning `None` on a miss
    pub fn try_resolve(&self, type_name: &str) -> Option<&'a dyn MapperStrategy> {
        self.registry.get(type_name)
    }

    /// Insert one statement into the open unit of work
    pub fn insert(&mut self, subject: &RdfTerm, predicate: &RdfTerm, object: &RdfTerm) -> Result<()> {
        self.sink.insert(subject, predicate, object)
    }

    /// Open the sink's unit of work (driver only)
    pub(crate) fn begin(&mut self) -> Result<()> {
        self.sink.begin(&self.target_graph)
    }

    /// Close the sink's unit of work (driver only)
    pub(crate) fn commit(&mut self) -> Result<()> {
        self.sink.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::MapperRegistry;
    use crate::sink::GraphCollectorSink;

    #[test]
    fn test_uri_join() {
        let registry = MapperRegistry::new();
        let mut sink = GraphCollectorSink::new();
        let ctx = ConversionContext::new(&mut sink, &registry, "http://g", "http://example.org/id");
        assert_eq!(ctx.uri("x"), "http://example.org/id/x");

        let mut sink = GraphCollectorSink::new();
        let ctx = ConversionContext::new(&mut sink, &registry, "http://g", "http://example.org/id/");
        assert_eq!(ctx.uri("x"), "http://example.org/id/x");
    }

    #[test]
    fn test_config_round_trip() {
        let config = ConversionConfig {
            ontology: OntologyOption::EmfSosa,
            target_graph: "http://example.org/graph".to_string(),
            base_uri: "http://example.org/id".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ConversionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.target_graph, config.target_graph);
    }
}
