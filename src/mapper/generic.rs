//! Generic pass-through mapper for loosely-typed containers

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::ComplexFeature;
use crate::mapper::MapperStrategy;

/// Recurses into every complex child, dispatching each through the registry
///
/// A child whose type has no registered strategy is skipped with a
/// diagnostic, not failed. Containers of "any type" content routinely hold
/// types outside the configured mapper set.
pub struct AnyTypeMapper;

impl MapperStrategy for AnyTypeMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        for child in feature.children() {
            let Some(nested) = child.as_complex() else {
                continue;
            };
            match ctx.try_resolve(nested.type_name.as_str()) {
                Some(strategy) => strategy.map(nested, ctx)?,
                None => {
                    tracing::debug!(
                        type_name = nested.type_name.as_str(),
                        local_name = nested.local_name.as_str(),
                        "skipping unmapped nested type"
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Attribute, SimpleAttribute};
    use crate::mapper::{MapperRegistry, ReferenceMapper};
    use crate::sink::GraphCollectorSink;
    use std::sync::Arc;

    #[test]
    fn test_skips_unmapped_children_and_continues() {
        let mut registry = MapperRegistry::new();
        registry.register("ReferenceType", Arc::new(ReferenceMapper));

        // First child unmapped, second child mapped: the second must still
        // be translated.
        let container = ComplexFeature::new(
            "AnyType",
            "members",
            vec![
                Attribute::Complex(ComplexFeature::new("MysteryType", "mystery", vec![])),
                Attribute::Complex(ComplexFeature::new(
                    "ReferenceType",
                    "related",
                    vec![Attribute::Simple(SimpleAttribute::new(
                        "href",
                        "href",
                        "http://example.org/thing/7",
                    ))],
                )),
            ],
        );

        let mut sink = GraphCollectorSink::new();
        {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ctx.begin().unwrap();
            AnyTypeMapper.map(&container, &mut ctx).unwrap();
            ctx.commit().unwrap();
        }

        assert_eq!(sink.statements().len(), 1);
        assert_eq!(
            sink.statements()[0].object.as_iri(),
            Some("http://example.org/thing/7")
        );
    }

    #[test]
    fn test_leaf_children_are_ignored() {
        let registry = MapperRegistry::new();
        let container = ComplexFeature::new(
            "AnyType",
            "members",
            vec![Attribute::Simple(SimpleAttribute::new("id", "id", "x"))],
        );
        let mut sink = GraphCollectorSink::new();
        {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ctx.begin().unwrap();
            AnyTypeMapper.map(&container, &mut ctx).unwrap();
            ctx.commit().unwrap();
        }
        assert!(sink.statements().is_empty());
    }
}
