//! Conversion driver
//!
//! Orchestrates the top-level walk: rejects service exception payloads
//! before touching the sink, opens one unit of work, dispatches each
//! top-level member to its mapper, and commits. A missing mapper at this
//! depth is fatal; nothing is committed on any failure.

use crate::context::ConversionContext;
use crate::error::{Gml2RdfError, Result};
use crate::feature::{Attribute, ComplexFeature};
use crate::vocab::{gml, ows};

/// Drives one conversion over a built feature tree
pub struct ConversionDriver;

impl ConversionDriver {
    /// Convert the root feature's members into RDF statements
    pub fn convert(root: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        if is_exception_report(root) {
            return Err(Gml2RdfError::service(exception_message(root)));
        }

        ctx.begin()?;
        let mut member_count = 0usize;
        for child in root.children() {
            let Some(member) = child.as_complex() else {
                continue;
            };
            if is_structural(member) {
                continue;
            }
            member_count += 1;
            for grandchild in member.children() {
                let Some(feature) = grandchild.as_complex() else {
                    continue;
                };
                if is_structural(feature) {
                    continue;
                }
                let strategy = ctx.resolve(feature.type_name.as_str())?;
                strategy.map(feature, ctx)?;
            }
        }
        ctx.commit()?;

        tracing::debug!(member_count, "conversion complete");
        Ok(())
    }
}

/// Whether the root is a service-level error payload
fn is_exception_report(root: &ComplexFeature) -> bool {
    root.type_name == ows::EXCEPTION_REPORT || root.type_name == ows::EXCEPTION_REPORT_TYPE
}

/// Service-reported message from an exception report
///
/// Descends Exception → ExceptionText; falls back to the first leaf value
/// anywhere in the report.
fn exception_message(root: &ComplexFeature) -> String {
    let text = root
        .find_first_by_local(ows::EXCEPTION)
        .and_then(|e| e.as_complex())
        .and_then(|e| e.child_value_by_local(ows::EXCEPTION_TEXT))
        .or_else(|| first_leaf_value(root));
    text.unwrap_or("service returned an exception report").to_string()
}

/// Structural noise the walk skips: bounding boxes and envelopes
fn is_structural(feature: &ComplexFeature) -> bool {
    feature.local_name == gml::BOUNDED_BY
        || feature.type_name == gml::BOUNDING_SHAPE_TYPE
        || feature.type_name == gml::ENVELOPE_TYPE
}

fn first_leaf_value(feature: &ComplexFeature) -> Option<&str> {
    for child in feature.children() {
        match child {
            Attribute::Simple(s) => return Some(&s.value),
            Attribute::Complex(c) => {
                if let Some(value) = first_leaf_value(c) {
                    return Some(value);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::SimpleAttribute;
    use crate::mapper::{MapperRegistry, OntologyOption};
    use crate::sink::GraphCollectorSink;

    fn leaf(type_name: &str, local: &str, value: &str) -> Attribute {
        Attribute::Simple(SimpleAttribute::new(type_name, local, value))
    }

    fn exception_report() -> ComplexFeature {
        ComplexFeature::new(
            "ExceptionReportType",
            "ExceptionReport",
            vec![Attribute::Complex(ComplexFeature::new(
                "ExceptionType",
                "Exception",
                vec![leaf("ExceptionText", "ExceptionText", "Invalid typeName")],
            ))],
        )
    }

    #[test]
    fn test_exception_report_rejected_before_sink_opens() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        let mut sink = GraphCollectorSink::new();
        let err = {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ConversionDriver::convert(&exception_report(), &mut ctx).unwrap_err()
        };

        match err {
            Gml2RdfError::ServiceException { message } => {
                assert_eq!(message, "Invalid typeName")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.begin_count(), 0);
        assert_eq!(sink.commit_count(), 0);
        assert!(sink.statements().is_empty());
    }

    #[test]
    fn test_unmapped_member_is_fatal_and_uncommitted() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        let root = ComplexFeature::new(
            "FeatureCollectionType",
            "FeatureCollection",
            vec![Attribute::Complex(ComplexFeature::new(
                "featureMember",
                "featureMember",
                vec![Attribute::Complex(ComplexFeature::new(
                    "UnheardOfType",
                    "UnheardOf",
                    vec![],
                ))],
            ))],
        );

        let mut sink = GraphCollectorSink::new();
        let err = {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ConversionDriver::convert(&root, &mut ctx).unwrap_err()
        };

        match err {
            Gml2RdfError::UnmappedType { type_name } => assert_eq!(type_name, "UnheardOfType"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.commit_count(), 0);
    }

    #[test]
    fn test_bounded_by_is_skipped() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        let root = ComplexFeature::new(
            "FeatureCollectionType",
            "FeatureCollection",
            vec![
                Attribute::Complex(ComplexFeature::new(
                    "BoundingShapeType",
                    "boundedBy",
                    vec![Attribute::Complex(ComplexFeature::new(
                        "EnvelopeType",
                        "Envelope",
                        vec![],
                    ))],
                )),
                Attribute::Complex(ComplexFeature::new(
                    "featureMember",
                    "featureMember",
                    vec![Attribute::Complex(ComplexFeature::new(
                        "TimePeriodType",
                        "TimePeriod",
                        vec![
                            leaf("TimePositionType", "beginPosition", "2020-01-01"),
                            leaf("TimePositionType", "endPosition", "2020-01-02"),
                        ],
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
            ConversionDriver::convert(&root, &mut ctx).unwrap();
        }
        // The envelope contributed nothing; the period did
        assert_eq!(sink.begin_count(), 1);
        assert_eq!(sink.commit_count(), 1);
        assert!(!sink.statements().is_empty());
    }
}
