//! Temporal mappers: TimePeriod and phenomenonTime wrappers

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::ComplexFeature;
use crate::mapper::MapperStrategy;
use crate::term::RdfTerm;
use crate::vocab::{rdf, time, xsd};

/// Maps a GML TimePeriod to an OWL-Time interval
///
/// Begin and end are read by local name (`beginPosition`/`endPosition`)
/// first, falling back to the first and second `TimePositionType` children
/// in document order.
pub struct TimePeriodMapper;

impl MapperStrategy for TimePeriodMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = interval_subject(feature, ctx);

        ctx.insert(&subject, &RdfTerm::iri(rdf::TYPE), &RdfTerm::iri(time::INTERVAL))?;
        if let Some(begin) = begin_position(feature) {
            ctx.insert(
                &subject,
                &RdfTerm::iri(time::HAS_BEGINNING),
                &temporal_literal(begin),
            )?;
        }
        if let Some(end) = end_position(feature) {
            ctx.insert(&subject, &RdfTerm::iri(time::HAS_END), &temporal_literal(end))?;
        }
        Ok(())
    }
}

/// Maps a phenomenonTime wrapper by delegating its nested time object
///
/// The wrapper itself emits nothing; the nested TimePeriod (or other
/// registered time object) produces the interval statements.
pub struct PhenomenonTimeMapper;

impl MapperStrategy for PhenomenonTimeMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        for child in feature.children() {
            let Some(nested) = child.as_complex() else {
                continue;
            };
            if let Some(strategy) = ctx.try_resolve(nested.type_name.as_str()) {
                strategy.map(nested, ctx)?;
            }
        }
        Ok(())
    }
}

/// Subject for a time period: `gml:id` when present, a deterministic
/// begin/end-derived local otherwise
///
/// Content-derived so repeated conversions of the same payload emit
/// identical subjects.
pub(crate) fn interval_subject(feature: &ComplexFeature, ctx: &ConversionContext<'_>) -> RdfTerm {
    if let Some(id) = feature.child_value_by_local("id") {
        return RdfTerm::iri(ctx.uri(id));
    }
    let begin = begin_position(feature).unwrap_or("unknown");
    let end = end_position(feature).unwrap_or("unknown");
    RdfTerm::iri(ctx.uri(&format!("interval/{begin}/{end}")))
}

fn begin_position(feature: &ComplexFeature) -> Option<&str> {
    feature
        .child_value_by_local("beginPosition")
        .or_else(|| positions(feature).first().and_then(|a| a.lexical_value()))
}

fn end_position(feature: &ComplexFeature) -> Option<&str> {
    feature
        .child_value_by_local("endPosition")
        .or_else(|| positions(feature).get(1).and_then(|a| a.lexical_value()))
}

fn positions(feature: &ComplexFeature) -> Vec<&crate::feature::Attribute> {
    feature.find_children("TimePositionType")
}

/// Turn a temporal lexical form into the matching typed literal
///
/// Unrecognized forms pass through as plain literals; interpretation is
/// best-effort because time positions in the wild carry frames and
/// truncations this subsystem does not model.
pub(crate) fn temporal_literal(value: &str) -> RdfTerm {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return RdfTerm::typed(value, xsd::DATE_TIME);
    }
    if NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok() {
        return RdfTerm::typed(value, xsd::DATE_TIME);
    }
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return RdfTerm::typed(value, xsd::DATE);
    }
    tracing::warn!(value, "unrecognized temporal lexical form");
    RdfTerm::string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Attribute, SimpleAttribute};
    use crate::mapper::MapperRegistry;
    use crate::sink::GraphCollectorSink;

    fn time_period(id: Option<&str>) -> ComplexFeature {
        let mut children = Vec::new();
        if let Some(id) = id {
            children.push(Attribute::Simple(SimpleAttribute::new("id", "id", id)));
        }
        children.push(Attribute::Simple(SimpleAttribute::new(
            "TimePositionType",
            "beginPosition",
            "2020-01-01",
        )));
        children.push(Attribute::Simple(SimpleAttribute::new(
            "TimePositionType",
            "endPosition",
            "2020-01-02",
        )));
        ComplexFeature::new("TimePeriodType", "TimePeriod", children)
    }

    #[test]
    fn test_time_period_emits_interval() {
        let registry = MapperRegistry::new();
        let mut sink = GraphCollectorSink::new();
        {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ctx.begin().unwrap();
            TimePeriodMapper.map(&time_period(Some("tp1")), &mut ctx).unwrap();
            ctx.commit().unwrap();
        }

        let statements = sink.statements();
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[0].subject.as_iri(),
            Some("http://example.org/id/tp1")
        );
        assert_eq!(statements[1].predicate.as_iri(), Some(time::HAS_BEGINNING));
        assert_eq!(statements[1].object.as_literal(), Some("2020-01-01"));
        assert_eq!(statements[2].predicate.as_iri(), Some(time::HAS_END));
        assert_eq!(statements[2].object.as_literal(), Some("2020-01-02"));
    }

    #[test]
    fn test_interval_subject_without_id_is_deterministic() {
        let registry = MapperRegistry::new();
        let mut sink = GraphCollectorSink::new();
        let ctx = ConversionContext::new(
            &mut sink,
            &registry,
            "http://example.org/graph",
            "http://example.org/id",
        );
        let a = interval_subject(&time_period(None), &ctx);
        let b = interval_subject(&time_period(None), &ctx);
        assert_eq!(a, b);
        assert_eq!(
            a.as_iri(),
            Some("http://example.org/id/interval/2020-01-01/2020-01-02")
        );
    }

    #[test]
    fn test_temporal_literal_datatypes() {
        match temporal_literal("2020-01-01T00:00:00Z") {
            RdfTerm::Literal { datatype, .. } => {
                assert_eq!(datatype.as_deref(), Some(xsd::DATE_TIME))
            }
            _ => panic!("expected literal"),
        }
        match temporal_literal("2020-01-01") {
            RdfTerm::Literal { datatype, .. } => assert_eq!(datatype.as_deref(), Some(xsd::DATE)),
            _ => panic!("expected literal"),
        }
        match temporal_literal("around noon") {
            RdfTerm::Literal { datatype, .. } => assert_eq!(datatype, None),
            _ => panic!("expected literal"),
        }
    }
}
