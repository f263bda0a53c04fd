//! O&M observation mappers
//!
//! One strategy per SOS/O&M concept: collections, observations, features of
//! interest, observed properties, procedures, results, and WaterML
//! measurement timeseries. Each derives its own subject from the base URI
//! and delegates nested features it recognizes back through the registry.

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::{Attribute, ComplexFeature};
use crate::mapper::{feature_subject, MapperStrategy};
use crate::term::RdfTerm;
use crate::vocab::{rdf, rdfs, sosa, xsd};

use super::time::{interval_subject, temporal_literal};

/// Maps an observation collection: membership edges plus delegated members
pub struct ObservationCollectionMapper;

impl MapperStrategy for ObservationCollectionMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::OBSERVATION_COLLECTION),
        )?;

        for child in feature.children() {
            let Some(member) = child.as_complex() else {
                continue;
            };
            // Member wrappers hold the observation one level down
            for grandchild in member.children() {
                let Some(nested) = grandchild.as_complex() else {
                    continue;
                };
                if let Some(strategy) = ctx.try_resolve(nested.type_name.as_str()) {
                    let member_subject = feature_subject(nested, ctx);
                    ctx.insert(&subject, &RdfTerm::iri(sosa::HAS_MEMBER), &member_subject)?;
                    strategy.map(nested, ctx)?;
                }
            }
        }
        Ok(())
    }
}

/// Maps one OM_Observation to a sosa:Observation shape
pub struct OmObservationMapper;

impl MapperStrategy for OmObservationMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::OBSERVATION),
        )?;

        for child in feature.children() {
            // Schema-less payloads can carry result/resultTime as bare text
            if let Some(leaf) = child.as_simple() {
                match leaf.local_name.as_str() {
                    "result" => {
                        ctx.insert(
                            &subject,
                            &RdfTerm::iri(sosa::HAS_SIMPLE_RESULT),
                            &measure_literal(&leaf.value),
                        )?;
                    }
                    "resultTime" => {
                        ctx.insert(
                            &subject,
                            &RdfTerm::iri(sosa::RESULT_TIME),
                            &temporal_literal(&leaf.value),
                        )?;
                    }
                    _ => {}
                }
                continue;
            }
            let Some(property) = child.as_complex() else {
                continue;
            };
            match property.local_name.as_str() {
                "phenomenonTime" => self.map_phenomenon_time(&subject, property, ctx)?,
                "resultTime" => self.map_result_time(&subject, property, ctx)?,
                "procedure" => {
                    self.map_role(&subject, sosa::USED_PROCEDURE, property, ctx)?;
                }
                "observedProperty" => {
                    self.map_role(&subject, sosa::OBSERVED_PROPERTY, property, ctx)?;
                }
                "featureOfInterest" => {
                    self.map_role(&subject, sosa::HAS_FEATURE_OF_INTEREST, property, ctx)?;
                }
                "result" => self.map_result(&subject, property, ctx)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl OmObservationMapper {
    /// phenomenonTime: link the interval, then translate it
    fn map_phenomenon_time(
        &self,
        observation: &RdfTerm,
        property: &ComplexFeature,
        ctx: &mut ConversionContext<'_>,
    ) -> Result<()> {
        for child in property.children() {
            let Some(period) = child.as_complex() else {
                continue;
            };
            if period.type_name == "TimePeriodType" {
                let interval = interval_subject(period, ctx);
                ctx.insert(observation, &RdfTerm::iri(sosa::PHENOMENON_TIME), &interval)?;
            }
            if let Some(strategy) = ctx.try_resolve(period.type_name.as_str()) {
                strategy.map(period, ctx)?;
            }
        }
        Ok(())
    }

    /// resultTime: a single temporal literal from the nested time position
    fn map_result_time(
        &self,
        observation: &RdfTerm,
        property: &ComplexFeature,
        ctx: &mut ConversionContext<'_>,
    ) -> Result<()> {
        if let Some(value) = first_leaf_value(property) {
            ctx.insert(
                observation,
                &RdfTerm::iri(sosa::RESULT_TIME),
                &temporal_literal(value),
            )?;
        }
        Ok(())
    }

    /// procedure / observedProperty / featureOfInterest: href edge or
    /// inline feature
    fn map_role(
        &self,
        observation: &RdfTerm,
        predicate: &'static str,
        property: &ComplexFeature,
        ctx: &mut ConversionContext<'_>,
    ) -> Result<()> {
        if let Some(href) = property.child_value_by_local("href") {
            return ctx.insert(observation, &RdfTerm::iri(predicate), &RdfTerm::iri(href));
        }
        for child in property.children() {
            let Some(inline) = child.as_complex() else {
                continue;
            };
            if let Some(strategy) = ctx.try_resolve(inline.type_name.as_str()) {
                let inline_subject = feature_subject(inline, ctx);
                ctx.insert(observation, &RdfTerm::iri(predicate), &inline_subject)?;
                strategy.map(inline, ctx)?;
            }
        }
        Ok(())
    }

    /// result: simple lexical results inline, complex results delegated
    fn map_result(
        &self,
        observation: &RdfTerm,
        property: &ComplexFeature,
        ctx: &mut ConversionContext<'_>,
    ) -> Result<()> {
        let complex_children: Vec<&ComplexFeature> = property
            .children()
            .iter()
            .filter_map(Attribute::as_complex)
            .collect();

        if complex_children.is_empty() {
            if let Some(value) = property.lexical_value().or_else(|| first_leaf_value(property)) {
                let object = result_literal(property, value);
                return ctx.insert(observation, &RdfTerm::iri(sosa::HAS_SIMPLE_RESULT), &object);
            }
            return Ok(());
        }

        for nested in complex_children {
            if let Some(strategy) = ctx.try_resolve(nested.type_name.as_str()) {
                let result_subject = feature_subject(nested, ctx);
                ctx.insert(observation, &RdfTerm::iri(sosa::HAS_RESULT), &result_subject)?;
                strategy.map(nested, ctx)?;
            }
        }
        Ok(())
    }
}

/// Maps a sampling feature of interest
pub struct FeatureOfInterestMapper;

impl MapperStrategy for FeatureOfInterestMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::FEATURE_OF_INTEREST_CLASS),
        )?;
        if let Some(name) = feature
            .find_first_by_local("name")
            .and_then(|n| n.lexical_value())
        {
            ctx.insert(&subject, &RdfTerm::iri(rdfs::LABEL), &RdfTerm::string(name))?;
        }
        if let Some(sampled) = feature
            .find_first_by_local("sampledFeature")
            .and_then(|s| s.as_complex())
            .and_then(|s| s.child_value_by_local("href"))
        {
            ctx.insert(
                &subject,
                &RdfTerm::iri(sosa::IS_SAMPLE_OF),
                &RdfTerm::iri(sampled),
            )?;
        }
        Ok(())
    }
}

/// Maps an inline observable property definition
pub struct ObservedPropertyMapper;

impl MapperStrategy for ObservedPropertyMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::OBSERVABLE_PROPERTY),
        )?;
        if let Some(name) = feature
            .find_first_by_local("name")
            .and_then(|n| n.lexical_value())
        {
            ctx.insert(&subject, &RdfTerm::iri(rdfs::LABEL), &RdfTerm::string(name))?;
        }
        Ok(())
    }
}

/// Maps an inline procedure/process description
pub struct ProcedureMapper;

impl MapperStrategy for ProcedureMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::PROCEDURE),
        )?;
        if let Some(name) = feature
            .find_first_by_local("name")
            .and_then(|n| n.lexical_value())
        {
            ctx.insert(&subject, &RdfTerm::iri(rdfs::LABEL), &RdfTerm::string(name))?;
        }
        Ok(())
    }
}

/// Maps a standalone measure result (value + unit of measure)
pub struct OmResultMapper;

impl MapperStrategy for OmResultMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let Some(value) = feature.lexical_value() else {
            return Ok(());
        };
        let subject = feature_subject(feature, ctx);
        let object = result_literal(feature, value);
        ctx.insert(&subject, &RdfTerm::iri(sosa::HAS_SIMPLE_RESULT), &object)
    }
}

/// Maps a WaterML measurement timeseries
///
/// Each time/value point becomes a member observation on a deterministic
/// blank node, preserving point order.
pub struct MeasurementTimeseriesMapper;

impl MapperStrategy for MeasurementTimeseriesMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);
        ctx.insert(
            &subject,
            &RdfTerm::iri(rdf::TYPE),
            &RdfTerm::iri(sosa::OBSERVATION_COLLECTION),
        )?;

        let series_local = feature
            .child_value_by_local("id")
            .unwrap_or(&feature.local_name)
            .to_string();
        let mut index = 0usize;
        for point in collect_points(feature) {
            let node = RdfTerm::blank_node(format!("{series_local}-p{index}"));
            index += 1;
            ctx.insert(&subject, &RdfTerm::iri(sosa::HAS_MEMBER), &node)?;
            if let Some(time) = point.child_value_by_local("time") {
                ctx.insert(&node, &RdfTerm::iri(sosa::RESULT_TIME), &temporal_literal(time))?;
            }
            if let Some(value) = point
                .find_first_by_local("value")
                .and_then(|v| v.lexical_value())
            {
                ctx.insert(
                    &node,
                    &RdfTerm::iri(sosa::HAS_SIMPLE_RESULT),
                    &measure_literal(value),
                )?;
            }
        }
        Ok(())
    }
}

/// Time/value pairs of a timeseries, in document order
fn collect_points(feature: &ComplexFeature) -> Vec<&ComplexFeature> {
    let mut points = Vec::new();
    for child in feature.children() {
        let Some(wrapper) = child.as_complex() else {
            continue;
        };
        if wrapper.local_name != "point" {
            continue;
        }
        for grandchild in wrapper.children() {
            if let Some(tvp) = grandchild.as_complex() {
                points.push(tvp);
            }
        }
    }
    points
}

/// First leaf value anywhere under the property, in document order
fn first_leaf_value(property: &ComplexFeature) -> Option<&str> {
    for child in property.children() {
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

/// Typed literal for a measure value, numeric when it parses as one
fn measure_literal(value: &str) -> RdfTerm {
    if value.parse::<f64>().is_ok() {
        RdfTerm::typed(value, xsd::DOUBLE)
    } else {
        RdfTerm::string(value)
    }
}

/// Result literal: numeric values become xsd:double
fn result_literal(feature: &ComplexFeature, value: &str) -> RdfTerm {
    if value.parse::<f64>().is_ok() {
        return RdfTerm::typed(value, xsd::DOUBLE);
    }
    if let Some(uom) = feature.child_value_by_local("uom") {
        tracing::warn!(uom, value, "non-numeric measure value");
    }
    RdfTerm::string(value)
}
