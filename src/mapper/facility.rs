//! Environmental monitoring facility mapper

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::ComplexFeature;
use crate::mapper::{feature_subject, MapperStrategy};
use crate::term::RdfTerm;
use crate::vocab::{rdf, rdfs, sosa};

/// Maps an INSPIRE EF monitoring facility
///
/// Emits the facility's identity (type + label), then delegates recognized
/// nested children (operational period, media codes, references) through
/// the registry. Unrecognized children are ignored; facility payloads carry
/// plenty of structure outside the configured mapper set.
pub struct MonitoringFacilityMapper;

impl MapperStrategy for MonitoringFacilityMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);

        ctx.insert(&subject, &RdfTerm::iri(rdf::TYPE), &RdfTerm::iri(sosa::PLATFORM))?;
        if let Some(name) = feature
            .find_first_by_local("name")
            .and_then(|n| n.lexical_value())
        {
            ctx.insert(&subject, &RdfTerm::iri(rdfs::LABEL), &RdfTerm::string(name))?;
        }

        for child in feature.children() {
            let Some(nested) = child.as_complex() else {
                continue;
            };
            // Operational periods hang off the facility as interval edges
            if nested.local_name == "operationalActivityPeriod" {
                self.map_activity_period(&subject, nested, ctx)?;
                continue;
            }
            if let Some(strategy) = ctx.try_resolve(nested.type_name.as_str()) {
                strategy.map(nested, ctx)?;
            }
        }
        Ok(())
    }
}

impl MonitoringFacilityMapper {
    /// Link the facility to its operational interval and translate it
    ///
    /// The TimePeriod sits at varying depth under the wrapper (EF nests it
    /// under an OperationalActivityPeriod and an activityTime property);
    /// the first one in document order wins.
    fn map_activity_period(
        &self,
        facility: &RdfTerm,
        period_wrapper: &ComplexFeature,
        ctx: &mut ConversionContext<'_>,
    ) -> Result<()> {
        if let Some(period) = find_time_period(period_wrapper) {
            let interval = super::time::interval_subject(period, ctx);
            ctx.insert(facility, &RdfTerm::iri(sosa::PHENOMENON_TIME), &interval)?;
            ctx.resolve(period.type_name.as_str())?.map(period, ctx)?;
        }
        Ok(())
    }
}

/// First TimePeriod descendant in document order
fn find_time_period(feature: &ComplexFeature) -> Option<&ComplexFeature> {
    for child in feature.children() {
        let Some(nested) = child.as_complex() else {
            continue;
        };
        if nested.type_name == "TimePeriodType" {
            return Some(nested);
        }
        if let Some(found) = find_time_period(nested) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Attribute, SimpleAttribute};
    use crate::mapper::{MapperRegistry, OntologyOption};
    use crate::sink::GraphCollectorSink;

    fn facility() -> ComplexFeature {
        ComplexFeature::new(
            "EnvironmentalMonitoringFacilityType",
            "EnvironmentalMonitoringFacility",
            vec![
                Attribute::Simple(SimpleAttribute::new("id", "id", "station-1")),
                Attribute::Simple(SimpleAttribute::new("CodeType", "name", "Station Alpha")),
                Attribute::Complex(ComplexFeature::new(
                    "ReferenceType",
                    "mediaMonitored",
                    vec![Attribute::Simple(SimpleAttribute::new(
                        "href",
                        "href",
                        "http://example.org/codelist/MediaValue/water",
                    ))],
                )),
            ],
        )
    }

    #[test]
    fn test_identity_and_delegation() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        let mut sink = GraphCollectorSink::new();
        {
            let mut ctx = ConversionContext::new(
                &mut sink,
                &registry,
                "http://example.org/graph",
                "http://example.org/id",
            );
            ctx.begin().unwrap();
            MonitoringFacilityMapper.map(&facility(), &mut ctx).unwrap();
            ctx.commit().unwrap();
        }

        let statements = sink.statements();
        assert_eq!(
            statements[0].subject.as_iri(),
            Some("http://example.org/id/station-1")
        );
        assert_eq!(statements[0].object.as_iri(), Some(sosa::PLATFORM));
        assert_eq!(statements[1].predicate.as_iri(), Some(rdfs::LABEL));
        assert_eq!(statements[1].object.as_literal(), Some("Station Alpha"));

        // The mediaMonitored reference was delegated to the ReferenceMapper
        assert!(statements.iter().any(|s| {
            s.object.as_iri() == Some("http://example.org/codelist/MediaValue/water")
        }));
    }

    #[test]
    fn test_unrecognized_children_are_ignored() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        let mut feature_children = facility().children().to_vec();
        feature_children.push(Attribute::Complex(ComplexFeature::new(
            "VendorExtensionType",
            "vendorExtension",
            vec![],
        )));
        let feature = ComplexFeature::new(
            "EnvironmentalMonitoringFacilityType",
            "EnvironmentalMonitoringFacility",
            feature_children,
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
            MonitoringFacilityMapper.map(&feature, &mut ctx).unwrap();
            ctx.commit().unwrap();
        }
        // No failure, extension contributed nothing
        assert!(!sink.statements().is_empty());
    }
}
