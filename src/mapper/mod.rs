//! Mapper registry and strategies
//!
//! A mapper strategy knows how to emit RDF statements for one complex
//! feature type; the registry maps type names to strategy instances. The
//! registry for an ontology option is populated once and read-only
//! afterwards, and strategies hold no per-call state, so one registry is
//! safely shared by reference across concurrently running conversions.

mod code_list;
mod facility;
mod generic;
mod observation;
mod reference;
mod time;

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::context::ConversionContext;
use crate::error::{Gml2RdfError, Result};
use crate::feature::ComplexFeature;
use crate::term::RdfTerm;

pub use code_list::CodeListMapper;
pub use facility::MonitoringFacilityMapper;
pub use generic::AnyTypeMapper;
pub use observation::{
    FeatureOfInterestMapper, MeasurementTimeseriesMapper, ObservationCollectionMapper,
    ObservedPropertyMapper, OmObservationMapper, OmResultMapper, ProcedureMapper,
};
pub use reference::ReferenceMapper;
pub use time::{PhenomenonTimeMapper, TimePeriodMapper};

/// Translation strategy for one complex feature type
///
/// Implementations read only the children they recognize, emit zero or more
/// statements through the context, and may recurse into the registry for
/// nested features. They must hold no per-call state.
pub trait MapperStrategy: Send + Sync {
    /// Emit the RDF statements for `feature`
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()>;
}

/// Which fixed mapper set populates the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum OntologyOption {
    /// INSPIRE EF facilities and O&M observations, emitted as SOSA/OWL-Time
    #[default]
    EmfSosa,
}

/// Type-name to strategy mapping, fixed at configuration time
#[derive(Default)]
pub struct MapperRegistry {
    strategies: HashMap<String, Arc<dyn MapperStrategy>>,
}

impl MapperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under one type name
    pub fn register(&mut self, type_name: impl Into<String>, strategy: Arc<dyn MapperStrategy>) {
        self.strategies.insert(type_name.into(), strategy);
    }

    /// Register one strategy instance under several type names
    pub fn register_all(&mut self, type_names: &[&str], strategy: Arc<dyn MapperStrategy>) {
        for name in type_names {
            self.strategies.insert((*name).to_string(), strategy.clone());
        }
    }

    /// Resolve a strategy; fails with `UnmappedType` on a miss
    pub fn resolve(&self, type_name: &str) -> Result<&dyn MapperStrategy> {
        self.get(type_name)
            .ok_or_else(|| Gml2RdfError::unmapped(type_name))
    }

    /// Look up a strategy, returning `None` on a miss
    pub fn get(&self, type_name: &str) -> Option<&dyn MapperStrategy> {
        self.strategies.get(type_name).map(|s| s.as_ref())
    }

    /// Whether a strategy is registered for the type name
    pub fn contains(&self, type_name: &str) -> bool {
        self.strategies.contains_key(type_name)
    }

    /// Number of registered type names
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registered type names, in no particular order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(|k| k.as_str())
    }

    /// Build the fixed registry for an ontology option
    pub fn for_option(option: OntologyOption) -> Self {
        match option {
            OntologyOption::EmfSosa => Self::emf_sosa(),
        }
    }

    /// The EMF/O&M mapper set
    fn emf_sosa() -> Self {
        let mut registry = Self::new();

        registry.register("ReferenceType", Arc::new(ReferenceMapper));
        registry.register(
            "EnvironmentalMonitoringFacilityType",
            Arc::new(MonitoringFacilityMapper),
        );
        registry.register("TimePeriodType", Arc::new(TimePeriodMapper));
        registry.register_all(
            &["TimeObjectPropertyType", "phenomenonTime"],
            Arc::new(PhenomenonTimeMapper),
        );
        registry.register_all(
            &["CodeType", "CodeWithAuthorityType"],
            Arc::new(CodeListMapper),
        );
        registry.register(
            "ObservationCollectionType",
            Arc::new(ObservationCollectionMapper),
        );
        registry.register("OM_ObservationType", Arc::new(OmObservationMapper));
        registry.register_all(
            &["SF_SpatialSamplingFeatureType", "SamplingPointType"],
            Arc::new(FeatureOfInterestMapper),
        );
        registry.register_all(
            &["ObservablePropertyType", "PhenomenonType"],
            Arc::new(ObservedPropertyMapper),
        );
        registry.register(
            "MeasurementTimeseriesType",
            Arc::new(MeasurementTimeseriesMapper),
        );
        registry.register("MeasureType", Arc::new(OmResultMapper));
        registry.register("ProcessType", Arc::new(ProcedureMapper));

        // One pass-through instance serves every loosely-typed container
        registry.register_all(
            &["AnyType", "FeaturePropertyType", "AbstractFeatureMemberType"],
            Arc::new(AnyTypeMapper),
        );

        registry
    }
}

/// Process-wide registry for the default ontology option
pub fn default_registry() -> &'static MapperRegistry {
    static REGISTRY: Lazy<MapperRegistry> =
        Lazy::new(|| MapperRegistry::for_option(OntologyOption::EmfSosa));
    &REGISTRY
}

/// Registry for an ontology option, shared where the option allows it
pub fn registry_for(option: OntologyOption) -> &'static MapperRegistry {
    match option {
        OntologyOption::EmfSosa => default_registry(),
    }
}

/// Subject URI for a feature: its `gml:id` when present, the element local
/// name otherwise
pub(crate) fn feature_subject(feature: &ComplexFeature, ctx: &ConversionContext<'_>) -> RdfTerm {
    let local = feature
        .child_value_by_local("id")
        .unwrap_or(&feature.local_name);
    RdfTerm::iri(ctx.uri(local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_miss_is_unmapped_type() {
        let registry = MapperRegistry::new();
        let err = registry.resolve("NopeType").err().unwrap();
        match err {
            Gml2RdfError::UnmappedType { type_name } => assert_eq!(type_name, "NopeType"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_all_shares_one_instance() {
        let mut registry = MapperRegistry::new();
        let strategy: Arc<dyn MapperStrategy> = Arc::new(AnyTypeMapper);
        registry.register_all(&["A", "B"], strategy.clone());
        assert!(registry.contains("A"));
        assert!(registry.contains("B"));
        assert_eq!(registry.len(), 2);
        assert_eq!(Arc::strong_count(&strategy), 3);
    }

    #[test]
    fn test_emf_sosa_set_is_populated() {
        let registry = MapperRegistry::for_option(OntologyOption::EmfSosa);
        for type_name in [
            "ReferenceType",
            "EnvironmentalMonitoringFacilityType",
            "TimePeriodType",
            "CodeType",
            "ObservationCollectionType",
            "OM_ObservationType",
            "MeasurementTimeseriesType",
            "ProcessType",
            "AnyType",
        ] {
            assert!(registry.contains(type_name), "missing {type_name}");
        }
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MapperRegistry>();
    }
}
