//! Reference mapper: xlink:href properties become direct object-URI edges

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::ComplexFeature;
use crate::mapper::{feature_subject, MapperStrategy};
use crate::term::RdfTerm;
use crate::vocab::{rdfs, sosa};

/// Emits one edge from the derived subject to the referenced URI
///
/// The predicate is chosen from the property element's local name where an
/// O&M role is recognizable; anything else links via rdfs:seeAlso.
pub struct ReferenceMapper;

impl MapperStrategy for ReferenceMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let Some(href) = feature.child_value_by_local("href") else {
            tracing::warn!(
                local_name = feature.local_name.as_str(),
                "reference without xlink:href, nothing to emit"
            );
            return Ok(());
        };
        let subject = feature_subject(feature, ctx);
        let predicate = predicate_for(&feature.local_name);
        ctx.insert(&subject, &RdfTerm::iri(predicate), &RdfTerm::iri(href))
    }
}

fn predicate_for(local_name: &str) -> &'static str {
    match local_name {
        "procedure" => sosa::USED_PROCEDURE,
        "featureOfInterest" => sosa::HAS_FEATURE_OF_INTEREST,
        "observedProperty" => sosa::OBSERVED_PROPERTY,
        _ => rdfs::SEE_ALSO,
    }
}
