//! Code-list mapper: controlled-vocabulary values

use crate::context::ConversionContext;
use crate::error::Result;
use crate::feature::ComplexFeature;
use crate::mapper::{feature_subject, MapperStrategy};
use crate::term::RdfTerm;
use crate::vocab::skos;

/// Maps a GML code value to either a vocabulary URI or a plain literal
///
/// A code referencing an http(s) code space (or carried as an `xlink:href`
/// reference) links via skos:exactMatch; a free-text code becomes a
/// skos:notation literal. This is the terminal, leaf-oriented strategy:
/// complex children it does not recognize are logged rather than silently
/// dropped.
pub struct CodeListMapper;

impl MapperStrategy for CodeListMapper {
    fn map(&self, feature: &ComplexFeature, ctx: &mut ConversionContext<'_>) -> Result<()> {
        let subject = feature_subject(feature, ctx);

        if let Some(href) = feature.child_value_by_local("href") {
            return ctx.insert(&subject, &RdfTerm::iri(skos::EXACT_MATCH), &RdfTerm::iri(href));
        }

        let code_space = feature.child_value_by_local("codeSpace");
        let value = feature.child_value_by_local(&feature.local_name);

        if let Some(value) = value {
            let object = match code_space {
                Some(space) if space.starts_with("http://") || space.starts_with("https://") => {
                    let sep = if space.ends_with('/') || space.ends_with('#') {
                        ""
                    } else {
                        "/"
                    };
                    return ctx.insert(
                        &subject,
                        &RdfTerm::iri(skos::EXACT_MATCH),
                        &RdfTerm::iri(format!("{space}{sep}{value}")),
                    );
                }
                _ => RdfTerm::string(value),
            };
            return ctx.insert(&subject, &RdfTerm::iri(skos::NOTATION), &object);
        }

        for child in feature.children() {
            if let Some(nested) = child.as_complex() {
                tracing::warn!(
                    type_name = nested.type_name.as_str(),
                    local_name = nested.local_name.as_str(),
                    "ignoring unexpected child of code value"
                );
            }
        }
        Ok(())
    }
}
