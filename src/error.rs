//! Error types for GML-to-RDF conversion

use thiserror::Error;

/// Errors surfaced by tree building, mapper dispatch, and the conversion driver
#[derive(Debug, Error)]
pub enum Gml2RdfError {
    /// Input XML is not well-formed or violates the supplied schema
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// The service returned an OWS exception report instead of a payload
    #[error("Service exception: {message}")]
    ServiceException { message: String },

    /// No mapper strategy is registered for a type name
    #[error("No mapper registered for type: {type_name}")]
    UnmappedType { type_name: String },

    /// A schema document could not be resolved or read
    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    /// The RDF sink rejected a write
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Gml2RdfError>;

impl Gml2RdfError {
    /// Create a malformed-input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a service-exception error
    pub fn service(message: impl Into<String>) -> Self {
        Self::ServiceException {
            message: message.into(),
        }
    }

    /// Create an unmapped-type error
    pub fn unmapped(type_name: impl Into<String>) -> Self {
        Self::UnmappedType {
            type_name: type_name.into(),
        }
    }
}
