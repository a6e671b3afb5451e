//! Error types for plan ingestion.

use thiserror::Error;

/// Errors raised while validating plan data coming from outside the editor.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The payload was valid JSON but not an array of elements.
    #[error("Layout payload is not a sequence of elements")]
    NotASequence,

    /// An entry was not an object.
    #[error("Element {index} is not an object")]
    InvalidDescriptor { index: usize },

    /// A required field was absent or had the wrong JSON type.
    #[error("Element {index} is missing field '{field}' or it has the wrong type")]
    MissingField { index: usize, field: &'static str },

    /// An entry named a type outside the element catalog.
    #[error("Element {index} has unknown type '{name}'")]
    UnknownElementType { index: usize, name: String },

    /// The layout service itself failed.
    #[error("Layout generation failed: {0}")]
    Generator(String),

    /// The payload was not valid JSON.
    #[error("Malformed layout JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;
