//! Error types for the classification engine.

use thiserror::Error;

/// Errors that can occur while resolving or submitting a report's
/// classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A classification level token from upstream data was not one of
    /// U / CUI / CUIREL. Never silently coerced: this indicates a
    /// data-integrity problem in whatever produced the value.
    #[error("unknown classification level: {0:?}")]
    InvalidLevel(String),

    /// An image is attached but has not been run through the image
    /// classification collaborator. Blocks submission entirely.
    #[error("attached image has not been classified")]
    ImageNotClassified,

    /// The image classification collaborator failed. Prior image state is
    /// left unchanged.
    #[error("image classification failed: {0}")]
    ImageClassification(String),

    /// The restricted-term list could not be fetched. Non-fatal: scanning
    /// degrades to "no matches" until a list is supplied.
    #[error("restricted term list unavailable: {0}")]
    TermListUnavailable(String),
}

/// Result type for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;
