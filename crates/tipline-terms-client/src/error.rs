//! Error types for the term-list client.

use thiserror::Error;

/// Errors from fetching or decoding the restricted-term list.
#[derive(Debug, Error)]
pub enum TermsClientError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("term list endpoint returned status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON array.
    #[error("failed to decode term list: {0}")]
    Decode(#[from] serde_json::Error),

    /// A record carried a classification token that is not U/CUI/CUIREL.
    /// Unlike the variants above, this is a data-integrity failure and is
    /// never degraded to an empty list.
    #[error("term {term:?} has unknown classification level {value:?}")]
    InvalidLevel { term: String, value: String },
}

/// Result type for term-list client operations.
pub type TermsClientResult<T> = Result<T, TermsClientError>;
