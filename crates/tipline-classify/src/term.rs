//! Restricted terms: words or phrases whose presence mandates a minimum
//! classification level. The list is externally administered and mutable;
//! the engine only ever consumes a snapshot of it.

use serde::{Deserialize, Serialize};

use crate::level::ClassificationLevel;

/// A restricted term and the minimum level its presence demands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedTerm {
    /// The word or phrase to match (whole-word, case-insensitive).
    pub term: String,
    /// Level forced by a match.
    pub level: ClassificationLevel,
}

impl RestrictedTerm {
    pub fn new(term: impl Into<String>, level: ClassificationLevel) -> Self {
        Self {
            term: term.into(),
            level,
        }
    }
}
