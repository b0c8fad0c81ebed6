//! Content scanning against the restricted-term list.
//!
//! Matching is whole-word and case-insensitive. Every term is escaped before
//! compilation so literal regex metacharacters in a term ("c++", "a.b") can
//! never alter matching semantics. A term whose pattern still fails to
//! compile is skipped with a warning rather than aborting the scan of the
//! remaining terms.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::level::ClassificationLevel;
use crate::term::RestrictedTerm;

/// Result of scanning one text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Whether any restricted term matched.
    pub matched: bool,
    /// Join of all matched terms' levels; U when nothing matched.
    pub level: ClassificationLevel,
}

impl ScanOutcome {
    /// No match; the identity contribution.
    pub fn clean() -> Self {
        Self {
            matched: false,
            level: ClassificationLevel::Unclassified,
        }
    }
}

/// A term list compiled for repeated scanning.
///
/// Compiled once per list change, then reused on every recomputation pass;
/// scanning itself allocates nothing.
#[derive(Debug, Default)]
pub struct ContentScanner {
    patterns: Vec<(Regex, ClassificationLevel)>,
}

impl ContentScanner {
    /// Compile a scanner from the current term list.
    pub fn new(terms: &[RestrictedTerm]) -> Self {
        let mut patterns = Vec::with_capacity(terms.len());
        for term in terms {
            let word = term.term.trim();
            if word.is_empty() {
                warn!("skipping empty restricted term");
                continue;
            }
            let pattern = format!(r"\b{}\b", regex::escape(word));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => patterns.push((re, term.level)),
                Err(err) => {
                    warn!(term = %term.term, %err, "skipping uncompilable restricted term");
                }
            }
        }
        Self { patterns }
    }

    /// Number of terms that compiled.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Scan a text field. Empty text or an empty term list scans clean.
    pub fn scan(&self, text: &str) -> ScanOutcome {
        if text.is_empty() || self.patterns.is_empty() {
            return ScanOutcome::clean();
        }

        let mut matched = false;
        let mut level = ClassificationLevel::Unclassified;
        for (re, term_level) in &self.patterns {
            if re.is_match(text) {
                matched = true;
                level = level.join(*term_level);
            }
        }

        ScanOutcome { matched, level }
    }
}
