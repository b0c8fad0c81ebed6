//! Per-field scan state and the override gate.
//!
//! Each scanned field carries its own match state and a user-settable
//! override flag. While the override is active, the field contributes
//! nothing to resolution; the moment recomputation finds no match, the
//! override is force-reset — an override only makes sense while there is
//! something to override.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::level::ClassificationLevel;
use crate::scanner::{ContentScanner, ScanOutcome};

/// Identifies which form field a [`ScanField`] mirrors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanFieldId {
    SourceDescription,
    AdditionalComment,
    ReportBody,
}

impl fmt::Display for ScanFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceDescription => write!(f, "source_description"),
            Self::AdditionalComment => write!(f, "additional_comment"),
            Self::ReportBody => write!(f, "report_body"),
        }
    }
}

/// The override gate: a matched, non-overridden field contributes its
/// matched level; everything else contributes U.
pub fn gated_level(outcome: ScanOutcome, override_active: bool) -> ClassificationLevel {
    if outcome.matched && !override_active {
        outcome.level
    } else {
        ClassificationLevel::Unclassified
    }
}

/// One scanned text field and its derived state.
#[derive(Clone, Debug)]
pub struct ScanField {
    id: ScanFieldId,
    /// Raw field text as last edited (or cleared by a latch).
    pub text: String,
    /// Whether any restricted term currently matches `text`.
    pub matched: bool,
    /// Join of matched terms' levels; U while unmatched.
    pub matched_level: ClassificationLevel,
    /// User flag suppressing this field's contribution while a match exists.
    pub override_active: bool,
}

impl ScanField {
    pub fn new(id: ScanFieldId) -> Self {
        Self {
            id,
            text: String::new(),
            matched: false,
            matched_level: ClassificationLevel::Unclassified,
            override_active: false,
        }
    }

    pub fn id(&self) -> ScanFieldId {
        self.id
    }

    /// Recompute match state from the current text.
    ///
    /// Must run before the gate is next read: the override force-reset on a
    /// vanished match happens here, as a side effect of recomputation rather
    /// than of any user action.
    pub(crate) fn rescan(&mut self, scanner: &ContentScanner) {
        let outcome = scanner.scan(&self.text);
        self.matched = outcome.matched;
        self.matched_level = outcome.level;
        if !self.matched && self.override_active {
            self.override_active = false;
            debug!(field = %self.id, "match cleared, override reset");
        }
    }

    /// This field's gated contribution to resolution.
    pub fn contribution(&self) -> ClassificationLevel {
        gated_level(
            ScanOutcome {
                matched: self.matched,
                level: self.matched_level,
            },
            self.override_active,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ClassificationLevel::{Cui, Unclassified};
    use crate::term::RestrictedTerm;

    #[test]
    fn gate_truth_table() {
        let hit = ScanOutcome {
            matched: true,
            level: Cui,
        };
        assert_eq!(gated_level(hit, false), Cui);
        assert_eq!(gated_level(hit, true), Unclassified);
        assert_eq!(gated_level(ScanOutcome::clean(), false), Unclassified);
        assert_eq!(gated_level(ScanOutcome::clean(), true), Unclassified);
    }

    #[test]
    fn rescan_resets_override_when_match_disappears() {
        let scanner = ContentScanner::new(&[RestrictedTerm::new("rocket", Cui)]);
        let mut field = ScanField::new(ScanFieldId::ReportBody);

        field.text = "a rocket was seen".into();
        field.rescan(&scanner);
        assert!(field.matched);

        field.override_active = true;
        field.rescan(&scanner);
        assert!(field.override_active, "override holds while match exists");
        assert_eq!(field.contribution(), Unclassified);

        field.text = "nothing to see".into();
        field.rescan(&scanner);
        assert!(!field.matched);
        assert!(!field.override_active, "override must reset with the match");
    }

    #[test]
    fn contribution_tracks_match_and_override() {
        let scanner = ContentScanner::new(&[RestrictedTerm::new("rocket", Cui)]);
        let mut field = ScanField::new(ScanFieldId::AdditionalComment);
        assert_eq!(field.contribution(), Unclassified);

        field.text = "rocket".into();
        field.rescan(&scanner);
        assert_eq!(field.contribution(), Cui);
    }
}
