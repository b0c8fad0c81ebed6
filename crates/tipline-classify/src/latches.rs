//! One-way latches between derived fields.
//!
//! Handling flags only escalate automatically, never silently de-escalate:
//! - USPER set ⇒ USPI forced on, and the source-description text is cleared
//!   (USPER reports must not carry source-identifying description text).
//! - Report-body text containing the USPER marker ⇒ USPI forced on.
//!
//! Unsetting USPER or removing the marker does NOT unset USPI — that stays a
//! manual user action. The latches are structural and independent of the
//! scanner overrides.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Literal marker denoting a U.S. person in report-body text. Matched
/// case-insensitively as a plain substring.
pub const USPER_MARKER: &str = "(USPER)";

/// The U.S. person handling flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsPersonFlags {
    /// The source is a U.S. person.
    pub usper: bool,
    /// The content contains U.S. person information.
    pub uspi: bool,
}

/// Whether the text contains the literal USPER marker.
pub fn contains_usper_marker(text: &str) -> bool {
    text.to_ascii_lowercase()
        .contains(&USPER_MARKER.to_ascii_lowercase())
}

/// Apply the one-way latches for one recomputation pass.
///
/// Runs before any scan so that a cleared source description is what the
/// scanner sees.
pub(crate) fn enforce(
    flags: &mut UsPersonFlags,
    source_description: &mut String,
    report_body: &str,
) {
    if flags.usper {
        if !flags.uspi {
            flags.uspi = true;
            debug!("usper latch forced uspi on");
        }
        if !source_description.is_empty() {
            source_description.clear();
            debug!("usper latch cleared source description");
        }
    }

    if !flags.uspi && contains_usper_marker(report_body) {
        flags.uspi = true;
        debug!("usper marker in report body forced uspi on");
    }
}
