//! Classification resolution engine for field reports.
//!
//! Derives a report's handling classification from several independent,
//! dynamically changing signals — the user's manual selections, free-text
//! scans against an externally administered restricted-term list, and an
//! externally stamped image classification — under monotonic
//! "never silently downgrade" semantics.
//!
//! ## Invariants
//!
//! - Resolution is a join (least upper bound) over the U < CUI < CUIREL
//!   lattice: a manual selection can raise but never lower what active
//!   scans or the image demand.
//! - The resolved overall level is never below the resolved collector
//!   level.
//! - A field override suppresses that field's scan contribution only while
//!   the match exists; it resets the instant the match disappears.
//! - USPER forces USPI and clears the source description; the USPER marker
//!   in body text forces USPI. These latches never un-latch automatically.
//! - An attached image must be acknowledged by the classification
//!   collaborator before submission.
//!
//! ## Components
//!
//! - **ClassificationLevel** — the three-point ordered lattice and its join
//! - **ContentScanner** — whole-word, case-insensitive restricted-term scans
//! - **ScanField / override gate** — per-field match state and suppression
//! - **One-way latches** — USPER/USPI escalation rules
//! - **Resolver** — the single, acyclic recomputation pass
//! - **ReportSession** — state owner; every edit recomputes end-to-end
//! - **Submission** — local precondition gate and wire payload
//! - **Outputs** — chat line, report text, and citation rendering

pub mod error;
pub mod gate;
pub mod image;
pub mod latches;
pub mod level;
pub mod mocks;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod submit;
pub mod term;
pub mod traits;

pub use error::{ClassifyError, ClassifyResult};
pub use gate::{gated_level, ScanField, ScanFieldId};
pub use image::{AttachedImage, ImageTag, StampedImage};
pub use latches::{contains_usper_marker, UsPersonFlags, USPER_MARKER};
pub use level::ClassificationLevel;
pub use mocks::{MockImageClassifier, MockTermSource};
pub use resolver::{resolve, ResolvedClassification, ResolverInputs};
pub use scanner::{ContentScanner, ScanOutcome};
pub use session::{ReportMeta, ReportSession, SessionId};
pub use submit::{AuthorContext, SubmissionSnapshot, SubmittedImage};
pub use term::RestrictedTerm;
pub use traits::{ImageClassifier, TermSource};
