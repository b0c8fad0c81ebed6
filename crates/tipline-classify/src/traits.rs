//! Collaborator seams.
//!
//! The engine performs no I/O of its own; the restricted-term list and the
//! image stamper are reached through these traits. Both are fire-once
//! request/response operations — no polling, no retries here.

use async_trait::async_trait;

use crate::error::ClassifyResult;
use crate::image::{AttachedImage, StampedImage};
use crate::level::ClassificationLevel;
use crate::term::RestrictedTerm;

/// Source of the restricted-term list, fetched once per session open.
///
/// Implementations map transport failures to
/// [`ClassifyError::TermListUnavailable`](crate::ClassifyError::TermListUnavailable)
/// (non-fatal, degrades to an empty list) and malformed level tokens to
/// [`ClassifyError::InvalidLevel`](crate::ClassifyError::InvalidLevel)
/// (fatal, data integrity).
#[async_trait]
pub trait TermSource: Send + Sync {
    async fn fetch_terms(&self) -> ClassifyResult<Vec<RestrictedTerm>>;
}

/// The image-classification collaborator: accepts the raw image plus a
/// chosen level, returns the stamped image. Awaited before the tag updates;
/// a failure leaves the session's image untouched.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(
        &self,
        image: &AttachedImage,
        level: ClassificationLevel,
    ) -> ClassifyResult<StampedImage>;
}
