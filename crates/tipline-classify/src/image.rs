//! The attached image and its classification tag.
//!
//! An image enters the session unclassified and unacknowledged; only the
//! image-classification collaborator can acknowledge it, by stamping the
//! image and returning the chosen level. Replacing the image always resets
//! the tag — a classification never carries over from a previous image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::ClassificationLevel;

/// Classification state of the attached image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTag {
    /// Level stamped onto the image; U until classified.
    pub level: ClassificationLevel,
    /// Whether the classification collaborator has processed this image.
    /// Gates submission, not resolution: an unacknowledged tag joins as U.
    pub acknowledged: bool,
    /// When the collaborator acknowledged the image.
    pub classified_at: Option<DateTime<Utc>>,
}

impl ImageTag {
    /// Fresh tag for a newly attached image.
    pub fn unacknowledged() -> Self {
        Self {
            level: ClassificationLevel::Unclassified,
            acknowledged: false,
            classified_at: None,
        }
    }

    /// Tag for an image the collaborator has stamped at `level`.
    pub fn classified(level: ClassificationLevel) -> Self {
        Self {
            level,
            acknowledged: true,
            classified_at: Some(Utc::now()),
        }
    }
}

impl Default for ImageTag {
    fn default() -> Self {
        Self::unacknowledged()
    }
}

/// The image attached to a report, with its classification tag.
#[derive(Clone, Debug)]
pub struct AttachedImage {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub tag: ImageTag,
}

impl AttachedImage {
    /// Attach raw image bytes. Starts unclassified regardless of any
    /// previously attached image's tag.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
            tag: ImageTag::unacknowledged(),
        }
    }

    /// This image's join contribution to the overall level.
    pub fn level(&self) -> ClassificationLevel {
        self.tag.level
    }
}

/// A stamped image returned by the classification collaborator.
#[derive(Clone, Debug)]
pub struct StampedImage {
    pub data: Vec<u8>,
    pub content_type: String,
    pub level: ClassificationLevel,
}
