//! In-memory collaborator implementations for tests and wiring exercises.

use async_trait::async_trait;

use crate::error::{ClassifyError, ClassifyResult};
use crate::image::{AttachedImage, StampedImage};
use crate::level::ClassificationLevel;
use crate::term::RestrictedTerm;
use crate::traits::{ImageClassifier, TermSource};

/// A term source backed by a fixed list, or a canned failure.
pub struct MockTermSource {
    behavior: TermSourceBehavior,
}

enum TermSourceBehavior {
    Terms(Vec<RestrictedTerm>),
    Unavailable,
    InvalidLevel(String),
}

impl MockTermSource {
    /// Always returns the given terms.
    pub fn with_terms(terms: Vec<RestrictedTerm>) -> Self {
        Self {
            behavior: TermSourceBehavior::Terms(terms),
        }
    }

    /// Simulates a transport failure (non-fatal to the session).
    pub fn unavailable() -> Self {
        Self {
            behavior: TermSourceBehavior::Unavailable,
        }
    }

    /// Simulates a list carrying an unknown level token (fatal).
    pub fn invalid_level(token: impl Into<String>) -> Self {
        Self {
            behavior: TermSourceBehavior::InvalidLevel(token.into()),
        }
    }
}

#[async_trait]
impl TermSource for MockTermSource {
    async fn fetch_terms(&self) -> ClassifyResult<Vec<RestrictedTerm>> {
        match &self.behavior {
            TermSourceBehavior::Terms(terms) => Ok(terms.clone()),
            TermSourceBehavior::Unavailable => Err(ClassifyError::TermListUnavailable(
                "mock term source is unavailable".into(),
            )),
            TermSourceBehavior::InvalidLevel(token) => {
                Err(ClassifyError::InvalidLevel(token.clone()))
            }
        }
    }
}

/// An image classifier that stamps by prefixing a marker onto the image
/// bytes, or fails unconditionally.
pub struct MockImageClassifier {
    fail: bool,
}

impl MockImageClassifier {
    /// Accepts every request and returns a stamped copy.
    pub fn accepting() -> Self {
        Self { fail: false }
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageClassifier for MockImageClassifier {
    async fn classify(
        &self,
        image: &AttachedImage,
        level: ClassificationLevel,
    ) -> ClassifyResult<StampedImage> {
        if self.fail {
            return Err(ClassifyError::ImageClassification(
                "mock classifier rejected the image".into(),
            ));
        }
        let mut data = format!("[{}]", level.banner_label()).into_bytes();
        data.extend_from_slice(&image.data);
        Ok(StampedImage {
            data,
            content_type: image.content_type.clone(),
            level,
        })
    }
}
