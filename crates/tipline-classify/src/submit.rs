//! Submission gate and payload snapshot.
//!
//! Submission itself is a collaborator concern; the engine only validates
//! the local preconditions and assembles the payload the collaborator
//! posts. Session identity arrives as an explicit [`AuthorContext`] — never
//! from ambient storage.

use serde::Serialize;
use tracing::warn;

use crate::error::{ClassifyError, ClassifyResult};
use crate::level::ClassificationLevel;
use crate::output::{make_dtg, slugify};
use crate::session::ReportSession;

/// Identity of the reporting user, supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorContext {
    /// Collector identification number; becomes `created_by` on the wire.
    pub user_id: String,
    /// Display name used by the chat collaborator.
    pub display_name: String,
    /// Whether the user holds the admin role. Unused by the engine; carried
    /// for the consuming layer's own gating.
    pub admin: bool,
}

/// Image portion of a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmittedImage {
    pub filename: String,
    pub content_type: String,
    pub classification: ClassificationLevel,
}

/// The payload handed to the submission collaborator. Field names follow
/// the reports wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionSnapshot {
    pub overall_classification: ClassificationLevel,
    pub collector_classification: ClassificationLevel,
    pub title: String,
    pub date_of_information: String,
    pub time: String,
    pub created_by: String,
    pub macom: String,
    pub country: String,
    pub location: String,
    pub mgrs: String,
    pub is_usper: bool,
    pub has_uspi: bool,
    pub source_platform: String,
    pub source_name: String,
    pub did_what: String,
    pub uid: String,
    pub article_title: String,
    pub article_author: String,
    pub report_body: String,
    pub source_description: String,
    pub additional_comment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<SubmittedImage>,
}

impl ReportSession {
    /// Validate the local submission preconditions and build the payload.
    ///
    /// Fails fast with [`ClassifyError::ImageNotClassified`] when an image
    /// is attached but unacknowledged — before any network call could be
    /// attempted.
    pub fn submission(&self, author: &AuthorContext) -> ClassifyResult<SubmissionSnapshot> {
        if let Some(image) = self.image() {
            if !image.tag.acknowledged {
                warn!(session = %self.id(), "submission blocked: image not classified");
                return Err(ClassifyError::ImageNotClassified);
            }
        }

        let meta = self.meta();
        let dtg = make_dtg(&meta.date_of_information, &meta.time).unwrap_or_default();
        let title_parts: Vec<String> = [
            dtg.as_str(),
            meta.country.as_str(),
            meta.location.as_str(),
            author.user_id.as_str(),
        ]
        .into_iter()
        .map(slugify)
        .filter(|part| !part.is_empty())
        .collect();
        let title = if title_parts.is_empty() {
            "UNTITLED".to_string()
        } else {
            title_parts.join("_")
        };

        let image = self.image().map(|attached| SubmittedImage {
            filename: format!("{title}_IMAGE"),
            content_type: attached.content_type.clone(),
            classification: attached.tag.level,
        });

        Ok(SubmissionSnapshot {
            overall_classification: self.resolved_overall(),
            collector_classification: self.resolved_collector(),
            title,
            date_of_information: meta.date_of_information.clone(),
            time: meta.time.clone(),
            created_by: author.user_id.clone(),
            macom: meta.macom.clone(),
            country: meta.country.clone(),
            location: meta.location.clone(),
            mgrs: meta.mgrs.clone(),
            is_usper: self.flags().usper,
            has_uspi: self.flags().uspi,
            source_platform: meta.source_type.clone(),
            source_name: meta.source_name.clone(),
            did_what: meta.did_what.clone(),
            uid: meta.uid.clone(),
            article_title: meta.article_title.clone(),
            article_author: meta.article_author.clone(),
            report_body: self.report_body().text.clone(),
            source_description: self.source_description().text.clone(),
            additional_comment_text: self.additional_comment().text.clone(),
            image,
        })
    }
}
