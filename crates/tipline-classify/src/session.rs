//! The report session: owner of all form state and the single entry point
//! for edits.
//!
//! Every mutator runs the full recomputation pass — latches, rescans with
//! override resets, then resolution — before returning, so no caller ever
//! observes partial or stale derived state. Recomputation is synchronous,
//! pure, and cheap; the only async boundaries are the one-time term fetch
//! at open and the explicit image-classification call.

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{ClassifyError, ClassifyResult};
use crate::gate::{ScanField, ScanFieldId};
use crate::image::{AttachedImage, ImageTag, StampedImage};
use crate::latches::{self, UsPersonFlags};
use crate::level::ClassificationLevel;
use crate::output;
use crate::resolver::{self, ResolvedClassification, ResolverInputs};
use crate::scanner::ContentScanner;
use crate::term::RestrictedTerm;
use crate::traits::{ImageClassifier, TermSource};

/// Unique identifier for a report session, for log correlation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// Form fields that carry no classification signal of their own. They flow
/// into the rendered outputs and the submission payload unchanged, except
/// for `uid`, which is defanged (`http` → `hxxp`) on every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportMeta {
    /// Date of information, `DDMMMYY`.
    pub date_of_information: String,
    /// Time of information, `HHmm` UTC.
    pub time: String,
    pub macom: String,
    pub country: String,
    pub location: String,
    pub mgrs: String,
    /// Source platform label ("Website", "X User", ...).
    pub source_type: String,
    pub source_name: String,
    /// Verb for the rendered outputs ("reported", "published", ...).
    pub did_what: String,
    /// Source URL or identifier; stored defanged.
    pub uid: String,
    pub article_title: String,
    pub article_author: String,
}

/// All in-session report state plus the derived classification.
#[derive(Debug)]
pub struct ReportSession {
    id: SessionId,
    terms: Vec<RestrictedTerm>,
    scanner: ContentScanner,
    source_description: ScanField,
    additional_comment: ScanField,
    report_body: ScanField,
    manual_overall: ClassificationLevel,
    manual_collector: ClassificationLevel,
    flags: UsPersonFlags,
    image: Option<AttachedImage>,
    meta: ReportMeta,
    resolved: ResolvedClassification,
}

impl ReportSession {
    /// Start a session with an already-fetched term list.
    pub fn new(terms: Vec<RestrictedTerm>) -> Self {
        let scanner = ContentScanner::new(&terms);
        let mut session = Self {
            id: SessionId::new(),
            terms,
            scanner,
            source_description: ScanField::new(ScanFieldId::SourceDescription),
            additional_comment: ScanField::new(ScanFieldId::AdditionalComment),
            report_body: ScanField::new(ScanFieldId::ReportBody),
            manual_overall: ClassificationLevel::Unclassified,
            manual_collector: ClassificationLevel::Unclassified,
            flags: UsPersonFlags::default(),
            image: None,
            meta: ReportMeta::default(),
            resolved: ResolvedClassification::default(),
        };
        session.recompute("open");
        session
    }

    /// Open a session, fetching the term list once.
    ///
    /// An unavailable list is non-fatal: scanning behaves as if the list
    /// were empty and the form stays usable. An invalid level token in the
    /// list is a data-integrity failure and propagates.
    pub async fn open(source: &dyn TermSource) -> ClassifyResult<Self> {
        let terms = match source.fetch_terms().await {
            Ok(terms) => {
                info!(count = terms.len(), "restricted term list loaded");
                terms
            }
            Err(ClassifyError::TermListUnavailable(reason)) => {
                warn!(%reason, "term list unavailable, scanning degraded to no matches");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        Ok(Self::new(terms))
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn terms(&self) -> &[RestrictedTerm] {
        &self.terms
    }

    pub fn source_description(&self) -> &ScanField {
        &self.source_description
    }

    pub fn additional_comment(&self) -> &ScanField {
        &self.additional_comment
    }

    pub fn report_body(&self) -> &ScanField {
        &self.report_body
    }

    pub fn manual_overall(&self) -> ClassificationLevel {
        self.manual_overall
    }

    pub fn manual_collector(&self) -> ClassificationLevel {
        self.manual_collector
    }

    pub fn flags(&self) -> UsPersonFlags {
        self.flags
    }

    pub fn image(&self) -> Option<&AttachedImage> {
        self.image.as_ref()
    }

    pub fn meta(&self) -> &ReportMeta {
        &self.meta
    }

    /// The derived classification state. Never stale: recomputed before any
    /// mutator returns.
    pub fn resolved(&self) -> ResolvedClassification {
        self.resolved
    }

    pub fn resolved_collector(&self) -> ClassificationLevel {
        self.resolved.collector
    }

    pub fn resolved_overall(&self) -> ClassificationLevel {
        self.resolved.overall
    }

    // ── Text and level edits ────────────────────────────────────────────

    pub fn set_source_description(&mut self, text: impl Into<String>) {
        self.source_description.text = text.into();
        self.recompute("source_description edited");
    }

    pub fn set_additional_comment(&mut self, text: impl Into<String>) {
        self.additional_comment.text = text.into();
        self.recompute("additional_comment edited");
    }

    pub fn set_report_body(&mut self, text: impl Into<String>) {
        self.report_body.text = text.into();
        self.recompute("report_body edited");
    }

    pub fn set_manual_overall(&mut self, level: ClassificationLevel) {
        self.manual_overall = level;
        self.recompute("manual overall selected");
    }

    pub fn set_manual_collector(&mut self, level: ClassificationLevel) {
        self.manual_collector = level;
        self.recompute("manual collector selected");
    }

    pub fn set_usper(&mut self, usper: bool) {
        self.flags.usper = usper;
        self.recompute("usper toggled");
    }

    /// Set the USPI flag. Turning it off only sticks while no latch source
    /// (USPER, body marker) is active; the same pass re-forces it otherwise.
    pub fn set_uspi(&mut self, uspi: bool) {
        self.flags.uspi = uspi;
        self.recompute("uspi toggled");
    }

    /// Toggle a field's scan override. An override on an unmatched field is
    /// reset by the same pass, so it can never suppress a future match.
    pub fn set_override(&mut self, field: ScanFieldId, active: bool) {
        let field = match field {
            ScanFieldId::SourceDescription => &mut self.source_description,
            ScanFieldId::AdditionalComment => &mut self.additional_comment,
            ScanFieldId::ReportBody => &mut self.report_body,
        };
        field.override_active = active;
        self.recompute("override toggled");
    }

    /// Replace form metadata via a closure; `uid` is re-defanged afterwards.
    pub fn update_meta(&mut self, f: impl FnOnce(&mut ReportMeta)) {
        f(&mut self.meta);
        self.recompute("meta edited");
    }

    /// Replace the restricted-term list mid-session (the list is externally
    /// mutable); all fields rescan against the new list.
    pub fn set_terms(&mut self, terms: Vec<RestrictedTerm>) {
        self.scanner = ContentScanner::new(&terms);
        self.terms = terms;
        self.recompute("term list replaced");
    }

    // ── Image lifecycle ─────────────────────────────────────────────────

    /// Attach (or replace) the report image. The tag always resets to
    /// unclassified/unacknowledged, even if a previous image in this
    /// session had been classified.
    pub fn attach_image(
        &mut self,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) {
        let image = AttachedImage::new(filename, content_type, data);
        info!(session = %self.id, filename = %image.filename, "image attached");
        self.image = Some(image);
        self.recompute("image attached");
    }

    /// Remove the attached image entirely, tag included.
    pub fn remove_image(&mut self) {
        if self.image.take().is_some() {
            info!(session = %self.id, "image removed");
            self.recompute("image removed");
        }
    }

    /// Run the attached image through the classification collaborator at
    /// the chosen level. On failure the prior image state is unchanged.
    /// A no-op when no image is attached.
    pub async fn classify_image(
        &mut self,
        classifier: &dyn ImageClassifier,
        level: ClassificationLevel,
    ) -> ClassifyResult<()> {
        let Some(image) = self.image.as_ref() else {
            debug!(session = %self.id, "classify requested with no image attached");
            return Ok(());
        };
        let stamped = classifier.classify(image, level).await?;
        self.apply_stamped_image(stamped);
        Ok(())
    }

    /// Accept a stamped image from the collaborator: replaces the bytes and
    /// acknowledges the tag at the stamped level.
    pub fn apply_stamped_image(&mut self, stamped: StampedImage) {
        if let Some(image) = self.image.as_mut() {
            image.data = stamped.data;
            image.content_type = stamped.content_type;
            image.tag = ImageTag::classified(stamped.level);
            info!(session = %self.id, level = %stamped.level, "image classified");
            self.recompute("image classified");
        }
    }

    // ── Recomputation ───────────────────────────────────────────────────

    /// The full derivation pass. Always runs end-to-end; order within the
    /// pass is fixed (latches, normalization, rescans, resolution) and the
    /// final joins are order-insensitive.
    fn recompute(&mut self, trigger: &str) {
        latches::enforce(
            &mut self.flags,
            &mut self.source_description.text,
            &self.report_body.text,
        );

        self.meta.uid = output::defang(&self.meta.uid);

        self.source_description.rescan(&self.scanner);
        self.additional_comment.rescan(&self.scanner);
        self.report_body.rescan(&self.scanner);

        let resolved = resolver::resolve(ResolverInputs {
            source_description: &self.source_description,
            additional_comment: &self.additional_comment,
            report_body: &self.report_body,
            manual_collector: self.manual_collector,
            manual_overall: self.manual_overall,
            image_level: self
                .image
                .as_ref()
                .map(AttachedImage::level)
                .unwrap_or_default(),
        });

        if resolved != self.resolved {
            debug!(
                session = %self.id,
                trigger,
                collector = %resolved.collector,
                overall = %resolved.overall,
                "classification changed"
            );
        }
        self.resolved = resolved;
    }
}
