//! The classification resolver.
//!
//! One pure pass over current inputs, always run end-to-end — never as
//! independently triggered partial updates. The joins commute and
//! associate, so a single explicit pass has no ordering hazard.
//!
//! Dependency order within a pass:
//! 1. gated scans of the collector fields (source description, additional
//!    comment) join into the auto collector level;
//! 2. the manual collector selection joins in, producing the resolved
//!    collector level;
//! 3. the gated report-body scan, the manual overall selection, the resolved
//!    collector level, and the image level join into the resolved overall.
//!
//! Because the resolved collector is a join operand of the overall, the
//! overall can never rank below the collector.

use serde::Serialize;
use tracing::trace;

use crate::gate::ScanField;
use crate::level::ClassificationLevel;

/// Inputs to one resolution pass. Scan fields must carry fresh match state
/// (the session rescans before resolving).
#[derive(Debug)]
pub struct ResolverInputs<'a> {
    pub source_description: &'a ScanField,
    pub additional_comment: &'a ScanField,
    pub report_body: &'a ScanField,
    pub manual_collector: ClassificationLevel,
    pub manual_overall: ClassificationLevel,
    /// Attached image tag level; U when no image is attached.
    pub image_level: ClassificationLevel,
}

/// The derived classification state. Owned by the resolver: nothing else
/// writes these values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedClassification {
    /// Classification of the collector-comment fields alone.
    pub collector: ClassificationLevel,
    /// Classification of the whole report; always >= `collector`.
    pub overall: ClassificationLevel,
}

/// Recompute the derived classification state from current inputs.
pub fn resolve(inputs: ResolverInputs<'_>) -> ResolvedClassification {
    let auto_source = inputs.source_description.contribution();
    let auto_comment = inputs.additional_comment.contribution();
    let auto_collector = auto_source.join(auto_comment);
    let collector = inputs.manual_collector.join(auto_collector);

    let auto_body = inputs.report_body.contribution();
    let overall = ClassificationLevel::join_all([
        inputs.manual_overall,
        auto_body,
        collector,
        inputs.image_level,
    ]);

    trace!(
        %auto_collector,
        %collector,
        %auto_body,
        %overall,
        "resolution pass"
    );

    ResolvedClassification { collector, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ScanFieldId;
    use crate::level::ClassificationLevel::{Cui, CuiRel, Unclassified};
    use crate::scanner::ContentScanner;
    use crate::term::RestrictedTerm;

    struct Fields {
        source_description: ScanField,
        additional_comment: ScanField,
        report_body: ScanField,
    }

    fn fields(scanner: &ContentScanner, source: &str, comment: &str, body: &str) -> Fields {
        let mut f = Fields {
            source_description: ScanField::new(ScanFieldId::SourceDescription),
            additional_comment: ScanField::new(ScanFieldId::AdditionalComment),
            report_body: ScanField::new(ScanFieldId::ReportBody),
        };
        f.source_description.text = source.into();
        f.additional_comment.text = comment.into();
        f.report_body.text = body.into();
        f.source_description.rescan(scanner);
        f.additional_comment.rescan(scanner);
        f.report_body.rescan(scanner);
        f
    }

    fn inputs<'a>(
        f: &'a Fields,
        manual_collector: ClassificationLevel,
        manual_overall: ClassificationLevel,
        image_level: ClassificationLevel,
    ) -> ResolverInputs<'a> {
        ResolverInputs {
            source_description: &f.source_description,
            additional_comment: &f.additional_comment,
            report_body: &f.report_body,
            manual_collector,
            manual_overall,
            image_level,
        }
    }

    #[test]
    fn all_quiet_resolves_unclassified() {
        let scanner = ContentScanner::new(&[]);
        let f = fields(&scanner, "", "", "");
        let resolved = resolve(inputs(&f, Unclassified, Unclassified, Unclassified));
        assert_eq!(resolved, ResolvedClassification::default());
    }

    #[test]
    fn collector_fields_raise_collector_and_overall() {
        let scanner = ContentScanner::new(&[RestrictedTerm::new("rocket", Cui)]);
        let f = fields(&scanner, "saw a rocket", "", "");
        let resolved = resolve(inputs(&f, Unclassified, Unclassified, Unclassified));
        assert_eq!(resolved.collector, Cui);
        assert_eq!(resolved.overall, Cui);
    }

    #[test]
    fn body_scan_raises_overall_but_not_collector() {
        let scanner = ContentScanner::new(&[RestrictedTerm::new("rocket", Cui)]);
        let f = fields(&scanner, "", "", "a rocket was seen");
        let resolved = resolve(inputs(&f, Unclassified, Unclassified, Unclassified));
        assert_eq!(resolved.collector, Unclassified);
        assert_eq!(resolved.overall, Cui);
    }

    #[test]
    fn manual_levels_join_in() {
        let scanner = ContentScanner::new(&[]);
        let f = fields(&scanner, "", "", "");
        let resolved = resolve(inputs(&f, Cui, Unclassified, Unclassified));
        assert_eq!(resolved.collector, Cui);
        // Collector flows into overall.
        assert_eq!(resolved.overall, Cui);

        let resolved = resolve(inputs(&f, Unclassified, CuiRel, Unclassified));
        assert_eq!(resolved.collector, Unclassified);
        assert_eq!(resolved.overall, CuiRel);
    }

    #[test]
    fn image_level_joins_into_overall_only() {
        let scanner = ContentScanner::new(&[]);
        let f = fields(&scanner, "", "", "");
        let resolved = resolve(inputs(&f, Unclassified, Unclassified, CuiRel));
        assert_eq!(resolved.collector, Unclassified);
        assert_eq!(resolved.overall, CuiRel);
    }

    #[test]
    fn overall_never_below_collector() {
        let scanner = ContentScanner::new(&[RestrictedTerm::new("rocket", CuiRel)]);
        let f = fields(&scanner, "rocket", "", "");
        let resolved = resolve(inputs(&f, Unclassified, Unclassified, Unclassified));
        assert!(resolved.overall >= resolved.collector);
        assert_eq!(resolved.overall, CuiRel);
    }
}
