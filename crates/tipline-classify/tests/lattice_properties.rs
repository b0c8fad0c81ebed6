//! Property tests: the level lattice laws and the monotonicity guarantees
//! that resolution builds on.

use proptest::prelude::*;

use tipline_classify::{
    ClassificationLevel, ContentScanner, ReportSession, RestrictedTerm, ScanFieldId,
};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_level() -> impl Strategy<Value = ClassificationLevel> {
    prop_oneof![
        Just(ClassificationLevel::Unclassified),
        Just(ClassificationLevel::Cui),
        Just(ClassificationLevel::CuiRel),
    ]
}

fn arb_levels(max: usize) -> impl Strategy<Value = Vec<ClassificationLevel>> {
    prop::collection::vec(arb_level(), 0..max)
}

/// A lowercase word, safe to embed word-bounded in surrounding text.
fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{3,10}"
}

// ---------------------------------------------------------------------------
// Lattice laws
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn join_is_commutative(a in arb_level(), b in arb_level()) {
        prop_assert_eq!(a.join(b), b.join(a));
    }

    #[test]
    fn join_is_associative(a in arb_level(), b in arb_level(), c in arb_level()) {
        prop_assert_eq!(a.join(b).join(c), a.join(b.join(c)));
    }

    #[test]
    fn join_is_idempotent(a in arb_level()) {
        prop_assert_eq!(a.join(a), a);
    }

    #[test]
    fn unclassified_is_identity(a in arb_level()) {
        prop_assert_eq!(a.join(ClassificationLevel::Unclassified), a);
        prop_assert_eq!(ClassificationLevel::Unclassified.join(a), a);
    }

    /// join_all is order-insensitive and equals the rank maximum.
    #[test]
    fn join_all_is_order_insensitive(levels in arb_levels(8)) {
        let forward = ClassificationLevel::join_all(levels.iter().copied());
        let reverse = ClassificationLevel::join_all(levels.iter().rev().copied());
        prop_assert_eq!(forward, reverse);

        let max = levels
            .iter()
            .copied()
            .max()
            .unwrap_or(ClassificationLevel::Unclassified);
        prop_assert_eq!(forward, max);
    }
}

// ---------------------------------------------------------------------------
// Scanner and resolution properties
// ---------------------------------------------------------------------------

proptest! {
    /// A word-bounded term always matches at exactly its level.
    #[test]
    fn word_bounded_term_matches_at_its_level(word in arb_word(), level in arb_level()) {
        let scanner = ContentScanner::new(&[RestrictedTerm::new(word.clone(), level)]);
        let text = format!("observed {word} near the site");
        let outcome = scanner.scan(&text);
        prop_assert!(outcome.matched);
        prop_assert_eq!(outcome.level, level);
    }

    /// A body match with the override inactive drives the resolved overall
    /// to at least the term level; activating the override drops the
    /// contribution back to the identity.
    #[test]
    fn override_gates_the_contribution(word in arb_word(), level in arb_level()) {
        let mut session =
            ReportSession::new(vec![RestrictedTerm::new(word.clone(), level)]);
        session.set_report_body(format!("saw {word} today"));
        prop_assert!(session.resolved_overall() >= level);

        session.set_override(ScanFieldId::ReportBody, true);
        prop_assert_eq!(
            session.resolved_overall(),
            ClassificationLevel::Unclassified
        );
    }

    /// The resolved overall never ranks below the resolved collector, for
    /// any combination of manual selections and field contents.
    #[test]
    fn overall_dominates_collector(
        manual_overall in arb_level(),
        manual_collector in arb_level(),
        source_text in "[a-z ]{0,30}",
        body_text in "[a-z ]{0,30}",
    ) {
        let mut session = ReportSession::new(vec![
            RestrictedTerm::new("rocket", ClassificationLevel::Cui),
            RestrictedTerm::new("launchpad", ClassificationLevel::CuiRel),
        ]);
        session.set_manual_overall(manual_overall);
        session.set_manual_collector(manual_collector);
        session.set_source_description(source_text);
        session.set_report_body(body_text);

        prop_assert!(session.resolved_overall() >= session.resolved_collector());
        prop_assert!(session.resolved_collector() >= manual_collector);
        prop_assert!(session.resolved_overall() >= manual_overall);
    }
}
