//! Matching scenarios for the legacy record repair routine.
//!
//! These run against the pure matching layer with a realistic roster; the
//! database plumbing around it only applies `MatchOutcome::Unique` results.

use escolar::services::repair::{best_match, normalize_name, MatchOutcome};

fn roster() -> Vec<(i64, String)> {
    vec![
        (1, "María José Hernández Ruiz".to_string()),
        (2, "Juan Pérez García".to_string()),
        (3, "Ana Luisa Torres".to_string()),
        (4, "José Ángel Muñoz".to_string()),
        (5, "Luis Hernández López".to_string()),
        (6, "Luis Hernández Lopez".to_string()),
    ]
}

#[test]
fn legacy_names_typed_without_accents_link() {
    let outcome = best_match("jose angel munoz", &roster());
    assert!(matches!(outcome, MatchOutcome::Unique { student_id: 4, .. }));
}

#[test]
fn linked_record_gets_canonical_spelling() {
    match best_match("ana luisa  torres", &roster()) {
        MatchOutcome::Unique {
            student_id,
            canonical,
        } => {
            assert_eq!(student_id, 3);
            assert_eq!(canonical, "Ana Luisa Torres");
        }
        other => panic!("expected unique match, got {other:?}"),
    }
}

#[test]
fn single_letter_typo_still_links() {
    let outcome = best_match("Juan Peres Garcia", &roster());
    assert!(matches!(outcome, MatchOutcome::Unique { student_id: 2, .. }));
}

#[test]
fn near_duplicate_roster_entries_stay_untouched() {
    // Two students differ only in an accent; linking either would guess.
    assert_eq!(
        best_match("luis hernandez lopez", &roster()),
        MatchOutcome::Ambiguous
    );
}

#[test]
fn unknown_and_blank_names_stay_untouched() {
    assert_eq!(best_match("Pedro Ramírez", &roster()), MatchOutcome::Unmatched);
    assert_eq!(best_match("   ", &roster()), MatchOutcome::Unmatched);
}

#[test]
fn empty_roster_never_links() {
    assert_eq!(best_match("María José", &[]), MatchOutcome::Unmatched);
}

#[test]
fn normalization_is_idempotent() {
    let once = normalize_name("  MARÍA  José Hernández ");
    let twice = normalize_name(&once);
    assert_eq!(once, twice);
    assert_eq!(once, "maria jose hernandez");
}
