//! Legacy record repair
//!
//! Old imports of attendance, participation, grade and disciplinary data
//! carry only a free-text student name and no student reference. This
//! service backfills `student_id` by fuzzy name matching: names are
//! normalized (case, whitespace, Spanish diacritics) and compared with
//! Jaro-Winkler similarity. A row is linked only when exactly one student
//! clears the threshold; ambiguous and unmatched rows are left untouched
//! and counted, which makes the routine idempotent and safe to re-run.

use serde::Serialize;
use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Minimum Jaro-Winkler similarity for a candidate to count as a match
pub const MATCH_THRESHOLD: f64 = 0.90;

/// Outcome of matching one stored name against the student roster
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Exactly one student cleared the threshold
    Unique { student_id: i64, canonical: String },
    /// Two or more students cleared the threshold
    Ambiguous,
    /// Nobody came close
    Unmatched,
}

/// Per-table repair counts
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RepairSummary {
    pub scanned: u64,
    pub linked: u64,
    pub ambiguous: u64,
    pub unmatched: u64,
}

impl RepairSummary {
    fn absorb(&mut self, outcome: &MatchOutcome) {
        self.scanned += 1;
        match outcome {
            MatchOutcome::Unique { .. } => self.linked += 1,
            MatchOutcome::Ambiguous => self.ambiguous += 1,
            MatchOutcome::Unmatched => self.unmatched += 1,
        }
    }
}

/// Full report of one repair run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RepairReport {
    pub attendance: RepairSummary,
    pub participation: RepairSummary,
    pub grades: RepairSummary,
    pub reports: RepairSummary,
}

impl RepairReport {
    pub fn total(&self) -> RepairSummary {
        let mut total = RepairSummary::default();
        for part in [
            &self.attendance,
            &self.participation,
            &self.grades,
            &self.reports,
        ] {
            total.scanned += part.scanned;
            total.linked += part.linked;
            total.ambiguous += part.ambiguous;
            total.unmatched += part.unmatched;
        }
        total
    }
}

/// Normalize a name for comparison: trim, lowercase, collapse inner
/// whitespace and strip Spanish diacritics.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for folded in fold_char(c) {
            out.push(folded);
        }
    }

    out
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    let lowered = c.to_lowercase().next().unwrap_or(c);
    let folded = match lowered {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        other => other,
    };
    std::iter::once(folded)
}

/// Match a stored name against the roster. `candidates` holds
/// `(student_id, canonical_name)` pairs.
pub fn best_match(stored_name: &str, candidates: &[(i64, String)]) -> MatchOutcome {
    let needle = normalize_name(stored_name);
    if needle.is_empty() {
        return MatchOutcome::Unmatched;
    }

    let mut hits = candidates.iter().filter_map(|(id, canonical)| {
        let similarity = strsim::jaro_winkler(&needle, &normalize_name(canonical));
        (similarity >= MATCH_THRESHOLD).then_some((*id, canonical.clone()))
    });

    match (hits.next(), hits.next()) {
        (Some((student_id, canonical)), None) => MatchOutcome::Unique {
            student_id,
            canonical,
        },
        (Some(_), Some(_)) => MatchOutcome::Ambiguous,
        (None, _) => MatchOutcome::Unmatched,
    }
}

#[derive(Clone)]
pub struct RepairService {
    db: DatabaseService,
}

impl RepairService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Run the repair over all four log tables
    pub async fn run(&self) -> Result<RepairReport> {
        let roster = self.db.students.list_names().await?;
        info!(students = roster.len(), "Starting legacy record repair");

        let mut report = RepairReport::default();

        for (id, name) in self.db.attendance.list_unlinked().await? {
            let outcome = best_match(&name, &roster);
            report.attendance.absorb(&outcome);
            if let MatchOutcome::Unique {
                student_id,
                canonical,
            } = outcome
            {
                debug!(row = id, student_id = student_id, "Linking attendance record");
                self.db
                    .attendance
                    .link_student(id, student_id, &canonical)
                    .await?;
            }
        }

        for (id, name) in self.db.participation.list_unlinked().await? {
            let outcome = best_match(&name, &roster);
            report.participation.absorb(&outcome);
            if let MatchOutcome::Unique {
                student_id,
                canonical,
            } = outcome
            {
                debug!(row = id, student_id = student_id, "Linking participation record");
                self.db
                    .participation
                    .link_student(id, student_id, &canonical)
                    .await?;
            }
        }

        for (id, name) in self.db.grades.list_unlinked().await? {
            let outcome = best_match(&name, &roster);
            report.grades.absorb(&outcome);
            if let MatchOutcome::Unique {
                student_id,
                canonical,
            } = outcome
            {
                debug!(row = id, student_id = student_id, "Linking grade record");
                self.db
                    .grades
                    .link_student(id, student_id, &canonical)
                    .await?;
            }
        }

        for (id, name) in self.db.reports.list_unlinked().await? {
            let outcome = best_match(&name, &roster);
            report.reports.absorb(&outcome);
            if let MatchOutcome::Unique {
                student_id,
                canonical,
            } = outcome
            {
                debug!(row = id, student_id = student_id, "Linking disciplinary report");
                self.db
                    .reports
                    .link_student(id, student_id, &canonical)
                    .await?;
            }
        }

        let total = report.total();
        crate::utils::logging::log_repair_run(
            total.scanned,
            total.linked,
            total.ambiguous,
            total.unmatched,
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<(i64, String)> {
        vec![
            (1, "María José Hernández".to_string()),
            (2, "Juan Pérez García".to_string()),
            (3, "Ana Luisa Torres".to_string()),
        ]
    }

    #[test]
    fn test_normalize_strips_diacritics_and_case() {
        assert_eq!(normalize_name("  MARÍA  José  "), "maria jose");
        assert_eq!(normalize_name("Muñoz"), "munoz");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_exact_name_matches_uniquely() {
        let outcome = best_match("María José Hernández", &roster());
        assert_eq!(
            outcome,
            MatchOutcome::Unique {
                student_id: 1,
                canonical: "María José Hernández".to_string()
            }
        );
    }

    #[test]
    fn test_accentless_sloppy_name_still_matches() {
        // The legacy drafts stored names typed by hand
        let outcome = best_match("maria jose hernandez", &roster());
        assert!(matches!(outcome, MatchOutcome::Unique { student_id: 1, .. }));
    }

    #[test]
    fn test_minor_typo_matches() {
        let outcome = best_match("Juan Peres García", &roster());
        assert!(matches!(outcome, MatchOutcome::Unique { student_id: 2, .. }));
    }

    #[test]
    fn test_unrelated_name_is_unmatched() {
        assert_eq!(best_match("Pedro Ramírez", &roster()), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_empty_name_is_unmatched() {
        assert_eq!(best_match("", &roster()), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_two_close_candidates_are_ambiguous() {
        let twins = vec![
            (10, "Luis Hernández López".to_string()),
            (11, "Luis Hernández Lopez".to_string()),
        ];
        assert_eq!(best_match("Luis Hernandez Lopez", &twins), MatchOutcome::Ambiguous);
    }

    #[test]
    fn test_report_total_sums_tables() {
        let mut report = RepairReport::default();
        report.attendance.scanned = 3;
        report.attendance.linked = 2;
        report.attendance.unmatched = 1;
        report.grades.scanned = 2;
        report.grades.ambiguous = 2;

        let total = report.total();
        assert_eq!(total.scanned, 5);
        assert_eq!(total.linked, 2);
        assert_eq!(total.ambiguous, 2);
        assert_eq!(total.unmatched, 1);
    }
}
