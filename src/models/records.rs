//! Log record models: attendance, participation, grades and disciplinary
//! reports.
//!
//! All log tables carry a denormalized `student_name` next to a nullable
//! `student_id`. Legacy imports only have the name; the repair routine
//! backfills the reference. Records written through the panels always set
//! both.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::EscolarError;

/// Attendance status. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = EscolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(EscolarError::InvalidInput(format!(
                "unknown attendance status: {other}"
            ))),
        }
    }
}

/// Disciplinary report status. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: Option<i64>,
    pub student_name: String,
    pub group_name: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParticipationRecord {
    pub id: i64,
    pub student_id: Option<i64>,
    pub student_name: String,
    pub date: NaiveDate,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: Option<i64>,
    pub student_name: String,
    pub subject: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DisciplinaryReport {
    pub id: i64,
    pub student_id: Option<i64>,
    pub student_name: String,
    pub teacher_name: String,
    pub reason: String,
    pub consequence: String,
    pub status: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendanceRecord {
    pub student_id: i64,
    pub student_name: String,
    pub group_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParticipationRecord {
    pub student_id: i64,
    pub student_name: String,
    pub date: NaiveDate,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGradeRecord {
    pub student_id: i64,
    pub student_name: String,
    pub subject: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDisciplinaryReport {
    pub student_id: i64,
    pub student_name: String,
    pub teacher_name: String,
    pub reason: String,
    pub consequence: String,
    pub date: NaiveDate,
}

/// Attendance counts for a student, used on the student panel and kardex
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

impl AttendanceSummary {
    pub fn total(&self) -> i64 {
        self.present + self.absent + self.late
    }

    /// Attendance percentage; late counts as attended
    pub fn percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 100.0;
        }
        (self.present + self.late) as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_round_trip() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
        ] {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_attendance_status_rejected() {
        assert!("justified".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_attendance_percentage_counts_late_as_attended() {
        let summary = AttendanceSummary {
            present: 8,
            absent: 1,
            late: 1,
        };
        assert!((summary.percentage() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attendance_percentage_with_no_records() {
        assert!((AttendanceSummary::default().percentage() - 100.0).abs() < f64::EPSILON);
    }
}
