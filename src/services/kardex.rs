//! Kardex rendering
//!
//! Assembles a student's cumulative record (grades, attendance,
//! participation, disciplinary history) and renders it synchronously into a
//! PDF using printpdf's built-in Helvetica fonts.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Serialize;

use crate::database::DatabaseService;
use crate::models::records::{AttendanceSummary, DisciplinaryReport, GradeRecord};
use crate::models::student::Student;
use crate::utils::errors::{EscolarError, Result};

/// Everything that goes on a kardex sheet
#[derive(Debug, Clone, Serialize)]
pub struct KardexData {
    pub school_name: String,
    pub student: Student,
    pub group_name: Option<String>,
    pub grades: Vec<GradeRecord>,
    pub attendance: AttendanceSummary,
    pub participation_points: i64,
    pub reports: Vec<DisciplinaryReport>,
}

/// Per-subject aggregate shown in the grades table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub average: f64,
    pub entries: usize,
}

/// Group grades by subject, preserving first-seen subject order
pub fn subject_averages(grades: &[GradeRecord]) -> Vec<SubjectAverage> {
    let mut averages: Vec<SubjectAverage> = Vec::new();

    for grade in grades {
        match averages.iter_mut().find(|a| a.subject == grade.subject) {
            Some(avg) => {
                avg.average = (avg.average * avg.entries as f64 + grade.score)
                    / (avg.entries + 1) as f64;
                avg.entries += 1;
            }
            None => averages.push(SubjectAverage {
                subject: grade.subject.clone(),
                average: grade.score,
                entries: 1,
            }),
        }
    }

    averages
}

/// Mean over every recorded score, None when there are no grades
pub fn overall_average(grades: &[GradeRecord]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    Some(grades.iter().map(|g| g.score).sum::<f64>() / grades.len() as f64)
}

/// File name for the served PDF, derived from the student name
pub fn kardex_filename(student_name: &str) -> String {
    let slug: String = super::repair::normalize_name(student_name)
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if slug.is_empty() {
        "kardex.pdf".to_string()
    } else {
        format!("kardex_{slug}.pdf")
    }
}

/// Render the kardex sheet to PDF bytes
pub fn render_kardex(data: &KardexData) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Kardex", Mm(215.9), Mm(279.4), "Capa 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| EscolarError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| EscolarError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = 260.0;

    // Starts a new page when the cursor runs past the bottom margin.
    let mut line = |text: String, size, x, use_bold: bool| {
        if y < 25.0 {
            let (page, page_layer) = doc.add_page(Mm(215.9), Mm(279.4), "Capa 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = 260.0;
        }
        let font = if use_bold { &bold } else { &regular };
        layer.use_text(text, size, Mm(x), Mm(y), font);
        y -= if size > 12.0 { 10.0 } else { 6.5 };
    };

    line(data.school_name.clone(), 16.0, 20.0, true);
    line("Kardex del alumno".to_string(), 13.0, 20.0, true);
    line(format!("Alumno: {}", data.student.name), 11.0, 20.0, false);
    line(format!("Correo: {}", data.student.email), 11.0, 20.0, false);
    line(
        format!(
            "Grupo: {}",
            data.group_name.as_deref().unwrap_or("Sin grupo")
        ),
        11.0,
        20.0,
        false,
    );

    line("Calificaciones".to_string(), 13.0, 20.0, true);
    let averages = subject_averages(&data.grades);
    if averages.is_empty() {
        line("Sin calificaciones registradas".to_string(), 10.0, 25.0, false);
    } else {
        for avg in &averages {
            line(
                format!(
                    "{}: promedio {:.1} ({} registros)",
                    avg.subject, avg.average, avg.entries
                ),
                10.0,
                25.0,
                false,
            );
        }
        if let Some(overall) = overall_average(&data.grades) {
            line(format!("Promedio general: {overall:.1}"), 11.0, 25.0, true);
        }
    }

    line("Asistencia".to_string(), 13.0, 20.0, true);
    line(
        format!(
            "Presente: {}   Ausente: {}   Retardo: {}   Asistencia: {:.0}%",
            data.attendance.present,
            data.attendance.absent,
            data.attendance.late,
            data.attendance.percentage()
        ),
        10.0,
        25.0,
        false,
    );

    line("Participación".to_string(), 13.0, 20.0, true);
    line(
        format!("Puntos acumulados: {}", data.participation_points),
        10.0,
        25.0,
        false,
    );

    line("Reportes disciplinarios".to_string(), 13.0, 20.0, true);
    if data.reports.is_empty() {
        line("Sin reportes".to_string(), 10.0, 25.0, false);
    } else {
        for report in &data.reports {
            line(
                format!(
                    "{} - {} ({}): {}",
                    report.date, report.reason, report.status, report.consequence
                ),
                10.0,
                25.0,
                false,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| EscolarError::Pdf(e.to_string()))
}

#[derive(Clone)]
pub struct KardexService {
    db: DatabaseService,
    school_name: String,
}

impl KardexService {
    pub fn new(db: DatabaseService, school_name: String) -> Self {
        Self { db, school_name }
    }

    /// Gather a student's cumulative record from the log tables
    pub async fn assemble(&self, student_id: i64) -> Result<KardexData> {
        let student = self
            .db
            .students
            .find_by_id(student_id)
            .await?
            .ok_or(EscolarError::StudentNotFound { student_id })?;

        let group_name = match student.group_id {
            Some(group_id) => self.db.groups.find_by_id(group_id).await?.map(|g| g.name),
            None => None,
        };

        let grades = self.db.grades.list_for_student(student_id).await?;
        let attendance = self.db.attendance.summary_for_student(student_id).await?;
        let participation_points = self.db.participation.total_for_student(student_id).await?;
        let reports = self.db.reports.list_for_student(student_id).await?;

        Ok(KardexData {
            school_name: self.school_name.clone(),
            student,
            group_name,
            grades,
            attendance,
            participation_points,
            reports,
        })
    }

    /// Assemble and render, returning the download file name and PDF bytes
    pub async fn generate(&self, student_id: i64) -> Result<(String, Vec<u8>)> {
        let data = self.assemble(student_id).await?;
        let filename = kardex_filename(&data.student.name);
        let bytes = render_kardex(&data)?;

        tracing::info!(
            student_id = student_id,
            bytes = bytes.len(),
            "Kardex PDF rendered"
        );
        Ok((filename, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grade(subject: &str, score: f64) -> GradeRecord {
        GradeRecord {
            id: 0,
            student_id: Some(1),
            student_name: "Ana Luisa Torres".to_string(),
            subject: subject.to_string(),
            score,
            created_at: Utc::now(),
        }
    }

    fn sample_data() -> KardexData {
        KardexData {
            school_name: "Secundaria Técnica 42".to_string(),
            student: Student {
                id: 1,
                name: "Ana Luisa Torres".to_string(),
                email: "ana@escuela.edu.mx".to_string(),
                group_id: Some(3),
                created_at: Utc::now(),
            },
            group_name: Some("3A".to_string()),
            grades: vec![
                grade("Matemáticas", 85.0),
                grade("Matemáticas", 95.0),
                grade("Historia", 70.0),
            ],
            attendance: AttendanceSummary {
                present: 18,
                absent: 1,
                late: 1,
            },
            participation_points: 14,
            reports: vec![],
        }
    }

    #[test]
    fn test_subject_averages_groups_and_averages() {
        let data = sample_data();
        let averages = subject_averages(&data.grades);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].subject, "Matemáticas");
        assert!((averages[0].average - 90.0).abs() < 1e-9);
        assert_eq!(averages[0].entries, 2);
        assert_eq!(averages[1].subject, "Historia");
        assert!((averages[1].average - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_average() {
        let data = sample_data();
        let overall = overall_average(&data.grades).unwrap();
        assert!((overall - (85.0 + 95.0 + 70.0) / 3.0).abs() < 1e-9);
        assert!(overall_average(&[]).is_none());
    }

    #[test]
    fn test_kardex_filename_slug() {
        assert_eq!(
            kardex_filename("María José Hernández"),
            "kardex_maria_jose_hernandez.pdf"
        );
        assert_eq!(kardex_filename("  "), "kardex.pdf");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_kardex(&sample_data()).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_with_empty_record_sections() {
        let mut data = sample_data();
        data.grades.clear();
        data.reports.clear();
        data.attendance = AttendanceSummary::default();
        let bytes = render_kardex(&data).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_paginates_long_histories() {
        let mut data = sample_data();
        data.grades = (0..120)
            .map(|i| grade(&format!("Materia {i}"), 60.0 + (i % 40) as f64))
            .collect();
        let bytes = render_kardex(&data).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
