//! Kardex assembly math and PDF rendering, end to end over in-memory data.

use chrono::Utc;

use escolar::models::records::{AttendanceSummary, DisciplinaryReport, GradeRecord};
use escolar::models::student::Student;
use escolar::services::kardex::{
    kardex_filename, overall_average, render_kardex, subject_averages, KardexData,
};

fn grade(subject: &str, score: f64) -> GradeRecord {
    GradeRecord {
        id: 0,
        student_id: Some(1),
        student_name: "María José Hernández".to_string(),
        subject: subject.to_string(),
        score,
        created_at: Utc::now(),
    }
}

fn data() -> KardexData {
    KardexData {
        school_name: "Secundaria Técnica 42".to_string(),
        student: Student {
            id: 1,
            name: "María José Hernández".to_string(),
            email: "maria@escuela.edu.mx".to_string(),
            group_id: Some(2),
            created_at: Utc::now(),
        },
        group_name: Some("3B".to_string()),
        grades: vec![
            grade("Matemáticas", 80.0),
            grade("Español", 92.5),
            grade("Matemáticas", 90.0),
        ],
        attendance: AttendanceSummary {
            present: 38,
            absent: 2,
            late: 0,
        },
        participation_points: 21,
        reports: vec![DisciplinaryReport {
            id: 1,
            student_id: Some(1),
            student_name: "María José Hernández".to_string(),
            teacher_name: "Profr. Soto".to_string(),
            reason: "Uso de celular en clase".to_string(),
            consequence: "Citatorio".to_string(),
            status: "open".to_string(),
            date: Utc::now().date_naive(),
            created_at: Utc::now(),
        }],
    }
}

#[test]
fn subject_averages_keep_first_seen_order() {
    let averages = subject_averages(&data().grades);
    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].subject, "Matemáticas");
    assert!((averages[0].average - 85.0).abs() < 1e-9);
    assert_eq!(averages[1].subject, "Español");
}

#[test]
fn overall_average_covers_every_entry() {
    let overall = overall_average(&data().grades).unwrap();
    assert!((overall - (80.0 + 92.5 + 90.0) / 3.0).abs() < 1e-9);
}

#[test]
fn filename_comes_from_the_student_name() {
    assert_eq!(
        kardex_filename("María José Hernández"),
        "kardex_maria_jose_hernandez.pdf"
    );
}

#[test]
fn full_record_renders_to_pdf() {
    let bytes = render_kardex(&data()).expect("render");
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn brand_new_student_renders_to_pdf() {
    let mut empty = data();
    empty.grades.clear();
    empty.reports.clear();
    empty.attendance = AttendanceSummary::default();
    empty.participation_points = 0;
    empty.group_name = None;

    let bytes = render_kardex(&empty).expect("render");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn years_of_history_render_across_pages() {
    let mut long = data();
    long.grades = (0..200)
        .map(|i| grade(&format!("Materia {}", i % 12), 60.0 + (i % 40) as f64))
        .collect();

    let bytes = render_kardex(&long).expect("render");
    assert!(bytes.starts_with(b"%PDF"));
}
