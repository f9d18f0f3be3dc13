//! Database service layer
//!
//! This module provides a high-level interface to database operations.
//! Enrollment operations pair an entity row with its login account inside a
//! single transaction, so neither can exist without the other.

use chrono::Utc;
use sqlx::PgPool;

use crate::database::repositories::{
    AttendanceRepository, GradeRepository, GroupRepository, ParticipationRepository,
    ReportRepository, StudentRepository, TeacherRepository, UserRepository,
};
use crate::models::student::Student;
use crate::models::teacher::Teacher;
use crate::models::user::Role;
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: PgPool,
    pub users: UserRepository,
    pub students: StudentRepository,
    pub teachers: TeacherRepository,
    pub groups: GroupRepository,
    pub attendance: AttendanceRepository,
    pub participation: ParticipationRepository,
    pub grades: GradeRepository,
    pub reports: ReportRepository,
}

impl DatabaseService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            teachers: TeacherRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            participation: ParticipationRepository::new(pool.clone()),
            grades: GradeRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Enroll a student: student row plus its `student` login account,
    /// atomically.
    pub async fn enroll_student(
        &self,
        name: &str,
        email: &str,
        group_id: Option<i64>,
        password_hash: &str,
    ) -> Result<Student, EscolarError> {
        let mut tx = self.pool.begin().await?;

        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, email, group_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, group_id, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(group_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_duplicate(email))?;

        sqlx::query(
            "INSERT INTO users (email, password_hash, role, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Role::Student.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(Self::map_duplicate(email))?;

        tx.commit().await?;
        Ok(student)
    }

    /// Enroll a teacher: teacher row plus its `teacher` login account,
    /// atomically.
    pub async fn enroll_teacher(
        &self,
        name: &str,
        email: &str,
        group_id: Option<i64>,
        password_hash: &str,
    ) -> Result<Teacher, EscolarError> {
        let mut tx = self.pool.begin().await?;

        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (name, email, group_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, group_id, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(group_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_duplicate(email))?;

        sqlx::query(
            "INSERT INTO users (email, password_hash, role, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Role::Teacher.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(Self::map_duplicate(email))?;

        tx.commit().await?;
        Ok(teacher)
    }

    /// Remove a student and its login account
    pub async fn remove_student(&self, id: i64) -> Result<(), EscolarError> {
        let student = self
            .students
            .find_by_id(id)
            .await?
            .ok_or(EscolarError::StudentNotFound { student_id: id })?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE email = $1 AND role = $2")
            .bind(&student.email)
            .bind(Role::Student.as_str())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Remove a teacher and its login account
    pub async fn remove_teacher(&self, id: i64) -> Result<(), EscolarError> {
        let teacher = self
            .teachers
            .find_by_id(id)
            .await?
            .ok_or(EscolarError::TeacherNotFound { teacher_id: id })?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE email = $1 AND role = $2")
            .bind(&teacher.email)
            .bind(Role::Teacher.as_str())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Seed the default admin account when no admin user exists yet
    pub async fn ensure_default_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, EscolarError> {
        if self.users.count_by_role(Role::Admin.as_str()).await? > 0 {
            return Ok(false);
        }

        self.users
            .create(crate::models::user::CreateUserRequest {
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                role: Role::Admin,
            })
            .await?;

        tracing::info!(email = email, "Seeded default admin account");
        Ok(true)
    }

    fn map_duplicate(email: &str) -> impl FnOnce(sqlx::Error) -> EscolarError + '_ {
        move |e| {
            if EscolarError::is_unique_violation(&e) {
                EscolarError::DuplicateEmail(email.to_string())
            } else {
                e.into()
            }
        }
    }
}
