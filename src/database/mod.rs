//! Database module

pub mod connection;
pub mod repositories;
pub mod service;

pub use connection::{create_pool, DatabasePool};
pub use repositories::{
    AttendanceRepository, GradeRepository, GroupRepository, ParticipationRepository,
    ReportRepository, StudentRepository, TeacherRepository, UserRepository,
};
pub use service::DatabaseService;
