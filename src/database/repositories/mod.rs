//! Repository implementations, one per entity

pub mod attendance;
pub mod grade;
pub mod group;
pub mod participation;
pub mod report;
pub mod student;
pub mod teacher;
pub mod user;

pub use attendance::AttendanceRepository;
pub use grade::GradeRepository;
pub use group::GroupRepository;
pub use participation::ParticipationRepository;
pub use report::ReportRepository;
pub use student::StudentRepository;
pub use teacher::TeacherRepository;
pub use user::UserRepository;
