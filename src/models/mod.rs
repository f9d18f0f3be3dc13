//! Data models

pub mod group;
pub mod records;
pub mod student;
pub mod teacher;
pub mod user;

pub use group::{CreateGroupRequest, Group};
pub use records::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, DisciplinaryReport, GradeRecord,
    NewAttendanceRecord, NewDisciplinaryReport, NewGradeRecord, NewParticipationRecord,
    ParticipationRecord, ReportStatus,
};
pub use student::{Student, StudentWithGroup};
pub use teacher::Teacher;
pub use user::{CreateUserRequest, Role, User};
