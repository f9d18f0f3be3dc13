//! Request middleware: session extraction, role gates and login rate
//! limiting

pub mod auth;
pub mod rate_limit;

pub use auth::{clear_session_cookie, session_cookie, AdminUser, CurrentUser, StudentUser, TeacherUser};
pub use rate_limit::LoginRateLimiter;
