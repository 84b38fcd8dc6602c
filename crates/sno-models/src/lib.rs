//! # SNO Models
//!
//! Domain records and request/response DTOs for the SNO API.
//!
//! - [`ids`]: strongly-typed `i64` identifiers
//! - [`lectures`]: lectures and the raw filter query they are listed by
//! - [`users`]: users, stored credentials and auth DTOs

pub mod ids;
pub mod lectures;
pub mod users;

pub use ids::{CourseId, FileId, ForumId, LectureId, SummaryId, UserId};
pub use lectures::{
    CreateLectureDto, Lecture, LectureFilterParams, PaginatedLecturesResponse,
    UpdateDescriptionDto, UpdateLectureDto,
};
pub use users::{LoginRequest, LoginResponse, RegisterRequest, User, UserCredentials};
