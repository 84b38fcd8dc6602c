//! Lecture records and DTOs.
//!
//! A lecture belongs to at most one course, is read by at most one lecturer
//! and may link a summary, a forum thread and an uploaded file. All links
//! are optional so a lecture can be drafted before any of them exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{CourseId, FileId, ForumId, LectureId, SummaryId, UserId};
use sno_core::PaginationMeta;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lecture {
    pub id: LectureId,
    pub course_id: Option<CourseId>,
    pub lecturer_id: Option<UserId>,
    #[schema(example = "Introduction to Computer Science")]
    pub title: String,
    pub description: String,
    /// Scheduled start of the lecture
    pub date: Option<DateTime<Utc>>,
    pub summary_id: Option<SummaryId>,
    pub forum_id: Option<ForumId>,
    pub file_id: Option<FileId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLectureDto {
    pub course_id: Option<CourseId>,
    pub lecturer_id: Option<UserId>,
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub summary_id: Option<SummaryId>,
    pub forum_id: Option<ForumId>,
    pub file_id: Option<FileId>,
}

/// Full update. Title, description and date are always overwritten; the
/// lecturer, summary, forum and file links only when given.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLectureDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub lecturer_id: Option<UserId>,
    pub summary_id: Option<SummaryId>,
    pub forum_id: Option<ForumId>,
    pub file_id: Option<FileId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDescriptionDto {
    pub description: String,
}

/// Raw query of the filtered listing endpoint.
///
/// Values stay strings here; turning them into criteria is lenient and an
/// unparseable value only drops its own criterion.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LectureFilterParams {
    /// Substring of the title (case-insensitive)
    pub title: Option<String>,
    /// Exact lecturer id
    #[serde(alias = "lecturerId")]
    pub lecturer_id: Option<String>,
    /// Earliest lecture day, `YYYY-MM-DD`, inclusive
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    /// Latest lecture day, `YYYY-MM-DD`, inclusive
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    /// `title` (default) or `date`
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    #[serde(alias = "sortDirection")]
    pub sort_direction: Option<String>,
}

impl LectureFilterParams {
    /// Builds the params from raw query pairs.
    ///
    /// The first value of a criterion wins, whether it was sent under its
    /// camelCase or snake_case name; later repeats and unknown keys are
    /// ignored rather than failing the request.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "title" => &mut params.title,
                "lecturerId" | "lecturer_id" => &mut params.lecturer_id,
                "startDate" | "start_date" => &mut params.start_date,
                "endDate" | "end_date" => &mut params.end_date,
                "sortBy" | "sort_by" => &mut params.sort_by,
                "sortDirection" | "sort_direction" => &mut params.sort_direction,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedLecturesResponse {
    pub data: Vec<Lecture>,
    pub meta: PaginationMeta,
}
