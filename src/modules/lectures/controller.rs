use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::service::LectureService;
use crate::middleware::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::repository::LectureLink;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use sno_core::{AppError, PaginationParams};
use sno_models::{
    CourseId, CreateLectureDto, FileId, ForumId, Lecture, LectureFilterParams, LectureId,
    PaginatedLecturesResponse, UpdateDescriptionDto, UpdateLectureDto, UserId,
};

/// List lectures page by page, ordered by id
#[utoipa::path(
    get,
    path = "/api/lectures",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of lectures", body = PaginatedLecturesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lectures(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedLecturesResponse>, AppError> {
    let page = LectureService::get_lectures(state.lectures.as_ref(), pagination).await?;
    Ok(Json(page))
}

/// Filter and sort lectures
///
/// Every criterion is optional. A criterion that does not parse is ignored,
/// a repeated one keeps its first value, and an unknown sort key falls back
/// to title ascending.
#[utoipa::path(
    get,
    path = "/api/lectures/filter",
    params(LectureFilterParams),
    responses(
        (status = 200, description = "Matching lectures", body = Vec<Lecture>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn filter_lectures(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Lecture>>, AppError> {
    let params = LectureFilterParams::from_pairs(pairs);
    let lectures = LectureService::find_filtered(state.lectures.as_ref(), params).await?;
    Ok(Json(lectures))
}

/// Get a lecture by id
#[utoipa::path(
    get,
    path = "/api/lectures/{id}",
    params(("id" = i64, Path, description = "Lecture id")),
    responses(
        (status = 200, description = "Lecture", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lecture(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<LectureId>,
) -> Result<Json<Lecture>, AppError> {
    let lecture = LectureService::get_lecture(state.lectures.as_ref(), id).await?;
    Ok(Json(lecture))
}

/// Create a lecture
#[utoipa::path(
    post,
    path = "/api/lectures",
    request_body = CreateLectureDto,
    responses(
        (status = 201, description = "Lecture created", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto), fields(subject = %auth.login()))]
pub async fn create_lecture(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLectureDto>,
) -> Result<(StatusCode, Json<Lecture>), AppError> {
    let lecture = LectureService::create_lecture(state.lectures.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(lecture)))
}

/// Replace a lecture's title, description and date
///
/// Lecturer, summary, forum and file are only changed when given.
#[utoipa::path(
    put,
    path = "/api/lectures/{id}",
    params(("id" = i64, Path, description = "Lecture id")),
    request_body = UpdateLectureDto,
    responses(
        (status = 200, description = "Lecture updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto), fields(subject = %auth.login()))]
pub async fn update_lecture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LectureId>,
    ValidatedJson(dto): ValidatedJson<UpdateLectureDto>,
) -> Result<Json<Lecture>, AppError> {
    let lecture = LectureService::update_lecture(state.lectures.as_ref(), id, dto).await?;
    Ok(Json(lecture))
}

/// Delete a lecture
#[utoipa::path(
    delete,
    path = "/api/lectures/{id}",
    params(("id" = i64, Path, description = "Lecture id")),
    responses(
        (status = 204, description = "Lecture deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(subject = %auth.login()))]
pub async fn delete_lecture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LectureId>,
) -> Result<StatusCode, AppError> {
    LectureService::delete_lecture(state.lectures.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace a lecture's description
#[utoipa::path(
    put,
    path = "/api/lectures/{id}/description",
    params(("id" = i64, Path, description = "Lecture id")),
    request_body = UpdateDescriptionDto,
    responses(
        (status = 200, description = "Description updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_description(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<LectureId>,
    ValidatedJson(dto): ValidatedJson<UpdateDescriptionDto>,
) -> Result<Json<Lecture>, AppError> {
    let lecture =
        LectureService::update_description(state.lectures.as_ref(), id, dto.description).await?;
    Ok(Json(lecture))
}

async fn relink(state: &AppState, id: LectureId, link: LectureLink) -> Result<Json<Lecture>, AppError> {
    let lecture = LectureService::relink(state.lectures.as_ref(), id, link).await?;
    Ok(Json(lecture))
}

/// Assign the lecturer; an unknown user clears it
#[utoipa::path(
    put,
    path = "/api/lectures/{id}/lecturer/{user_id}",
    params(
        ("id" = i64, Path, description = "Lecture id"),
        ("user_id" = i64, Path, description = "Lecturer (user) id")
    ),
    responses(
        (status = 200, description = "Lecture updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_lecturer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, user_id)): Path<(LectureId, UserId)>,
) -> Result<Json<Lecture>, AppError> {
    relink(&state, id, LectureLink::Lecturer(user_id)).await
}

/// Move the lecture to a course; an unknown course clears it
#[utoipa::path(
    put,
    path = "/api/lectures/{id}/course/{course_id}",
    params(
        ("id" = i64, Path, description = "Lecture id"),
        ("course_id" = i64, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Lecture updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, course_id)): Path<(LectureId, CourseId)>,
) -> Result<Json<Lecture>, AppError> {
    relink(&state, id, LectureLink::Course(course_id)).await
}

/// Attach a file; an unknown file clears it
#[utoipa::path(
    put,
    path = "/api/lectures/{id}/file/{file_id}",
    params(
        ("id" = i64, Path, description = "Lecture id"),
        ("file_id" = i64, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "Lecture updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, file_id)): Path<(LectureId, FileId)>,
) -> Result<Json<Lecture>, AppError> {
    relink(&state, id, LectureLink::File(file_id)).await
}

/// Attach a forum; an unknown forum clears it
#[utoipa::path(
    put,
    path = "/api/lectures/{id}/forum/{forum_id}",
    params(
        ("id" = i64, Path, description = "Lecture id"),
        ("forum_id" = i64, Path, description = "Forum id")
    ),
    responses(
        (status = 200, description = "Lecture updated", body = Lecture),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse)
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_forum(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, forum_id)): Path<(LectureId, ForumId)>,
) -> Result<Json<Lecture>, AppError> {
    relink(&state, id, LectureLink::Forum(forum_id)).await
}
