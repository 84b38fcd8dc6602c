use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;
use sno_core::{PaginationMeta, PaginationParams};
use sno_models::{
    CreateLectureDto, Lecture, LectureFilterParams, LoginRequest, LoginResponse,
    PaginatedLecturesResponse, RegisterRequest, UpdateDescriptionDto, UpdateLectureDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::lectures::controller::get_lectures,
        crate::modules::lectures::controller::filter_lectures,
        crate::modules::lectures::controller::get_lecture,
        crate::modules::lectures::controller::create_lecture,
        crate::modules::lectures::controller::update_lecture,
        crate::modules::lectures::controller::delete_lecture,
        crate::modules::lectures::controller::update_description,
        crate::modules::lectures::controller::set_lecturer,
        crate::modules::lectures::controller::set_course,
        crate::modules::lectures::controller::set_file,
        crate::modules::lectures::controller::set_forum,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Lecture,
            CreateLectureDto,
            UpdateLectureDto,
            UpdateDescriptionDto,
            LectureFilterParams,
            PaginatedLecturesResponse,
            PaginationMeta,
            PaginationParams,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Lectures", description = "Lecture management and filtered listings")
    ),
    info(
        title = "SNO API",
        version = "0.1.0",
        description = "Academic administration API: courses, lectures and users behind bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
