use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_lecture, delete_lecture, filter_lectures, get_lecture, get_lectures, set_course,
    set_file, set_forum, set_lecturer, update_description, update_lecture,
};
use crate::state::AppState;

pub fn init_lectures_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_lectures).post(create_lecture))
        .route("/filter", get(filter_lectures))
        .route(
            "/{id}",
            get(get_lecture).put(update_lecture).delete(delete_lecture),
        )
        .route("/{id}/description", put(update_description))
        .route("/{id}/lecturer/{user_id}", put(set_lecturer))
        .route("/{id}/course/{course_id}", put(set_course))
        .route("/{id}/file/{file_id}", put(set_file))
        .route("/{id}/forum/{forum_id}", put(set_forum))
}
