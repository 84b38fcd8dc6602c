use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_current_user, login_user, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/me", get(get_current_user))
}
