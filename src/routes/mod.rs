pub mod auth;
pub mod reset;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Registration & sessions
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/token", post(auth::token))
        .route("/api/v1/auth/token/refresh", post(auth::refresh))
        .route("/api/v1/auth/whoami", get(auth::who_am_i))
        // Profile & credentials
        .route("/api/v1/auth/update/user", put(auth::update_user))
        .route("/api/v1/auth/update/password", put(auth::update_password))
        // Password reset
        .route("/api/v1/auth/reset-password", post(reset::activate))
        .route("/api/v1/auth/reset-password/confirm", put(reset::confirm))
}
