use axum::{routing::get, Router};

use crate::features::session::handlers;

/// Public routes: sign-in and sign-out never require a session
pub fn routes() -> Router {
    Router::new()
        .route("/", get(handlers::login_page).post(handlers::login))
        .route("/logout", get(handlers::logout))
}
