pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::application::handlers::{self, MAX_REQUEST_BYTES};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_form_page))
        .route(
            "/application-submitted",
            get(handlers::handle_confirmation_page),
        )
        .route(
            "/api/v1/applications",
            post(handlers::handle_submit_application)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .with_state(state)
}
