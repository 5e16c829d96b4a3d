pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(pages::index).post(pages::submit_job_description),
        )
        .route("/upload_page", get(pages::index))
        .route("/upload", post(pages::upload_resume))
        .route("/dashboard", get(pages::dashboard))
        .route("/candidate/:id", get(pages::candidate_detail))
        .route("/analyze_more/:id", get(pages::analyze_more))
        .nest_service("/static", static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
