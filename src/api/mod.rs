//! HTTP transport around the scrape pipeline. A thin wrapper: the
//! endpoint forwards the orchestrator's result as JSON for browser
//! clients that cannot make cross-origin fetches themselves.

pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{app_state::AppState, health};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scrape-website", post(handlers::scrape_website))
        .route("/healthz", get(health::health_check))
        .with_state(state)
}
