use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    api::dtos::{ScrapeErrorResponse, ScrapeRequest},
    app_state::AppState,
    result::ExtractionResult,
    scrape,
};

#[utoipa::path(
    post,
    path = "/api/scrape-website",
    tag = "scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Page scraped successfully", body = ExtractionResult),
        (status = 500, description = "Scrape failed", body = ScrapeErrorResponse)
    )
)]
pub async fn scrape_website(
    State(state): State<AppState>,
    Json(payload): Json<ScrapeRequest>,
) -> Response {
    if let Err(reason) = payload.validate() {
        warn!("rejected scrape request: {reason}");
        return failure_response(payload.url, reason);
    }

    let result = scrape::scrape_website(&payload.url, state.policy()).await;
    if result.success {
        (StatusCode::OK, Json(result)).into_response()
    } else {
        let error = result
            .error
            .unwrap_or_else(|| "scrape failed".to_string());
        failure_response(result.url, error)
    }
}

fn failure_response(url: String, error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ScrapeErrorResponse {
            success: false,
            error,
            url,
        }),
    )
        .into_response()
}
