use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use super::engine_error_response;
use crate::AppState;

// Query parameters for the eligibility API
#[derive(Debug, Deserialize)]
pub struct EligibilityQuery {
    pub donor_id: String,
}

/// Current eligibility snapshot for a donor. Advisory for the UI; the same
/// rules are re-enforced on submission.
pub async fn get_eligibility(
    State(state): State<AppState>,
    Query(query): Query<EligibilityQuery>,
) -> impl IntoResponse {
    info!("GET /api/eligibility - donor: {}", query.donor_id);

    match state
        .donation_service
        .get_eligibility(&query.donor_id)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}
