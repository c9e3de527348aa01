use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use super::engine_error_response;
use crate::AppState;

// Query parameters for the dashboard API
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub donor_id: String,
}

/// Donor statistics summary (display only)
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - donor: {}", query.donor_id);

    match state.dashboard_service.get_dashboard(&query.donor_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}
