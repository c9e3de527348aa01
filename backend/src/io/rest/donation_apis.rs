use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use shared::{DecideDonationRequest, SubmitDonationRequest};

use super::engine_error_response;
use crate::AppState;

// Query parameters for the donor history API
#[derive(Debug, Deserialize)]
pub struct DonorHistoryQuery {
    pub donor_id: String,
}

/// Submit a new donation request
pub async fn submit_donation(
    State(state): State<AppState>,
    Json(request): Json<SubmitDonationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/donations - donor: {}, blood group: {}",
        request.donor_id, request.blood_group
    );

    match state.donation_service.submit_donation(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}

/// Apply an admin decision (approve/reject) to a pending donation
pub async fn decide_donation(
    State(state): State<AppState>,
    Path(donation_id): Path<String>,
    Json(request): Json<DecideDonationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/donations/{}/decision - {:?}",
        donation_id, request.decision
    );

    match state
        .donation_service
        .decide_donation(&donation_id, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}

/// Finalize an approved donation (two-step workflow only)
pub async fn complete_donation(
    State(state): State<AppState>,
    Path(donation_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/donations/{}/complete", donation_id);

    match state.donation_service.complete_donation(&donation_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}

/// List a donor's donation history, most recent first
pub async fn get_donor_history(
    State(state): State<AppState>,
    Query(query): Query<DonorHistoryQuery>,
) -> impl IntoResponse {
    info!("GET /api/donations - donor: {}", query.donor_id);

    match state
        .donation_service
        .get_donor_history(&query.donor_id)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}
