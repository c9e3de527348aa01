use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use super::engine_error_response;
use crate::AppState;

/// List all inventory ledger rows
pub async fn get_inventory(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/inventory");

    match state.inventory_service.get_inventory().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(e),
    }
}
