//! # REST API Interface Layer
//!
//! HTTP endpoints for the donation engine. This layer handles request and
//! response serialization, boundary validation of query parameters, and the
//! translation of domain errors into HTTP status codes. Business logic stays
//! in the domain layer; handlers are pure plumbing.
//!
//! Error mapping:
//! - `Ineligible` and `InvalidTransition` are conflicts with current state
//!   (409) and carry enough detail for the caller to explain the situation
//!   to a user (pending vs. buffer period, exact next eligible date)
//! - `NotFound` maps to 404, `Validation` to 422
//! - `Storage` maps to 500 with the detail kept in the server log

pub mod dashboard_apis;
pub mod donation_apis;
pub mod eligibility_apis;
pub mod inventory_apis;
pub mod mappers;

pub use dashboard_apis::get_dashboard;
pub use donation_apis::{complete_donation, decide_donation, get_donor_history, submit_donation};
pub use eligibility_apis::get_eligibility;
pub use inventory_apis::get_inventory;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use serde::Serialize;
use shared::IneligibilityReason;

use crate::domain::EngineError;

/// Error body returned to clients. Eligibility failures carry the reason
/// and, for buffer-period blocks, the exact date the donor may return.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_eligible_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            reason: None,
            next_eligible_date: None,
            days_remaining: None,
        }
    }
}

/// Translate a domain error into an HTTP response
pub fn engine_error_response(err: EngineError) -> Response {
    match err {
        EngineError::Ineligible(snapshot) => {
            let body = ErrorBody {
                error: EngineError::Ineligible(snapshot.clone()).to_string(),
                reason: snapshot.reason,
                next_eligible_date: snapshot.next_eligible_date,
                days_remaining: snapshot.days_remaining,
            };
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        err @ EngineError::InvalidTransition { .. } => {
            (StatusCode::CONFLICT, Json(ErrorBody::message(err.to_string()))).into_response()
        }
        err @ EngineError::NotFound { .. } => {
            (StatusCode::NOT_FOUND, Json(ErrorBody::message(err.to_string()))).into_response()
        }
        err @ EngineError::Validation(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody::message(err.to_string())),
        )
            .into_response(),
        EngineError::Storage(e) => {
            error!("Storage failure: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::message("Internal storage error".to_string())),
            )
                .into_response()
        }
    }
}
