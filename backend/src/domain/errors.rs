use shared::{DonationStatus, EligibilitySnapshot};
use thiserror::Error;

/// Error taxonomy for the donation engine.
///
/// Everything except `Storage` is a client-visible outcome of a rule check;
/// `Storage` wraps the persistence layer and is the only retry-worthy
/// variant (retries are safe because decisions are guarded by a
/// compare-and-set on the pending status).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Submission rejected: pending request in flight or buffer period
    /// active. The snapshot carries the reason and, for the buffer case,
    /// the exact date the donor becomes eligible again.
    #[error("Donor is not eligible to donate: {}", describe_ineligibility(.0))]
    Ineligible(EligibilitySnapshot),

    /// Attempted decision on a request that is not in the expected state,
    /// e.g. a double-approval. Never retried automatically.
    #[error("Donation {id} has already been decided (status: {status})")]
    InvalidTransition { id: String, status: DonationStatus },

    #[error("Donation not found: {id}")]
    NotFound { id: String },

    /// Boundary validation failure (bad units, empty center, oversized notes)
    #[error("{0}")]
    Validation(String),

    /// Underlying persistence failure; compound operations roll back fully
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

fn describe_ineligibility(snapshot: &EligibilitySnapshot) -> String {
    match (snapshot.reason, snapshot.next_eligible_date.as_deref()) {
        (Some(reason), Some(date)) => format!("{} until {}", reason, date),
        (Some(reason), None) => reason.to_string(),
        (None, _) => "ineligible".to_string(),
    }
}
