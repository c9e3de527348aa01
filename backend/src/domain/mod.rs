//! # Domain Module
//!
//! Business logic for the donation lifecycle and inventory consistency
//! engine, independent of the HTTP surface and the storage backend.
//!
//! ## Module Organization
//!
//! - **donation_service**: the lifecycle state machine: submission, admin
//!   decision, completion, history, with the inventory credit tied to the
//!   single configured crediting transition
//! - **eligibility_service**: buffer-period and pending-request rules that
//!   gate new submissions
//! - **risk_service**: advisory risk scoring over vitals and screening
//!   answers
//! - **inventory_service**: ledger reads and out-of-band credits
//! - **dashboard_service**: read-only donor statistics projection
//! - **models**: domain entities shared by services and repositories
//! - **errors**: the engine's error taxonomy
//! - **config**: tunable constants and workflow selection

pub mod config;
pub mod dashboard_service;
pub mod donation_service;
pub mod eligibility_service;
pub mod errors;
pub mod inventory_service;
pub mod models;
pub mod risk_service;

pub use config::{CreditWorkflow, EngineConfig};
pub use dashboard_service::DashboardService;
pub use donation_service::DonationService;
pub use eligibility_service::EligibilityService;
pub use errors::{EngineError, EngineResult};
pub use inventory_service::InventoryService;
pub use risk_service::RiskService;
