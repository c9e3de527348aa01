//! # Blood-Bank Donation Engine
//!
//! Request/response engine for the donation lifecycle: eligibility gating,
//! advisory risk scoring, admin decisions, and an exactly-once credit to the
//! per-blood-group inventory ledger.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! External collaborators (UI, identity, notifications)
//!     ↓
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (lifecycle, eligibility, risk, inventory, dashboard)
//!     ↓
//! Storage Layer (SQLite repositories behind trait abstractions)
//! ```
//!
//! The engine is UI-agnostic: screens, uploads and notifications live in
//! separate services that call into the REST surface.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    DashboardService, DonationService, EligibilityService, EngineConfig, InventoryService,
    RiskService,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub donation_service: DonationService<DbConnection>,
    pub inventory_service: InventoryService<DbConnection>,
    pub dashboard_service: DashboardService<DbConnection>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(database_url: Option<&str>) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = Arc::new(match database_url {
        Some(url) => DbConnection::new(url).await?,
        None => DbConnection::init().await?,
    });

    info!("Setting up domain model");
    let config = EngineConfig::default();
    let eligibility_service = EligibilityService::new(config.buffer_period_days);
    let risk_service = RiskService::new(config.high_risk_threshold);
    let donation_service = DonationService::new(
        Arc::clone(&db_conn),
        eligibility_service,
        risk_service,
        config.clone(),
    );
    let inventory_service = InventoryService::new(Arc::clone(&db_conn), config.clone());
    let dashboard_service = DashboardService::new(Arc::clone(&db_conn), &config);

    info!("Setting up application state");
    Ok(AppState {
        donation_service,
        inventory_service,
        dashboard_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local UI to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/donations",
            get(io::get_donor_history).post(io::submit_donation),
        )
        .route("/donations/:id/decision", post(io::decide_donation))
        .route("/donations/:id/complete", post(io::complete_donation))
        .route("/eligibility", get(io::get_eligibility))
        .route("/inventory", get(io::get_inventory))
        .route("/dashboard", get(io::get_dashboard));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
