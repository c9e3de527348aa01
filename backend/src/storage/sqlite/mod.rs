//! SQLite storage backend built on SQLx.

pub mod db;
pub mod repositories;

pub use db::DbConnection;
pub use repositories::{DonationRepository, InventoryRepository};
