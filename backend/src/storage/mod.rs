//! # Storage Module
//!
//! Handles all data persistence for the donation engine.
//!
//! The domain layer only ever talks to the traits in [`traits`]; the SQLite
//! implementation lives in [`sqlite`] and can be swapped out without touching
//! business logic. All compound writes (decision + ledger credit) happen
//! inside a single database transaction so the engine never observes a
//! half-applied decision.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    Connection, DonationStorage, InventoryStorage, StoreOutcome, TransitionOutcome,
};
