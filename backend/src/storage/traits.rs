//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{BloodGroup, DonationStatus};

use crate::domain::models::{
    donation::{Donation, DonationUpdate},
    inventory::{InventoryRecord, LedgerCredit},
};

/// Result of attempting to persist a new donation request.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    /// The request was stored with status `pending`
    Created,
    /// The donor already has a pending request; the storage-level uniqueness
    /// constraint rejected the insert (backstop against concurrent submits)
    PendingConflict,
}

/// Result of a compare-and-set lifecycle transition.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The transition (and ledger credit, when requested) was committed
    Applied(Donation),
    /// No donation with the given ID exists
    NotFound,
    /// The donation exists but its status did not match the expected
    /// precondition; the actual status is returned for error reporting
    StatusConflict(DonationStatus),
}

/// Trait defining the interface for donation request storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification.
#[async_trait]
pub trait DonationStorage: Send + Sync {
    /// Store a new donation request in `pending` state.
    /// Must enforce "at most one non-terminal request per donor".
    async fn store_donation(&self, donation: &Donation) -> Result<StoreOutcome>;

    /// Retrieve a specific donation request by ID
    async fn get_donation(&self, donation_id: &str) -> Result<Option<Donation>>;

    /// List all donation requests for a donor, most recent first
    async fn list_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>>;

    /// Atomically transition a donation whose status equals `expected`,
    /// applying `credit` to the inventory ledger in the same unit of work
    /// when provided. Either both writes commit or neither does.
    async fn transition_donation(
        &self,
        donation_id: &str,
        expected: DonationStatus,
        update: &DonationUpdate,
        credit: Option<&LedgerCredit>,
    ) -> Result<TransitionOutcome>;
}

/// Trait defining the interface for inventory ledger storage operations
#[async_trait]
pub trait InventoryStorage: Send + Sync {
    /// Apply a single credit to the ledger row for the credit's blood group,
    /// creating the row if it does not exist yet (upsert). The add is atomic;
    /// concurrent credits to the same blood group must not lose updates.
    async fn credit(&self, credit: &LedgerCredit) -> Result<InventoryRecord>;

    /// Retrieve the ledger row for a blood group, if any
    async fn get_record(&self, blood_group: BloodGroup) -> Result<Option<InventoryRecord>>;

    /// List all ledger rows ordered by blood group
    async fn list_records(&self) -> Result<Vec<InventoryRecord>>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts away the specific connection type and provides factory methods
/// for creating repositories, so the domain layer can work with any storage
/// backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of DonationStorage this connection creates
    type DonationRepository: DonationStorage + Clone;

    /// The type of InventoryStorage this connection creates
    type InventoryRepository: InventoryStorage + Clone;

    /// Create a new donation repository for this connection
    fn create_donation_repository(&self) -> Self::DonationRepository;

    /// Create a new inventory repository for this connection
    fn create_inventory_repository(&self) -> Self::InventoryRepository;
}
