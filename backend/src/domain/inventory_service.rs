//! Read access to the inventory ledger, plus direct credits for
//! out-of-band stock adjustments (e.g. seeding a new center).
//!
//! Lifecycle-driven credits do NOT go through this service: they ride
//! inside the donation decision transaction so a decision and its credit
//! can never be observed separately.

use chrono::Utc;
use log::info;
use std::sync::Arc;

use shared::{BloodGroup, InventoryListResponse, InventoryRecord as InventoryDto};

use crate::domain::{
    config::EngineConfig,
    errors::EngineResult,
    models::inventory::LedgerCredit,
};
use crate::io::rest::mappers::inventory_mapper::InventoryMapper;
use crate::storage::{Connection, InventoryStorage};

#[derive(Clone)]
pub struct InventoryService<C: Connection> {
    inventory_repository: C::InventoryRepository,
    config: EngineConfig,
}

impl<C: Connection> InventoryService<C> {
    pub fn new(connection: Arc<C>, config: EngineConfig) -> Self {
        let inventory_repository = connection.create_inventory_repository();
        Self {
            inventory_repository,
            config,
        }
    }

    /// All ledger rows, ordered by blood group
    pub async fn get_inventory(&self) -> EngineResult<InventoryListResponse> {
        let records = self.inventory_repository.list_records().await?;

        Ok(InventoryListResponse {
            records: records.into_iter().map(InventoryMapper::to_dto).collect(),
        })
    }

    /// Apply a direct credit outside the donation lifecycle
    pub async fn credit(
        &self,
        blood_group: BloodGroup,
        units: u32,
        location: &str,
    ) -> EngineResult<InventoryDto> {
        let now = Utc::now();
        let credit = LedgerCredit::new(
            blood_group,
            units,
            location.to_string(),
            now.date_naive(),
            now.to_rfc3339(),
            self.config.shelf_life_days,
        );

        let record = self.inventory_repository.credit(&credit).await?;
        info!(
            "Credited {} unit(s) of {} at {} (now {} available)",
            units, blood_group, location, record.units_available
        );

        Ok(InventoryMapper::to_dto(record))
    }
}
