//! SQLite repository for the per-blood-group inventory ledger.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;

use shared::BloodGroup;

use crate::domain::models::inventory::{InventoryRecord, LedgerCredit};
use crate::storage::traits::InventoryStorage;

#[derive(Clone)]
pub struct InventoryRepository {
    pool: Arc<SqlitePool>,
}

impl InventoryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &SqliteRow) -> Result<InventoryRecord> {
        let blood_group: String = row.get("blood_group");
        let units_available: i64 = row.get("units_available");

        Ok(InventoryRecord {
            blood_group: blood_group
                .parse::<BloodGroup>()
                .with_context(|| format!("corrupt blood_group column: {}", blood_group))?,
            units_available: u32::try_from(units_available)
                .context("negative units_available column")?,
            location: row.get("location"),
            expiry_date: row.get("expiry_date"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl InventoryStorage for InventoryRepository {
    async fn credit(&self, credit: &LedgerCredit) -> Result<InventoryRecord> {
        // Upsert: fresh rows take the credit's expiry and location; existing
        // rows only accumulate units and refresh updated_at
        sqlx::query(
            r#"
            INSERT INTO inventory (blood_group, units_available, location, expiry_date, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(blood_group) DO UPDATE SET
                units_available = units_available + excluded.units_available,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(credit.blood_group.as_str())
        .bind(credit.units as i64)
        .bind(&credit.location)
        .bind(&credit.expiry_date)
        .bind(&credit.updated_at)
        .execute(&*self.pool)
        .await?;

        self.get_record(credit.blood_group)
            .await?
            .ok_or_else(|| anyhow!("inventory row missing after credit"))
    }

    async fn get_record(&self, blood_group: BloodGroup) -> Result<Option<InventoryRecord>> {
        let row = sqlx::query(
            r#"
            SELECT blood_group, units_available, location, expiry_date, updated_at
            FROM inventory
            WHERE blood_group = ?
            "#,
        )
        .bind(blood_group.as_str())
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_records(&self) -> Result<Vec<InventoryRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT blood_group, units_available, location, expiry_date, updated_at
            FROM inventory
            ORDER BY blood_group
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
