//! SQLite repository for donation requests.
//!
//! The lifecycle-critical operation here is [`transition_donation`]: a
//! compare-and-set on the status column plus an optional inventory credit,
//! executed inside one transaction. A failed precondition aborts before the
//! credit runs; a failed credit rolls the status change back.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;

use shared::{BloodGroup, DonationStatus, VerificationStatus};

use crate::domain::models::{
    donation::{Donation, DonationUpdate},
    inventory::LedgerCredit,
};
use crate::storage::traits::{DonationStorage, StoreOutcome, TransitionOutcome};

#[derive(Clone)]
pub struct DonationRepository {
    pool: Arc<SqlitePool>,
}

impl DonationRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn row_to_donation(row: &SqliteRow) -> Result<Donation> {
        let blood_group: String = row.get("blood_group");
        let status: String = row.get("status");
        let verification_status: String = row.get("verification_status");
        let units: i64 = row.get("units");
        let risk_score: Option<i64> = row.get("risk_score");
        let admin_approved: i64 = row.get("admin_approved");

        Ok(Donation {
            id: row.get("id"),
            donor_id: row.get("donor_id"),
            blood_group: blood_group
                .parse::<BloodGroup>()
                .with_context(|| format!("corrupt blood_group column: {}", blood_group))?,
            units: u32::try_from(units).context("negative units column")?,
            status: status
                .parse::<DonationStatus>()
                .with_context(|| format!("corrupt status column: {}", status))?,
            risk_score: risk_score.map(|s| s.clamp(0, 100) as u8),
            admin_approved: admin_approved != 0,
            verification_status: verification_status
                .parse::<VerificationStatus>()
                .with_context(|| format!("corrupt verification_status column: {}", verification_status))?,
            submitted_at: row.get("submitted_at"),
            decided_at: row.get("decided_at"),
            donation_center: row.get("donation_center"),
            notes: row.get("notes"),
            admin_notes: row.get("admin_notes"),
        })
    }
}

#[async_trait]
impl DonationStorage for DonationRepository {
    async fn store_donation(&self, donation: &Donation) -> Result<StoreOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO donations (
                id, donor_id, blood_group, units, status, risk_score,
                admin_approved, verification_status, submitted_at, decided_at,
                donation_center, notes, admin_notes
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&donation.id)
        .bind(&donation.donor_id)
        .bind(donation.blood_group.as_str())
        .bind(donation.units as i64)
        .bind(donation.status.as_str())
        .bind(donation.risk_score.map(|s| s as i64))
        .bind(donation.admin_approved as i64)
        .bind(donation.verification_status.as_str())
        .bind(&donation.submitted_at)
        .bind(&donation.decided_at)
        .bind(&donation.donation_center)
        .bind(&donation.notes)
        .bind(&donation.admin_notes)
        .execute(&*self.pool)
        .await;

        match result {
            Ok(_) => Ok(StoreOutcome::Created),
            Err(e) => {
                // Two unique constraints can fire here. SQLite names the
                // violated columns in the message: only donor_id means the
                // partial open-request index, i.e. the donor already has a
                // request in flight. Anything else (notably an id collision
                // on the primary key) is a storage fault the caller may
                // retry, not an eligibility outcome.
                let open_request_conflict = e
                    .as_database_error()
                    .map(|db| {
                        matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
                            && db.message().contains("donations.donor_id")
                    })
                    .unwrap_or(false);
                if open_request_conflict {
                    Ok(StoreOutcome::PendingConflict)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn get_donation(&self, donation_id: &str) -> Result<Option<Donation>> {
        let row = sqlx::query(
            r#"
            SELECT id, donor_id, blood_group, units, status, risk_score,
                   admin_approved, verification_status, submitted_at, decided_at,
                   donation_center, notes, admin_notes
            FROM donations
            WHERE id = ?
            "#,
        )
        .bind(donation_id)
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_donation(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, donor_id, blood_group, units, status, risk_score,
                   admin_approved, verification_status, submitted_at, decided_at,
                   donation_center, notes, admin_notes
            FROM donations
            WHERE donor_id = ?
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(donor_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(Self::row_to_donation).collect()
    }

    async fn transition_donation(
        &self,
        donation_id: &str,
        expected: DonationStatus,
        update: &DonationUpdate,
        credit: Option<&LedgerCredit>,
    ) -> Result<TransitionOutcome> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-set: the WHERE clause on status makes concurrent or
        // retried decisions lose cleanly instead of double-applying
        let result = sqlx::query(
            r#"
            UPDATE donations
            SET status = ?,
                admin_approved = ?,
                verification_status = ?,
                decided_at = ?,
                admin_notes = COALESCE(?, admin_notes)
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(update.status.as_str())
        .bind(update.admin_approved as i64)
        .bind(update.verification_status.as_str())
        .bind(&update.decided_at)
        .bind(&update.admin_notes)
        .bind(donation_id)
        .bind(expected.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish an unknown id from a request that was already
            // decided; nothing was written, so just roll back
            let row = sqlx::query("SELECT status FROM donations WHERE id = ?")
                .bind(donation_id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.rollback().await?;

            return match row {
                None => Ok(TransitionOutcome::NotFound),
                Some(r) => {
                    let status: String = r.get("status");
                    Ok(TransitionOutcome::StatusConflict(
                        status
                            .parse::<DonationStatus>()
                            .with_context(|| format!("corrupt status column: {}", status))?,
                    ))
                }
            };
        }

        if let Some(credit) = credit {
            // Ledger credit rides in the same transaction as the status
            // change; additive ON CONFLICT update serializes concurrent
            // credits for the same blood group. Existing rows keep their
            // expiry date and location.
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
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let donation = self
            .get_donation(donation_id)
            .await?
            .ok_or_else(|| anyhow!("donation {} disappeared after transition", donation_id))?;

        Ok(TransitionOutcome::Applied(donation))
    }
}
