use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::storage::traits::Connection;

use super::repositories::{DonationRepository, InventoryRepository};

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:bloodbank.db";

/// DbConnection manages the SQLite pool and hands out repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name so parallel tests don't collide
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub(crate) fn pool(&self) -> Arc<SqlitePool> {
        Arc::clone(&self.pool)
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Donation requests. Records are never deleted, only transitioned to
        // a terminal status, so the table doubles as the audit trail.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS donations (
                id TEXT PRIMARY KEY,
                donor_id TEXT NOT NULL,
                blood_group TEXT NOT NULL,
                units INTEGER NOT NULL,
                status TEXT NOT NULL,
                risk_score INTEGER,
                admin_approved INTEGER NOT NULL DEFAULT 0,
                verification_status TEXT NOT NULL,
                submitted_at TEXT NOT NULL,
                decided_at TEXT,
                donation_center TEXT NOT NULL,
                notes TEXT,
                admin_notes TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // At most one non-terminal request per donor, enforced by the
        // database so concurrent submits cannot race past the application
        // eligibility check.
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_donations_one_open_per_donor
            ON donations(donor_id) WHERE status IN ('pending', 'approved');
            "#,
        )
        .execute(pool)
        .await?;

        // History queries are always per-donor, most recent first
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_donations_donor_submitted
            ON donations(donor_id, submitted_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // Aggregate inventory ledger, one row per blood group
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                blood_group TEXT PRIMARY KEY,
                units_available INTEGER NOT NULL,
                location TEXT NOT NULL,
                expiry_date TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type DonationRepository = DonationRepository;
    type InventoryRepository = InventoryRepository;

    fn create_donation_repository(&self) -> DonationRepository {
        DonationRepository::new(self.pool())
    }

    fn create_inventory_repository(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool())
    }
}
