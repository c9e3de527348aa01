//! Donor-facing dashboard projection.
//!
//! Pure read side: summarizes a donor's history into display statistics.
//! Only completed, admin-approved donations count toward confirmed totals,
//! and the lives-saved figure is an estimate that feeds no business rule.

use std::sync::Arc;

use shared::{DashboardResponse, DonorDashboard};

use crate::domain::{config::EngineConfig, errors::EngineResult, models::donation::Donation};
use crate::storage::{Connection, DonationStorage};

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    donation_repository: C::DonationRepository,
    lives_per_unit: f64,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>, config: &EngineConfig) -> Self {
        let donation_repository = connection.create_donation_repository();
        Self {
            donation_repository,
            lives_per_unit: config.lives_per_unit,
        }
    }

    /// Summarize a donor's confirmed donations for display
    pub async fn get_dashboard(&self, donor_id: &str) -> EngineResult<DashboardResponse> {
        let history = self
            .donation_repository
            .list_donations_for_donor(donor_id)
            .await?;

        Ok(DashboardResponse {
            donor_id: donor_id.to_string(),
            dashboard: self.summarize(&history),
        })
    }

    fn summarize(&self, history: &[Donation]) -> DonorDashboard {
        let confirmed: Vec<&Donation> = history.iter().filter(|d| d.is_confirmed()).collect();
        let total_donations = confirmed.len() as u32;
        let total_units: u32 = confirmed.iter().map(|d| d.units).sum();

        // Linear estimate plus a small sub-linear bonus for repeat donors;
        // rounded to one decimal for display
        let raw = total_units as f64 * self.lives_per_unit
            + (total_donations as f64).sqrt() * 0.5;
        let lives_saved_estimate = (raw * 10.0).round() / 10.0;

        DonorDashboard {
            total_donations,
            total_units,
            lives_saved_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BloodGroup, DonationStatus, VerificationStatus};

    use crate::storage::sqlite::db::DbConnection;

    fn donation(status: DonationStatus, admin_approved: bool, units: u32) -> Donation {
        Donation {
            id: format!("donation::{}", units),
            donor_id: "donor-1".to_string(),
            blood_group: BloodGroup::BPositive,
            units,
            status,
            risk_score: Some(0),
            admin_approved,
            verification_status: VerificationStatus::AdminApproved,
            submitted_at: "2025-01-01T09:00:00+00:00".to_string(),
            decided_at: Some("2025-01-02T09:00:00+00:00".to_string()),
            donation_center: "Main".to_string(),
            notes: None,
            admin_notes: None,
        }
    }

    async fn test_service() -> DashboardService<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        DashboardService::new(db, &EngineConfig::default())
    }

    #[tokio::test]
    async fn test_empty_history_summarizes_to_zero() {
        let service = test_service().await;
        let dashboard = service.summarize(&[]);
        assert_eq!(dashboard.total_donations, 0);
        assert_eq!(dashboard.total_units, 0);
        assert_eq!(dashboard.lives_saved_estimate, 0.0);
    }

    #[tokio::test]
    async fn test_only_confirmed_donations_count() {
        let service = test_service().await;
        let history = vec![
            donation(DonationStatus::Completed, true, 1),
            donation(DonationStatus::Pending, false, 2),
            donation(DonationStatus::Rejected, false, 3),
            // Approved but not completed: not confirmed yet
            donation(DonationStatus::Approved, true, 4),
        ];

        let dashboard = service.summarize(&history);
        assert_eq!(dashboard.total_donations, 1);
        assert_eq!(dashboard.total_units, 1);
        // 1 * 2.5 + sqrt(1) * 0.5
        assert_eq!(dashboard.lives_saved_estimate, 3.0);
    }

    #[tokio::test]
    async fn test_lives_saved_estimate_math() {
        let service = test_service().await;
        let history = vec![
            donation(DonationStatus::Completed, true, 1),
            donation(DonationStatus::Completed, true, 1),
            donation(DonationStatus::Completed, true, 1),
            donation(DonationStatus::Completed, true, 1),
        ];

        let dashboard = service.summarize(&history);
        assert_eq!(dashboard.total_donations, 4);
        assert_eq!(dashboard.total_units, 4);
        // 4 * 2.5 + sqrt(4) * 0.5 = 11.0
        assert_eq!(dashboard.lives_saved_estimate, 11.0);
    }
}
