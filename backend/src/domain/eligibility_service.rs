//! Eligibility rules for new donation submissions.
//!
//! Pure evaluation over a donor's request history; the caller supplies
//! "today" so the buffer-period boundary can be tested exactly. This is the
//! server-side enforcement point: any UI-side check is advisory only.

use chrono::{DateTime, Duration, NaiveDate};
use log::warn;
use shared::{EligibilitySnapshot, IneligibilityReason};

use crate::domain::models::donation::Donation;

#[derive(Clone)]
pub struct EligibilityService {
    buffer_period_days: i64,
}

impl EligibilityService {
    pub fn new(buffer_period_days: i64) -> Self {
        Self { buffer_period_days }
    }

    /// Evaluate whether the donor may submit a new donation request today.
    ///
    /// Rules, in order:
    /// 1. Any open (pending or approved-awaiting-completion) request blocks
    ///    submission; no eligible date can be given, the donor must wait for
    ///    a decision.
    /// 2. No completed donation on record: eligible.
    /// 3. Most recent completed donation inside the buffer period: blocked
    ///    until `decided_at + buffer_period_days` (eligible on that exact
    ///    day).
    /// 4. Otherwise eligible.
    pub fn evaluate(&self, history: &[Donation], today: NaiveDate) -> EligibilitySnapshot {
        let pending_count = history.iter().filter(|d| d.is_open()).count() as u32;
        if pending_count > 0 {
            return EligibilitySnapshot {
                is_eligible: false,
                reason: Some(IneligibilityReason::PendingApproval),
                next_eligible_date: None,
                days_remaining: None,
                pending_count,
            };
        }

        let last_completed_date = history
            .iter()
            .filter(|d| d.is_confirmed())
            .filter_map(|d| decision_date(d))
            .max();

        let completed = match last_completed_date {
            Some(date) => date,
            None => return EligibilitySnapshot::eligible(),
        };

        let next_eligible = completed + Duration::days(self.buffer_period_days);
        if today < next_eligible {
            return EligibilitySnapshot {
                is_eligible: false,
                reason: Some(IneligibilityReason::BufferPeriodActive),
                next_eligible_date: Some(next_eligible.format("%Y-%m-%d").to_string()),
                days_remaining: Some((next_eligible - today).num_days()),
                pending_count: 0,
            };
        }

        EligibilitySnapshot::eligible()
    }
}

/// Decision date of a donation, if it has one and it parses
fn decision_date(donation: &Donation) -> Option<NaiveDate> {
    let decided_at = donation.decided_at.as_deref()?;
    match DateTime::parse_from_rfc3339(decided_at) {
        Ok(ts) => Some(ts.date_naive()),
        Err(e) => {
            warn!(
                "Unparseable decided_at on donation {}: {} ({})",
                donation.id, decided_at, e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BloodGroup, DonationStatus, VerificationStatus};

    fn donation(id: &str, status: DonationStatus, decided_at: Option<&str>) -> Donation {
        Donation {
            id: id.to_string(),
            donor_id: "donor-1".to_string(),
            blood_group: BloodGroup::OPositive,
            units: 1,
            status,
            risk_score: Some(5),
            admin_approved: matches!(
                status,
                DonationStatus::Approved | DonationStatus::Completed
            ),
            verification_status: VerificationStatus::AiVerified,
            submitted_at: "2025-01-01T09:00:00+00:00".to_string(),
            decided_at: decided_at.map(|s| s.to_string()),
            donation_center: "Main".to_string(),
            notes: None,
            admin_notes: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_history_is_eligible() {
        let service = EligibilityService::new(56);
        let snapshot = service.evaluate(&[], day(2025, 3, 1));
        assert!(snapshot.is_eligible);
        assert_eq!(snapshot.pending_count, 0);
    }

    #[test]
    fn test_pending_request_blocks_with_no_date() {
        let service = EligibilityService::new(56);
        let history = vec![donation("donation::1", DonationStatus::Pending, None)];

        let snapshot = service.evaluate(&history, day(2025, 3, 1));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.reason, Some(IneligibilityReason::PendingApproval));
        // Caller must wait for a decision, not a date
        assert_eq!(snapshot.next_eligible_date, None);
        assert_eq!(snapshot.pending_count, 1);
    }

    #[test]
    fn test_pending_blocks_even_outside_buffer_period() {
        let service = EligibilityService::new(56);
        let history = vec![
            donation(
                "donation::1",
                DonationStatus::Completed,
                Some("2024-01-01T12:00:00+00:00"),
            ),
            donation("donation::2", DonationStatus::Pending, None),
        ];

        // A year after the completed donation, but a request is in flight
        let snapshot = service.evaluate(&history, day(2025, 1, 1));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.reason, Some(IneligibilityReason::PendingApproval));
    }

    #[test]
    fn test_approved_but_not_completed_blocks_submission() {
        let service = EligibilityService::new(56);
        let history = vec![donation(
            "donation::1",
            DonationStatus::Approved,
            Some("2025-02-01T12:00:00+00:00"),
        )];

        let snapshot = service.evaluate(&history, day(2025, 2, 2));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.reason, Some(IneligibilityReason::PendingApproval));
    }

    #[test]
    fn test_buffer_period_boundary_is_exact() {
        let service = EligibilityService::new(56);
        // Completed on 2025-01-01; next eligible date is 2025-02-26 (day 56)
        let history = vec![donation(
            "donation::1",
            DonationStatus::Completed,
            Some("2025-01-01T15:30:00+00:00"),
        )];

        // Day 0: blocked with the full buffer remaining
        let snapshot = service.evaluate(&history, day(2025, 1, 1));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.reason, Some(IneligibilityReason::BufferPeriodActive));
        assert_eq!(snapshot.next_eligible_date.as_deref(), Some("2025-02-26"));
        assert_eq!(snapshot.days_remaining, Some(56));

        // Day 55: still blocked, one day left
        let snapshot = service.evaluate(&history, day(2025, 2, 25));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.days_remaining, Some(1));

        // Day 56: eligible again
        let snapshot = service.evaluate(&history, day(2025, 2, 26));
        assert!(snapshot.is_eligible);
    }

    #[test]
    fn test_rejected_history_does_not_block() {
        let service = EligibilityService::new(56);
        let history = vec![donation(
            "donation::1",
            DonationStatus::Rejected,
            Some("2025-02-20T12:00:00+00:00"),
        )];

        let snapshot = service.evaluate(&history, day(2025, 2, 21));
        assert!(snapshot.is_eligible);
    }

    #[test]
    fn test_most_recent_completed_donation_wins() {
        let service = EligibilityService::new(56);
        let history = vec![
            donation(
                "donation::1",
                DonationStatus::Completed,
                Some("2024-06-01T12:00:00+00:00"),
            ),
            donation(
                "donation::2",
                DonationStatus::Completed,
                Some("2025-01-01T12:00:00+00:00"),
            ),
        ];

        // Old donation alone would allow it; the recent one blocks
        let snapshot = service.evaluate(&history, day(2025, 1, 15));
        assert!(!snapshot.is_eligible);
        assert_eq!(snapshot.next_eligible_date.as_deref(), Some("2025-02-26"));
    }
}
