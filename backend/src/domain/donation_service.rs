//! Donation lifecycle orchestration.
//!
//! Owns the canonical status of every donation request and the single legal
//! path through it: `pending -> approved|rejected` on admin decision, and
//! `approved -> completed` when the two-step workflow is configured. The
//! inventory credit fires on exactly one transition, inside the same storage
//! transaction as the status change.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;

use shared::{
    DecideDonationRequest, DecideDonationResponse, Decision, DonationHistoryResponse,
    DonationRequest as DonationDto, DonationStatus, EligibilityResponse, EligibilitySnapshot,
    IneligibilityReason, SubmitDonationRequest, SubmitDonationResponse, VerificationStatus,
};

use crate::domain::{
    config::{CreditWorkflow, EngineConfig},
    eligibility_service::EligibilityService,
    errors::{EngineError, EngineResult},
    models::{
        donation::{Donation, DonationUpdate},
        inventory::LedgerCredit,
    },
    risk_service::RiskService,
};
use crate::io::rest::mappers::donation_mapper::DonationMapper;
use crate::storage::{Connection, DonationStorage, StoreOutcome, TransitionOutcome};

#[derive(Clone)]
pub struct DonationService<C: Connection> {
    donation_repository: C::DonationRepository,
    eligibility_service: EligibilityService,
    risk_service: RiskService,
    config: EngineConfig,
}

impl<C: Connection> DonationService<C> {
    pub fn new(
        connection: Arc<C>,
        eligibility_service: EligibilityService,
        risk_service: RiskService,
        config: EngineConfig,
    ) -> Self {
        let donation_repository = connection.create_donation_repository();
        Self {
            donation_repository,
            eligibility_service,
            risk_service,
            config,
        }
    }

    /// Submit a new donation request for a donor.
    ///
    /// Eligibility is enforced here, server-side; the risk score is attached
    /// as advisory metadata and never rejects the submission.
    pub async fn submit_donation(
        &self,
        request: SubmitDonationRequest,
    ) -> EngineResult<SubmitDonationResponse> {
        let units = request.units.unwrap_or(1);
        self.validate_submission(&request, units)?;

        let history = self
            .donation_repository
            .list_donations_for_donor(&request.donor_id)
            .await?;

        let today = Utc::now().date_naive();
        let snapshot = self.eligibility_service.evaluate(&history, today);
        if !snapshot.is_eligible {
            info!(
                "Submission blocked for donor {}: {:?}",
                request.donor_id, snapshot.reason
            );
            return Err(EngineError::Ineligible(snapshot));
        }

        let assessment = self
            .risk_service
            .assess(&request.vitals, &request.health_screening);
        let verification_status = if assessment.score <= self.config.auto_verify_max_score {
            VerificationStatus::AiVerified
        } else {
            VerificationStatus::Pending
        };

        let now_millis = Utc::now().timestamp_millis() as u64;
        let donation = Donation {
            id: DonationDto::generate_id(now_millis),
            donor_id: request.donor_id.clone(),
            blood_group: request.blood_group,
            units,
            status: DonationStatus::Pending,
            risk_score: Some(assessment.score),
            admin_approved: false,
            verification_status,
            submitted_at: now_rfc3339()?,
            decided_at: None,
            donation_center: request.donation_center.trim().to_string(),
            notes: request.notes,
            admin_notes: None,
        };

        match self.donation_repository.store_donation(&donation).await? {
            StoreOutcome::Created => {}
            StoreOutcome::PendingConflict => {
                // A concurrent submit won the race. The competing request
                // may already be decided by the time we could re-read, so
                // report the conflict directly instead of re-evaluating.
                warn!(
                    "Concurrent submission detected for donor {}",
                    request.donor_id
                );
                return Err(EngineError::Ineligible(open_request_snapshot()));
            }
        }

        info!(
            "Created donation {} for donor {} ({} unit(s), {}, risk score {})",
            donation.id, donation.donor_id, donation.units, donation.blood_group, assessment.score
        );

        Ok(SubmitDonationResponse {
            donation: DonationMapper::to_dto(donation),
            risk_assessment: assessment,
            success_message: "Donation request submitted and awaiting review".to_string(),
        })
    }

    /// Apply an admin decision to a pending donation request.
    ///
    /// Approval transitions to the configured credit-eligible status and
    /// credits the inventory ledger in the same unit of work; rejection has
    /// no ledger effect. Deciding an already-decided request fails with
    /// `InvalidTransition` rather than silently re-applying.
    pub async fn decide_donation(
        &self,
        donation_id: &str,
        request: DecideDonationRequest,
    ) -> EngineResult<DecideDonationResponse> {
        let donation = self
            .donation_repository
            .get_donation(donation_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                id: donation_id.to_string(),
            })?;

        if donation.status != DonationStatus::Pending {
            return Err(EngineError::InvalidTransition {
                id: donation_id.to_string(),
                status: donation.status,
            });
        }

        let decided_at = now_rfc3339()?;
        let (update, credit, success_message) = match request.decision {
            Decision::Approve => {
                let status = match self.config.workflow {
                    CreditWorkflow::SingleStep => DonationStatus::Completed,
                    CreditWorkflow::TwoStep => DonationStatus::Approved,
                };
                let credit = match self.config.workflow {
                    CreditWorkflow::SingleStep => Some(self.build_credit(&donation, &decided_at)),
                    CreditWorkflow::TwoStep => None,
                };
                let message = match self.config.workflow {
                    CreditWorkflow::SingleStep => {
                        "Donation approved and inventory credited".to_string()
                    }
                    CreditWorkflow::TwoStep => {
                        "Donation approved and awaiting completion".to_string()
                    }
                };
                (
                    DonationUpdate {
                        status,
                        admin_approved: true,
                        verification_status: VerificationStatus::AdminApproved,
                        decided_at,
                        admin_notes: request.admin_notes,
                    },
                    credit,
                    message,
                )
            }
            Decision::Reject => (
                DonationUpdate {
                    status: DonationStatus::Rejected,
                    admin_approved: false,
                    verification_status: VerificationStatus::Rejected,
                    decided_at,
                    admin_notes: request.admin_notes,
                },
                None,
                "Donation rejected".to_string(),
            ),
        };

        let outcome = self
            .donation_repository
            .transition_donation(donation_id, DonationStatus::Pending, &update, credit.as_ref())
            .await?;

        let donation = self.unwrap_transition(donation_id, outcome)?;
        info!(
            "Donation {} decided: {} by admin",
            donation_id, donation.status
        );

        Ok(DecideDonationResponse {
            donation: DonationMapper::to_dto(donation),
            success_message,
        })
    }

    /// Finalize an approved donation (two-step workflow): the
    /// `approved -> completed` transition, crediting the ledger.
    pub async fn complete_donation(
        &self,
        donation_id: &str,
    ) -> EngineResult<DecideDonationResponse> {
        let donation = self
            .donation_repository
            .get_donation(donation_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                id: donation_id.to_string(),
            })?;

        if donation.status != DonationStatus::Approved {
            return Err(EngineError::InvalidTransition {
                id: donation_id.to_string(),
                status: donation.status,
            });
        }

        let completed_at = now_rfc3339()?;
        let credit = self.build_credit(&donation, &completed_at);
        let update = DonationUpdate {
            status: DonationStatus::Completed,
            admin_approved: true,
            verification_status: VerificationStatus::AdminApproved,
            decided_at: completed_at,
            admin_notes: None,
        };

        let outcome = self
            .donation_repository
            .transition_donation(donation_id, DonationStatus::Approved, &update, Some(&credit))
            .await?;

        let donation = self.unwrap_transition(donation_id, outcome)?;
        info!("Donation {} completed and inventory credited", donation_id);

        Ok(DecideDonationResponse {
            donation: DonationMapper::to_dto(donation),
            success_message: "Donation completed and inventory credited".to_string(),
        })
    }

    /// Current eligibility snapshot for a donor, for status display
    pub async fn get_eligibility(&self, donor_id: &str) -> EngineResult<EligibilityResponse> {
        let history = self
            .donation_repository
            .list_donations_for_donor(donor_id)
            .await?;
        let snapshot = self
            .eligibility_service
            .evaluate(&history, Utc::now().date_naive());

        Ok(EligibilityResponse {
            donor_id: donor_id.to_string(),
            eligibility: snapshot,
        })
    }

    /// Full donation history for a donor, most recent first
    pub async fn get_donor_history(&self, donor_id: &str) -> EngineResult<DonationHistoryResponse> {
        let donations = self
            .donation_repository
            .list_donations_for_donor(donor_id)
            .await?;

        Ok(DonationHistoryResponse {
            donations: donations.into_iter().map(DonationMapper::to_dto).collect(),
        })
    }

    fn validate_submission(
        &self,
        request: &SubmitDonationRequest,
        units: u32,
    ) -> EngineResult<()> {
        if units == 0 {
            return Err(EngineError::Validation(
                "Units must be a positive integer".to_string(),
            ));
        }
        if units > self.config.max_units_per_donation {
            return Err(EngineError::Validation(format!(
                "Units cannot exceed {} per donation",
                self.config.max_units_per_donation
            )));
        }
        if request.donor_id.trim().is_empty() {
            return Err(EngineError::Validation("Donor ID is required".to_string()));
        }
        if request.donation_center.trim().is_empty() {
            return Err(EngineError::Validation(
                "Donation center is required".to_string(),
            ));
        }
        if let Some(notes) = &request.notes {
            if notes.len() > self.config.max_notes_length {
                return Err(EngineError::Validation(format!(
                    "Notes cannot exceed {} characters",
                    self.config.max_notes_length
                )));
            }
        }
        Ok(())
    }

    fn build_credit(&self, donation: &Donation, credited_at: &str) -> LedgerCredit {
        LedgerCredit::new(
            donation.blood_group,
            donation.units,
            donation.donation_center.clone(),
            Utc::now().date_naive(),
            credited_at.to_string(),
            self.config.shelf_life_days,
        )
    }

    fn unwrap_transition(
        &self,
        donation_id: &str,
        outcome: TransitionOutcome,
    ) -> EngineResult<Donation> {
        match outcome {
            TransitionOutcome::Applied(donation) => Ok(donation),
            TransitionOutcome::NotFound => Err(EngineError::NotFound {
                id: donation_id.to_string(),
            }),
            // A concurrent decision won between our read and the
            // compare-and-set; surface it as "already decided"
            TransitionOutcome::StatusConflict(status) => Err(EngineError::InvalidTransition {
                id: donation_id.to_string(),
                status,
            }),
        }
    }
}

fn now_rfc3339() -> Result<String> {
    let now = time::OffsetDateTime::now_utc();
    Ok(now.format(&Rfc3339)?)
}

/// Snapshot reported when a concurrent submission loses the open-request
/// race. Matches what the eligibility check returns for a visible pending
/// request.
fn open_request_snapshot() -> EligibilitySnapshot {
    EligibilitySnapshot {
        is_eligible: false,
        reason: Some(IneligibilityReason::PendingApproval),
        next_eligible_date: None,
        days_remaining: None,
        pending_count: 1,
    }
}
