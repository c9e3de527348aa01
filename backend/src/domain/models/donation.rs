use shared::{BloodGroup, DonationStatus, VerificationStatus};

/// Domain representation of a donation request.
///
/// The blood group is copied from the donor profile at submission time so
/// later profile edits cannot retroactively change what gets credited.
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub blood_group: BloodGroup,
    pub units: u32,
    pub status: DonationStatus,
    pub risk_score: Option<u8>,
    pub admin_approved: bool,
    pub verification_status: VerificationStatus,
    /// RFC 3339
    pub submitted_at: String,
    /// RFC 3339; None while pending
    pub decided_at: Option<String>,
    pub donation_center: String,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
}

impl Donation {
    /// Whether this request still occupies the donor's single open slot.
    /// `approved` is non-terminal (two-step workflow) and counts as open.
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            DonationStatus::Pending | DonationStatus::Approved
        )
    }

    /// A completed, admin-approved donation is the only kind that counts
    /// toward confirmed totals and the eligibility buffer period
    pub fn is_confirmed(&self) -> bool {
        self.status == DonationStatus::Completed && self.admin_approved
    }
}

/// Field set applied to a donation row during a lifecycle transition.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationUpdate {
    pub status: DonationStatus,
    pub admin_approved: bool,
    pub verification_status: VerificationStatus,
    /// RFC 3339 decision (or completion) timestamp
    pub decided_at: String,
    /// When None, existing admin notes are left untouched
    pub admin_notes: Option<String>,
}
