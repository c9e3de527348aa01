use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight canonical ABO/Rh blood groups tracked by the inventory ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All canonical blood groups, in the order they are displayed.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Canonical string form used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = ParseBloodGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(BloodGroup::APositive),
            "A-" => Ok(BloodGroup::ANegative),
            "B+" => Ok(BloodGroup::BPositive),
            "B-" => Ok(BloodGroup::BNegative),
            "AB+" => Ok(BloodGroup::AbPositive),
            "AB-" => Ok(BloodGroup::AbNegative),
            "O+" => Ok(BloodGroup::OPositive),
            "O-" => Ok(BloodGroup::ONegative),
            other => Err(ParseBloodGroupError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseBloodGroupError(pub String);

impl fmt::Display for ParseBloodGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown blood group: {}", self.0)
    }
}

impl std::error::Error for ParseBloodGroupError {}

/// Lifecycle status of a donation request.
///
/// `pending` is the only state an admin decision may act on; `rejected`
/// and `completed` are terminal. `approved` exists only in the two-step
/// workflow, between admin approval and finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Approved => "approved",
            DonationStatus::Rejected => "rejected",
            DonationStatus::Completed => "completed",
        }
    }

    /// Terminal statuses permit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, DonationStatus::Rejected | DonationStatus::Completed)
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DonationStatus::Pending),
            "approved" => Ok(DonationStatus::Approved),
            "rejected" => Ok(DonationStatus::Rejected),
            "completed" => Ok(DonationStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown donation status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

/// Screening verdict attached to a donation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Automated screening scored the request below the auto-verify threshold
    AiVerified,
    /// Awaiting admin review
    Pending,
    /// Admin approved the request
    AdminApproved,
    /// Admin rejected the request
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::AiVerified => "ai_verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::AdminApproved => "admin_approved",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_verified" => Ok(VerificationStatus::AiVerified),
            "pending" => Ok(VerificationStatus::Pending),
            "admin_approved" => Ok(VerificationStatus::AdminApproved),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Admin decision on a pending donation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// Donation ID in format: "donation::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: String,
    /// ID of the donor this request belongs to
    pub donor_id: String,
    /// Blood group copied from the donor profile at submission time
    pub blood_group: BloodGroup,
    /// Whole units offered (positive, defaults to 1)
    pub units: u32,
    pub status: DonationStatus,
    /// Advisory risk score (0-100); None until scored
    pub risk_score: Option<u8>,
    pub admin_approved: bool,
    pub verification_status: VerificationStatus,
    /// Submission timestamp (RFC 3339)
    pub submitted_at: String,
    /// Decision timestamp (RFC 3339); None while pending
    pub decided_at: Option<String>,
    pub donation_center: String,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
}

impl DonationRequest {
    /// Generate a donation ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("donation::{}", epoch_millis)
    }

    /// Parse a donation ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, DonationIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "donation" {
            return Err(DonationIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| DonationIdError::InvalidTimestamp)
    }

    /// Extract the submission timestamp encoded in the ID
    pub fn extract_timestamp(&self) -> Result<u64, DonationIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DonationIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for DonationIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DonationIdError::InvalidFormat => write!(f, "Invalid donation ID format"),
            DonationIdError::InvalidTimestamp => write!(f, "Invalid timestamp in donation ID"),
        }
    }
}

impl std::error::Error for DonationIdError {}

/// Aggregate per-blood-group inventory row.
///
/// Tracks total available units only; per-batch aging is out of scope, so
/// `expiry_date` reflects the first credit and is not extended afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub blood_group: BloodGroup,
    pub units_available: u32,
    pub location: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub expiry_date: String,
    /// RFC 3339 timestamp of the last credit
    pub updated_at: String,
}

/// Why a donor may not submit a new donation right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// A request is still awaiting an admin decision
    PendingApproval,
    /// The post-donation buffer period has not elapsed
    BufferPeriodActive,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::PendingApproval => write!(f, "pending approval"),
            IneligibilityReason::BufferPeriodActive => write!(f, "buffer period active"),
        }
    }
}

/// Point-in-time answer to "can this donor submit a donation now?"
///
/// Computed on demand from the donor's request history; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySnapshot {
    pub is_eligible: bool,
    pub reason: Option<IneligibilityReason>,
    /// ISO 8601 date the donor becomes eligible again; None when eligibility
    /// depends on a pending decision rather than a date
    pub next_eligible_date: Option<String>,
    /// Whole days until `next_eligible_date`
    pub days_remaining: Option<i64>,
    /// Number of requests still awaiting a decision
    pub pending_count: u32,
}

impl EligibilitySnapshot {
    pub fn eligible() -> Self {
        Self {
            is_eligible: true,
            reason: None,
            next_eligible_date: None,
            days_remaining: None,
            pending_count: 0,
        }
    }
}

/// Vitals captured at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub age: u32,
    pub weight_kg: f64,
    /// Systolic blood pressure (mmHg)
    pub systolic: u32,
    /// Diastolic blood pressure (mmHg)
    pub diastolic: u32,
    /// Hemoglobin (g/dL)
    pub hemoglobin: f64,
}

/// Boolean health-screening answers submitted alongside vitals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthScreening {
    pub recent_illness: bool,
    pub chronic_condition: bool,
    pub current_medication: bool,
    pub recent_tattoo_or_piercing: bool,
    pub recent_travel: bool,
}

/// Qualitative flags raised by the risk scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    AgeOutOfRange,
    LowWeight,
    AbnormalBloodPressure,
    LowHemoglobin,
    VeryLowHemoglobin,
    RecentIllness,
    ChronicCondition,
    CurrentMedication,
    RecentTattooOrPiercing,
    RecentTravel,
    /// Score crossed the high-risk threshold; a human should review
    ManualReviewRecommended,
}

/// Advisory output of the risk scorer. Informational for the reviewing
/// admin; never blocks submission or approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Bounded score in [0, 100]
    pub score: u8,
    pub flags: Vec<RiskFlag>,
}

/// Request for submitting a new donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitDonationRequest {
    pub donor_id: String,
    pub blood_group: BloodGroup,
    /// Whole units offered; defaults to 1 when omitted
    pub units: Option<u32>,
    pub donation_center: String,
    pub vitals: Vitals,
    #[serde(default)]
    pub health_screening: HealthScreening,
    pub notes: Option<String>,
}

/// Response after submitting a donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitDonationResponse {
    pub donation: DonationRequest,
    pub risk_assessment: RiskAssessment,
    pub success_message: String,
}

/// Request body for an admin decision on a pending donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecideDonationRequest {
    pub decision: Decision,
    pub admin_notes: Option<String>,
}

/// Response after an admin decision or completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecideDonationResponse {
    pub donation: DonationRequest,
    pub success_message: String,
}

/// Response containing a donor's eligibility snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub donor_id: String,
    pub eligibility: EligibilitySnapshot,
}

/// Response containing a donor's full donation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationHistoryResponse {
    pub donations: Vec<DonationRequest>,
}

/// Response containing all inventory records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryListResponse {
    pub records: Vec<InventoryRecord>,
}

/// Donor-facing statistics derived from completed, admin-approved donations.
/// The lives-saved figure is a display estimate, never a business input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorDashboard {
    pub total_donations: u32,
    pub total_units: u32,
    pub lives_saved_estimate: f64,
}

/// Response containing a donor's dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub donor_id: String,
    pub dashboard: DonorDashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_donation_id() {
        let id = DonationRequest::generate_id(1702516122000);
        assert_eq!(id, "donation::1702516122000");
    }

    #[test]
    fn test_parse_donation_id() {
        // Valid ID
        let timestamp = DonationRequest::parse_id("donation::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Invalid format
        assert!(DonationRequest::parse_id("invalid::format").is_err());
        assert!(DonationRequest::parse_id("donation").is_err());
        assert!(DonationRequest::parse_id("transaction::123").is_err());

        // Invalid timestamp
        assert!(DonationRequest::parse_id("donation::not_a_number").is_err());
    }

    #[test]
    fn test_blood_group_from_str() {
        assert_eq!("O+".parse::<BloodGroup>().unwrap(), BloodGroup::OPositive);
        assert_eq!("AB-".parse::<BloodGroup>().unwrap(), BloodGroup::AbNegative);
        assert!("C+".parse::<BloodGroup>().is_err());
        assert!("o+".parse::<BloodGroup>().is_err()); // case sensitive
    }

    #[test]
    fn test_blood_group_serde_uses_symbols() {
        let json = serde_json::to_string(&BloodGroup::AbPositive).unwrap();
        assert_eq!(json, "\"AB+\"");
        let parsed: BloodGroup = serde_json::from_str("\"O-\"").unwrap();
        assert_eq!(parsed, BloodGroup::ONegative);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!DonationStatus::Pending.is_terminal());
        assert!(!DonationStatus::Approved.is_terminal());
        assert!(DonationStatus::Rejected.is_terminal());
        assert!(DonationStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_round_trip_through_storage_form() {
        for status in [
            DonationStatus::Pending,
            DonationStatus::Approved,
            DonationStatus::Rejected,
            DonationStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<DonationStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<DonationStatus>().is_err());
    }
}
