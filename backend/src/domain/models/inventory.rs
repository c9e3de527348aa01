use chrono::{Duration, NaiveDate};
use shared::BloodGroup;

/// Domain representation of one aggregate inventory ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub blood_group: BloodGroup,
    pub units_available: u32,
    pub location: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub expiry_date: String,
    /// RFC 3339 timestamp of the last credit
    pub updated_at: String,
}

/// A single credit to apply to the inventory ledger.
///
/// The expiry date only matters when the credit creates a fresh ledger row;
/// existing rows keep their expiry (aggregate availability only, batch-level
/// aging is tracked elsewhere).
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerCredit {
    pub blood_group: BloodGroup,
    pub units: u32,
    pub location: String,
    /// ISO 8601 date for a freshly created row: credit date + shelf life
    pub expiry_date: String,
    /// RFC 3339 timestamp of the credit
    pub updated_at: String,
}

impl LedgerCredit {
    /// Build a credit dated `credit_date`, with the expiry policy applied
    pub fn new(
        blood_group: BloodGroup,
        units: u32,
        location: String,
        credit_date: NaiveDate,
        credited_at: String,
        shelf_life_days: i64,
    ) -> Self {
        let expiry = credit_date + Duration::days(shelf_life_days);
        Self {
            blood_group,
            units,
            location,
            expiry_date: expiry.format("%Y-%m-%d").to_string(),
            updated_at: credited_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_credit_expiry_policy() {
        let credit = LedgerCredit::new(
            BloodGroup::OPositive,
            1,
            "Main".to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "2025-01-01T10:00:00+00:00".to_string(),
            42,
        );
        assert_eq!(credit.expiry_date, "2025-02-12");
    }
}
