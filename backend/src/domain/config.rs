/// Which lifecycle transition credits the inventory ledger.
///
/// Exactly one transition is the crediting point in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditWorkflow {
    /// Admin approval finalizes the donation: `pending -> completed`,
    /// credited at approval. This is the default.
    SingleStep,
    /// Approval parks the request at `approved`; a separate completion step
    /// (`approved -> completed`) credits the ledger.
    TwoStep,
}

/// Tunable constants for the donation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum days between a completed donation and the next submission
    pub buffer_period_days: i64,
    /// Shelf life applied to freshly created inventory rows
    pub shelf_life_days: i64,
    /// Display-only multiplier for the lives-saved estimate
    pub lives_per_unit: f64,
    /// Risk scores at or below this seed `verification_status = ai_verified`
    pub auto_verify_max_score: u8,
    /// Risk scores above this add a manual-review flag (advisory only)
    pub high_risk_threshold: u8,
    pub workflow: CreditWorkflow,
    /// Upper bound on units per donation accepted at the boundary
    pub max_units_per_donation: u32,
    pub max_notes_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_period_days: 56,
            shelf_life_days: 42,
            lives_per_unit: 2.5,
            auto_verify_max_score: 30,
            high_risk_threshold: 60,
            workflow: CreditWorkflow::SingleStep,
            max_units_per_donation: 4,
            max_notes_length: 512,
        }
    }
}
