use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One spend-incurring operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub at: DateTime<Utc>,
    pub operation: String,
    /// Decimal currency units.
    pub cost: f64,
    pub category: String,
}

/// Snapshot of today's spend, recomputed from entries on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLedger {
    pub day: NaiveDate,
    pub daily_budget: f64,
    pub cumulative_cost: f64,
    pub remaining_budget: f64,
    pub cost_saving_mode: bool,
    pub entry_count: usize,
}
