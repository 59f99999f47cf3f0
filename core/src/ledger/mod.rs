#[allow(clippy::module_inception)]
mod ledger;
mod types;

pub use ledger::{CostLedger, COST_SAVING_RATIO};
pub use types::{CostEntry, DailyLedger};
