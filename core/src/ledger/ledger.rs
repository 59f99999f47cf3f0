//! Process-wide spend tracking. One `CostLedger` is constructed at startup
//! and handed to every request by `Arc`; it is the only shared mutable
//! state in the pipeline.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use super::types::{CostEntry, DailyLedger};

/// Fraction of the daily budget at which cost-saving mode latches on.
pub const COST_SAVING_RATIO: f64 = 0.8;

/// Entries older than this are pruned on write.
const RETENTION_DAYS: i64 = 7;

struct LedgerInner {
    entries: Vec<CostEntry>,
    /// Latched when today's spend crosses the saving threshold; cleared
    /// only by [`CostLedger::reset`].
    cost_saving: bool,
}

pub struct CostLedger {
    daily_budget: f64,
    inner: Mutex<LedgerInner>,
}

impl CostLedger {
    pub fn new(daily_budget: f64) -> Self {
        Self {
            daily_budget,
            inner: Mutex::new(LedgerInner {
                entries: Vec::new(),
                cost_saving: false,
            }),
        }
    }

    pub fn daily_budget(&self) -> f64 {
        self.daily_budget
    }

    /// Record one spend-incurring operation at the current time.
    pub fn record(&self, operation: &str, cost: f64, category: &str) {
        self.record_at(Utc::now(), operation, cost, category);
    }

    pub fn record_at(&self, at: DateTime<Utc>, operation: &str, cost: f64, category: &str) {
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");

        let cutoff = at - Duration::days(RETENTION_DAYS);
        inner.entries.retain(|e| e.at >= cutoff);

        inner.entries.push(CostEntry {
            at,
            operation: operation.to_string(),
            cost,
            category: category.to_string(),
        });

        let day = at.date_naive();
        let cumulative: f64 = inner
            .entries
            .iter()
            .filter(|e| e.at.date_naive() == day)
            .map(|e| e.cost)
            .sum();
        if cumulative >= COST_SAVING_RATIO * self.daily_budget {
            if !inner.cost_saving {
                tracing::warn!(
                    target: "castmind.ledger",
                    stage = "ledger.cost_saving.on",
                    cumulative = cumulative,
                    daily_budget = self.daily_budget,
                );
            }
            inner.cost_saving = true;
        }

        tracing::debug!(
            target: "castmind.ledger",
            stage = "ledger.record",
            operation = operation,
            cost = cost,
            category = category,
            cumulative = cumulative,
        );
    }

    /// Today's snapshot. `cumulative_cost` is recomputed from entries, not
    /// carried as separate state, so it cannot drift.
    pub fn daily(&self) -> DailyLedger {
        self.daily_at(Utc::now())
    }

    pub fn daily_at(&self, now: DateTime<Utc>) -> DailyLedger {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        let day = now.date_naive();
        let todays: Vec<&CostEntry> = inner
            .entries
            .iter()
            .filter(|e| e.at.date_naive() == day)
            .collect();
        let cumulative_cost: f64 = todays.iter().map(|e| e.cost).sum();
        DailyLedger {
            day,
            daily_budget: self.daily_budget,
            cumulative_cost,
            remaining_budget: self.daily_budget - cumulative_cost,
            cost_saving_mode: inner.cost_saving,
            entry_count: todays.len(),
        }
    }

    /// Today's spend grouped by source category.
    pub fn summary_by_category(&self) -> BTreeMap<String, f64> {
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        let day = Utc::now().date_naive();
        let mut out = BTreeMap::new();
        for e in inner.entries.iter().filter(|e| e.at.date_naive() == day) {
            *out.entry(e.category.clone()).or_insert(0.0) += e.cost;
        }
        out
    }

    /// Clear the cost-saving latch. Entries are kept; if today's spend is
    /// still over the threshold the next write re-latches.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        inner.cost_saving = false;
        tracing::info!(target: "castmind.ledger", stage = "ledger.reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cumulative_cost_is_exact_sum() {
        let ledger = CostLedger::new(10.0);
        ledger.record("external_fetch", 0.25, "sports");
        ledger.record("external_fetch", 0.5, "news");
        ledger.record("local_search", 0.125, "search");
        let daily = ledger.daily();
        assert_eq!(daily.cumulative_cost, 0.875);
        assert_eq!(daily.remaining_budget, 10.0 - 0.875);
        assert_eq!(daily.entry_count, 3);
        assert!(!daily.cost_saving_mode);
    }

    #[test]
    fn cost_saving_latches_exactly_at_threshold() {
        let ledger = CostLedger::new(10.0);
        ledger.record("external_fetch", 7.75, "news");
        assert!(!ledger.daily().cost_saving_mode);
        ledger.record("external_fetch", 0.25, "news");
        // 8.0 == 0.8 * 10.0 crosses the threshold.
        assert!(ledger.daily().cost_saving_mode);
    }

    #[test]
    fn latch_survives_until_reset() {
        let ledger = CostLedger::new(1.0);
        ledger.record("external_fetch", 0.9, "sports");
        assert!(ledger.daily().cost_saving_mode);
        ledger.reset();
        assert!(!ledger.daily().cost_saving_mode);
    }

    #[test]
    fn old_entries_are_pruned_and_days_are_bucketed() {
        let ledger = CostLedger::new(10.0);
        let old = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2025, 1, 9, 12, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();

        ledger.record_at(old, "external_fetch", 5.0, "sports");
        ledger.record_at(yesterday, "external_fetch", 2.0, "sports");
        ledger.record_at(today, "external_fetch", 1.0, "sports");

        let daily = ledger.daily_at(today);
        // Only today's entry counts toward today's spend.
        assert_eq!(daily.cumulative_cost, 1.0);
        // The 9-day-old entry is gone; yesterday's is retained.
        let inner_total: f64 = {
            let all = ledger.daily_at(yesterday);
            all.cumulative_cost
        };
        assert_eq!(inner_total, 2.0);
    }

    #[test]
    fn concurrent_records_do_not_lose_entries() {
        use std::sync::Arc;
        let ledger = Arc::new(CostLedger::new(1000.0));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let l = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    l.record("external_fetch", 0.25, "news");
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(ledger.daily().cumulative_cost, 800.0 * 0.25);
    }
}
