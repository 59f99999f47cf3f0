//! Fans out to category-specific external fetchers when routing demands
//! it, gated by the shared cost ledger. Fetches within one request run
//! concurrently and settle independently; the budget gate downgrades the
//! routing decision instead of raising.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;

use crate::analyzer::QuestionAnalysis;
use crate::config::DispatchConfig;
use crate::ledger::CostLedger;
use crate::question::Question;

use super::category::infer_categories;
use super::r#trait::ExternalFetcher;
use super::types::{ExternalToolResult, FetchCategory};

/// What the dispatcher did for one request. `downgrade_reason` is set when
/// the budget gate blocked external dispatch entirely; the caller applies
/// it to the routing decision.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub results: Vec<ExternalToolResult>,
    pub downgrade_reason: Option<String>,
}

impl DispatchOutcome {
    fn skipped(reason: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            downgrade_reason: Some(reason.into()),
        }
    }
}

pub struct ExternalDataDispatcher {
    fetchers: HashMap<FetchCategory, Arc<dyn ExternalFetcher>>,
    ledger: Arc<CostLedger>,
    cfg: DispatchConfig,
}

impl ExternalDataDispatcher {
    pub fn new(
        fetchers: Vec<Arc<dyn ExternalFetcher>>,
        ledger: Arc<CostLedger>,
        cfg: DispatchConfig,
    ) -> Self {
        let fetchers = fetchers
            .into_iter()
            .map(|f| (f.category(), f))
            .collect::<HashMap<_, _>>();
        Self {
            fetchers,
            ledger,
            cfg,
        }
    }

    pub async fn dispatch(
        &self,
        question: &Question,
        analysis: &QuestionAnalysis,
    ) -> DispatchOutcome {
        if !self.cfg.enabled {
            return DispatchOutcome::skipped("external dispatch disabled by config");
        }

        let daily = self.ledger.daily();
        if daily.remaining_budget <= 0.0 {
            tracing::warn!(
                target: "castmind.dispatch",
                stage = "dispatch.gate.budget",
                remaining = daily.remaining_budget,
            );
            return DispatchOutcome::skipped("daily budget exhausted");
        }
        if daily.cost_saving_mode {
            tracing::warn!(
                target: "castmind.dispatch",
                stage = "dispatch.gate.cost_saving",
                cumulative = daily.cumulative_cost,
            );
            return DispatchOutcome::skipped("cost-saving mode active");
        }

        let categories = infer_categories(question, analysis, self.cfg.max_tools_per_request);
        let query = build_query(question, analysis);
        let timeout = Duration::from_millis(self.cfg.fetch_timeout_ms);

        // Per-invocation ledger consultation happens here, sequentially,
        // before any fetch fires; the fetches themselves run concurrently.
        let mut launches: Vec<(FetchCategory, Arc<dyn ExternalFetcher>)> = Vec::new();
        for category in categories {
            let Some(fetcher) = self
                .fetchers
                .get(&category)
                .or_else(|| self.fetchers.get(&FetchCategory::General))
            else {
                tracing::warn!(
                    target: "castmind.dispatch",
                    stage = "dispatch.fetcher.missing",
                    category = category.as_str(),
                );
                continue;
            };

            let daily = self.ledger.daily();
            if daily.remaining_budget <= 0.0 || daily.cost_saving_mode {
                tracing::warn!(
                    target: "castmind.dispatch",
                    stage = "dispatch.gate.per_fetch",
                    category = category.as_str(),
                    remaining = daily.remaining_budget,
                );
                break;
            }

            self.ledger.record(
                "external_fetch",
                fetcher.cost_per_call(),
                category.as_str(),
            );
            launches.push((category, Arc::clone(fetcher)));
        }

        if launches.is_empty() {
            return DispatchOutcome {
                results: Vec::new(),
                downgrade_reason: Some("no external fetcher available within budget".into()),
            };
        }

        tracing::debug!(
            target: "castmind.dispatch",
            stage = "dispatch.fanout.start",
            fetches = launches.len(),
            query_len = query.len(),
        );

        let futures = launches.into_iter().map(|(category, fetcher)| {
            let query = query.clone();
            async move {
                match tokio::time::timeout(timeout, fetcher.fetch(&query)).await {
                    Ok(Ok(payload)) => ExternalToolResult {
                        category,
                        query,
                        payload: Some(payload),
                        success: true,
                        error: None,
                        fetched_at: Utc::now(),
                    },
                    Ok(Err(e)) => {
                        tracing::warn!(
                            target: "castmind.dispatch",
                            stage = "dispatch.fetch.error",
                            category = category.as_str(),
                            error = %e,
                        );
                        ExternalToolResult {
                            category,
                            query,
                            payload: None,
                            success: false,
                            error: Some(e.to_string()),
                            fetched_at: Utc::now(),
                        }
                    }
                    Err(_) => {
                        tracing::warn!(
                            target: "castmind.dispatch",
                            stage = "dispatch.fetch.timeout",
                            category = category.as_str(),
                            timeout_ms = timeout.as_millis() as u64,
                        );
                        ExternalToolResult {
                            category,
                            query,
                            payload: None,
                            success: false,
                            error: Some("fetch timed out".into()),
                            fetched_at: Utc::now(),
                        }
                    }
                }
            }
        });

        let results = join_all(futures).await;

        tracing::debug!(
            target: "castmind.dispatch",
            stage = "dispatch.fanout.end",
            succeeded = results.iter().filter(|r| r.success).count(),
            failed = results.iter().filter(|r| !r.success).count(),
        );

        DispatchOutcome {
            results,
            downgrade_reason: None,
        }
    }
}

fn build_query(question: &Question, analysis: &QuestionAnalysis) -> String {
    if analysis.entities.is_empty() {
        question.text.clone()
    } else {
        format!("{} {}", question.text, analysis.entities.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_heuristic;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        category: FetchCategory,
        cost: f64,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(category: FetchCategory, cost: f64, fail: bool) -> Self {
            Self {
                category,
                cost,
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl ExternalFetcher for CountingFetcher {
        fn category(&self) -> FetchCategory {
            self.category
        }

        fn cost_per_call(&self) -> f64 {
            self.cost
        }

        async fn fetch(&self, query: &str) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("upstream 503"));
            }
            Ok(json!({ "answer": format!("live data for {query}") }))
        }
    }

    fn question_and_analysis(text: &str) -> (Question, QuestionAnalysis) {
        let q = Question::new(text, "ep-1");
        let a = analyze_heuristic(&q);
        (q, a)
    }

    #[tokio::test]
    async fn fetch_fires_and_records_cost() {
        let ledger = Arc::new(CostLedger::new(10.0));
        let sports = Arc::new(CountingFetcher::new(FetchCategory::Sports, 0.25, false));
        let dispatcher = ExternalDataDispatcher::new(
            vec![sports.clone()],
            Arc::clone(&ledger),
            DispatchConfig::default(),
        );
        let (q, a) = question_and_analysis("Is Khabib still fighting now?");
        let outcome = dispatcher.dispatch(&q, &a).await;

        assert!(outcome.downgrade_reason.is_none());
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].success);
        assert_eq!(sports.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.daily().cumulative_cost, 0.25);
        assert_eq!(ledger.summary_by_category().get("sports"), Some(&0.25));
    }

    #[tokio::test]
    async fn cost_saving_mode_skips_dispatch_entirely() {
        let ledger = Arc::new(CostLedger::new(10.0));
        ledger.record("external_fetch", 8.5, "news"); // latches cost-saving
        let sports = Arc::new(CountingFetcher::new(FetchCategory::Sports, 0.25, false));
        let dispatcher = ExternalDataDispatcher::new(
            vec![sports.clone()],
            Arc::clone(&ledger),
            DispatchConfig::default(),
        );
        let (q, a) = question_and_analysis("Is Khabib still fighting now?");
        let outcome = dispatcher.dispatch(&q, &a).await;

        assert!(outcome.results.is_empty());
        assert_eq!(
            outcome.downgrade_reason.as_deref(),
            Some("cost-saving mode active")
        );
        assert_eq!(sports.calls.load(Ordering::SeqCst), 0);
        // No further spend happened.
        assert_eq!(ledger.daily().cumulative_cost, 8.5);
    }

    #[tokio::test]
    async fn exhausted_budget_skips_dispatch() {
        let ledger = Arc::new(CostLedger::new(1.0));
        ledger.record("external_fetch", 1.0, "news");
        let dispatcher = ExternalDataDispatcher::new(
            vec![Arc::new(CountingFetcher::new(FetchCategory::General, 0.1, false))],
            ledger,
            DispatchConfig::default(),
        );
        let (q, a) = question_and_analysis("anything at all");
        let outcome = dispatcher.dispatch(&q, &a).await;
        assert_eq!(
            outcome.downgrade_reason.as_deref(),
            Some("daily budget exhausted")
        );
    }

    #[tokio::test]
    async fn one_failing_fetch_does_not_sink_the_other() {
        let ledger = Arc::new(CostLedger::new(10.0));
        let sports = Arc::new(CountingFetcher::new(FetchCategory::Sports, 0.1, true));
        let news = Arc::new(CountingFetcher::new(FetchCategory::News, 0.1, false));
        let dispatcher = ExternalDataDispatcher::new(
            vec![sports, news],
            Arc::clone(&ledger),
            DispatchConfig::default(),
        );
        let (q, a) = question_and_analysis("Any news after the title fight?");
        let outcome = dispatcher.dispatch(&q, &a).await;

        assert_eq!(outcome.results.len(), 2);
        let by_cat = |c: FetchCategory| outcome.results.iter().find(|r| r.category == c).unwrap();
        assert!(!by_cat(FetchCategory::Sports).success);
        assert!(by_cat(FetchCategory::Sports).error.is_some());
        assert!(by_cat(FetchCategory::News).success);
        // Both invocations were billed.
        assert_eq!(ledger.daily().cumulative_cost, 0.2);
    }

    #[tokio::test]
    async fn missing_category_falls_back_to_general_fetcher() {
        let ledger = Arc::new(CostLedger::new(10.0));
        let general = Arc::new(CountingFetcher::new(FetchCategory::General, 0.1, false));
        let dispatcher = ExternalDataDispatcher::new(
            vec![general.clone()],
            ledger,
            DispatchConfig::default(),
        );
        let (q, a) = question_and_analysis("Is Khabib still fighting now?");
        let outcome = dispatcher.dispatch(&q, &a).await;
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(general.calls.load(Ordering::SeqCst), 1);
    }
}
