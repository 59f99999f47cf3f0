//! Concurrent multi-strategy retrieval: all query variants launch at once,
//! the join point waits for every variant to settle, and a slow or failing
//! variant degrades to an empty result set for that variant only.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::analyzer::QuestionAnalysis;
use crate::config::{BudgetConfig, ProfileConfig, RetrievalConfig};
use crate::ledger::CostLedger;
use crate::question::Question;

use super::rank::dedup_and_rank;
use super::strategies::{build_variants, QueryVariant};
use super::r#trait::SearchBackend;
use super::types::{CandidateResult, SearchRequest};

pub struct MultiStrategyRetriever {
    backend: Arc<dyn SearchBackend>,
    ledger: Arc<CostLedger>,
    retrieval: RetrievalConfig,
    budget: BudgetConfig,
    profile: ProfileConfig,
}

impl MultiStrategyRetriever {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        ledger: Arc<CostLedger>,
        retrieval: RetrievalConfig,
        budget: BudgetConfig,
        profile: ProfileConfig,
    ) -> Self {
        Self {
            backend,
            ledger,
            retrieval,
            budget,
            profile,
        }
    }

    /// Run all applicable variants concurrently and merge the results into
    /// one deduplicated, ranked candidate list.
    pub async fn retrieve(
        &self,
        question: &Question,
        analysis: Option<&QuestionAnalysis>,
    ) -> Vec<CandidateResult> {
        let variants = build_variants(question, analysis, &self.profile, &self.retrieval);
        self.run_variants(question, variants).await
    }

    /// Run only the entity-focused variant; used to supplement the initial
    /// pass once classification has produced entities.
    pub async fn retrieve_entities(
        &self,
        question: &Question,
        analysis: &QuestionAnalysis,
    ) -> Vec<CandidateResult> {
        let variants: Vec<QueryVariant> =
            build_variants(question, Some(analysis), &self.profile, &self.retrieval)
                .into_iter()
                .filter(|v| v.kind == super::types::StrategyKind::EntityFocused)
                .collect();
        if variants.is_empty() {
            return Vec::new();
        }
        self.run_variants(question, variants).await
    }

    async fn run_variants(
        &self,
        question: &Question,
        variants: Vec<QueryVariant>,
    ) -> Vec<CandidateResult> {
        let timeout = Duration::from_millis(self.retrieval.variant_timeout_ms);

        tracing::debug!(
            target: "castmind.retrieve",
            stage = "retrieve.fanout.start",
            variants = variants.len(),
            episode_id = %question.episode_id,
        );

        if self.budget.cost_per_search > 0.0 {
            for v in &variants {
                self.ledger
                    .record("local_search", self.budget.cost_per_search, v.kind.as_str());
            }
        }

        let futures = variants.into_iter().map(|variant| {
            let backend = Arc::clone(&self.backend);
            let request = SearchRequest {
                query: variant.query.clone(),
                source_filter: variant.source_filter,
                episode_id: (!question.episode_id.is_empty())
                    .then(|| question.episode_id.clone()),
                limit: variant.limit,
                min_similarity: self.retrieval.min_similarity,
            };
            async move {
                match tokio::time::timeout(timeout, backend.search(request)).await {
                    Ok(Ok(hits)) => {
                        tracing::debug!(
                            target: "castmind.retrieve",
                            stage = "retrieve.variant.ok",
                            strategy = variant.kind.as_str(),
                            hits = hits.len(),
                        );
                        hits.into_iter()
                            .map(|h| CandidateResult::from_hit(h, variant.kind, variant.weight))
                            .collect::<Vec<_>>()
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(
                            target: "castmind.retrieve",
                            stage = "retrieve.variant.error",
                            strategy = variant.kind.as_str(),
                            error = %e,
                        );
                        Vec::new()
                    }
                    Err(_) => {
                        tracing::warn!(
                            target: "castmind.retrieve",
                            stage = "retrieve.variant.timeout",
                            strategy = variant.kind.as_str(),
                            timeout_ms = timeout.as_millis() as u64,
                        );
                        Vec::new()
                    }
                }
            }
        });

        // join_all settles every member; one failure never fails the group.
        let merged: Vec<CandidateResult> = join_all(futures).await.into_iter().flatten().collect();
        let ranked = dedup_and_rank(merged);

        tracing::debug!(
            target: "castmind.retrieve",
            stage = "retrieve.fanout.end",
            candidates = ranked.len(),
        );

        ranked
    }
}
