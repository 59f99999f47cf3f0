//! Pipeline entry point: classify the question (concurrently with an
//! initial local retrieval pass), grade local sufficiency, route, fetch
//! external data when routing demands it and the budget allows, then
//! assemble the final context.
//!
//! The request path never spawns tasks; every fan-out joins unspawned
//! futures. Dropping the returned future therefore cancels all in-flight
//! work for this request without touching other requests or the ledger.

use uuid::Uuid;

use crate::assembly::ContextAssembler;
use crate::config::AppConfig;
use crate::context::Services;
use crate::dispatch::ExternalDataDispatcher;
use crate::error::PipelineError;
use crate::question::Question;
use crate::retrieval::{dedup_and_rank, MultiStrategyRetriever};
use crate::routing;
use crate::sufficiency;

use super::types::ContextOutcome;

pub async fn assemble_context(
    cfg: &AppConfig,
    services: &Services,
    question: &Question,
) -> Result<ContextOutcome, PipelineError> {
    let request_id = Uuid::new_v4().to_string();

    tracing::info!(
        target: "castmind.engine",
        stage = "engine.start",
        request_id = %request_id,
        episode_id = %question.episode_id,
        question_len = question.text.len(),
        history_turns = question.history.len(),
    );

    let retriever = MultiStrategyRetriever::new(
        services.search.clone(),
        services.ledger.clone(),
        cfg.retrieval.clone(),
        cfg.budget.clone(),
        cfg.profile.clone(),
    );

    // Classification and the initial local pass run concurrently; the
    // entity-focused variant needs the classification result, so it runs
    // as a supplemental pass below.
    let (analysis, mut local) = tokio::join!(
        services.analyzer.analyze(question),
        retriever.retrieve(question, None)
    );

    if !analysis.entities.is_empty() {
        let supplemental = retriever.retrieve_entities(question, &analysis).await;
        if !supplemental.is_empty() {
            local.extend(supplemental);
            local = dedup_and_rank(local);
        }
    }

    let verdict = sufficiency::survey(&cfg.sufficiency, &local);
    let mut decision = routing::decide(&analysis, &verdict);

    let mut external = Vec::new();
    if decision.use_external {
        let dispatcher = ExternalDataDispatcher::new(
            services.fetchers.clone(),
            services.ledger.clone(),
            cfg.dispatch.clone(),
        );
        let outcome = dispatcher.dispatch(question, &analysis).await;
        if let Some(reason) = outcome.downgrade_reason {
            decision = decision.downgraded_to_local(&reason);
        }
        external = outcome.results;
    }

    let assembler = ContextAssembler::new(cfg.assembly.clone());
    let context = assembler.assemble(&analysis, local, external);

    let spend = services.ledger.daily();
    tracing::info!(
        target: "castmind.engine",
        stage = "engine.end",
        request_id = %request_id,
        intent = analysis.intent.as_str(),
        temporal = analysis.temporal.as_str(),
        recommendation = verdict.recommendation.as_str(),
        priority = decision.priority.as_str(),
        chunks = context.chunks.len(),
        external = context.external.len(),
        starved = context.starved,
        spend_today = spend.cumulative_cost,
    );

    Ok(ContextOutcome {
        request_id,
        analysis,
        verdict,
        decision,
        context,
    })
}
