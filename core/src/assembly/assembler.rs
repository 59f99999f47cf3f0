//! Final context shaping: merge local candidates with external results,
//! re-rank with category-aware emphasis, dedup, cap, and flag starvation.

use crate::analyzer::{Intent, QuestionAnalysis};
use crate::config::AssemblyConfig;
use crate::dispatch::ExternalToolResult;
use crate::retrieval::{dedup_and_rank, CandidateResult, SourceType};

use super::types::{AssembledContext, ContextWeights};

/// Multiplier applied to candidates of the emphasized source type when
/// live external data is present.
const EXTERNAL_EMPHASIS_BOOST: f32 = 1.5;

/// How much transcript emphasis moves to the other material kinds when
/// external data is present.
const EXTERNAL_WEIGHT_SHIFT: f32 = 0.15;

pub struct ContextAssembler {
    cfg: AssemblyConfig,
}

impl ContextAssembler {
    pub fn new(cfg: AssemblyConfig) -> Self {
        Self { cfg }
    }

    pub fn assemble(
        &self,
        analysis: &QuestionAnalysis,
        local: Vec<CandidateResult>,
        external: Vec<ExternalToolResult>,
    ) -> AssembledContext {
        let has_external_data = external.iter().any(|r| r.success && r.payload.is_some());

        let mut candidates = local;
        let mut weights = ContextWeights::default();

        if has_external_data {
            // Live data dominates for the source type matching the
            // question's category, and pure-transcript emphasis drops.
            let emphasized = emphasized_source(analysis.intent);
            for c in candidates.iter_mut() {
                if c.source_type == emphasized {
                    c.strategy_weight *= EXTERNAL_EMPHASIS_BOOST;
                }
            }
            weights = weights.shifted_from_transcript(EXTERNAL_WEIGHT_SHIFT);
        }

        let mut chunks = dedup_and_rank(candidates);
        chunks.truncate(self.cfg.max_relevant_chunks);

        let starved = chunks.is_empty() && !has_external_data;
        if starved {
            tracing::warn!(
                target: "castmind.assemble",
                stage = "assemble.starved",
                external_attempted = external.len(),
            );
        }

        tracing::debug!(
            target: "castmind.assemble",
            stage = "assemble.done",
            chunks = chunks.len(),
            external = external.len(),
            transcript_weight = weights.transcript,
            starved = starved,
        );

        AssembledContext {
            chunks,
            external,
            weights,
            starved,
        }
    }
}

/// Which locally indexed material live data should reinforce, by question
/// intent: person-centric questions lean on persona material, the rest on
/// episode summaries.
fn emphasized_source(intent: Intent) -> SourceType {
    match intent {
        Intent::Opinion | Intent::CurrentStatus => SourceType::Personality,
        Intent::Factual | Intent::FuturePrediction | Intent::Comparison => {
            SourceType::EpisodeSummary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::TemporalContext;
    use crate::dispatch::FetchCategory;
    use crate::retrieval::StrategyKind;
    use chrono::Utc;
    use serde_json::json;

    fn analysis(intent: Intent) -> QuestionAnalysis {
        QuestionAnalysis {
            intent,
            temporal: TemporalContext::General,
            entities: Vec::new(),
            requires_external: false,
            confidence: 0.8,
            reasoning: String::new(),
        }
    }

    fn candidate(content: &str, similarity: f32, source: SourceType) -> CandidateResult {
        CandidateResult {
            content: content.to_string(),
            similarity,
            source_type: source,
            origin_strategy: StrategyKind::DirectQuestion,
            strategy_weight: 0.4,
            metadata: json!({}),
        }
    }

    fn external_ok(category: FetchCategory) -> ExternalToolResult {
        ExternalToolResult {
            category,
            query: "q".into(),
            payload: Some(json!({"data": "live"})),
            success: true,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    fn external_failed() -> ExternalToolResult {
        ExternalToolResult {
            category: FetchCategory::General,
            query: "q".into(),
            payload: None,
            success: false,
            error: Some("timeout".into()),
            fetched_at: Utc::now(),
        }
    }

    fn assembler(max: usize) -> ContextAssembler {
        ContextAssembler::new(AssemblyConfig {
            max_relevant_chunks: max,
        })
    }

    #[test]
    fn output_is_capped_at_max_chunks() {
        let local: Vec<_> = (0..20)
            .map(|i| candidate(&format!("snippet {i}"), 0.9 - i as f32 * 0.01, SourceType::Transcript))
            .collect();
        let ctx = assembler(4).assemble(&analysis(Intent::Factual), local, Vec::new());
        assert_eq!(ctx.chunks.len(), 4);
        assert!(!ctx.starved);
    }

    #[test]
    fn duplicate_prefixes_collapse_before_capping() {
        let local = vec![
            candidate("the same opening sentence", 0.9, SourceType::Transcript),
            candidate("The  same OPENING sentence", 0.8, SourceType::Transcript),
        ];
        let ctx = assembler(4).assemble(&analysis(Intent::Factual), local, Vec::new());
        assert_eq!(ctx.chunks.len(), 1);
    }

    #[test]
    fn external_data_boosts_matching_source_and_shifts_weights() {
        let local = vec![
            candidate("transcript snippet", 0.8, SourceType::Transcript), // 0.32
            candidate("persona snippet", 0.6, SourceType::Personality),   // 0.24 -> 0.36 boosted
        ];
        let ctx = assembler(4).assemble(
            &analysis(Intent::CurrentStatus),
            local,
            vec![external_ok(FetchCategory::Sports)],
        );
        assert_eq!(ctx.chunks[0].content, "persona snippet");
        assert!(ctx.weights.transcript < ContextWeights::default().transcript);
        assert!((ctx.weights.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn no_external_data_keeps_default_weights() {
        let local = vec![candidate("snippet", 0.8, SourceType::Transcript)];
        let ctx = assembler(4).assemble(&analysis(Intent::Factual), local, vec![external_failed()]);
        assert_eq!(ctx.weights.transcript, ContextWeights::default().transcript);
    }

    #[test]
    fn starvation_is_flagged_only_when_both_paths_are_empty() {
        let ctx = assembler(4).assemble(&analysis(Intent::Factual), Vec::new(), vec![external_failed()]);
        assert!(ctx.starved);

        let ctx = assembler(4).assemble(
            &analysis(Intent::Factual),
            Vec::new(),
            vec![external_ok(FetchCategory::News)],
        );
        assert!(!ctx.starved);
    }

    #[test]
    fn failed_external_results_are_still_reported() {
        let ctx = assembler(4).assemble(
            &analysis(Intent::Factual),
            vec![candidate("snippet", 0.8, SourceType::Transcript)],
            vec![external_failed()],
        );
        assert_eq!(ctx.external.len(), 1);
        assert!(!ctx.external[0].success);
    }
}
