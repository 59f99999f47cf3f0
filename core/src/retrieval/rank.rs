//! Shared dedup + ranking used by the retriever and the context
//! assembler, so both stages apply the same rules.

use std::collections::HashSet;

use super::types::CandidateResult;

/// Characters of normalized content considered for duplicate detection.
const DEDUP_PREFIX_CHARS: usize = 100;

/// Normalized prefix key: lowercased, whitespace collapsed, first
/// [`DEDUP_PREFIX_CHARS`] characters.
pub fn dedup_key(content: &str) -> String {
    content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .take(DEDUP_PREFIX_CHARS)
        .collect()
}

/// Drop duplicates (first occurrence wins) and order by weighted
/// similarity, descending. The sort is stable; ties fall back to strategy
/// priority, then to insertion order.
pub fn dedup_and_rank(candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut out: Vec<CandidateResult> = Vec::with_capacity(candidates.len());

    for c in candidates {
        if seen.insert(dedup_key(&c.content)) {
            out.push(c);
        }
    }

    out.sort_by(|a, b| {
        b.ranking_score()
            .partial_cmp(&a.ranking_score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.origin_strategy.priority().cmp(&b.origin_strategy.priority()))
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::types::{SourceType, StrategyKind};
    use serde_json::json;

    fn candidate(content: &str, similarity: f32, kind: StrategyKind, weight: f32) -> CandidateResult {
        CandidateResult {
            content: content.to_string(),
            similarity,
            source_type: SourceType::Transcript,
            origin_strategy: kind,
            strategy_weight: weight,
            metadata: json!({}),
        }
    }

    #[test]
    fn matching_prefixes_collapse_to_first() {
        let long = "a".repeat(120);
        let a = candidate(&long, 0.9, StrategyKind::DirectQuestion, 0.4);
        // Same first 100 chars, different tail.
        let b = candidate(&format!("{}XYZ", "a".repeat(100)), 0.8, StrategyKind::TopicExpanded, 0.25);
        let out = dedup_and_rank(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].origin_strategy, StrategyKind::DirectQuestion);
    }

    #[test]
    fn whitespace_and_case_are_normalized_for_dedup() {
        let a = candidate("He trains  SAMBO every day", 0.9, StrategyKind::DirectQuestion, 0.4);
        let b = candidate("he trains sambo every day", 0.5, StrategyKind::EntityFocused, 0.2);
        let out = dedup_and_rank(vec![a, b]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn ordering_is_by_weighted_similarity_not_raw() {
        // Raw similarity favors b, weighted score favors a.
        let a = candidate("first", 0.8, StrategyKind::DirectQuestion, 0.4); // 0.32
        let b = candidate("second", 0.9, StrategyKind::PersonaFocused, 0.15); // 0.135
        let out = dedup_and_rank(vec![b, a]);
        assert_eq!(out[0].content, "first");
    }

    #[test]
    fn ties_break_by_strategy_priority_then_insertion() {
        let a = candidate("alpha", 0.5, StrategyKind::EntityFocused, 0.4);
        let b = candidate("beta", 0.5, StrategyKind::DirectQuestion, 0.4);
        let c = candidate("gamma", 0.5, StrategyKind::DirectQuestion, 0.4);
        let out = dedup_and_rank(vec![a, b, c]);
        assert_eq!(out[0].content, "beta");
        assert_eq!(out[1].content, "gamma");
        assert_eq!(out[2].content, "alpha");
    }

    #[test]
    fn ranking_is_idempotent() {
        let input = vec![
            candidate("one", 0.7, StrategyKind::DirectQuestion, 0.4),
            candidate("two", 0.9, StrategyKind::TopicExpanded, 0.25),
            candidate("three", 0.6, StrategyKind::EntityFocused, 0.2),
        ];
        let once = dedup_and_rank(input.clone());
        let twice = dedup_and_rank(once.clone());
        let order = |v: &[CandidateResult]| v.iter().map(|c| c.content.clone()).collect::<Vec<_>>();
        assert_eq!(order(&once), order(&twice));
        assert_eq!(order(&once), order(&dedup_and_rank(input)));
    }
}
