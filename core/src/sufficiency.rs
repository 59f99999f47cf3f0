//! Scores whether locally retrieved candidates plausibly answer the
//! question, before any money is spent on external data.

use serde::{Deserialize, Serialize};

use crate::config::SufficiencyConfig;
use crate::retrieval::{CandidateResult, SourceType};

/// Headroom applied to the weighted-similarity mean before clamping.
const CONFIDENCE_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Sufficient,
    Partial,
    Insufficient,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Sufficient => "sufficient",
            Recommendation::Partial => "partial",
            Recommendation::Insufficient => "insufficient",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SufficiencyVerdict {
    pub has_relevant_content: bool,
    /// Mean weighted similarity of local candidates, scaled and clamped to
    /// [0, 1].
    pub confidence_score: f32,
    /// Source types seen among the candidates, deduplicated.
    pub sources: Vec<SourceType>,
    pub recommendation: Recommendation,
}

impl SufficiencyVerdict {
    fn empty() -> Self {
        Self {
            has_relevant_content: false,
            confidence_score: 0.0,
            sources: Vec::new(),
            recommendation: Recommendation::Insufficient,
        }
    }
}

/// Grade a set of local candidates against the configured thresholds.
pub fn survey(cfg: &SufficiencyConfig, candidates: &[CandidateResult]) -> SufficiencyVerdict {
    if candidates.is_empty() {
        return SufficiencyVerdict::empty();
    }

    // Weighted mean: strategy weights bias the average toward hits from the
    // stronger query variants.
    let weight_sum: f32 = candidates.iter().map(|c| c.strategy_weight).sum();
    let mean = if weight_sum > 0.0 {
        candidates
            .iter()
            .map(|c| c.similarity * c.strategy_weight)
            .sum::<f32>()
            / weight_sum
    } else {
        candidates.iter().map(|c| c.similarity).sum::<f32>() / candidates.len() as f32
    };

    let confidence_score = (mean * CONFIDENCE_SCALE).min(1.0);

    let mut sources: Vec<SourceType> = Vec::new();
    for c in candidates {
        if !sources.contains(&c.source_type) {
            sources.push(c.source_type);
        }
    }

    let recommendation = if confidence_score >= cfg.sufficient_threshold {
        Recommendation::Sufficient
    } else if confidence_score >= cfg.partial_threshold {
        Recommendation::Partial
    } else {
        Recommendation::Insufficient
    };

    tracing::debug!(
        target: "castmind.survey",
        stage = "survey.verdict",
        candidates = candidates.len(),
        confidence = confidence_score,
        recommendation = recommendation.as_str(),
    );

    SufficiencyVerdict {
        has_relevant_content: true,
        confidence_score,
        sources,
        recommendation,
    }
}
