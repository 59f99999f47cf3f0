//! Weighted query variants built from the question plus known show
//! metadata. Between two and four variants are produced depending on what
//! is known about the episode and the question.

use crate::analyzer::QuestionAnalysis;
use crate::config::{ProfileConfig, RetrievalConfig};
use crate::question::Question;

use super::types::{SourceType, StrategyKind};

#[derive(Debug, Clone)]
pub struct QueryVariant {
    pub kind: StrategyKind,
    pub query: String,
    pub weight: f32,
    pub limit: u32,
    pub source_filter: Option<SourceType>,
}

fn variant_limit(total: u32, weight: f32) -> u32 {
    ((total as f32 * weight).round() as u32).max(1)
}

/// Build the variant set for one question. `analysis` is `None` on the
/// initial pass that runs concurrently with classification; the
/// entity-focused variant needs entities, so it only appears once an
/// analysis is available.
pub fn build_variants(
    question: &Question,
    analysis: Option<&QuestionAnalysis>,
    profile: &ProfileConfig,
    cfg: &RetrievalConfig,
) -> Vec<QueryVariant> {
    let mut variants = Vec::with_capacity(4);

    // Direct question, optionally anchored by the latest prior turn.
    let mut direct = question.text.clone();
    if let Some(turn) = question.history.first() {
        direct.push_str(" (follow-up to: ");
        direct.push_str(&turn.question);
        direct.push(')');
    }
    variants.push(QueryVariant {
        kind: StrategyKind::DirectQuestion,
        query: direct,
        weight: cfg.direct_weight,
        limit: variant_limit(cfg.total_limit, cfg.direct_weight),
        source_filter: None,
    });

    if !profile.topics.is_empty() {
        variants.push(QueryVariant {
            kind: StrategyKind::TopicExpanded,
            query: format!("{} {}", question.text, profile.topics.join(" ")),
            weight: cfg.topic_weight,
            limit: variant_limit(cfg.total_limit, cfg.topic_weight),
            source_filter: None,
        });
    }

    if let Some(analysis) = analysis {
        if !analysis.entities.is_empty() {
            variants.push(QueryVariant {
                kind: StrategyKind::EntityFocused,
                query: analysis.entities.join(" "),
                weight: cfg.entity_weight,
                limit: variant_limit(cfg.total_limit, cfg.entity_weight),
                source_filter: None,
            });
        }
    }

    if let Some(host) = profile.host.as_deref().filter(|h| !h.trim().is_empty()) {
        variants.push(QueryVariant {
            kind: StrategyKind::PersonaFocused,
            query: format!("{host} perspective on {}", question.text),
            weight: cfg.persona_weight,
            limit: variant_limit(cfg.total_limit, cfg.persona_weight),
            source_filter: Some(SourceType::Personality),
        });
    }

    variants
}
