use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Transcript,
    EpisodeSummary,
    Personality,
    ConversationHistory,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Transcript => "transcript",
            SourceType::EpisodeSummary => "episode_summary",
            SourceType::Personality => "personality",
            SourceType::ConversationHistory => "conversation_history",
        }
    }
}

/// Which weighted query variant produced a candidate. Declaration order is
/// the tie-break priority for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    DirectQuestion,
    TopicExpanded,
    EntityFocused,
    PersonaFocused,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::DirectQuestion => "direct_question",
            StrategyKind::TopicExpanded => "topic_expanded",
            StrategyKind::EntityFocused => "entity_focused",
            StrategyKind::PersonaFocused => "persona_focused",
        }
    }

    /// Lower is stronger; used to break ranking ties.
    pub fn priority(&self) -> u8 {
        match self {
            StrategyKind::DirectQuestion => 0,
            StrategyKind::TopicExpanded => 1,
            StrategyKind::EntityFocused => 2,
            StrategyKind::PersonaFocused => 3,
        }
    }
}

/// One call against the local search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_filter: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<String>,
    pub limit: u32,
    pub min_similarity: f32,
}

/// Raw hit as returned by the backend, before strategy tagging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub content: String,
    pub similarity: f32,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: Value,
}

/// One retrieved snippet tagged with its producing strategy. Raw
/// `similarity` is preserved for diagnostics; ranking uses
/// [`CandidateResult::ranking_score`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    pub content: String,
    pub similarity: f32,
    pub source_type: SourceType,
    pub origin_strategy: StrategyKind,
    pub strategy_weight: f32,
    #[serde(default)]
    pub metadata: Value,
}

impl CandidateResult {
    pub fn from_hit(hit: SearchHit, strategy: StrategyKind, weight: f32) -> Self {
        Self {
            content: hit.content,
            similarity: hit.similarity,
            source_type: hit.source_type,
            origin_strategy: strategy,
            strategy_weight: weight,
            metadata: hit.metadata,
        }
    }

    pub fn ranking_score(&self) -> f32 {
        self.similarity * self.strategy_weight
    }
}
