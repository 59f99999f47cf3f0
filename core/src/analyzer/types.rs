use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Factual,
    Opinion,
    CurrentStatus,
    FuturePrediction,
    Comparison,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Factual => "factual",
            Intent::Opinion => "opinion",
            Intent::CurrentStatus => "current_status",
            Intent::FuturePrediction => "future_prediction",
            Intent::Comparison => "comparison",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalContext {
    Past,
    Present,
    Future,
    General,
}

impl TemporalContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalContext::Past => "past",
            TemporalContext::Present => "present",
            TemporalContext::Future => "future",
            TemporalContext::General => "general",
        }
    }
}

/// Classification of one question. Derived purely from the question,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub intent: Intent,
    pub temporal: TemporalContext,
    /// Deduplicated, sorted for deterministic downstream query building.
    pub entities: Vec<String>,
    pub requires_external: bool,
    pub confidence: f32,
    pub reasoning: String,
}

impl QuestionAnalysis {
    /// Clamp fields a non-heuristic producer may have gotten wrong.
    pub fn normalized(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self.entities.sort();
        self.entities.dedup();
        self
    }
}
