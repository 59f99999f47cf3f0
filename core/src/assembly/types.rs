use serde::{Deserialize, Serialize};

use crate::dispatch::ExternalToolResult;
use crate::retrieval::CandidateResult;

/// Proportional emphasis across the four material kinds used for prompt
/// construction downstream. Always sums to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContextWeights {
    pub episode: f32,
    pub guest: f32,
    pub host: f32,
    pub transcript: f32,
}

impl Default for ContextWeights {
    fn default() -> Self {
        Self {
            episode: 0.25,
            guest: 0.2,
            host: 0.15,
            transcript: 0.4,
        }
    }
}

impl ContextWeights {
    pub fn sum(&self) -> f32 {
        self.episode + self.guest + self.host + self.transcript
    }

    /// Move `amount` of emphasis off transcript material, redistributing
    /// it across the other three proportionally, keeping the sum at 1.0.
    pub fn shifted_from_transcript(&self, amount: f32) -> Self {
        let taken = amount.min(self.transcript);
        let rest = self.episode + self.guest + self.host;
        if rest <= 0.0 {
            return *self;
        }
        Self {
            episode: self.episode + taken * (self.episode / rest),
            guest: self.guest + taken * (self.guest / rest),
            host: self.host + taken * (self.host / rest),
            transcript: self.transcript - taken,
        }
    }
}

/// The sole artifact handed to the generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledContext {
    /// Ranked, deduplicated, capped at the configured chunk limit.
    pub chunks: Vec<CandidateResult>,
    /// Every external fetch consulted for this request, including failures.
    pub external: Vec<ExternalToolResult>,
    pub weights: ContextWeights,
    /// True when both local and external paths yielded nothing usable.
    /// Callers must surface "no context available" rather than hallucinate
    /// over an empty list.
    pub starved: bool,
}
