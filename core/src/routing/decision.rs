use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPriority {
    LocalOnly,
    ExternalOnly,
    Hybrid,
    ExternalFallback,
}

impl RoutingPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingPriority::LocalOnly => "local_only",
            RoutingPriority::ExternalOnly => "external_only",
            RoutingPriority::Hybrid => "hybrid",
            RoutingPriority::ExternalFallback => "external_fallback",
        }
    }
}

/// The verdict on whether to pay for external data for one question.
/// Immutable once produced, except for the budget downgrade path which
/// replaces it wholesale with a recorded reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub use_external: bool,
    pub priority: RoutingPriority,
    pub confidence: f32,
    pub reasoning: String,
    /// Copied from the sufficiency verdict for auditability.
    pub estimated_local_sufficiency: f32,
}

impl RoutingDecision {
    /// Budget-exhaustion downgrade: force local-only and record why. Never
    /// silently drops the original priority.
    pub fn downgraded_to_local(&self, note: &str) -> Self {
        Self {
            use_external: false,
            priority: RoutingPriority::LocalOnly,
            confidence: self.confidence,
            reasoning: format!("{} [downgraded: {note}]", self.reasoning),
            estimated_local_sufficiency: self.estimated_local_sufficiency,
        }
    }
}
