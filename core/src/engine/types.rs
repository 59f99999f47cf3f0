use serde::Serialize;

use crate::analyzer::QuestionAnalysis;
use crate::assembly::AssembledContext;
use crate::routing::RoutingDecision;
use crate::sufficiency::SufficiencyVerdict;

/// Everything the pipeline produced for one question: the assembled
/// context plus the intermediate verdicts, kept for auditability.
#[derive(Debug, Clone, Serialize)]
pub struct ContextOutcome {
    pub request_id: String,
    pub analysis: QuestionAnalysis,
    pub verdict: SufficiencyVerdict,
    pub decision: RoutingDecision,
    pub context: AssembledContext,
}
