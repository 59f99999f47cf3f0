//! The routing decision table. Rows are evaluated top to bottom and the
//! first match wins; this ordering is a contract the integration tests
//! pin down, so do not reorder rows.

use crate::analyzer::{Intent, QuestionAnalysis, TemporalContext};
use crate::sufficiency::{Recommendation, SufficiencyVerdict};

use super::decision::{RoutingDecision, RoutingPriority};

pub fn decide(analysis: &QuestionAnalysis, verdict: &SufficiencyVerdict) -> RoutingDecision {
    let decision = decide_row(analysis, verdict);

    tracing::info!(
        target: "castmind.route",
        stage = "route.decide",
        priority = decision.priority.as_str(),
        use_external = decision.use_external,
        confidence = decision.confidence,
        local_sufficiency = decision.estimated_local_sufficiency,
        reasoning = %decision.reasoning,
    );

    decision
}

fn decide_row(analysis: &QuestionAnalysis, verdict: &SufficiencyVerdict) -> RoutingDecision {
    let sufficiency = verdict.confidence_score;
    let row = |use_external, priority, confidence, reasoning: &str| RoutingDecision {
        use_external,
        priority,
        confidence,
        reasoning: reasoning.to_string(),
        estimated_local_sufficiency: sufficiency,
    };

    // 1. Live-status questions always go out.
    if analysis.requires_external && analysis.temporal == TemporalContext::Present {
        return row(
            true,
            RoutingPriority::ExternalOnly,
            0.9,
            "current status requires external data",
        );
    }

    // 2. Future-oriented questions always go out.
    if analysis.requires_external && analysis.temporal == TemporalContext::Future {
        return row(
            true,
            RoutingPriority::ExternalOnly,
            0.8,
            "future-oriented question requires external data",
        );
    }

    // 3. Opinions with strong local coverage stay local.
    if analysis.intent == Intent::Opinion && verdict.recommendation == Recommendation::Sufficient {
        return row(
            false,
            RoutingPriority::LocalOnly,
            0.8,
            "opinion question with sufficient local content",
        );
    }

    // 4. Past questions with any relevant local content stay local.
    if analysis.temporal == TemporalContext::Past && verdict.has_relevant_content {
        return row(
            false,
            RoutingPriority::LocalOnly,
            0.7,
            "past-oriented question with relevant local content",
        );
    }

    // 5. External need + insufficient local content.
    if analysis.requires_external && verdict.recommendation == Recommendation::Insufficient {
        return row(
            true,
            RoutingPriority::ExternalOnly,
            0.8,
            "external required and local content insufficient",
        );
    }

    // 6. Partial local coverage worth supplementing.
    if verdict.recommendation == Recommendation::Partial && analysis.requires_external {
        return row(
            true,
            RoutingPriority::Hybrid,
            0.6,
            "partial local coverage, supplementing with external data",
        );
    }

    // 7. Default: anything locally relevant stays local.
    if verdict.has_relevant_content {
        return row(
            false,
            RoutingPriority::LocalOnly,
            0.6,
            "local content available",
        );
    }

    // 8. Nothing local at all.
    row(
        true,
        RoutingPriority::ExternalFallback,
        0.5,
        "no sufficient local content",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analysis(
        intent: Intent,
        temporal: TemporalContext,
        requires_external: bool,
    ) -> QuestionAnalysis {
        QuestionAnalysis {
            intent,
            temporal,
            entities: Vec::new(),
            requires_external,
            confidence: 0.8,
            reasoning: String::new(),
        }
    }

    fn verdict(recommendation: Recommendation, has_content: bool, score: f32) -> SufficiencyVerdict {
        SufficiencyVerdict {
            has_relevant_content: has_content,
            confidence_score: score,
            sources: Vec::new(),
            recommendation,
        }
    }

    #[test]
    fn row1_present_external_wins_over_everything() {
        let d = decide(
            &analysis(Intent::CurrentStatus, TemporalContext::Present, true),
            &verdict(Recommendation::Sufficient, true, 0.95),
        );
        assert_eq!(d.priority, RoutingPriority::ExternalOnly);
        assert!(d.use_external);
        assert_eq!(d.confidence, 0.9);
        assert_eq!(d.reasoning, "current status requires external data");
    }

    #[test]
    fn row2_future_external() {
        let d = decide(
            &analysis(Intent::FuturePrediction, TemporalContext::Future, true),
            &verdict(Recommendation::Sufficient, true, 0.9),
        );
        assert_eq!(d.priority, RoutingPriority::ExternalOnly);
        assert_eq!(d.confidence, 0.8);
    }

    #[test]
    fn row3_sufficient_opinion_stays_local() {
        let d = decide(
            &analysis(Intent::Opinion, TemporalContext::General, false),
            &verdict(Recommendation::Sufficient, true, 0.85),
        );
        assert_eq!(d.priority, RoutingPriority::LocalOnly);
        assert!(!d.use_external);
        assert_eq!(d.confidence, 0.8);
    }

    #[test]
    fn row4_past_with_content_stays_local() {
        let d = decide(
            &analysis(Intent::Factual, TemporalContext::Past, false),
            &verdict(Recommendation::Partial, true, 0.5),
        );
        assert_eq!(d.priority, RoutingPriority::LocalOnly);
        assert_eq!(d.confidence, 0.7);
    }

    #[test]
    fn row5_required_and_insufficient_goes_external() {
        let d = decide(
            &analysis(Intent::CurrentStatus, TemporalContext::General, true),
            &verdict(Recommendation::Insufficient, true, 0.2),
        );
        assert_eq!(d.priority, RoutingPriority::ExternalOnly);
        assert_eq!(d.confidence, 0.8);
    }

    #[test]
    fn row6_partial_and_required_is_hybrid() {
        let d = decide(
            &analysis(Intent::CurrentStatus, TemporalContext::General, true),
            &verdict(Recommendation::Partial, true, 0.5),
        );
        assert_eq!(d.priority, RoutingPriority::Hybrid);
        assert!(d.use_external);
        assert_eq!(d.confidence, 0.6);
    }

    #[test]
    fn row7_default_local_when_content_exists() {
        let d = decide(
            &analysis(Intent::Factual, TemporalContext::General, false),
            &verdict(Recommendation::Partial, true, 0.5),
        );
        assert_eq!(d.priority, RoutingPriority::LocalOnly);
        assert_eq!(d.confidence, 0.6);
    }

    #[test]
    fn row8_nothing_local_falls_back_external() {
        let d = decide(
            &analysis(Intent::Factual, TemporalContext::General, false),
            &verdict(Recommendation::Insufficient, false, 0.0),
        );
        assert_eq!(d.priority, RoutingPriority::ExternalFallback);
        assert!(d.use_external);
        assert_eq!(d.confidence, 0.5);
        assert_eq!(d.reasoning, "no sufficient local content");
    }

    #[test]
    fn sufficiency_score_is_copied_through() {
        let d = decide(
            &analysis(Intent::Factual, TemporalContext::General, false),
            &verdict(Recommendation::Partial, true, 0.53),
        );
        assert_eq!(d.estimated_local_sufficiency, 0.53);
    }

    #[test]
    fn downgrade_forces_local_and_records_reason() {
        let d = decide(
            &analysis(Intent::CurrentStatus, TemporalContext::Present, true),
            &verdict(Recommendation::Insufficient, false, 0.0),
        );
        let downgraded = d.downgraded_to_local("daily budget exhausted");
        assert!(!downgraded.use_external);
        assert_eq!(downgraded.priority, RoutingPriority::LocalOnly);
        assert!(downgraded.reasoning.contains("daily budget exhausted"));
        assert!(downgraded
            .reasoning
            .contains("current status requires external data"));
    }
}
