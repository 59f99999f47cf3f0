//! Best-effort model-backed classification over the deterministic
//! heuristic core. Any error or timeout from the model path falls back to
//! the heuristic result, so callers always get an analysis.

use std::sync::Arc;
use std::time::Duration;

use crate::question::Question;

use super::heuristic::analyze_heuristic;
use super::r#trait::AnalyzerPlugin;
use super::types::QuestionAnalysis;

pub struct ResilientAnalyzer {
    model: Option<Arc<dyn AnalyzerPlugin>>,
    model_timeout: Duration,
}

impl ResilientAnalyzer {
    /// Heuristic-only analyzer.
    pub fn heuristic_only() -> Self {
        Self {
            model: None,
            model_timeout: Duration::ZERO,
        }
    }

    /// Model-backed analyzer with a bounded attempt window.
    pub fn with_model(model: Arc<dyn AnalyzerPlugin>, model_timeout: Duration) -> Self {
        Self {
            model: Some(model),
            model_timeout,
        }
    }

    /// Classify the question. Infallible: the heuristic path covers every
    /// model failure mode.
    pub async fn analyze(&self, question: &Question) -> QuestionAnalysis {
        if let Some(model) = &self.model {
            match tokio::time::timeout(self.model_timeout, model.analyze(question)).await {
                Ok(Ok(analysis)) => {
                    tracing::debug!(
                        target: "castmind.analyze",
                        stage = "analyze.model.ok",
                        analyzer = model.name(),
                        confidence = analysis.confidence,
                    );
                    return analysis.normalized();
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        target: "castmind.analyze",
                        stage = "analyze.model.fallback",
                        analyzer = model.name(),
                        error = %e,
                        "model analyzer failed, using heuristic"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        target: "castmind.analyze",
                        stage = "analyze.model.fallback",
                        analyzer = model.name(),
                        timeout_ms = self.model_timeout.as_millis() as u64,
                        "model analyzer timed out, using heuristic"
                    );
                }
            }
        }
        analyze_heuristic(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::{Intent, TemporalContext};
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FailingModel;

    #[async_trait]
    impl AnalyzerPlugin for FailingModel {
        fn name(&self) -> &str {
            "failing_model"
        }

        async fn analyze(&self, _question: &Question) -> anyhow::Result<QuestionAnalysis> {
            Err(anyhow!("model unavailable"))
        }
    }

    struct HangingModel;

    #[async_trait]
    impl AnalyzerPlugin for HangingModel {
        fn name(&self) -> &str {
            "hanging_model"
        }

        async fn analyze(&self, _question: &Question) -> anyhow::Result<QuestionAnalysis> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("sleep outlives the test timeout")
        }
    }

    struct OverconfidentModel;

    #[async_trait]
    impl AnalyzerPlugin for OverconfidentModel {
        fn name(&self) -> &str {
            "overconfident_model"
        }

        async fn analyze(&self, _question: &Question) -> anyhow::Result<QuestionAnalysis> {
            Ok(QuestionAnalysis {
                intent: Intent::Factual,
                temporal: TemporalContext::General,
                entities: vec!["b".into(), "a".into(), "a".into()],
                requires_external: false,
                confidence: 3.5,
                reasoning: "model verdict".into(),
            })
        }
    }

    #[tokio::test]
    async fn model_error_falls_back_to_heuristic() {
        let analyzer = ResilientAnalyzer::with_model(
            Arc::new(FailingModel),
            Duration::from_millis(500),
        );
        let q = Question::new("What is Khabib doing now?", "ep-1");
        let a = analyzer.analyze(&q).await;
        assert_eq!(a.temporal, TemporalContext::Present);
        assert!(a.requires_external);
    }

    #[tokio::test(start_paused = true)]
    async fn model_timeout_falls_back_to_heuristic() {
        let analyzer =
            ResilientAnalyzer::with_model(Arc::new(HangingModel), Duration::from_millis(100));
        let q = Question::new("What did they discuss about training?", "ep-1");
        let a = analyzer.analyze(&q).await;
        assert_eq!(a.temporal, TemporalContext::Past);
        assert!(!a.requires_external);
    }

    #[tokio::test]
    async fn model_result_is_normalized() {
        let analyzer = ResilientAnalyzer::with_model(
            Arc::new(OverconfidentModel),
            Duration::from_millis(500),
        );
        let q = Question::new("anything", "ep-1");
        let a = analyzer.analyze(&q).await;
        assert_eq!(a.confidence, 1.0);
        assert_eq!(a.entities, vec!["a".to_string(), "b".to_string()]);
    }
}
