//! Model-backed question classification. Errors and malformed responses
//! bubble up as-is; the core's resilient wrapper owns the heuristic
//! fallback, so nothing here needs to be defensive about availability.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use castmind_core::api::{AnalyzerPlugin, Question, QuestionAnalysis};

use crate::http::{parse_json_response, with_auth, ServiceHttpError};

pub struct ModelAnalyzer {
    api_key: String,
    http: reqwest::Client,
    url_analyze: String,
}

impl ModelAnalyzer {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            http,
            url_analyze: format!("{normalized}/v1/analyze"),
        })
    }
}

#[async_trait]
impl AnalyzerPlugin for ModelAnalyzer {
    fn name(&self) -> &str {
        "model_analyzer"
    }

    async fn analyze(&self, question: &Question) -> Result<QuestionAnalysis> {
        let url = &self.url_analyze;
        tracing::debug!(
            target: "castmind.analyze",
            stage = "analyze.http.in",
            url = %url,
            question_len = question.text.len(),
            history_turns = question.history.len(),
        );

        let payload = json!({
            "question": question.text,
            "episode_id": question.episode_id,
            "history": question.history,
        });
        let req = self.http.post(url).json(&payload);
        let resp = with_auth(req, &self.api_key)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let raw = parse_json_response(resp).await?;
        let analysis = serde_json::from_value::<QuestionAnalysis>(raw)
            .map_err(|e| anyhow::anyhow!("failed to parse analysis response: {e}"))?;

        tracing::debug!(
            target: "castmind.analyze",
            stage = "analyze.http.out",
            status = %status,
            intent = analysis.intent.as_str(),
            confidence = analysis.confidence,
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castmind_core::api::{Intent, TemporalContext};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn analyze_decodes_model_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/analyze")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "intent": "current_status",
                    "temporal": "present",
                    "entities": ["Khabib Nurmagomedov"],
                    "requires_external": true,
                    "confidence": 0.92,
                    "reasoning": "live status question about a named fighter"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let analyzer = ModelAnalyzer::new(&server.url(), String::new(), 2_000).unwrap();
        let q = Question::new("What is Khabib doing now?", "ep-1");
        let analysis = analyzer.analyze(&q).await.unwrap();

        mock.assert_async().await;
        assert_eq!(analysis.intent, Intent::CurrentStatus);
        assert_eq!(analysis.temporal, TemporalContext::Present);
        assert!(analysis.requires_external);
        assert_eq!(analysis.entities, vec!["Khabib Nurmagomedov".to_string()]);
    }

    #[tokio::test]
    async fn malformed_response_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/analyze")
            .with_status(200)
            .with_body(r#"{"intent":"no_such_intent"}"#)
            .create_async()
            .await;

        let analyzer = ModelAnalyzer::new(&server.url(), String::new(), 2_000).unwrap();
        let q = Question::new("anything", "ep-1");
        assert!(analyzer.analyze(&q).await.is_err());
    }
}
