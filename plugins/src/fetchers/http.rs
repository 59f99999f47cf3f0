use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use castmind_core::api::{ExternalFetcher, FetchCategory};

use crate::http::{parse_json_response, with_auth, ServiceHttpError};

/// One configured external data endpoint, bound to a fetch category.
/// The endpoint URL is taken verbatim from configuration; the fetcher
/// posts `{ "query", "category" }` and returns whatever JSON comes back.
pub struct HttpFetcher {
    category: FetchCategory,
    cost_per_call: f64,
    api_key: String,
    url: String,
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(
        category: FetchCategory,
        base_url: &str,
        api_key: String,
        cost_per_call: f64,
        timeout_ms: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            category,
            cost_per_call,
            api_key,
            url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl ExternalFetcher for HttpFetcher {
    fn category(&self) -> FetchCategory {
        self.category
    }

    fn cost_per_call(&self) -> f64 {
        self.cost_per_call
    }

    async fn fetch(&self, query: &str) -> Result<Value> {
        tracing::debug!(
            target: "castmind.dispatch",
            stage = "fetch.http.in",
            category = self.category.as_str(),
            url = %self.url,
            query_len = query.len(),
        );

        let payload = json!({
            "query": query,
            "category": self.category.as_str(),
        });
        let req = self.http.post(&self.url).json(&payload);
        let resp = with_auth(req, &self.api_key)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(err, self.url.clone()))?;
        let status = resp.status();
        let v = parse_json_response(resp).await?;

        tracing::debug!(
            target: "castmind.dispatch",
            stage = "fetch.http.out",
            category = self.category.as_str(),
            status = %status,
        );
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn fetch_posts_query_and_returns_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"query":"khabib next fight","category":"sports"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"headline":"Khabib stays retired"}"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(
            FetchCategory::Sports,
            &server.url(),
            String::new(),
            0.05,
            2_000,
        )
        .unwrap();
        let payload = fetcher.fetch("khabib next fight").await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload["headline"], "Khabib stays retired");
        assert_eq!(fetcher.cost_per_call(), 0.05);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(
            FetchCategory::News,
            &server.url(),
            String::new(),
            0.05,
            2_000,
        )
        .unwrap();
        let err = fetcher.fetch("anything").await.unwrap_err();
        let http_err = err.downcast_ref::<ServiceHttpError>().unwrap();
        assert_eq!(http_err.status(), Some(429));
    }
}
