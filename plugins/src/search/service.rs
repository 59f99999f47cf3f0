use anyhow::Result;
use async_trait::async_trait;

use castmind_core::api::{SearchBackend, SearchHit, SearchRequest};

use crate::http::{parse_json_response, with_auth, ServiceHttpError};

use super::adapters::parse_search_hits;

/// HTTP client for the similarity-search service. URLs are pre-built at
/// construction so the per-request path only serializes the payload.
pub struct SearchServiceClient {
    api_key: String,
    http: reqwest::Client,
    url_search: String,
}

impl SearchServiceClient {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            http,
            url_search: format!("{normalized}/v1/memory/search"),
        })
    }
}

#[async_trait]
impl SearchBackend for SearchServiceClient {
    fn name(&self) -> &str {
        "search_service"
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>> {
        let url = &self.url_search;
        tracing::debug!(
            target: "castmind.search",
            stage = "search.http.in",
            url = %url,
            query_len = request.query.len(),
            limit = request.limit,
            min_similarity = request.min_similarity,
            source_filter = request.source_filter.map(|s| s.as_str()).unwrap_or("none"),
        );

        let req = self.http.post(url).json(&request);
        let resp = with_auth(req, &self.api_key)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let raw = parse_json_response(resp).await?;
        let hits = parse_search_hits(&raw).map_err(|e| anyhow::anyhow!(e))?;

        tracing::debug!(
            target: "castmind.search",
            stage = "search.http.out",
            status = %status,
            hits = hits.len(),
        );
        Ok(hits)
    }
}
