use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use castmind_core::api::{
    CostLedger, ExternalFetcher, FetchCategory, ResilientAnalyzer, SearchBackend, SearchHit,
    SearchRequest, Services, SourceType,
};

/// Search backend returning the same hit set for every request.
pub struct StaticSearchBackend {
    hits: Vec<SearchHit>,
}

impl StaticSearchBackend {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }

    pub fn empty() -> Self {
        Self { hits: Vec::new() }
    }
}

#[async_trait]
impl SearchBackend for StaticSearchBackend {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, _request: SearchRequest) -> Result<Vec<SearchHit>> {
        Ok(self.hits.clone())
    }
}

/// Fetcher that counts invocations and always succeeds.
pub struct RecordingFetcher {
    category: FetchCategory,
    cost: f64,
    pub calls: AtomicUsize,
}

impl RecordingFetcher {
    pub fn new(category: FetchCategory, cost: f64) -> Self {
        Self {
            category,
            cost,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalFetcher for RecordingFetcher {
    fn category(&self) -> FetchCategory {
        self.category
    }

    fn cost_per_call(&self) -> f64 {
        self.cost
    }

    async fn fetch(&self, query: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "live": format!("result for {query}") }))
    }
}

pub fn transcript_hit(content: &str, similarity: f32) -> SearchHit {
    SearchHit {
        content: content.to_string(),
        similarity,
        source_type: SourceType::Transcript,
        metadata: json!({ "offset_secs": 120 }),
    }
}

pub fn services(
    backend: Arc<dyn SearchBackend>,
    fetchers: Vec<Arc<dyn ExternalFetcher>>,
    daily_budget: f64,
) -> (Services, Arc<CostLedger>) {
    let ledger = Arc::new(CostLedger::new(daily_budget));
    (
        Services {
            analyzer: Arc::new(ResilientAnalyzer::heuristic_only()),
            search: backend,
            fetchers,
            ledger: Arc::clone(&ledger),
        },
        ledger,
    )
}
