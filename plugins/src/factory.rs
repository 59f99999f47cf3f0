//! Builds concrete collaborators from configuration sections.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use castmind_core::api::{
    AnalyzerProvider, AppConfig, ExternalFetcher, FetchCategory, ResilientAnalyzer, SearchBackend,
    SearchProvider,
};

use crate::analyzer::ModelAnalyzer;
use crate::fetchers::HttpFetcher;
use crate::search::SearchServiceClient;

pub fn build_analyzer(cfg: &AppConfig) -> Result<ResilientAnalyzer> {
    match &cfg.analyzer.provider {
        AnalyzerProvider::Heuristic => Ok(ResilientAnalyzer::heuristic_only()),
        AnalyzerProvider::Model(m_cfg) => {
            let model = ModelAnalyzer::new(&m_cfg.base_url, m_cfg.api_key.clone(), m_cfg.timeout_ms)?;
            Ok(ResilientAnalyzer::with_model(
                Arc::new(model),
                Duration::from_millis(m_cfg.timeout_ms),
            ))
        }
    }
}

pub fn build_search(cfg: &AppConfig) -> Result<Arc<dyn SearchBackend>> {
    match &cfg.search.provider {
        SearchProvider::Service(svc_cfg) => Ok(Arc::new(SearchServiceClient::new(
            &svc_cfg.base_url,
            svc_cfg.api_key.clone(),
            svc_cfg.timeout_ms,
        )?)),
    }
}

pub fn build_fetchers(cfg: &AppConfig) -> Result<Vec<Arc<dyn ExternalFetcher>>> {
    let mut out: Vec<Arc<dyn ExternalFetcher>> = Vec::new();
    for (name, endpoint) in &cfg.fetchers.endpoints {
        let Some(category) = FetchCategory::parse(name) else {
            tracing::warn!(
                target: "castmind.dispatch",
                stage = "factory.fetcher.unknown_category",
                name = name.as_str(),
            );
            continue;
        };
        let cost = endpoint
            .cost_per_call
            .unwrap_or(cfg.budget.cost_per_fetch);
        out.push(Arc::new(HttpFetcher::new(
            category,
            &endpoint.base_url,
            endpoint.api_key.clone(),
            cost,
            cfg.fetchers.timeout_ms,
        )?));
    }
    Ok(out)
}
