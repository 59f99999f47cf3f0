//! ServicesFactory implementation: builds the full collaborator set from
//! configuration for the CLI to share across requests.

use std::sync::Arc;

use async_trait::async_trait;

use castmind_core::api::{AppConfig, CostLedger, PipelineError, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, PipelineError> {
        let analyzer = factory::build_analyzer(cfg).map_err(PipelineError::Plugin)?;
        let search = factory::build_search(cfg).map_err(PipelineError::Plugin)?;
        let fetchers = factory::build_fetchers(cfg).map_err(PipelineError::Plugin)?;
        let ledger = Arc::new(CostLedger::new(cfg.budget.daily_budget));

        tracing::debug!(
            target: "castmind.services",
            stage = "services.build",
            fetchers = fetchers.len(),
            daily_budget = cfg.budget.daily_budget,
        );

        Ok(Services {
            analyzer: Arc::new(analyzer),
            search,
            fetchers,
            ledger,
        })
    }
}
