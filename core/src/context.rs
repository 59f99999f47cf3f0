use std::sync::Arc;

use crate::analyzer::ResilientAnalyzer;
use crate::config::AppConfig;
use crate::dispatch::ExternalFetcher;
use crate::error::PipelineError;
use crate::ledger::CostLedger;
use crate::retrieval::SearchBackend;

/// Collaborators for one process, built once at startup and shared by
/// every request. The ledger is the only mutable member.
#[derive(Clone)]
pub struct Services {
    pub analyzer: Arc<ResilientAnalyzer>,
    pub search: Arc<dyn SearchBackend>,
    pub fetchers: Vec<Arc<dyn ExternalFetcher>>,
    pub ledger: Arc<CostLedger>,
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, PipelineError>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services_factory: Option<Arc<dyn ServicesFactory>>) -> Self {
        Self {
            cfg,
            services_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            services_factory: self.services_factory.clone(),
        }
    }

    pub async fn build_services(&self) -> Result<Services, PipelineError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Err(PipelineError::Config(
                "services_factory missing (cannot build collaborators)".into(),
            ));
        };
        factory.build_services(&self.cfg).await
    }
}
