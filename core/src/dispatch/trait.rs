use async_trait::async_trait;
use serde_json::Value;

use super::types::FetchCategory;

/// Category-specific live-data collaborator. Each call is billed; the
/// dispatcher records the declared cost before firing.
#[async_trait]
pub trait ExternalFetcher: Send + Sync {
    fn category(&self) -> FetchCategory;

    /// Per-call price in currency units.
    fn cost_per_call(&self) -> f64;

    async fn fetch(&self, query: &str) -> anyhow::Result<Value>;
}
