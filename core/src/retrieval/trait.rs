use async_trait::async_trait;

use super::types::{SearchHit, SearchRequest};

/// Local similarity-search collaborator. May return zero results and may
/// fail per call; callers must treat both as non-fatal.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, request: SearchRequest) -> anyhow::Result<Vec<SearchHit>>;
}
