use async_trait::async_trait;

use crate::question::Question;

use super::types::QuestionAnalysis;

#[async_trait]
pub trait AnalyzerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn analyze(&self, question: &Question) -> anyhow::Result<QuestionAnalysis>;
}
