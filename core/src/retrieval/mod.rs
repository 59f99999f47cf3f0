pub mod rank;
pub mod retriever;
pub mod strategies;
pub mod r#trait;
pub mod types;

pub use rank::dedup_and_rank;
pub use retriever::MultiStrategyRetriever;
pub use strategies::{build_variants, QueryVariant};
pub use r#trait::SearchBackend;
pub use types::{CandidateResult, SearchHit, SearchRequest, SourceType, StrategyKind};
