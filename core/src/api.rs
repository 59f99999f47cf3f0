//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `castmind_core::api` instead of reaching into
//! internal modules.

pub use crate::analyzer::{
    analyze_heuristic, AnalyzerPlugin, HeuristicAnalyzer, Intent, QuestionAnalysis,
    ResilientAnalyzer, TemporalContext,
};
pub use crate::assembly::{AssembledContext, ContextAssembler, ContextWeights};
pub use crate::config::{
    load_default, AnalyzerConfig, AnalyzerProvider, AppConfig, AssemblyConfig, BudgetConfig,
    DispatchConfig, FetcherEndpoint, FetchersConfig, LoggingConfig, ModelAnalyzerConfig,
    ProfileConfig, RetrievalConfig, SearchConfig, SearchProvider, SearchServiceConfig,
    SufficiencyConfig,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::dispatch::{
    ExternalDataDispatcher, ExternalFetcher, ExternalToolResult, FetchCategory,
};
pub use crate::engine::{assemble_context, ContextOutcome};
pub use crate::error::{CliError, PipelineError};
pub use crate::ledger::{CostEntry, CostLedger, DailyLedger};
pub use crate::question::{QaTurn, Question};
pub use crate::retrieval::{
    CandidateResult, MultiStrategyRetriever, SearchBackend, SearchHit, SearchRequest, SourceType,
    StrategyKind,
};
pub use crate::routing::{decide, RoutingDecision, RoutingPriority};
pub use crate::sufficiency::{survey, Recommendation, SufficiencyVerdict};
