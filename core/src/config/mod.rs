mod load;
mod types;

pub use load::{get_castmind_data_dir, load_default};
pub use types::{
    AnalyzerConfig, AnalyzerProvider, AppConfig, AssemblyConfig, BudgetConfig, DispatchConfig,
    FetcherEndpoint, FetchersConfig, LoggingConfig, ModelAnalyzerConfig, ProfileConfig,
    RetrievalConfig, SearchConfig, SearchProvider, SearchServiceConfig, SufficiencyConfig,
};
