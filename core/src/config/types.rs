use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub budget: BudgetConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub sufficiency: SufficiencyConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub assembly: AssemblyConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub fetchers: FetchersConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_project_id() -> String {
    "castmind".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "castmind_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Spending limits shared by every request in the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Rolling daily ceiling in currency units.
    #[serde(default = "default_daily_budget")]
    pub daily_budget: f64,

    /// Cost per local similarity-search call. Zero when local search is
    /// already paid for (the usual case); recorded to the ledger only when
    /// nonzero.
    #[serde(default)]
    pub cost_per_search: f64,

    /// Fallback cost per external fetch when a fetcher does not declare its
    /// own per-call price.
    #[serde(default = "default_cost_per_fetch")]
    pub cost_per_fetch: f64,
}

fn default_daily_budget() -> f64 {
    10.0
}

fn default_cost_per_fetch() -> f64 {
    0.05
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            daily_budget: default_daily_budget(),
            cost_per_search: 0.0,
            cost_per_fetch: default_cost_per_fetch(),
        }
    }
}

/// Multi-strategy local retrieval knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Total result budget split across query variants in proportion to
    /// their weights.
    #[serde(default = "default_total_limit")]
    pub total_limit: u32,

    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    /// Per-variant timeout. A variant that misses it degrades to an empty
    /// result set.
    #[serde(default = "default_variant_timeout_ms")]
    pub variant_timeout_ms: u64,

    #[serde(default = "default_direct_weight")]
    pub direct_weight: f32,

    #[serde(default = "default_topic_weight")]
    pub topic_weight: f32,

    #[serde(default = "default_entity_weight")]
    pub entity_weight: f32,

    #[serde(default = "default_persona_weight")]
    pub persona_weight: f32,
}

fn default_total_limit() -> u32 {
    12
}

fn default_min_similarity() -> f32 {
    0.3
}

fn default_variant_timeout_ms() -> u64 {
    4_000
}

fn default_direct_weight() -> f32 {
    0.4
}

fn default_topic_weight() -> f32 {
    0.25
}

fn default_entity_weight() -> f32 {
    0.2
}

fn default_persona_weight() -> f32 {
    0.15
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            total_limit: default_total_limit(),
            min_similarity: default_min_similarity(),
            variant_timeout_ms: default_variant_timeout_ms(),
            direct_weight: default_direct_weight(),
            topic_weight: default_topic_weight(),
            entity_weight: default_entity_weight(),
            persona_weight: default_persona_weight(),
        }
    }
}

/// Thresholds for grading whether local content alone can answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SufficiencyConfig {
    #[serde(default = "default_sufficient_threshold")]
    pub sufficient_threshold: f32,

    #[serde(default = "default_partial_threshold")]
    pub partial_threshold: f32,
}

fn default_sufficient_threshold() -> f32 {
    0.7
}

fn default_partial_threshold() -> f32 {
    0.4
}

impl Default for SufficiencyConfig {
    fn default() -> Self {
        Self {
            sufficient_threshold: default_sufficient_threshold(),
            partial_threshold: default_partial_threshold(),
        }
    }
}

/// External fetch fan-out limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_dispatch_enabled")]
    pub enabled: bool,

    #[serde(default = "default_max_tools_per_request")]
    pub max_tools_per_request: usize,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_dispatch_enabled() -> bool {
    true
}

fn default_max_tools_per_request() -> usize {
    2
}

fn default_fetch_timeout_ms() -> u64 {
    6_000
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            enabled: default_dispatch_enabled(),
            max_tools_per_request: default_max_tools_per_request(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Final context shaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    #[serde(default = "default_max_relevant_chunks")]
    pub max_relevant_chunks: usize,
}

fn default_max_relevant_chunks() -> usize {
    4
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            max_relevant_chunks: default_max_relevant_chunks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub provider: AnalyzerProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyzerProvider {
    /// Deterministic keyword/pattern classification. Always available.
    #[default]
    Heuristic,
    /// Model-backed classification with deterministic heuristic fallback.
    Model(ModelAnalyzerConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAnalyzerConfig {
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_model_timeout_ms() -> u64 {
    2_500
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub provider: SearchProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchProvider {
    Service(SearchServiceConfig),
}

impl Default for SearchProvider {
    fn default() -> Self {
        SearchProvider::Service(SearchServiceConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchServiceConfig {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_search_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_search_base_url() -> String {
    "http://127.0.0.1:8900".to_string()
}

fn default_search_timeout_ms() -> u64 {
    5_000
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            api_key: String::new(),
            timeout_ms: default_search_timeout_ms(),
        }
    }
}

/// Per-category external fetcher endpoints, keyed by category name
/// (sports, news, finance, business, weather, general).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchersConfig {
    #[serde(default = "default_fetch_http_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub endpoints: BTreeMap<String, FetcherEndpoint>,
}

fn default_fetch_http_timeout_ms() -> u64 {
    5_000
}

impl Default for FetchersConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_http_timeout_ms(),
            endpoints: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherEndpoint {
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    /// Per-call price; falls back to `budget.cost_per_fetch` when unset.
    #[serde(default)]
    pub cost_per_call: Option<f64>,
}

/// Static show metadata used to expand retrieval queries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub guest: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,
}
