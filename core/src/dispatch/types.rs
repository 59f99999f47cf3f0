use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchCategory {
    Sports,
    News,
    Finance,
    Business,
    Weather,
    General,
}

impl FetchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchCategory::Sports => "sports",
            FetchCategory::News => "news",
            FetchCategory::Finance => "finance",
            FetchCategory::Business => "business",
            FetchCategory::Weather => "weather",
            FetchCategory::General => "general",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sports" => Some(FetchCategory::Sports),
            "news" => Some(FetchCategory::News),
            "finance" => Some(FetchCategory::Finance),
            "business" => Some(FetchCategory::Business),
            "weather" => Some(FetchCategory::Weather),
            "general" => Some(FetchCategory::General),
            _ => None,
        }
    }
}

/// Outcome of one external fetch. The payload is opaque to the core; it is
/// passed through to the generation collaborator untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalToolResult {
    pub category: FetchCategory,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}
