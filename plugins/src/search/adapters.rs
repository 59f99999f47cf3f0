//! Lenient decoding of search-service responses. The service has shipped
//! several shapes over time (bare array, wrapped `results` array, string
//! source types with older aliases), so the compat struct accepts them
//! all and maps onto the strict core types.

use serde::Deserialize;
use serde_json::Value;

use castmind_core::api::{SearchHit, SourceType};

use crate::http::preview_body;

#[derive(Debug, Clone, Deserialize)]
struct SearchHitCompat {
    #[serde(alias = "text", alias = "chunk")]
    pub content: String,

    #[serde(default, alias = "score")]
    pub similarity: f32,

    #[serde(default = "default_source_type", alias = "source")]
    pub source_type: String,

    #[serde(default, alias = "meta")]
    pub metadata: Value,
}

fn default_source_type() -> String {
    "transcript".to_string()
}

fn parse_source_type(s: &str) -> SourceType {
    match s {
        "episode_summary" | "summary" => SourceType::EpisodeSummary,
        "personality" | "persona" => SourceType::Personality,
        "conversation_history" | "history" => SourceType::ConversationHistory,
        _ => SourceType::Transcript,
    }
}

impl From<SearchHitCompat> for SearchHit {
    fn from(c: SearchHitCompat) -> Self {
        SearchHit {
            content: c.content,
            similarity: c.similarity,
            source_type: parse_source_type(&c.source_type),
            metadata: c.metadata,
        }
    }
}

pub fn parse_search_hits(v: &Value) -> Result<Vec<SearchHit>, String> {
    let arr = match v {
        Value::Array(arr) => arr,
        Value::Object(obj) => {
            if let Some(err_msg) = obj.get("error").and_then(|e| e.as_str()) {
                tracing::warn!(
                    target: "castmind.search",
                    stage = "search.adapter.error_response",
                    error = err_msg,
                );
                return Err(format!("search service returned error: {err_msg}"));
            }
            match obj.get("results").and_then(|r| r.as_array()) {
                Some(arr) => arr,
                None => {
                    let preview = serde_json::to_string(v)
                        .map(|s| preview_body(&s))
                        .unwrap_or_else(|_| "<unserializable>".to_string());
                    return Err(format!("unexpected search response shape: {preview}"));
                }
            }
        }
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(format!(
                "unexpected search response type: {}",
                value_kind(other)
            ))
        }
    };

    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        match serde_json::from_value::<SearchHitCompat>(item.clone()) {
            Ok(compat) => out.push(SearchHit::from(compat)),
            Err(e) => {
                // One malformed row must not sink the whole response.
                tracing::warn!(
                    target: "castmind.search",
                    stage = "search.adapter.skip_row",
                    error = %e,
                );
            }
        }
    }
    Ok(out)
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
