//! Maps a question's analysis to the external fetch categories worth
//! consulting, in priority order.

use crate::analyzer::QuestionAnalysis;
use crate::question::Question;

use super::types::FetchCategory;

const SPORTS_CUES: &[&str] = &[
    "fight", "fighting", "ufc", "mma", "match", "game", "season", "champion", "title", "record",
    "team", "bout", "rankings",
];

const NEWS_CUES: &[&str] = &["news", "announced", "announcement", "latest", "happened", "headline"];

const FINANCE_CUES: &[&str] = &[
    "stock", "stocks", "price", "market", "crypto", "bitcoin", "earnings", "shares", "invest",
];

const BUSINESS_CUES: &[&str] = &[
    "company", "startup", "tech", "product", "launch", "deal", "acquisition", "ceo", "funding",
];

const WEATHER_CUES: &[&str] = &["weather", "temperature", "forecast", "rain", "snow"];

fn any_cue(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|c| lower.contains(c))
}

/// Infer up to `max` categories from question text and extracted entities.
/// Always yields at least one category (general as the fallback).
pub fn infer_categories(
    question: &Question,
    analysis: &QuestionAnalysis,
    max: usize,
) -> Vec<FetchCategory> {
    let mut haystack = question.text.to_lowercase();
    for e in &analysis.entities {
        haystack.push(' ');
        haystack.push_str(&e.to_lowercase());
    }

    let mut out: Vec<FetchCategory> = Vec::new();
    let mut push = |c: FetchCategory, out: &mut Vec<FetchCategory>| {
        if !out.contains(&c) {
            out.push(c);
        }
    };

    if any_cue(&haystack, SPORTS_CUES) {
        push(FetchCategory::Sports, &mut out);
    }
    if any_cue(&haystack, NEWS_CUES) {
        push(FetchCategory::News, &mut out);
    }
    if any_cue(&haystack, FINANCE_CUES) {
        push(FetchCategory::Finance, &mut out);
    }
    if any_cue(&haystack, BUSINESS_CUES) {
        push(FetchCategory::Business, &mut out);
    }
    if any_cue(&haystack, WEATHER_CUES) {
        push(FetchCategory::Weather, &mut out);
    }

    if out.is_empty() {
        out.push(FetchCategory::General);
    }
    out.truncate(max.max(1));
    out
}
