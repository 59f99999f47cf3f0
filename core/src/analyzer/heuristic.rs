//! Deterministic question classification: keyword buckets for temporal
//! orientation, ordered pattern checks for intent, gazetteer plus
//! proper-noun matching for entities.
//!
//! This path is standalone and mandatory; the model-backed analyzer only
//! ever layers on top of it (see [`super::resilient`]).

use std::collections::BTreeSet;
use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

use crate::question::Question;

use super::gazetteer;
use super::r#trait::AnalyzerPlugin;
use super::types::{Intent, QuestionAnalysis, TemporalContext};

const CONFIDENCE_BASE: f32 = 0.5;
const CONFIDENCE_TEMPORAL_BONUS: f32 = 0.2;
const CONFIDENCE_INTENT_BONUS: f32 = 0.2;
const CONFIDENCE_ENTITY_BONUS: f32 = 0.1;

const PRESENT_CUES: &[&str] = &[
    "right now",
    "now",
    "currently",
    "these days",
    "today",
    "at the moment",
    "nowadays",
    "still",
];

const FUTURE_CUES: &[&str] = &[
    "will",
    "going to",
    "gonna",
    "upcoming",
    "next fight",
    "next year",
    "future",
    "predict",
    "prediction",
];

const PAST_CUES: &[&str] = &[
    "did",
    "was",
    "were",
    "discussed",
    "mentioned",
    "talked about",
    "back then",
    "used to",
    "last time",
];

/// Markers that the question is about the indexed conversation itself.
const LOCAL_CONTENT_CUES: &[&str] = &[
    "discussed",
    "mentioned",
    "during the episode",
    "in the episode",
    "on the podcast",
    "talked about",
    "said on the show",
];

static OPINION_RE: OnceLock<Regex> = OnceLock::new();
static CURRENT_STATUS_RE: OnceLock<Regex> = OnceLock::new();
static FUTURE_RE: OnceLock<Regex> = OnceLock::new();
static COMPARISON_RE: OnceLock<Regex> = OnceLock::new();
static PROPER_NOUN_RE: OnceLock<Regex> = OnceLock::new();

fn opinion_re() -> &'static Regex {
    OPINION_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\bwhat\s+(?:does|do|did)\b.{0,60}\b(?:think|believe|feel)\b|\b(?:believes?|opinion|thoughts\s+on|feel\s+about|take\s+on|view\s+on)\b",
        )
        .expect("OPINION_RE is valid")
    })
}

fn current_status_re() -> &'static Regex {
    CURRENT_STATUS_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:doing\s+now|up\s+to\s+now|currently|right\s+now|these\s+days|nowadays|still\s+(?:fighting|training|active|playing)|status)\b",
        )
        .expect("CURRENT_STATUS_RE is valid")
    })
}

fn future_re() -> &'static Regex {
    FUTURE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:will|going\s+to|gonna|predict(?:ion)?|upcoming|next\s+(?:fight|match|year|season))\b")
            .expect("FUTURE_RE is valid")
    })
}

fn comparison_re() -> &'static Regex {
    COMPARISON_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:compare[ds]?|versus|vs\.?|better\s+than|worse\s+than|difference\s+between)\b")
            .expect("COMPARISON_RE is valid")
    })
}

fn proper_noun_re() -> &'static Regex {
    PROPER_NOUN_RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("PROPER_NOUN_RE is valid")
    })
}

/// Capitalized words that are sentence mechanics, not names.
const PROPER_NOUN_STOPWORDS: &[&str] = &[
    "What", "Who", "Where", "When", "Why", "How", "Is", "Are", "Was", "Were", "Did", "Does", "Do",
    "The", "In", "On", "At", "And", "But", "If", "Can", "Could", "Would", "Should", "Will", "Has",
    "Have", "Had", "Tell", "About",
];

/// Phrase containment with word boundaries on both ends.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let ok_before = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .map(|c| c.is_alphanumeric())
                .unwrap_or(false);
        let ok_after = end == haystack.len()
            || !haystack[end..]
                .chars()
                .next()
                .map(|c| c.is_alphanumeric())
                .unwrap_or(false);
        if ok_before && ok_after {
            return true;
        }
        from = end;
    }
    false
}

fn matched_cue<'a>(lower: &str, cues: &[&'a str]) -> Option<&'a str> {
    cues.iter().find(|c| contains_phrase(lower, c)).copied()
}

/// Temporal buckets in dominance order: present, then future, then past,
/// else general.
fn detect_temporal(lower: &str) -> (TemporalContext, Option<&'static str>) {
    if let Some(cue) = matched_cue(lower, PRESENT_CUES) {
        return (TemporalContext::Present, Some(cue));
    }
    if let Some(cue) = matched_cue(lower, FUTURE_CUES) {
        return (TemporalContext::Future, Some(cue));
    }
    if let Some(cue) = matched_cue(lower, PAST_CUES) {
        return (TemporalContext::Past, Some(cue));
    }
    (TemporalContext::General, None)
}

/// Ordered intent checks; first pattern that fires wins, default factual.
fn detect_intent(text: &str) -> (Intent, bool) {
    if opinion_re().is_match(text) {
        return (Intent::Opinion, true);
    }
    if current_status_re().is_match(text) {
        return (Intent::CurrentStatus, true);
    }
    if future_re().is_match(text) {
        return (Intent::FuturePrediction, true);
    }
    if comparison_re().is_match(text) {
        return (Intent::Comparison, true);
    }
    (Intent::Factual, false)
}

fn extract_entities(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut set: BTreeSet<String> = BTreeSet::new();

    for name in gazetteer::PEOPLE
        .iter()
        .chain(gazetteer::ORGS)
        .chain(gazetteer::TOPICS)
    {
        if contains_phrase(&lower, &name.to_lowercase()) {
            set.insert((*name).to_string());
        }
    }

    for m in proper_noun_re().find_iter(text) {
        let candidate = m.as_str();
        let trimmed = candidate
            .split_whitespace()
            .filter(|w| !PROPER_NOUN_STOPWORDS.contains(w))
            .collect::<Vec<_>>()
            .join(" ");
        if !trimmed.is_empty() {
            set.insert(trimmed);
        }
    }

    set.into_iter().collect()
}

/// Pure heuristic classification. No I/O, deterministic for a given
/// question text.
pub fn analyze_heuristic(question: &Question) -> QuestionAnalysis {
    let text = question.text.as_str();
    let lower = text.to_lowercase();

    let (temporal, temporal_cue) = detect_temporal(&lower);
    let (intent, intent_matched) = detect_intent(text);
    let entities = extract_entities(text);

    let has_local_cue = matched_cue(&lower, LOCAL_CONTENT_CUES).is_some();

    // Present/future questions and live-status questions need live data,
    // except opinions about what was already said in the episode.
    let mut requires_external = matches!(
        temporal,
        TemporalContext::Present | TemporalContext::Future
    ) || intent == Intent::CurrentStatus;
    if requires_external && temporal == TemporalContext::Past && has_local_cue {
        requires_external = false;
    }

    let mut confidence = CONFIDENCE_BASE;
    if temporal_cue.is_some() {
        confidence += CONFIDENCE_TEMPORAL_BONUS;
    }
    if intent_matched {
        confidence += CONFIDENCE_INTENT_BONUS;
    }
    if !entities.is_empty() {
        confidence += CONFIDENCE_ENTITY_BONUS;
    }
    confidence = confidence.min(1.0);

    let reasoning = format!(
        "temporal={}{}; intent={}; entities={}; local_cue={}",
        temporal.as_str(),
        temporal_cue
            .map(|c| format!(" (cue: {c:?})"))
            .unwrap_or_default(),
        intent.as_str(),
        entities.len(),
        has_local_cue,
    );

    tracing::debug!(
        target: "castmind.analyze",
        stage = "analyze.heuristic",
        temporal = temporal.as_str(),
        intent = intent.as_str(),
        entities = entities.len(),
        requires_external = requires_external,
        confidence = confidence,
    );

    QuestionAnalysis {
        intent,
        temporal,
        entities,
        requires_external,
        confidence,
        reasoning,
    }
}

/// The heuristic path behind the plugin seam, for composing with the
/// model-backed analyzer.
pub struct HeuristicAnalyzer;

#[async_trait]
impl AnalyzerPlugin for HeuristicAnalyzer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn analyze(&self, question: &Question) -> Result<QuestionAnalysis> {
        Ok(analyze_heuristic(question))
    }
}
