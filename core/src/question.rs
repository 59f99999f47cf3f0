use serde::{Deserialize, Serialize};

/// Prior turns kept per question. Older turns add noise more than context.
pub const MAX_HISTORY_TURNS: usize = 4;

/// One prior question/answer exchange from the same conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaTurn {
    pub question: String,
    pub answer: String,
}

/// An incoming user question, immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub episode_id: String,
    /// Most recent turns first, bounded by [`MAX_HISTORY_TURNS`].
    #[serde(default)]
    pub history: Vec<QaTurn>,
}

impl Question {
    pub fn new(text: impl Into<String>, episode_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            episode_id: episode_id.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, mut history: Vec<QaTurn>) -> Self {
        history.truncate(MAX_HISTORY_TURNS);
        self.history = history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let turns: Vec<QaTurn> = (0..10)
            .map(|i| QaTurn {
                question: format!("q{i}"),
                answer: format!("a{i}"),
            })
            .collect();
        let q = Question::new("what happened?", "ep-42").with_history(turns);
        assert_eq!(q.history.len(), MAX_HISTORY_TURNS);
        assert_eq!(q.history[0].question, "q0");
    }
}
