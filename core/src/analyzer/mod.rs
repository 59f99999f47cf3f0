pub mod heuristic;
pub mod resilient;
pub mod r#trait;
pub mod types;

mod gazetteer;

pub use heuristic::{analyze_heuristic, HeuristicAnalyzer};
pub use resilient::ResilientAnalyzer;
pub use r#trait::AnalyzerPlugin;
pub use types::{Intent, QuestionAnalysis, TemporalContext};
