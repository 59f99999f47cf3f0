mod run;
mod types;

pub use run::assemble_context;
pub use types::ContextOutcome;
