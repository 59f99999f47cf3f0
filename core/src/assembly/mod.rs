pub mod assembler;
pub mod types;

pub use assembler::ContextAssembler;
pub use types::{AssembledContext, ContextWeights};
