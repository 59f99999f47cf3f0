pub mod category;
pub mod dispatcher;
pub mod r#trait;
pub mod types;

pub use category::infer_categories;
pub use dispatcher::{DispatchOutcome, ExternalDataDispatcher};
pub use r#trait::ExternalFetcher;
pub use types::{ExternalToolResult, FetchCategory};
