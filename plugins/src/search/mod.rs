mod adapters;
mod service;

pub use adapters::parse_search_hits;
pub use service::SearchServiceClient;
