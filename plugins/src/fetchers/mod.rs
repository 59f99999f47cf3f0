mod http;

pub use http::HttpFetcher;
