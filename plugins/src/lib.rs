//! HTTP-backed collaborator plugins for the castmind pipeline: the
//! similarity-search client, per-category external data fetchers and the
//! optional model-backed question analyzer, plus the factory wiring them
//! from configuration.

pub mod analyzer;
pub mod factory;
pub mod fetchers;
pub mod http;
pub mod search;
pub mod services;

pub use services::PluginServicesFactory;
