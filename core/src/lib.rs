//! castmind core: question analysis, multi-strategy local retrieval,
//! sufficiency grading, routing, budget-gated external dispatch and final
//! context assembly. Consumers should import through [`api`].

pub mod analyzer;
pub mod api;
pub mod assembly;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod question;
pub mod retrieval;
pub mod routing;
pub mod sufficiency;
