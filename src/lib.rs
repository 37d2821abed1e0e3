//! PropCompare - comparative propaganda-risk analysis.
//!
//! Given independent per-text analyses from an upstream analyzer, the
//! engine computes cross-text insights: a risk ranking, sharp score jumps
//! between consecutive texts, propaganda techniques shared across texts,
//! and an emotional intensity ranking.
//!
//! The engine ([`report::build`]) is pure and synchronous. It never
//! mutates its input, so independent batches can be compared
//! concurrently without coordination.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod scoring;

pub use error::{CompareError, Result};
pub use models::{AnalysisRecord, ComparisonReport, RiskLevel};
pub use report::{build, CompareOptions};
