//! # fluentpass-monitor
//!
//! Performance diagnostics for a FluentPass deployment.
//!
//! Four independent metric collectors (database, host resources, endpoint
//! latency, asset bundles) feed a rule-based recommendation engine; a
//! console renderer ties one run together. Collector failures are values
//! inside the report, never process failures.

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod recommendation;
pub mod report;

pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use metrics::MetricsReport;
pub use recommendation::{DefaultRecommendationEngine, Recommendation, RecommendationEngine};
pub use report::ReportRenderer;
