//! Metric records shared by the collectors and the recommendation engine.
//!
//! One [`MetricsReport`] is built per run. Collector failure is a value,
//! not an exception: each fallible category stores either its stats record
//! or a [`CollectorError`] carrying the reason.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Classification thresholds, in the units the collectors report.
///
/// The values are operational rules of thumb rather than derived limits,
/// so they are kept configurable with the historical defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Query latency below this is `healthy` (ms)
    pub db_healthy_below_ms: f64,
    /// Query latency above this triggers the indexing suggestion (ms)
    pub db_index_hint_ms: f64,
    /// Store size above this triggers the archiving suggestion (MB)
    pub db_archive_hint_mb: f64,
    /// Memory usage above this triggers the scale-up suggestion (%)
    pub memory_scale_hint_percent: f64,
    /// CPU usage above this triggers the optimize-or-scale suggestion (%)
    pub cpu_scale_hint_percent: f64,
    /// Endpoint latency below this is `fast` (ms)
    pub endpoint_fast_below_ms: f64,
    /// Endpoint latency below this is `slow`, at or above it `very_slow` (ms)
    pub endpoint_slow_below_ms: f64,
    /// Endpoint latency above this triggers the caching suggestion (ms)
    pub endpoint_cache_hint_ms: f64,
    /// JavaScript bundle size above this is `large` (KB)
    pub js_large_kb: f64,
    /// CSS bundle size above this is `large` (KB)
    pub css_large_kb: f64,
    /// Total bundle size above this is worth a moderate warning (KB)
    pub bundle_total_moderate_kb: f64,
    /// Total bundle size above this is worth a loud warning (KB)
    pub bundle_total_large_kb: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            db_healthy_below_ms: 100.0,
            db_index_hint_ms: 50.0,
            db_archive_hint_mb: 100.0,
            memory_scale_hint_percent: 80.0,
            cpu_scale_hint_percent: 80.0,
            endpoint_fast_below_ms: 200.0,
            endpoint_slow_below_ms: 1000.0,
            endpoint_cache_hint_ms: 500.0,
            js_large_kb: 200.0,
            css_large_kb: 100.0,
            bundle_total_moderate_kb: 300.0,
            bundle_total_large_kb: 400.0,
        }
    }
}

/// Error-with-reason record stored in place of a collector's stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorError {
    pub reason: String,
}

impl CollectorError {
    /// Creates an error record from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<Error> for CollectorError {
    fn from(err: Error) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

/// Outcome of one fallible collector invocation.
pub type CollectorResult<T> = Result<T, CollectorError>;

/// Database health label derived from query latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbHealth {
    Healthy,
    Slow,
}

impl DbHealth {
    /// A query at or above the healthy threshold is slow.
    pub fn classify(query_time_ms: f64, thresholds: &Thresholds) -> Self {
        if query_time_ms < thresholds.db_healthy_below_ms {
            DbHealth::Healthy
        } else {
            DbHealth::Slow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbHealth::Healthy => "healthy",
            DbHealth::Slow => "slow",
        }
    }
}

/// Three-tier assessment of the schema probe latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeAssessment {
    Good,
    Moderate,
    NeedsOptimization,
}

impl ProbeAssessment {
    pub fn classify(probe_time_ms: f64, thresholds: &Thresholds) -> Self {
        if probe_time_ms < thresholds.db_index_hint_ms {
            ProbeAssessment::Good
        } else if probe_time_ms < thresholds.db_healthy_below_ms {
            ProbeAssessment::Moderate
        } else {
            ProbeAssessment::NeedsOptimization
        }
    }
}

/// Endpoint speed label derived from round-trip latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLabel {
    Fast,
    Slow,
    VerySlow,
}

impl SpeedLabel {
    pub fn classify(response_time_ms: f64, thresholds: &Thresholds) -> Self {
        if response_time_ms < thresholds.endpoint_fast_below_ms {
            SpeedLabel::Fast
        } else if response_time_ms < thresholds.endpoint_slow_below_ms {
            SpeedLabel::Slow
        } else {
            SpeedLabel::VerySlow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedLabel::Fast => "fast",
            SpeedLabel::Slow => "slow",
            SpeedLabel::VerySlow => "very_slow",
        }
    }
}

/// Asset size class, keyed on the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Optimal,
    Large,
}

impl AssetStatus {
    /// Only `.js` and `.css` files have size budgets; everything else is optimal.
    pub fn classify(name: &str, size_kb: f64, thresholds: &Thresholds) -> Self {
        if name.ends_with(".js") && size_kb > thresholds.js_large_kb {
            AssetStatus::Large
        } else if name.ends_with(".css") && size_kb > thresholds.css_large_kb {
            AssetStatus::Large
        } else {
            AssetStatus::Optimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Optimal => "optimal",
            AssetStatus::Large => "large",
        }
    }
}

/// Three-tier verdict on the summed bundle size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleVerdict {
    Optimal,
    Moderate,
    Large,
}

impl BundleVerdict {
    pub fn classify(total_kb: f64, thresholds: &Thresholds) -> Self {
        if total_kb > thresholds.bundle_total_large_kb {
            BundleVerdict::Large
        } else if total_kb > thresholds.bundle_total_moderate_kb {
            BundleVerdict::Moderate
        } else {
            BundleVerdict::Optimal
        }
    }
}

/// Database row-count probe results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub query_time_ms: f64,
    pub row_count: i64,
    pub db_size_mb: f64,
    pub status: DbHealth,
}

/// Schema probe results for the offline check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProbe {
    pub table_count: usize,
    pub probe_time_ms: f64,
    pub db_size_mb: f64,
    pub assessment: ProbeAssessment,
}

/// One snapshot of host resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStats {
    pub memory_used_percent: f64,
    pub memory_available_mb: f64,
    pub cpu_percent: f64,
    pub disk_used_percent: f64,
    pub disk_free_gb: f64,
}

/// One measured endpoint round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStats {
    pub response_time_ms: f64,
    pub status_code: u16,
    pub content_length: u64,
    pub status: SpeedLabel,
}

/// Per-endpoint sample; failures are isolated to their endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSample {
    pub endpoint: String,
    pub outcome: CollectorResult<EndpointStats>,
}

/// One file from the assets directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub size_kb: f64,
    pub size_bytes: u64,
    pub status: AssetStatus,
}

/// Presence and size of one fixed-name static file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFileStatus {
    pub name: String,
    /// `None` when the file does not exist.
    pub size_kb: Option<f64>,
}

/// The aggregate record built once per run.
///
/// A category stays `None` when its collector never ran; the
/// recommendation engine silently skips absent categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub database: Option<CollectorResult<DatabaseStats>>,
    pub server: Option<CollectorResult<ServerStats>>,
    pub bundles: Option<Vec<AssetEntry>>,
    pub response_times: Option<Vec<EndpointSample>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_health_boundary() {
        let thresholds = Thresholds::default();
        assert_eq!(DbHealth::classify(99.9, &thresholds), DbHealth::Healthy);
        assert_eq!(DbHealth::classify(100.0, &thresholds), DbHealth::Slow);
        assert_eq!(DbHealth::classify(120.0, &thresholds), DbHealth::Slow);
    }

    #[test]
    fn test_speed_label_boundaries() {
        let thresholds = Thresholds::default();
        assert_eq!(SpeedLabel::classify(199.9, &thresholds), SpeedLabel::Fast);
        assert_eq!(SpeedLabel::classify(200.0, &thresholds), SpeedLabel::Slow);
        assert_eq!(SpeedLabel::classify(999.9, &thresholds), SpeedLabel::Slow);
        assert_eq!(
            SpeedLabel::classify(1000.0, &thresholds),
            SpeedLabel::VerySlow
        );
    }

    #[test]
    fn test_asset_status_per_extension() {
        let thresholds = Thresholds::default();
        assert_eq!(
            AssetStatus::classify("app.js", 200.0, &thresholds),
            AssetStatus::Optimal
        );
        assert_eq!(
            AssetStatus::classify("app.js", 250.0, &thresholds),
            AssetStatus::Large
        );
        assert_eq!(
            AssetStatus::classify("style.css", 150.0, &thresholds),
            AssetStatus::Large
        );
        assert_eq!(
            AssetStatus::classify("style.css", 99.0, &thresholds),
            AssetStatus::Optimal
        );
        // Unbudgeted extensions never classify as large
        assert_eq!(
            AssetStatus::classify("logo.png", 900.0, &thresholds),
            AssetStatus::Optimal
        );
    }

    #[test]
    fn test_bundle_verdict_tiers() {
        let thresholds = Thresholds::default();
        assert_eq!(
            BundleVerdict::classify(250.0, &thresholds),
            BundleVerdict::Optimal
        );
        assert_eq!(
            BundleVerdict::classify(350.0, &thresholds),
            BundleVerdict::Moderate
        );
        assert_eq!(
            BundleVerdict::classify(450.0, &thresholds),
            BundleVerdict::Large
        );
    }

    #[test]
    fn test_probe_assessment_tiers() {
        let thresholds = Thresholds::default();
        assert_eq!(
            ProbeAssessment::classify(10.0, &thresholds),
            ProbeAssessment::Good
        );
        assert_eq!(
            ProbeAssessment::classify(75.0, &thresholds),
            ProbeAssessment::Moderate
        );
        assert_eq!(
            ProbeAssessment::classify(150.0, &thresholds),
            ProbeAssessment::NeedsOptimization
        );
    }

    #[test]
    fn test_report_serializes_with_snake_case_labels() {
        let report = MetricsReport {
            database: Some(Ok(DatabaseStats {
                query_time_ms: 12.5,
                row_count: 42,
                db_size_mb: 1.2,
                status: DbHealth::Healthy,
            })),
            server: Some(Err(CollectorError::new("snapshot failed"))),
            bundles: None,
            response_times: None,
        };

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["database"]["Ok"]["status"], "healthy");
        assert_eq!(json["server"]["Err"]["reason"], "snapshot failed");
    }
}
