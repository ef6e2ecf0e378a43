//! Rule-based optimization recommendations.
//!
//! A pure pass over the collected metrics: every matching rule fires, in a
//! fixed order (database, server, endpoints, bundles), and absent
//! categories silently skip their rules. No rule depends on another.

use serde::{Deserialize, Serialize};

use crate::metrics::{AssetStatus, MetricsReport, Thresholds};

/// Advice categories, in rule-evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceCategory {
    Database,
    Server,
    Endpoint,
    Bundle,
}

/// One advisory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: AdviceCategory,
    pub message: String,
}

impl Recommendation {
    fn new(category: AdviceCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Recommendation engine trait
pub trait RecommendationEngine: Send + Sync {
    /// Generates advice from one collected report.
    fn generate(&self, report: &MetricsReport) -> Vec<Recommendation>;
}

/// Threshold-rule engine with the historical defaults.
#[derive(Debug, Clone, Default)]
pub struct DefaultRecommendationEngine {
    thresholds: Thresholds,
}

impl DefaultRecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default thresholds, usually with the configured ones.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn database_rules(&self, report: &MetricsReport, out: &mut Vec<Recommendation>) {
        let Some(Ok(db)) = report.database.as_ref() else {
            return;
        };
        if db.query_time_ms > self.thresholds.db_index_hint_ms {
            out.push(Recommendation::new(
                AdviceCategory::Database,
                "Consider adding database indexes for slow queries",
            ));
        }
        if db.db_size_mb > self.thresholds.db_archive_hint_mb {
            out.push(Recommendation::new(
                AdviceCategory::Database,
                "Database size is large, consider archiving old data",
            ));
        }
    }

    fn server_rules(&self, report: &MetricsReport, out: &mut Vec<Recommendation>) {
        let Some(Ok(server)) = report.server.as_ref() else {
            return;
        };
        if server.memory_used_percent > self.thresholds.memory_scale_hint_percent {
            out.push(Recommendation::new(
                AdviceCategory::Server,
                "High memory usage detected, consider scaling up",
            ));
        }
        if server.cpu_percent > self.thresholds.cpu_scale_hint_percent {
            out.push(Recommendation::new(
                AdviceCategory::Server,
                "High CPU usage detected, consider optimizing code or scaling",
            ));
        }
    }

    fn endpoint_rules(&self, report: &MetricsReport, out: &mut Vec<Recommendation>) {
        let Some(samples) = report.response_times.as_ref() else {
            return;
        };
        for sample in samples {
            let Ok(stats) = &sample.outcome else {
                continue;
            };
            if stats.response_time_ms > self.thresholds.endpoint_cache_hint_ms {
                out.push(Recommendation::new(
                    AdviceCategory::Endpoint,
                    format!(
                        "Slow response time for {}, consider caching",
                        sample.endpoint
                    ),
                ));
            }
        }
    }

    fn bundle_rules(&self, report: &MetricsReport, out: &mut Vec<Recommendation>) {
        let Some(files) = report.bundles.as_ref() else {
            return;
        };
        for file in files {
            if file.status != AssetStatus::Large {
                continue;
            }
            if file.name.ends_with(".js") {
                out.push(Recommendation::new(
                    AdviceCategory::Bundle,
                    format!(
                        "JavaScript bundle {} is large, consider code splitting",
                        file.name
                    ),
                ));
            } else if file.name.ends_with(".css") {
                out.push(Recommendation::new(
                    AdviceCategory::Bundle,
                    format!(
                        "CSS bundle {} is large, consider purging unused styles",
                        file.name
                    ),
                ));
            }
        }
    }
}

impl RecommendationEngine for DefaultRecommendationEngine {
    fn generate(&self, report: &MetricsReport) -> Vec<Recommendation> {
        let mut out = Vec::new();
        self.database_rules(report, &mut out);
        self.server_rules(report, &mut out);
        self.endpoint_rules(report, &mut out);
        self.bundle_rules(report, &mut out);
        out
    }
}
