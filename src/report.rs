//! Console report renderer.
//!
//! Invokes the collectors in a fixed sequence, prints each category as it
//! is produced, then feeds the accumulated record to the recommendation
//! engine. Single pass, no retries; the process always reaches the
//! summary even when every collector failed.

use chrono::Local;

use crate::collectors::{AssetCollector, DatabaseCollector, EndpointCollector, ServerCollector};
use crate::config::MonitorConfig;
use crate::metrics::MetricsReport;
use crate::recommendation::{DefaultRecommendationEngine, Recommendation, RecommendationEngine};

pub struct ReportRenderer {
    database: DatabaseCollector,
    server: ServerCollector,
    assets: AssetCollector,
    endpoints: EndpointCollector,
    engine: DefaultRecommendationEngine,
}

impl ReportRenderer {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            database: DatabaseCollector::new(config.database.clone(), config.thresholds.clone()),
            server: ServerCollector::new(),
            assets: AssetCollector::new(config.assets.clone(), config.thresholds.clone()),
            endpoints: EndpointCollector::new(config.endpoints.clone(), config.thresholds.clone()),
            engine: DefaultRecommendationEngine::new().with_thresholds(config.thresholds.clone()),
        }
    }

    /// Runs the full analysis, printing as it goes; returns the record.
    pub async fn run_full_analysis(&self) -> MetricsReport {
        println!("🚀 FluentPass Performance Analysis");
        println!("{}", "=".repeat(50));
        println!("Timestamp: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();

        let mut report = MetricsReport::default();

        println!("📊 Database Performance:");
        let database = self.database.collect().await;
        match &database {
            Ok(stats) => {
                println!("  query_time_ms: {:.2}", stats.query_time_ms);
                println!("  row_count: {}", stats.row_count);
                println!("  db_size_mb: {:.2}", stats.db_size_mb);
                println!("  status: {}", stats.status.as_str());
            }
            Err(err) => {
                println!("  error: {}", err.reason);
                println!("  status: error");
            }
        }
        report.database = Some(database);
        println!();

        println!("🖥️  Server Performance:");
        let server = self.server.collect().await;
        match &server {
            Ok(stats) => {
                println!("  memory_used_percent: {:.1}", stats.memory_used_percent);
                println!("  memory_available_mb: {:.2}", stats.memory_available_mb);
                println!("  cpu_percent: {:.1}", stats.cpu_percent);
                println!("  disk_used_percent: {:.1}", stats.disk_used_percent);
                println!("  disk_free_gb: {:.2}", stats.disk_free_gb);
            }
            Err(err) => println!("  error: {}", err.reason),
        }
        report.server = Some(server);
        println!();

        println!("📦 Bundle Analysis:");
        let bundles = self.assets.collect();
        for file in &bundles {
            println!(
                "  {}: {:.2}KB ({})",
                file.name,
                file.size_kb,
                file.status.as_str()
            );
        }
        report.bundles = Some(bundles);
        println!();

        println!("⚡ Response Times:");
        let samples = self.endpoints.collect().await;
        for sample in &samples {
            match &sample.outcome {
                Ok(stats) => println!(
                    "  {}: {:.2}ms ({})",
                    sample.endpoint,
                    stats.response_time_ms,
                    stats.status.as_str()
                ),
                Err(err) => println!("  {}: Error - {}", sample.endpoint, err.reason),
            }
        }
        if !samples.is_empty() && samples.iter().all(|s| s.outcome.is_err()) {
            println!("  Server not running - response times are error entries only");
        }
        report.response_times = Some(samples);
        println!();

        println!("💡 Optimization Recommendations:");
        let recommendations = self.engine.generate(&report);
        print_recommendations(&recommendations);

        report
    }
}

/// Prints a numbered advice list, or the all-clear line.
pub fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("  ✅ No major performance issues detected!");
        return;
    }
    for (i, recommendation) in recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, recommendation.message);
    }
}
