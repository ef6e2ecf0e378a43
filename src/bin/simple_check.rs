//! Offline performance check: no network calls, no running server needed.
//!
//! Covers bundle sizes with a total-size verdict, a database schema probe,
//! static file presence, and a recommendation list.

use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fluentpass_monitor::collectors::{total_size_kb, AssetCollector, DatabaseCollector};
use fluentpass_monitor::config::MonitorConfig;
use fluentpass_monitor::metrics::{AssetEntry, BundleVerdict, MetricsReport, ProbeAssessment, Thresholds};
use fluentpass_monitor::recommendation::{DefaultRecommendationEngine, RecommendationEngine};

#[derive(Debug, Parser)]
#[command(
    name = "simple-check",
    version,
    about = "Offline FluentPass performance check"
)]
struct Cli {
    /// Configuration file (default: first fluentpass-monitor.toml found)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite store to probe
    #[arg(long, env = "FLUENTPASS_DATABASE")]
    database: Option<PathBuf>,

    /// Frontend assets directory
    #[arg(long, env = "FLUENTPASS_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load_from(path)?,
        None => MonitorConfig::load()?,
    };
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(assets_dir) = cli.assets_dir {
        config.assets.dir = assets_dir;
    }

    let assets = AssetCollector::new(config.assets.clone(), config.thresholds.clone());
    let database = DatabaseCollector::new(config.database.clone(), config.thresholds.clone());
    let engine = DefaultRecommendationEngine::new().with_thresholds(config.thresholds.clone());

    println!("🚀 FluentPass Performance Analysis");
    println!("{}", "=".repeat(50));
    println!("Timestamp: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!();

    let bundles = check_bundles(&assets, &config.thresholds);
    check_database(&database).await;
    check_static_files(&assets);
    print_recommendations(&assets, &engine, bundles);

    Ok(())
}

fn check_bundles(collector: &AssetCollector, thresholds: &Thresholds) -> Vec<AssetEntry> {
    println!("📦 Bundle Size Analysis:");

    if !collector.assets_dir().exists() {
        println!("  Assets directory not found");
        println!();
        return Vec::new();
    }

    let files = collector.collect();
    for file in &files {
        println!(
            "  {}: {:.2}KB ({})",
            file.name,
            file.size_kb,
            file.status.as_str()
        );
    }

    let total = total_size_kb(&files);
    println!("  Total bundle size: {total:.2}KB");
    match BundleVerdict::classify(total, thresholds) {
        BundleVerdict::Large => println!("  🚨 Bundle size is large - consider optimization"),
        BundleVerdict::Moderate => {
            println!("  ⚠️  Bundle size is moderate - optimization recommended")
        }
        BundleVerdict::Optimal => println!("  ✅ Bundle size is optimal"),
    }
    println!();

    files
}

async fn check_database(collector: &DatabaseCollector) {
    println!("📊 Database Analysis:");
    match collector.probe_schema().await {
        None => println!("  Database file not found"),
        Some(Err(err)) => println!("  ❌ Database error: {}", err.reason),
        Some(Ok(probe)) => {
            println!("  Database size: {:.2}MB", probe.db_size_mb);
            println!("  Tables found: {}", probe.table_count);
            println!("  Query time: {:.2}ms", probe.probe_time_ms);
            match probe.assessment {
                ProbeAssessment::Good => println!("  ✅ Database performance is good"),
                ProbeAssessment::Moderate => println!("  ⚠️  Database performance is moderate"),
                ProbeAssessment::NeedsOptimization => {
                    println!("  🚨 Database performance needs optimization")
                }
            }
        }
    }
    println!();
}

fn check_static_files(collector: &AssetCollector) {
    println!("🗂️  Static File Analysis:");
    for file in collector.check_static_files() {
        match file.size_kb {
            Some(size_kb) => println!("  {}: {size_kb:.2}KB ✅", file.name),
            None => println!("  {}: Not found ❌", file.name),
        }
    }
    println!();
}

fn print_recommendations(
    collector: &AssetCollector,
    engine: &DefaultRecommendationEngine,
    bundles: Vec<AssetEntry>,
) {
    println!("💡 Optimization Recommendations:");

    let report = MetricsReport {
        bundles: Some(bundles),
        ..MetricsReport::default()
    };
    let mut advice: Vec<String> = engine
        .generate(&report)
        .into_iter()
        .map(|recommendation| recommendation.message)
        .collect();

    let service_worker_present = collector
        .check_static_files()
        .iter()
        .any(|file| file.name.ends_with("sw.js") && file.size_kb.is_some());
    if service_worker_present {
        advice.push("✅ Service Worker implemented for caching".to_string());
    } else {
        advice.push("❌ Consider implementing Service Worker for caching".to_string());
    }

    advice.extend([
        "Consider implementing CDN for static assets".to_string(),
        "Monitor Core Web Vitals with Lighthouse".to_string(),
        "Set up automated performance testing".to_string(),
    ]);

    for (i, entry) in advice.iter().enumerate() {
        println!("  {}. {entry}", i + 1);
    }
}
