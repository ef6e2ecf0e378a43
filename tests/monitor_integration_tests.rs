//! End-to-end checks across the collectors, the renderer and the engine.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use fluentpass_monitor::config::MonitorConfig;
use fluentpass_monitor::recommendation::{DefaultRecommendationEngine, RecommendationEngine};
use fluentpass_monitor::report::ReportRenderer;

async fn seed_store(path: &Path, rows: i64) {
    let url = format!("sqlite:{}?mode=rwc", path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("create sqlite store");
    sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL)")
        .execute(&pool)
        .await
        .expect("create table");
    for i in 0..rows {
        sqlx::query("INSERT INTO users (email) VALUES (?)")
            .bind(format!("user{i}@example.com"))
            .execute(&pool)
            .await
            .expect("insert row");
    }
    pool.close().await;
}

/// Minimal HTTP stub answering `responses` requests with 200/"ok".
async fn spawn_http_stub(responses: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        for _ in 0..responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok")
                .await;
        }
    });
    addr
}

#[tokio::test]
async fn test_full_run_collects_every_category() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("fluentpass.db");
    seed_store(&db_path, 5).await;

    let assets_dir = dir.path().join("assets");
    fs::create_dir(&assets_dir).expect("create assets dir");
    fs::write(assets_dir.join("app.js"), vec![0u8; 250 * 1024]).expect("write bundle");

    let addr = spawn_http_stub(2).await;

    let mut config = MonitorConfig::default();
    config.database.path = db_path;
    config.assets.dir = assets_dir;
    config.endpoints.base_url = format!("http://{addr}");
    config.endpoints.paths = vec!["/".to_string(), "/api/health".to_string()];
    config.endpoints.timeout_seconds = 2;

    let report = ReportRenderer::new(&config).run_full_analysis().await;

    let db = report
        .database
        .as_ref()
        .expect("database collector ran")
        .as_ref()
        .expect("database probe succeeded");
    assert_eq!(db.row_count, 5);

    assert!(report.server.as_ref().expect("server collector ran").is_ok());

    let bundles = report.bundles.as_ref().expect("asset collector ran");
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].name, "app.js");

    let samples = report.response_times.as_ref().expect("endpoint collector ran");
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|sample| sample.outcome.is_ok()));

    let advice = DefaultRecommendationEngine::new()
        .with_thresholds(config.thresholds.clone())
        .generate(&report);
    assert!(advice
        .iter()
        .any(|recommendation| recommendation.message.contains("app.js")));
}

#[tokio::test]
async fn test_everything_failing_still_completes_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");

    // Bind then drop so nothing listens on the port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);

    let mut config = MonitorConfig::default();
    config.database.path = dir.path().join("missing.db");
    config.assets.dir = dir.path().join("no-assets");
    config.endpoints.base_url = format!("http://{addr}");
    config.endpoints.paths = vec!["/".to_string(), "/api/health".to_string()];
    config.endpoints.timeout_seconds = 2;

    let report = ReportRenderer::new(&config).run_full_analysis().await;

    assert!(report.database.expect("database collector ran").is_err());
    assert!(report.bundles.expect("asset collector ran").is_empty());

    let samples = report.response_times.expect("endpoint collector ran");
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|sample| sample.outcome.is_err()));
}
