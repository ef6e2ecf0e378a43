//! Database collector: query latency, row count and on-disk size.

use std::path::Path;
use std::time::Instant;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::metrics::{
    CollectorResult, DatabaseStats, DbHealth, ProbeAssessment, SchemaProbe, Thresholds,
};

pub struct DatabaseCollector {
    config: DatabaseConfig,
    thresholds: Thresholds,
}

impl DatabaseCollector {
    pub fn new(config: DatabaseConfig, thresholds: Thresholds) -> Self {
        Self { config, thresholds }
    }

    /// Runs the row-count probe against the configured store.
    ///
    /// The elapsed time covers connect and query, matching how the web
    /// application experiences a cold request. Any failure (missing file,
    /// lock, missing table) becomes an error record; the pool is dropped
    /// either way.
    pub async fn collect(&self) -> CollectorResult<DatabaseStats> {
        match self.try_collect().await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                debug!(error = %err, "database collector failed");
                Err(err.into())
            }
        }
    }

    async fn try_collect(&self) -> Result<DatabaseStats> {
        let started = Instant::now();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&self.connection_url())
            .await?;

        let row_count: i64 = sqlx::query_scalar(&self.config.count_query)
            .fetch_one(&pool)
            .await?;
        let query_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        pool.close().await;

        Ok(DatabaseStats {
            query_time_ms,
            row_count,
            db_size_mb: file_size_mb(&self.config.path),
            status: DbHealth::classify(query_time_ms, &self.thresholds),
        })
    }

    /// Lists user tables through `sqlite_master` for the offline check.
    ///
    /// Returns `None` when the store file does not exist; that is an
    /// absence, not an error.
    pub async fn probe_schema(&self) -> Option<CollectorResult<SchemaProbe>> {
        if !self.config.path.exists() {
            return None;
        }

        Some(match self.try_probe().await {
            Ok(probe) => Ok(probe),
            Err(err) => {
                debug!(error = %err, "schema probe failed");
                Err(err.into())
            }
        })
    }

    async fn try_probe(&self) -> Result<SchemaProbe> {
        let started = Instant::now();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&self.connection_url())
            .await?;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table'")
                .fetch_all(&pool)
                .await?;
        let probe_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        pool.close().await;

        Ok(SchemaProbe {
            table_count: tables.len(),
            probe_time_ms,
            db_size_mb: file_size_mb(&self.config.path),
            assessment: ProbeAssessment::classify(probe_time_ms, &self.thresholds),
        })
    }

    fn connection_url(&self) -> String {
        format!("sqlite:{}", self.config.path.display())
    }
}

fn file_size_mb(path: &Path) -> f64 {
    let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    size_bytes as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn collector_for(path: PathBuf) -> DatabaseCollector {
        DatabaseCollector::new(
            DatabaseConfig {
                path,
                count_query: "SELECT COUNT(*) FROM users".to_string(),
            },
            Thresholds::default(),
        )
    }

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

    #[tokio::test]
    async fn test_collect_reports_row_count_and_size() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("fluentpass.db");
        seed_store(&path, 3).await;

        let stats = collector_for(path)
            .collect()
            .await
            .expect("collect should succeed");
        assert_eq!(stats.row_count, 3);
        assert!(stats.db_size_mb > 0.0);
        assert!(stats.query_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_missing_store_becomes_error_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.db");

        let outcome = collector_for(path).collect().await;
        let err = outcome.expect_err("missing store must be an error record");
        assert!(!err.reason.is_empty());
    }

    #[tokio::test]
    async fn test_missing_table_becomes_error_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.db");
        // Store exists but has no users table
        let url = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .expect("create sqlite store");
        pool.close().await;

        let outcome = collector_for(path).collect().await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_probe_schema_counts_tables() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("fluentpass.db");
        seed_store(&path, 1).await;

        let probe = collector_for(path)
            .probe_schema()
            .await
            .expect("store exists")
            .expect("probe should succeed");
        assert_eq!(probe.table_count, 1);
        assert!(probe.db_size_mb > 0.0);
    }

    #[tokio::test]
    async fn test_probe_schema_reports_absence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.db");

        assert!(collector_for(path).probe_schema().await.is_none());
    }
}
