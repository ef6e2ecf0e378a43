//! Layered configuration for both diagnostic tools.
//!
//! Defaults reproduce the historical constants, a TOML file can override
//! them, and environment variables win over everything.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::Thresholds;

const DEFAULT_DB_PATH: &str = "./fluentpass.db";
const DEFAULT_COUNT_QUERY: &str = "SELECT COUNT(*) FROM users";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Candidate configuration files, tried in order; the first hit wins.
const CONFIG_FILE_CANDIDATES: [&str; 3] = [
    "fluentpass-monitor.toml",
    "monitor.toml",
    "config/monitor.toml",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    pub database: DatabaseConfig,
    pub endpoints: EndpointsConfig,
    pub assets: AssetsConfig,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite store produced by the web application
    pub path: PathBuf,
    /// Row-count query used to measure latency
    pub count_query: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    pub base_url: String,
    /// Paths appended to `base_url`, probed in order
    pub paths: Vec<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    /// Frontend bundle directory, scanned non-recursively
    pub dir: PathBuf,
    /// Fixed-name files checked for presence and size
    pub static_files: Vec<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DB_PATH),
                count_query: DEFAULT_COUNT_QUERY.to_string(),
            },
            endpoints: EndpointsConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                paths: vec![
                    "/".to_string(),
                    "/api/health".to_string(),
                    "/assets/index-ChLEs4-J.js".to_string(),
                    "/assets/index-IlUsjxHz.css".to_string(),
                ],
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            assets: AssetsConfig {
                dir: PathBuf::from(DEFAULT_ASSETS_DIR),
                static_files: vec![
                    PathBuf::from("index.html"),
                    PathBuf::from("sw.js"),
                    PathBuf::from("favicon.ico"),
                ],
            },
            thresholds: Thresholds::default(),
        }
    }
}

impl MonitorConfig {
    /// Loads defaults, then the first candidate file found, then the
    /// environment.
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder()
            .add_source(config::Config::try_from(&MonitorConfig::default())?);

        for path in CONFIG_FILE_CANDIDATES {
            if Path::new(path).exists() {
                settings = settings.add_source(config::File::with_name(path));
                break;
            }
        }

        Self::finish(settings)
    }

    /// Loads defaults, then the given file, then the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&MonitorConfig::default())?)
            .add_source(config::File::from(path.to_path_buf()));

        Self::finish(settings)
    }

    fn finish(
        builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        // FLUENTPASS__ENDPOINTS__BASE_URL=... overrides [endpoints] base_url
        let builder = builder.add_source(
            config::Environment::with_prefix("FLUENTPASS")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Writes an annotated sample configuration to `path`.
    pub fn write_sample_config(path: &Path) -> Result<()> {
        let toml_content = toml::to_string_pretty(&MonitorConfig::default())?;
        let sample = format!(
            "# FluentPass performance monitor configuration\n\
             #\n\
             # Save this file as fluentpass-monitor.toml in the deployment root.\n\
             # Every value can also be overridden through the environment with\n\
             # the FLUENTPASS prefix, for example:\n\
             #   FLUENTPASS__ENDPOINTS__BASE_URL=http://localhost:8080\n\n\
             {toml_content}"
        );
        std::fs::write(path, sample)?;
        Ok(())
    }
}
