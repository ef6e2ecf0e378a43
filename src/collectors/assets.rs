//! Asset bundle and static file size checks.

use std::fs;
use std::path::Path;

use crate::config::AssetsConfig;
use crate::metrics::{AssetEntry, AssetStatus, StaticFileStatus, Thresholds};

pub struct AssetCollector {
    config: AssetsConfig,
    thresholds: Thresholds,
}

impl AssetCollector {
    pub fn new(config: AssetsConfig, thresholds: Thresholds) -> Self {
        Self { config, thresholds }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.config.dir
    }

    /// Sizes every regular file in the assets directory, non-recursively.
    ///
    /// A missing directory yields an empty listing, not an error. Entries
    /// are name-sorted so the report is stable across runs.
    pub fn collect(&self) -> Vec<AssetEntry> {
        let Ok(entries) = fs::read_dir(&self.config.dir) else {
            return Vec::new();
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            let size_bytes = metadata.len();
            let size_kb = size_bytes as f64 / 1024.0;
            files.push(AssetEntry {
                name: name.to_string(),
                size_kb,
                size_bytes,
                status: AssetStatus::classify(name, size_kb, &self.thresholds),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        files
    }

    /// Presence and size of the fixed-name static files.
    pub fn check_static_files(&self) -> Vec<StaticFileStatus> {
        self.config
            .static_files
            .iter()
            .map(|path| {
                let name = path.display().to_string();
                let size_kb = match fs::metadata(path) {
                    Ok(metadata) if metadata.is_file() => {
                        Some(metadata.len() as f64 / 1024.0)
                    }
                    _ => None,
                };
                StaticFileStatus { name, size_kb }
            })
            .collect()
    }
}

/// Summed size of a bundle listing, in KB.
pub fn total_size_kb(files: &[AssetEntry]) -> f64 {
    files.iter().map(|file| file.size_kb).sum()
}
