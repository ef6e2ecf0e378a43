//! Host resource collector: one snapshot of memory, CPU and root disk usage.

use std::path::Path;
use std::time::Duration;

use sysinfo::{Disks, System};

use crate::metrics::{CollectorError, CollectorResult, ServerStats};

/// CPU usage needs two refreshes separated by a sampling window.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub struct ServerCollector;

impl Default for ServerCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerCollector {
    pub fn new() -> Self {
        ServerCollector
    }

    /// Takes a single snapshot; blocks for the CPU sampling window.
    pub async fn collect(&self) -> CollectorResult<ServerStats> {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu();
        tokio::time::sleep(CPU_SAMPLE_WINDOW).await;
        system.refresh_cpu();

        let total_memory = system.total_memory();
        let used_memory = system.used_memory();
        let memory_used_percent = (used_memory as f64 / total_memory as f64) * 100.0;
        let memory_available_mb = system.available_memory() as f64 / (1024.0 * 1024.0);
        let cpu_percent = f64::from(system.global_cpu_info().cpu_usage());

        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .or_else(|| disks.iter().find(|disk| disk.total_space() > 0));
        let Some(root) = root else {
            return Err(CollectorError::new(
                "no mounted filesystem visible in the host snapshot",
            ));
        };

        let total_space = root.total_space();
        let available_space = root.available_space();
        let used_space = total_space - available_space;

        Ok(ServerStats {
            memory_used_percent,
            memory_available_mb,
            cpu_percent,
            disk_used_percent: (used_space as f64 / total_space as f64) * 100.0,
            disk_free_gb: available_space as f64 / (1024.0 * 1024.0 * 1024.0),
        })
    }
}
