//! Endpoint latency collector.
//!
//! The only collector with a network dependency. Endpoints are probed
//! sequentially against the configured base URL; a failing endpoint is
//! recorded as an error entry and never aborts the rest of the batch.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::debug;

use crate::config::EndpointsConfig;
use crate::error::Result;
use crate::metrics::{EndpointSample, EndpointStats, SpeedLabel, Thresholds};

pub struct EndpointCollector {
    client: Client,
    config: EndpointsConfig,
    thresholds: Thresholds,
}

impl EndpointCollector {
    pub fn new(config: EndpointsConfig, thresholds: Thresholds) -> Self {
        let client = Client::builder()
            .user_agent(format!(
                "fluentpass-monitor/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            client,
            config,
            thresholds,
        }
    }

    /// Issues one GET per configured endpoint, in order.
    pub async fn collect(&self) -> Vec<EndpointSample> {
        let mut samples = Vec::with_capacity(self.config.paths.len());
        for endpoint in &self.config.paths {
            let outcome = match self.measure(endpoint).await {
                Ok(stats) => Ok(stats),
                Err(err) => {
                    debug!(endpoint = %endpoint, error = %err, "endpoint probe failed");
                    Err(err.into())
                }
            };
            samples.push(EndpointSample {
                endpoint: endpoint.clone(),
                outcome,
            });
        }
        samples
    }

    /// Round-trip time includes reading the full body, the way a browser
    /// experiences the endpoint. Non-2xx responses are samples, not errors.
    async fn measure(&self, endpoint: &str) -> Result<EndpointStats> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let started = Instant::now();
        let response = self.client.get(&url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?;
        let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        Ok(EndpointStats {
            response_time_ms,
            status_code,
            content_length: body.len() as u64,
            status: SpeedLabel::classify(response_time_ms, &self.thresholds),
        })
    }
}
