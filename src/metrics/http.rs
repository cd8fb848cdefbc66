//! Generic HTTP adapter for the monitoring backend
//!
//! Speaks a small JSON protocol:
//!
//! ```text
//! GET {base}/v1/metrics/{metric}?start=<rfc3339>&end=<rfc3339>
//! → 200 [{ "timestamp": "...", "value": 0.42 }, ...]
//! ```
//!
//! Vendor-specific monitoring APIs are reached through their own adapters
//! implementing `MetricBackend`; this one covers anything that can expose
//! the plain JSON shape above.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::trace;

use super::backend::{MetricBackend, MetricPoint};
use super::error::{MetricError, MetricResult};

/// Monitoring backend reached over plain JSON/HTTP
pub struct HttpMetricBackend {
    /// HTTP client (reused across requests for efficiency)
    client: reqwest::Client,

    /// Base URL of the monitoring backend, without trailing slash
    base_url: String,

    /// Optional shared secret sent as `X-MONITORING-SECRET`
    secret: Option<String>,
}

impl HttpMetricBackend {
    /// Create a new adapter with a bounded per-request timeout.
    pub fn new(base_url: impl Into<String>, secret: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            secret,
        }
    }
}

#[async_trait]
impl MetricBackend for HttpMetricBackend {
    async fn query(
        &self,
        metric: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MetricResult<Vec<MetricPoint>> {
        let url = format!("{}/v1/metrics/{metric}", self.base_url);

        trace!("requesting {url} for [{start}, {end}]");

        let mut request = self.client.get(&url).query(&[
            ("start", start.to_rfc3339()),
            ("end", end.to_rfc3339()),
        ]);

        if let Some(secret) = &self.secret {
            request = request.header("X-MONITORING-SECRET", secret);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(MetricError::Transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response.text().await?;

        let points: Vec<MetricPoint> =
            serde_json::from_str(&body).map_err(|e| MetricError::Malformed(e.to_string()))?;

        trace!("received {} points for {metric}", points.len());

        Ok(points)
    }
}
