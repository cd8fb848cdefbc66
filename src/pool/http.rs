//! Generic HTTP adapter for the pool controller
//!
//! Speaks a small JSON protocol:
//!
//! ```text
//! GET {base}/v1/pools/{id}        → 200 { "size": 5 }
//! PUT {base}/v1/pools/{id}/size   ← { "size": 4 }
//! ```
//!
//! The pool id is `{project}/{instance}` as passed on the command line.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::backend::ResourcePool;
use super::error::{PoolError, PoolResult};

#[derive(Debug, Serialize, Deserialize)]
struct PoolSize {
    size: u32,
}

/// Pool controller reached over plain JSON/HTTP
pub struct HttpResourcePool {
    /// HTTP client (reused across requests for efficiency)
    client: reqwest::Client,

    /// Base URL of the pool controller, without trailing slash
    base_url: String,

    /// Pool identity, e.g. "my-project/my-instance"
    pool_id: String,
}

impl HttpResourcePool {
    /// Create a new adapter with a bounded per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        pool_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            pool_id: pool_id.into(),
        }
    }

    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }
}

#[async_trait]
impl ResourcePool for HttpResourcePool {
    async fn current_size(&self) -> PoolResult<u32> {
        let url = format!("{}/v1/pools/{}", self.base_url, self.pool_id);

        trace!("requesting pool state from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PoolError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PoolError::Unavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let state: PoolSize = response
            .json()
            .await
            .map_err(|e| PoolError::Unavailable(e.to_string()))?;

        Ok(state.size)
    }

    async fn resize(&self, target: u32) -> PoolResult<()> {
        let url = format!("{}/v1/pools/{}/size", self.base_url, self.pool_id);

        trace!("requesting resize to {target} via {url}");

        let response = self
            .client
            .put(&url)
            .json(&PoolSize { size: target })
            .send()
            .await
            .map_err(|e| PoolError::Rejected(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PoolError::Rejected(format!("HTTP error: {status} {body}")));
        }

        Ok(())
    }
}
