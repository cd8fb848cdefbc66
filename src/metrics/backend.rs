//! Metric backend trait definition

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::MetricResult;

/// A single data point reported by the monitoring backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Instant the point was recorded
    pub timestamp: DateTime<Utc>,

    /// Normalized utilization value in [0.0, 1.0]
    pub value: f64,
}

/// Trait for monitoring backends
///
/// Implementations must be `Send + Sync` as they are shared across async
/// tasks. Errors are reported as `MetricError`; implementations must not
/// retry internally; retry policy belongs to the caller.
#[async_trait]
pub trait MetricBackend: Send + Sync {
    /// Fetch all points of `metric` within `[start, end]`.
    ///
    /// Returned points are ordered by timestamp, oldest first. An empty
    /// vector is a valid response (the sampler turns it into
    /// `MetricError::NoData`).
    async fn query(
        &self,
        metric: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MetricResult<Vec<MetricPoint>>;
}
