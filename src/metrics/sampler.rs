//! Window reduction of raw metric points into a single `Sample`

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::trace;

use crate::Sample;
use crate::config::SampleReduction;

use super::backend::{MetricBackend, MetricPoint};
use super::error::{MetricError, MetricResult};

/// Samples one named metric over a trailing window.
///
/// The sampler is the only reader of the monitoring backend. Every call
/// queries fresh data; nothing is cached between cycles.
pub struct MetricSampler {
    backend: Arc<dyn MetricBackend>,

    /// Name of the metric to query
    metric: String,

    /// Reduction applied to the points in the window
    reduction: SampleReduction,
}

impl MetricSampler {
    pub fn new(
        backend: Arc<dyn MetricBackend>,
        metric: impl Into<String>,
        reduction: SampleReduction,
    ) -> Self {
        Self {
            backend,
            metric: metric.into(),
            reduction,
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Query `[now - window, now]` and reduce the result to one sample.
    ///
    /// Fails with `MetricError::NoData` when the backend reports zero
    /// points for the window. No internal retry; the next evaluation
    /// cycle queries again.
    pub async fn sample(&self, window: Duration) -> MetricResult<Sample> {
        let end = Utc::now();
        let start = end - chrono::Duration::seconds(window.as_secs() as i64);

        let points = self.backend.query(&self.metric, start, end).await?;

        if points.is_empty() {
            return Err(MetricError::NoData {
                metric: self.metric.clone(),
                window_secs: window.as_secs(),
            });
        }

        let sample = reduce(&points, self.reduction);

        trace!(
            metric = %self.metric,
            points = points.len(),
            value = sample.value,
            "reduced sample window"
        );

        Ok(sample)
    }
}

/// Reduce a non-empty, timestamp-ordered point list to a single sample.
fn reduce(points: &[MetricPoint], reduction: SampleReduction) -> Sample {
    match reduction {
        SampleReduction::Max => {
            let point = points
                .iter()
                .max_by(|a, b| a.value.total_cmp(&b.value))
                .copied()
                .unwrap_or(points[0]);
            Sample {
                value: point.value,
                timestamp: point.timestamp,
            }
        }
        SampleReduction::Latest => {
            let point = points[points.len() - 1];
            Sample {
                value: point.value,
                timestamp: point.timestamp,
            }
        }
        SampleReduction::Mean => {
            let sum: f64 = points.iter().map(|p| p.value).sum();
            Sample {
                value: sum / points.len() as f64,
                timestamp: points[points.len() - 1].timestamp,
            }
        }
    }
}
