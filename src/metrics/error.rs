//! Error types for metric sampling

use std::fmt;

/// Result type alias for sampling operations
pub type MetricResult<T> = Result<T, MetricError>;

/// Errors that can occur while sampling the utilization metric
#[derive(Debug)]
pub enum MetricError {
    /// The backend returned zero points for the window
    NoData { metric: String, window_secs: u64 },

    /// Request to the monitoring backend failed
    Transport(String),

    /// The backend answered with something that is not a metric response
    Malformed(String),
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::NoData {
                metric,
                window_secs,
            } => {
                write!(f, "no data for metric '{metric}' in the last {window_secs}s")
            }
            MetricError::Transport(msg) => write!(f, "metric backend unreachable: {msg}"),
            MetricError::Malformed(msg) => write!(f, "malformed metric response: {msg}"),
        }
    }
}

impl std::error::Error for MetricError {}

impl From<reqwest::Error> for MetricError {
    fn from(err: reqwest::Error) -> Self {
        MetricError::Transport(err.to_string())
    }
}
