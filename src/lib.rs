pub mod actors;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod pool;
pub mod util;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reduced utilization value for one evaluation cycle.
///
/// Produced fresh by the sampler every cycle and discarded afterwards.
/// `value` is a normalized load signal in `[0.0, 1.0]`; `timestamp` is the
/// instant of the point the reduction selected (or the query time for
/// aggregate reductions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}
