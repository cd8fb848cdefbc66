//! Metric sampling for the autoscaling loop
//!
//! This module wraps the external monitoring backend behind a trait and
//! reduces the raw data points of one sample window to a single
//! utilization value.
//!
//! ## Design
//!
//! - **Trait-based**: `MetricBackend` allows swapping the monitoring
//!   system (HTTP adapter in production, in-memory fakes in tests)
//! - **Async**: all queries are async for compatibility with Tokio
//! - **Deterministic**: the window reduction is named in the scaling
//!   policy, never an arbitrary point from the response
//!
//! ## Error Handling
//!
//! Sampling never retries internally. A transport failure or an empty
//! window surfaces as `MetricError` and the periodic schedule itself is
//! the retry mechanism.

pub mod backend;
pub mod error;
pub mod http;
pub mod sampler;

pub use backend::{MetricBackend, MetricPoint};
pub use error::{MetricError, MetricResult};
pub use http::HttpMetricBackend;
pub use sampler::MetricSampler;
