//! AutoscaleController - one decision cycle of the scaling loop
//!
//! ## Decision Rules
//!
//! Evaluated top to bottom, first match wins:
//!
//! ```text
//! value < scale_down_threshold and size > min_size:
//!     target = max(size - step, min_size)      → ScaleDown
//! value > scale_up_threshold  and size <= max_size:
//!     target = min(size + step, max_size)      → ScaleUp
//! otherwise:                                     NoOp
//! ```
//!
//! The `<=` on the upper bound is deliberate: scale-up is still evaluated
//! at `max_size` and the `min` clamp turns it into a no-op. A pool pushed
//! above `max_size` out-of-band never matches the branch, so an oversized
//! pool is never grown further.
//!
//! Each cycle reads the pool size fresh; other actors may resize the
//! pool between ticks, so the last-known size is never authoritative.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::Sample;
use crate::config::ScalingPolicy;
use crate::metrics::{MetricError, MetricSampler};
use crate::pool::{PoolError, ResourcePool};

/// Outcome of the decision rules for a single cycle.
///
/// Carries the computed target size; the target may equal the current
/// size (clamped no-op), in which case no resize request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Grow the pool to the contained target
    ScaleUp(u32),
    /// Shrink the pool to the contained target
    ScaleDown(u32),
    /// Utilization is inside the hysteresis band
    NoOp,
}

impl Decision {
    /// Apply the decision rules to one (value, size) observation.
    pub fn decide(policy: &ScalingPolicy, value: f64, size: u32) -> Decision {
        if value < policy.scale_down_threshold && size > policy.min_size {
            return Decision::ScaleDown(size.saturating_sub(policy.step).max(policy.min_size));
        }

        if value > policy.scale_up_threshold && size <= policy.max_size {
            return Decision::ScaleUp((size + policy.step).min(policy.max_size));
        }

        Decision::NoOp
    }

    /// The target size this decision asks for, if any.
    pub fn target(&self) -> Option<u32> {
        match self {
            Decision::ScaleUp(target) | Decision::ScaleDown(target) => Some(*target),
            Decision::NoOp => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::ScaleUp(target) => write!(f, "scale-up to {target}"),
            Decision::ScaleDown(target) => write!(f, "scale-down to {target}"),
            Decision::NoOp => write!(f, "no-op"),
        }
    }
}

/// Everything one completed cycle observed and decided.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Pool size read at the start of the cycle
    pub size: u32,

    /// Reduced utilization sample for the cycle
    pub sample: Sample,

    /// Decision derived from sample and size
    pub decision: Decision,

    /// Whether a resize request was actually issued
    pub resized: bool,
}

/// Errors that end an evaluation cycle early
///
/// All three are cycle-local: the scheduler logs them and continues at
/// the next tick. None of them may terminate the loop.
#[derive(Debug)]
pub enum EvaluateError {
    /// The sampler could not produce a value
    MetricUnavailable(MetricError),

    /// The pool could not report its current size
    PoolUnavailable(PoolError),

    /// The pool refused the resize request
    ResizeRejected { target: u32, source: PoolError },
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluateError::MetricUnavailable(err) => write!(f, "metric unavailable: {err}"),
            EvaluateError::PoolUnavailable(err) => write!(f, "pool unavailable: {err}"),
            EvaluateError::ResizeRejected { target, source } => {
                write!(f, "resize to {target} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for EvaluateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvaluateError::MetricUnavailable(err) => Some(err),
            EvaluateError::PoolUnavailable(err) => Some(err),
            EvaluateError::ResizeRejected { source, .. } => Some(source),
        }
    }
}

/// Owns the scaling policy and executes evaluation cycles.
pub struct AutoscaleController {
    policy: ScalingPolicy,
    sampler: MetricSampler,
    pool: Arc<dyn ResourcePool>,

    /// Instant of the last successful resize (dwell gate)
    last_resize: Option<Instant>,
}

impl AutoscaleController {
    pub fn new(policy: ScalingPolicy, sampler: MetricSampler, pool: Arc<dyn ResourcePool>) -> Self {
        Self {
            policy,
            sampler,
            pool,
            last_resize: None,
        }
    }

    pub fn policy(&self) -> &ScalingPolicy {
        &self.policy
    }

    /// Execute one evaluation cycle.
    ///
    /// Reads the pool size fresh, samples the metric, applies the
    /// decision rules and issues at most one resize request. A target
    /// equal to the current size is an idempotent no-op and produces no
    /// request at all.
    #[instrument(skip(self), fields(metric = %self.sampler.metric()))]
    pub async fn evaluate(&mut self) -> Result<Evaluation, EvaluateError> {
        let size = self
            .pool
            .current_size()
            .await
            .map_err(EvaluateError::PoolUnavailable)?;

        let sample = self
            .sampler
            .sample(self.policy.sample_window())
            .await
            .map_err(EvaluateError::MetricUnavailable)?;

        let decision = Decision::decide(&self.policy, sample.value, size);

        trace!(size, value = sample.value, %decision, "evaluated cycle");

        let Some(target) = decision.target() else {
            return Ok(Evaluation {
                size,
                sample,
                decision,
                resized: false,
            });
        };

        if target == size {
            // Clamped no-op, e.g. scale-up evaluated at max_size
            debug!(size, %decision, "target equals current size, nothing to request");
            return Ok(Evaluation {
                size,
                sample,
                decision,
                resized: false,
            });
        }

        if let Some(dwell) = self.policy.dwell()
            && let Some(last) = self.last_resize
            && last.elapsed() < dwell
        {
            debug!(
                size,
                target,
                remaining_secs = dwell.saturating_sub(last.elapsed()).as_secs(),
                "within dwell period, deferring resize"
            );
            return Ok(Evaluation {
                size,
                sample,
                decision: Decision::NoOp,
                resized: false,
            });
        }

        self.pool
            .resize(target)
            .await
            .map_err(|source| EvaluateError::ResizeRejected { target, source })?;

        self.last_resize = Some(Instant::now());

        debug!(from = size, to = target, value = sample.value, "resized pool");

        Ok(Evaluation {
            size,
            sample,
            decision,
            resized: true,
        })
    }
}
