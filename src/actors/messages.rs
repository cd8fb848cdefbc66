//! Message types for the scheduler actor
//!
//! ## Design Principles
//!
//! 1. **Commands**: request/response messages sent via mpsc
//! 2. **Events**: broadcast notifications published to multiple subscribers
//! 3. **Immutability**: events are cloneable for multi-subscriber patterns

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::Sample;
use crate::controller::{Decision, EvaluateError};

/// Event published after every completed evaluation cycle
///
/// The broadcast channel may lag or drop events for slow subscribers.
/// This is acceptable, since every cycle re-reads the authoritative pool
/// state.
#[derive(Debug, Clone)]
pub struct ScaleEvent {
    /// Pool identity, e.g. "my-project/my-instance"
    pub pool_id: String,

    /// Pool size observed at the start of the cycle
    pub size: u32,

    /// Utilization sample the decision was derived from
    pub sample: Sample,

    /// Decision for the cycle
    pub decision: Decision,

    /// Whether a resize request was issued
    pub resized: bool,

    /// When the cycle completed
    pub timestamp: DateTime<Utc>,
}

/// Commands that can be sent to the SchedulerActor
#[derive(Debug)]
pub enum SchedulerCommand {
    /// Trigger an immediate evaluation (bypassing the interval timer)
    ///
    /// Used for testing and manual refresh operations.
    EvaluateNow {
        /// Channel to send the decision back
        respond_to: oneshot::Sender<Result<Decision, EvaluateError>>,
    },

    /// Update the evaluation period
    ///
    /// The new period takes effect immediately; the next tick fires one
    /// full period from now.
    UpdatePeriod {
        /// New period in seconds
        period_secs: u64,
    },

    /// Gracefully shut down the scheduler
    ///
    /// The actor finishes any in-flight evaluation and then exits.
    Shutdown,
}
