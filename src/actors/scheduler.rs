//! SchedulerActor - drives the evaluation loop on a fixed period
//!
//! ## Key Properties
//!
//! 1. **First tick at t=0** - the loop evaluates immediately on startup,
//!    not after one full period
//! 2. **Ticks never overlap** - evaluations run inside the single actor
//!    task; a slow cycle delays the next tick instead of overlapping it
//! 3. **Cycle failures stay in the cycle** - errors are logged and the
//!    timer continues; only a Shutdown command (or a closed channel)
//!    stops the loop
//! 4. **Command-based control** - can be controlled externally
//!    (evaluate now, update period, shutdown)
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → evaluate() → publish ScaleEvent → [subscribers]
//!     ↑
//!     └─── Commands (EvaluateNow, UpdatePeriod, Shutdown)
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::{debug, error, instrument, trace, warn};

use crate::controller::{AutoscaleController, Decision, EvaluateError};

use super::messages::{ScaleEvent, SchedulerCommand};

/// Actor that evaluates one pool's scaling policy on a fixed period
pub struct SchedulerActor {
    /// Controller executing the evaluation cycles
    controller: AutoscaleController,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<SchedulerCommand>,

    /// Broadcast sender for publishing completed evaluations
    event_tx: broadcast::Sender<ScaleEvent>,

    /// Pool identity for logging and events
    pool_id: String,

    /// Current evaluation period
    period: Duration,
}

impl SchedulerActor {
    pub fn new(
        controller: AutoscaleController,
        pool_id: impl Into<String>,
        command_rx: mpsc::Receiver<SchedulerCommand>,
        event_tx: broadcast::Sender<ScaleEvent>,
    ) -> Self {
        let period = controller.policy().evaluation_period();

        Self {
            controller,
            command_rx,
            event_tx,
            pool_id: pool_id.into(),
            period,
        }
    }

    /// Run the actor's main loop
    ///
    /// This is the entry point for the actor. It runs until:
    /// - A Shutdown command is received
    /// - The command channel is closed
    #[instrument(skip(self), fields(pool = %self.pool_id))]
    pub async fn run(mut self) {
        debug!("starting scheduler actor");

        // First tick fires immediately; a delayed cycle postpones later
        // ticks rather than bunching them up.
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Timer tick - run one evaluation cycle
                _ = ticker.tick() => {
                    if let Err(e) = self.evaluate_and_publish().await {
                        error!("evaluation cycle failed: {e}");
                    }
                }

                // Handle commands
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        SchedulerCommand::EvaluateNow { respond_to } => {
                            debug!("received EvaluateNow command");
                            let result = self.evaluate_and_publish().await;
                            let _ = respond_to.send(result);
                        }

                        SchedulerCommand::UpdatePeriod { period_secs } => {
                            debug!("updating period to {period_secs}s");
                            self.period = Duration::from_secs(period_secs);
                            ticker = interval_at(Instant::now() + self.period, self.period);
                            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                        }

                        SchedulerCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                // Command channel closed - exit
                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("scheduler actor stopped");
    }

    /// Run one evaluation cycle and publish the outcome.
    ///
    /// Errors are returned for the caller to log or forward; they never
    /// terminate the actor.
    async fn evaluate_and_publish(&mut self) -> Result<Decision, EvaluateError> {
        let evaluation = self.controller.evaluate().await?;

        let event = ScaleEvent {
            pool_id: self.pool_id.clone(),
            size: evaluation.size,
            sample: evaluation.sample,
            decision: evaluation.decision,
            resized: evaluation.resized,
            timestamp: Utc::now(),
        };

        // Publishing failures are ignored. It's OK if there are no
        // subscribers, and slow subscribers may lag and drop events.
        match self.event_tx.send(event) {
            Ok(num_receivers) => {
                trace!("published scale event to {num_receivers} receivers");
            }
            Err(_) => {
                trace!("no receivers for scale event (this is OK)");
            }
        }

        Ok(evaluation.decision)
    }
}

/// Handle for controlling a SchedulerActor
///
/// This handle provides a typed API for sending commands to the actor.
/// It can be cloned and shared across threads.
#[derive(Clone)]
pub struct SchedulerHandle {
    /// Command sender
    sender: mpsc::Sender<SchedulerCommand>,

    /// Pool identity
    pub pool_id: String,
}

impl SchedulerHandle {
    /// Spawn a new scheduler actor
    ///
    /// This creates the actor, spawns it as a tokio task, and returns a
    /// handle.
    pub fn spawn(
        controller: AutoscaleController,
        pool_id: impl Into<String>,
        event_tx: broadcast::Sender<ScaleEvent>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let pool_id = pool_id.into();

        let actor = SchedulerActor::new(controller, pool_id.clone(), cmd_rx, event_tx);

        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            pool_id,
        }
    }

    /// Trigger an immediate evaluation
    ///
    /// This bypasses the interval timer and evaluates immediately.
    /// Useful for testing and manual refresh operations.
    pub async fn evaluate_now(&self) -> Result<Decision> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SchedulerCommand::EvaluateNow { respond_to: tx })
            .await
            .context("failed to send EvaluateNow command")?;

        let decision = rx.await.context("failed to receive response")??;
        Ok(decision)
    }

    /// Update the evaluation period
    pub async fn update_period(&self, period_secs: u64) -> Result<()> {
        self.sender
            .send(SchedulerCommand::UpdatePeriod { period_secs })
            .await
            .context("failed to send UpdatePeriod command")?;
        Ok(())
    }

    /// Gracefully shut down the scheduler
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(SchedulerCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }

    /// Resolves once the actor has stopped and dropped its command
    /// channel. Combine with a timeout to bound the shutdown grace
    /// period.
    pub async fn closed(&self) {
        self.sender.closed().await;
    }
}
