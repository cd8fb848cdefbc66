//! Actor-based scaling loop
//!
//! The scheduler runs as an independent async task communicating via
//! Tokio channels.
//!
//! ## Architecture Overview
//!
//! ```text
//!                  ┌─────────────────┐
//!                  │ scalerd (main)  │
//!                  └────────┬────────┘
//!                           │ spawns
//!                  ┌────────▼────────┐
//!                  │ SchedulerActor  │──── Commands (EvaluateNow,
//!                  │  ticker loop    │      UpdatePeriod, Shutdown)
//!                  └────────┬────────┘
//!                           │ evaluate()
//!                  ┌────────▼────────┐
//!                  │ Autoscale-      │── MetricSampler ── MetricBackend
//!                  │ Controller      │── ResourcePool
//!                  └────────┬────────┘
//!                           │ publish
//!                  ┌────────▼────────┐
//!                  │ Broadcast chan  │ (ScaleEvent)
//!                  └─────────────────┘
//! ```
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: mpsc channel for control messages
//! 2. **Events**: completed evaluations published to a broadcast channel
//! 3. **Request/Response**: oneshot channels for synchronous queries

pub mod messages;
pub mod scheduler;
