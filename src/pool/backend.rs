//! Resource pool trait definition

use async_trait::async_trait;

use super::error::PoolResult;

/// Trait for resizable resource pools
///
/// Implementations must be `Send + Sync`. Both operations go to the
/// external controller on every call; the pool size must be read fresh
/// each evaluation cycle to tolerate out-of-band changes.
#[async_trait]
pub trait ResourcePool: Send + Sync {
    /// Current number of nodes in the pool.
    async fn current_size(&self) -> PoolResult<u32>;

    /// Set the pool to `target` nodes.
    ///
    /// Fails with `PoolError::Rejected` when the backend refuses
    /// (quota exhausted, concurrent modification, ...).
    async fn resize(&self, target: u32) -> PoolResult<()>;
}
