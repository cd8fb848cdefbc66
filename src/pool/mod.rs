//! Resource pool access for the autoscaling loop
//!
//! The managed pool is a shared, externally-mutable resource: other
//! actors may resize it out-of-band at any time. The trait therefore
//! exposes only a fresh size read and a set-size operation; callers must
//! never cache a size across cycles.

pub mod backend;
pub mod error;
pub mod http;

pub use backend::ResourcePool;
pub use error::{PoolError, PoolResult};
pub use http::HttpResourcePool;
