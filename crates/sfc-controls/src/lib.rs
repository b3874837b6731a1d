//! Timing primitives for per-frame secondary flight-control logic.
//!
//! Every primitive here is advanced once per simulated frame by its owner with
//! the host-supplied frame time. Frame times are never trusted: zero is a
//! no-op and negative or non-finite values collapse to zero.
//!
//! # Primitives
//!
//! - [`RateLimiter`]: moves a scalar toward a target at a capped rate,
//!   snapping onto the target without overshoot
//! - [`MonostableLatch`]: holds a boolean high for a fixed duration after a
//!   qualifying edge, optionally retriggerable

pub mod error;
pub mod latch;
pub mod rate_limiter;

pub use error::{ControlError, ControlResult};
pub use latch::MonostableLatch;
pub use rate_limiter::RateLimiter;
