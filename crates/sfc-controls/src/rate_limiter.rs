//! Bounded-rate interpolation.
//!
//! A rate limiter moves its value toward a target by at most `rate * dt` per
//! update. Once the remaining distance fits inside one step the value lands
//! exactly on the target, so repeated updates toward a fixed target converge
//! in a finite number of frames and never oscillate around it.

use crate::error::ControlResult;
use serde::{Deserialize, Serialize};
use sfc_core::{ensure_finite, ensure_positive, sanitize_dt};

/// Scalar moving toward a target at a capped rate.
///
/// # Example
///
/// ```
/// use sfc_controls::RateLimiter;
///
/// let mut limiter = RateLimiter::new(2.0).unwrap();
///
/// // 2 units/s for 0.25 s gets us half way
/// limiter.update(1.0, 0.25);
/// assert!((limiter.value() - 0.5).abs() < 1e-12);
///
/// // A long frame snaps onto the target instead of overshooting
/// limiter.update(1.0, 10.0);
/// assert_eq!(limiter.value(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateLimiter {
    /// Maximum rate of change (units/second)
    rate: f64,
    /// Current output
    value: f64,
}

impl RateLimiter {
    /// Create a limiter resting at zero.
    ///
    /// # Errors
    ///
    /// Returns error if `rate` is not a positive finite number.
    pub fn new(rate: f64) -> ControlResult<Self> {
        Self::with_value(rate, 0.0)
    }

    /// Create a limiter resting at `value`.
    pub fn with_value(rate: f64, value: f64) -> ControlResult<Self> {
        let rate = ensure_positive(rate, "rate must be positive")?;
        let value = ensure_finite(value, "initial value")?;
        Ok(Self { rate, value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Change the rate used by the next [`update`](Self::update).
    ///
    /// A negative or NaN rate freezes the limiter rather than reversing it.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = if rate.is_nan() { 0.0 } else { rate.max(0.0) };
    }

    /// Jump straight to `value`, bypassing the rate limit.
    pub fn reset(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
        }
    }

    /// Advance toward `target` over a frame of `dt` seconds.
    ///
    /// Returns the new value. A NaN target leaves the value untouched.
    pub fn update(&mut self, target: f64, dt: f64) -> f64 {
        let dt = sanitize_dt(dt);
        if target.is_nan() || dt == 0.0 {
            return self.value;
        }

        let max_step = self.rate * dt;
        let remaining = target - self.value;
        if remaining.abs() <= max_step {
            self.value = target;
        } else {
            let next = self.value + max_step.copysign(remaining);
            // rounding must not carry the value past the target
            self.value = if (target - next).signum() == remaining.signum() {
                next
            } else {
                target
            };
        }
        self.value
    }
}
