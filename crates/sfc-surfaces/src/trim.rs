//! Pitch and rudder trim.
//!
//! Trim is driven by discrete events: single steps, absolute set events and
//! a reset. Events only move the *target*; the elevator reports its target
//! directly (the surface renderer rate-limits it downstream), while the
//! rudder runs its own rate limiter toward the target every frame.

use serde::{Deserialize, Serialize};
use sfc_controls::{ControlError, ControlResult, RateLimiter};
use sfc_core::clamp_or_low;

/// Full-scale magnitude of a raw trim set/axis event.
pub const RAW_EVENT_FULL_SCALE: f64 = 16384.0;

/// Trim travel. `low <= 0 <= high`; the range may be asymmetric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimLimits {
    pub low: f64,
    pub high: f64,
}

impl TrimLimits {
    pub fn new(low: f64, high: f64) -> ControlResult<Self> {
        if !(low.is_finite() && high.is_finite()) || low >= high || low > 0.0 || high < 0.0 {
            return Err(ControlError::InvalidRange {
                what: "trim limits",
                low,
                high,
            });
        }
        Ok(Self { low, high })
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp_or_low(value, self.low, self.high)
    }

    /// Map a raw event value (±16384 full scale) into the travel.
    ///
    /// Each half of the raw range covers its own side of the travel, so an
    /// asymmetric range is reached exactly at both ends.
    pub fn scale_raw(&self, raw: f64) -> f64 {
        let normalized = raw / RAW_EVENT_FULL_SCALE;
        let span = if normalized >= 0.0 { self.high } else { -self.low };
        self.clamp(normalized * span)
    }
}

/// Common contract of the trim controllers.
pub trait Trim {
    /// Force the target to an externally observed position.
    fn synchronize(&mut self, value: f64);

    fn on_increment(&mut self);

    fn on_decrement(&mut self);

    /// Scale a raw set/axis event value into the trim range.
    fn on_set_absolute(&mut self, raw: f64);

    fn target(&self) -> f64;

    fn position(&self) -> f64;
}

/// Target bookkeeping shared by both axes.
#[derive(Debug, Clone, PartialEq)]
struct TrimTarget {
    limits: TrimLimits,
    step: f64,
    target: f64,
}

impl TrimTarget {
    fn new(limits: TrimLimits, step: f64) -> ControlResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "trim step must be positive",
            });
        }
        Ok(Self {
            limits,
            step,
            target: limits.clamp(0.0),
        })
    }

    fn set(&mut self, value: f64) {
        if !value.is_nan() {
            self.target = self.limits.clamp(value);
        }
    }

    fn step_by(&mut self, steps: f64) {
        self.set(self.target + steps * self.step);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorTrimConfig {
    /// Nose-down travel (degrees, negative).
    pub limit_low: f64,
    /// Nose-up travel (degrees).
    pub limit_high: f64,
    /// Degrees per increment/decrement event.
    pub step: f64,
}

impl Default for ElevatorTrimConfig {
    fn default() -> Self {
        Self {
            limit_low: -4.0,
            limit_high: 13.5,
            step: 0.1,
        }
    }
}

/// Pitch trim wheel target in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorTrim {
    target: TrimTarget,
}

impl ElevatorTrim {
    pub fn new(config: &ElevatorTrimConfig) -> ControlResult<Self> {
        let limits = TrimLimits::new(config.limit_low, config.limit_high)?;
        Ok(Self {
            target: TrimTarget::new(limits, config.step)?,
        })
    }

    pub fn limits(&self) -> TrimLimits {
        self.target.limits
    }
}

impl Trim for ElevatorTrim {
    fn synchronize(&mut self, value: f64) {
        self.target.set(value);
    }

    fn on_increment(&mut self) {
        self.target.step_by(1.0);
    }

    fn on_decrement(&mut self) {
        self.target.step_by(-1.0);
    }

    fn on_set_absolute(&mut self, raw: f64) {
        if !raw.is_nan() {
            self.target.target = self.target.limits.scale_raw(raw);
        }
    }

    fn target(&self) -> f64 {
        self.target.target
    }

    fn position(&self) -> f64 {
        self.target.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RudderTrimConfig {
    pub limit_low: f64,
    pub limit_high: f64,
    /// Target change per left/right event.
    pub step: f64,
    /// Rate (per second) while moving under pilot command.
    pub command_rate: f64,
    /// Rate (per second) while returning to neutral after a reset.
    pub reset_rate: f64,
}

impl Default for RudderTrimConfig {
    fn default() -> Self {
        // travel is normalized to ±20° of rudder; 1°/s commanded, 1.5°/s reset
        Self {
            limit_low: -1.0,
            limit_high: 1.0,
            step: 0.01,
            command_rate: 0.05,
            reset_rate: 0.075,
        }
    }
}

/// Rudder trim with its own rate-limited position.
#[derive(Debug, Clone, PartialEq)]
pub struct RudderTrim {
    target: TrimTarget,
    limiter: RateLimiter,
    command_rate: f64,
    reset_rate: f64,
}

impl RudderTrim {
    pub fn new(config: &RudderTrimConfig) -> ControlResult<Self> {
        let limits = TrimLimits::new(config.limit_low, config.limit_high)?;
        let target = TrimTarget::new(limits, config.step)?;
        let limiter = RateLimiter::with_value(config.command_rate, target.target)?;
        if !(config.reset_rate.is_finite() && config.reset_rate > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "rudder trim reset rate must be positive",
            });
        }
        Ok(Self {
            target,
            limiter,
            command_rate: config.command_rate,
            reset_rate: config.reset_rate,
        })
    }

    pub fn limits(&self) -> TrimLimits {
        self.target.limits
    }

    /// Rate the position is currently moving at.
    pub fn rate(&self) -> f64 {
        self.limiter.rate()
    }

    /// Return the target to neutral at the reset rate.
    pub fn on_reset(&mut self) {
        self.limiter.set_rate(self.reset_rate);
        self.target.set(0.0);
    }

    /// Advance the position toward the target.
    pub fn update(&mut self, dt: f64) -> f64 {
        self.limiter.update(self.target.target, dt)
    }
}

impl Trim for RudderTrim {
    fn synchronize(&mut self, value: f64) {
        self.target.set(value);
        self.limiter.reset(self.target.target);
    }

    fn on_increment(&mut self) {
        self.limiter.set_rate(self.command_rate);
        self.target.step_by(1.0);
    }

    fn on_decrement(&mut self) {
        self.limiter.set_rate(self.command_rate);
        self.target.step_by(-1.0);
    }

    fn on_set_absolute(&mut self, raw: f64) {
        self.limiter.set_rate(self.command_rate);
        if !raw.is_nan() {
            self.target.target = self.target.limits.scale_raw(raw);
        }
    }

    fn target(&self) -> f64 {
        self.target.target
    }

    fn position(&self) -> f64 {
        self.limiter.value()
    }
}
