//! Timed boolean latch.
//!
//! The latch is written once per frame with the current input level and
//! the frame time. Durations are in seconds.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use sfc_core::sanitize_dt;

fn check_duration(duration: f64) -> ControlResult<f64> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(ControlError::InvalidArg {
            what: "duration must be finite and non-negative",
        })
    }
}

/// Monostable trigger: outputs high for `duration` seconds after a qualifying
/// edge on its input.
///
/// A qualifying edge is the input moving from `!edge_is_rising` to
/// `edge_is_rising`. A retriggerable latch restarts its timer on every such
/// edge; a non-retriggerable one ignores edges until the timer has run out.
///
/// # Example
///
/// ```
/// use sfc_controls::MonostableLatch;
///
/// let mut latch = MonostableLatch::rising(2.0).unwrap();
/// assert!(latch.write(true, 0.1));
/// assert!(latch.write(false, 1.5));
/// assert!(!latch.write(false, 0.5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonostableLatch {
    edge_is_rising: bool,
    retriggerable: bool,
    duration: f64,
    remaining: f64,
    previous_input: bool,
    previous_output: bool,
}

impl MonostableLatch {
    pub fn new(edge_is_rising: bool, duration: f64, retriggerable: bool) -> ControlResult<Self> {
        Ok(Self {
            edge_is_rising,
            retriggerable,
            duration: check_duration(duration)?,
            remaining: 0.0,
            // the first write at trigger level counts as an edge
            previous_input: !edge_is_rising,
            previous_output: false,
        })
    }

    pub fn rising(duration: f64) -> ControlResult<Self> {
        Self::new(true, duration, false)
    }

    pub fn falling(duration: f64) -> ControlResult<Self> {
        Self::new(false, duration, false)
    }

    pub fn retriggerable(edge_is_rising: bool, duration: f64) -> ControlResult<Self> {
        Self::new(edge_is_rising, duration, true)
    }

    /// Feed one frame and return the new output.
    pub fn write(&mut self, input: bool, dt: f64) -> bool {
        self.remaining = (self.remaining - sanitize_dt(dt)).max(0.0);

        let trigger_level = self.edge_is_rising;
        let edge = self.previous_input != trigger_level && input == trigger_level;
        if edge && (self.retriggerable || self.remaining == 0.0) {
            self.remaining = self.duration;
        }

        self.previous_input = input;
        self.previous_output = self.remaining > 0.0;
        self.previous_output
    }

    /// Output produced by the most recent [`write`](Self::write).
    pub fn read(&self) -> bool {
        self.previous_output
    }

    /// Seconds left before the output drops.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_for_duration_after_rising_edge() {
        let mut latch = MonostableLatch::rising(1.0).unwrap();
        assert!(!latch.write(false, 0.1));
        assert!(latch.write(true, 0.1));
        for _ in 0..9 {
            assert!(latch.write(true, 0.1));
        }
        assert!(!latch.write(true, 0.2));
        assert!(!latch.read());
    }

    #[test]
    fn falling_edge_trigger() {
        let mut latch = MonostableLatch::falling(0.5).unwrap();
        assert!(!latch.write(true, 0.1));
        assert!(latch.write(false, 0.1));
        assert!(latch.write(false, 0.3));
        assert!(!latch.write(false, 0.3));
    }

    #[test]
    fn non_retriggerable_ignores_edges_while_high() {
        let mut latch = MonostableLatch::rising(1.0).unwrap();
        latch.write(true, 0.0);
        latch.write(false, 0.6);
        latch.write(true, 0.1);
        assert!((latch.remaining() - 0.3).abs() < 1e-12);
        assert!(!latch.write(true, 0.4));
    }

    #[test]
    fn retrigger_extends_from_retrigger_frame() {
        let mut latch = MonostableLatch::retriggerable(true, 1.0).unwrap();
        latch.write(true, 0.0);
        latch.write(false, 0.6);
        assert!(latch.write(true, 0.1));
        assert_eq!(latch.remaining(), 1.0);
        assert!(latch.write(true, 0.9));
        assert!(!latch.write(true, 0.2));
    }

    #[test]
    fn huge_frame_never_goes_negative() {
        let mut latch = MonostableLatch::rising(1.0).unwrap();
        latch.write(true, 0.0);
        assert!(!latch.write(true, 1e9));
        assert_eq!(latch.remaining(), 0.0);
    }

    #[test]
    fn zero_duration_never_asserts() {
        let mut latch = MonostableLatch::rising(0.0).unwrap();
        assert!(!latch.write(true, 0.1));
    }

    #[test]
    fn invalid_duration() {
        assert!(MonostableLatch::rising(-1.0).is_err());
        assert!(MonostableLatch::falling(f64::NAN).is_err());
    }
}
