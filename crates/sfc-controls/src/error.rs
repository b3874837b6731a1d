//! Error types for control primitive and controller construction.

use thiserror::Error;

/// Result type for control construction.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised while building control primitives or controllers.
///
/// Per-frame updates never fail; only construction validates its parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Limits or thresholds supplied out of order.
    #[error("Invalid range for {what}: [{low}, {high}]")]
    InvalidRange {
        what: &'static str,
        low: f64,
        high: f64,
    },

    /// Numeric failure reported by sfc-core.
    #[error(transparent)]
    Core(#[from] sfc_core::SfcError),
}
