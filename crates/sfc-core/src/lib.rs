//! sfc-core: shared foundation for the secondary flight-control crates.
//!
//! Contains:
//! - units (uom frame-time type and constructors)
//! - numeric (Real + validation, frame-time and clamp helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{SfcError, SfcResult};
pub use numeric::*;
pub use units::*;
