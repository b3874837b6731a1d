use crate::{SfcError, SfcResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> SfcResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SfcError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> SfcResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(SfcError::InvalidArg { what })
    }
}

/// Frame time as the primitives consume it.
///
/// NaN, infinite and negative values are out of contract for every update
/// entry point; they collapse to a zero-length frame.
#[inline]
pub fn sanitize_dt(dt: Real) -> Real {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Clamp into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
pub fn clamp_or_low(v: Real, lo: Real, hi: Real) -> Real {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

/// Clamp into `[0, 1]`.
#[inline]
pub fn clamp_unit(v: Real) -> Real {
    clamp_or_low(v, 0.0, 1.0)
}
