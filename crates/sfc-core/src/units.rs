// sfc-core/src/units.rs

use uom::si::f64::Time as UomTime;

/// Frame time as handed over by the host (SI, f64).
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn as_seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_trip() {
        assert_eq!(as_seconds(s(0.25)), 0.25);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(as_seconds(s(f64::NAN)).is_nan());
        assert_eq!(as_seconds(s(f64::INFINITY)), f64::INFINITY);
    }
}
