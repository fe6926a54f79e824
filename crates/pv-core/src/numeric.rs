use crate::PvError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PvError::NonFinite { what, value: v })
    }
}

pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, PvError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(PvError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// Floor at zero. NaN passes through unchanged.
#[inline]
pub fn floor_zero(v: Real) -> Real {
    if v < 0.0 { 0.0 } else { v }
}

/// Clamp a cosine/sine argument into [-1, 1] so the inverse stays in its domain.
#[inline]
pub fn clamp_unit(v: Real) -> Real {
    v.clamp(-1.0, 1.0)
}

/// Arc-cosine in radians with the argument clamped into [-1, 1].
#[inline]
pub fn safe_acos(v: Real) -> Real {
    clamp_unit(v).acos()
}

/// Arc-sine in radians with the argument clamped into [-1, 1].
#[inline]
pub fn safe_asin(v: Real) -> Real {
    clamp_unit(v).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_in_range_rejects_outside() {
        assert_eq!(ensure_in_range(0.5, 0.0, 1.0, "x").unwrap(), 0.5);
        let err = ensure_in_range(1.5, 0.0, 1.0, "x").unwrap_err();
        assert!(matches!(err, PvError::OutOfRange { what: "x", .. }));
    }

    #[test]
    fn floor_zero_only_lifts_negatives() {
        assert_eq!(floor_zero(-3.0), 0.0);
        assert_eq!(floor_zero(2.5), 2.5);
        assert!(floor_zero(Real::NAN).is_nan());
    }

    #[test]
    fn safe_acos_handles_rounding_overshoot() {
        assert_eq!(safe_acos(1.000_000_000_1), 0.0);
        assert!((safe_acos(-1.000_000_1) - std::f64::consts::PI).abs() < 1e-15);
        assert!(safe_acos(Real::NAN).is_nan());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn guarded_inverses_stay_finite(v in -10.0_f64..10.0_f64) {
            prop_assert!(safe_acos(v).is_finite());
            prop_assert!(safe_asin(v).is_finite());
        }
    }
}
