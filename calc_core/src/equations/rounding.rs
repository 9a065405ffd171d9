//! # Rounding and Safe Arithmetic
//!
//! Every calculator picks one rounding rule per output and sticks to it:
//!
//! - Handicaps floor (a bowler never gets a pin they did not earn)
//! - Material counts ceil (you can't buy 0.3 of a picket)
//! - Money rounds half-up to cents
//!
//! Division goes through [`safe_div`] wherever the denominator comes from the
//! user, so a zero never leaks `NaN` or `inf` into a result.

/// Round down to a whole number
#[inline]
pub fn floor_whole(value: f64) -> f64 {
    value.floor()
}

/// Round up to a whole count, never below `min`
///
/// Values within a hair of a whole number (e.g. `200.0 * 1.1`) are treated
/// as that whole number rather than bumped to the next one.
///
/// # Example
/// ```rust
/// use calc_core::equations::rounding::ceil_count;
///
/// assert_eq!(ceil_count(12.01, 1), 13);
/// assert_eq!(ceil_count(0.0, 1), 1);
/// ```
#[inline]
pub fn ceil_count(value: f64, min: u32) -> u32 {
    if !value.is_finite() || value <= min as f64 {
        return min;
    }
    let snapped = value - value.abs() * 1e-12;
    (snapped.ceil() as u32).max(min)
}

/// Round to `places` decimal places, halves away from zero
///
/// # Example
/// ```rust
/// use calc_core::equations::rounding::round_to;
///
/// assert_eq!(round_to(44.4444, 2), 44.44);
/// assert_eq!(round_to(0.125, 2), 0.13);
/// ```
#[inline]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    // Nudge by a relative epsilon so 0.125-style halves stored just below the
    // midpoint still round up.
    let scaled = value * factor;
    let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 4.0;
    nudged.round() / factor
}

/// Round a dollar amount to cents
#[inline]
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to the nearest multiple of `step` (e.g. 0.25" club lengths)
#[inline]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Divide, returning 0.0 instead of `NaN`/`inf` when `denominator` is zero
///
/// # Example
/// ```rust
/// use calc_core::equations::rounding::safe_div;
///
/// assert_eq!(safe_div(500.0, 250.0), 2.0);
/// assert_eq!(safe_div(500.0, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.0
    }
}

/// Percentage of `part` in `whole`, scaled to 0-100
#[inline]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_and_ceil() {
        assert_eq!(floor_whole(57.6), 57.0);
        assert_eq!(ceil_count(57.0, 1), 57);
        assert_eq!(ceil_count(f64::NAN, 1), 1);
        assert_eq!(ceil_count(200.0 * 1.1, 1), 220);
        assert_eq!(ceil_count(220.001, 1), 221);
    }

    #[test]
    fn test_round_cents_half_up() {
        assert_eq!(round_cents(1.005), 1.01);
        assert_eq!(round_cents(2.675), 2.68);
        assert_eq!(round_cents(469.9949), 469.99);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(45.6, 0.25), 45.5);
        assert_eq!(round_to_step(45.63, 0.25), 45.75);
        assert_eq!(round_to_step(3.0, 0.0), 3.0);
    }

    #[test]
    fn test_safe_div_guards() {
        assert_eq!(safe_div(1.0, 0.0), 0.0);
        assert_eq!(safe_div(f64::MAX, f64::MIN_POSITIVE), 0.0);
        assert_eq!(percent_of(5.0, 250.0), 2.0);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
    }
}
