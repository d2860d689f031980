use std::f64::consts::TAU;

/// Wrap an angle in radians into `[0, 2π)`.
///
/// Negative inputs wrap with a true modulo, not a truncating remainder.
/// Values already in range are returned untouched.
///
/// ```
/// use std::f64::consts::{FRAC_PI_2, PI};
/// use vincenty_core::wrap_two_pi;
///
/// assert_eq!(wrap_two_pi(FRAC_PI_2), FRAC_PI_2);
/// assert!((wrap_two_pi(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
/// assert!((wrap_two_pi(5.0 * PI) - PI).abs() < 1e-12);
/// ```
pub fn wrap_two_pi(angle: f64) -> f64 {
    if (0.0..TAU).contains(&angle) {
        return angle;
    }

    ((angle % TAU) + TAU) % TAU
}
