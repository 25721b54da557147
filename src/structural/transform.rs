//! Clamped inverse hyperbolic tangent.
//!
//! Measured ratios can land on or past ±1 through rounding. Clamping to
//! `[-1 + eps, 1 - eps]` keeps the structural coordinate finite for every
//! real input.

/// Restrict `x` to `[lo, hi]`; NaN passes through unchanged
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// `atanh(x)` with `x` clamped to `[-1 + eps, 1 - eps]`
///
/// # Example
/// ```
/// use ssig_distance::structural::atanh_safe;
///
/// assert!((atanh_safe(0.5, 1e-12) - 0.5_f64.atanh()).abs() < 1e-15);
/// assert!(atanh_safe(1.0, 1e-12).is_finite());
/// ```
pub fn atanh_safe(x: f64, eps: f64) -> f64 {
    let x = clamp(x, -1.0 + eps, 1.0 - eps);
    0.5 * ((1.0 + x) / (1.0 - x)).ln()
}
