//! Float-only special functions backing `gamma` and `lambert_w`.

use tracing::warn;

use crate::{
    constants::{LAMBERT_W_EPSILON, LAMBERT_W_MAX_ITERATIONS, LAMBERT_W_SEED_LIMIT},
    HypernumError,
};

/// `0.5 * ln(2π)`
const HALF_LN_TWO_PI: f64 = 0.9189385332046728;

/// Coefficients of Stirling's series for `ln(t!)`, as `(numerator, denominator)`
/// of the terms in `1/t, 1/t^3, 1/t^5, ...`.
const STIRLING_TERMS: [(f64, f64); 8] = [
    (1.0, 12.0),
    (-1.0, 360.0),
    (1.0, 1260.0),
    (-1.0, 1680.0),
    (1.0, 1188.0),
    (-691.0, 360360.0),
    (7.0, 1092.0),
    (-3617.0, 122400.0),
];

/// `ln(t!)` from the first `terms` corrections of Stirling's series. Stops
/// early once a correction no longer changes the sum.
pub(crate) fn ln_factorial_stirling(t: f64, terms: usize) -> f64 {
    let mut l = HALF_LN_TWO_PI + (t + 0.5) * t.ln() - t;
    let t2 = t * t;
    let mut power = t;
    for &(numerator, denominator) in STIRLING_TERMS.iter().take(terms) {
        let next = l + numerator / (denominator * power);
        if next == l { break; }
        l = next;
        power *= t2;
    }
    l
}

/// Gamma function of a float: multiply the argument up past 10, then use the
/// full Stirling series.
pub(crate) fn gamma(mut n: f64) -> f64 {
    if n < -50.0 {
        return if n == n.trunc() { f64::INFINITY } else { 0.0 };
    }
    let mut acc = 1.0;
    while n < 10.0 {
        acc *= n;
        n += 1.0;
    }
    ln_factorial_stirling(n - 1.0, STIRLING_TERMS.len()).exp() / acc
}

/// Principal branch of the Lambert W function, by Newton's method on
/// `w * e^w = z`.
///
/// # Errors
/// [`HypernumError::ConvergenceFailure`] if the iterates have not settled
/// within [`LAMBERT_W_MAX_ITERATIONS`] steps, which is what happens below
/// `-1/e` where W has no real value.
pub(crate) fn lambert_w(z: f64) -> Result<f64, HypernumError> {
    if z.is_nan() || z == f64::INFINITY {
        return Ok(z);
    }
    let mut w = if z < LAMBERT_W_SEED_LIMIT { 0.0 } else { z.ln() - z.ln().ln() };
    for _ in 0..LAMBERT_W_MAX_ITERATIONS {
        let ew = w.exp();
        let next = w - (w * ew - z) / (ew * (1.0 + w));
        if next.is_nan() { break; }
        // Relative past 1, since large w has ulps above the tolerance.
        if (next - w).abs() <= LAMBERT_W_EPSILON * w.abs().max(1.0) {
            return Ok(next);
        }
        w = next;
    }
    warn!(z, "Lambert W iteration failed to converge");
    Err(HypernumError::ConvergenceFailure { z })
}
