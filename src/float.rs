//! Plain `f64` helpers shared by normalization and the logarithmic regimes.

/// `10^n` as a float. Uses `powf` so exact powers of ten round correctly.
#[inline]
pub(crate) fn pow10(n: f64) -> f64 {
    10f64.powf(n)
}

/// Returns `x * 10^n` without overflowing the scale factor for `|n| > 300`,
/// which matters for subnormal inputs.
pub(crate) fn scale10(x: f64, n: i64) -> f64 {
    if n.unsigned_abs() <= 300 {
        return x * pow10(n as f64);
    }
    let half = n / 2;
    x * pow10(half as f64) * pow10((n - half) as f64)
}

/// Splits a finite, positive float into `(mantissa, exponent)` with the
/// mantissa in `[1, 10)`.
pub(crate) fn split_decimal(x: f64) -> (f64, i64) {
    debug_assert!(x.is_finite() && x > 0.0);
    let mut digits = x.log10().floor() as i64;
    let mut mantissa = scale10(x, -digits);
    // log10 can land one ulp on the wrong side of an integer.
    if mantissa >= 10.0 {
        digits += 1;
        mantissa = scale10(x, -digits);
    } else if mantissa < 1.0 {
        digits -= 1;
        mantissa = scale10(x, -digits);
    }
    (mantissa, digits)
}

/// Log of sum of antilogs: `log10(10^la + 10^lb)` for `la >= lb`.
#[inline]
pub(crate) fn addlog(la: f64, lb: f64) -> f64 {
    la + (1.0 + pow10(lb - la)).log10()
}

/// Log of difference of antilogs: `log10(10^la - 10^lb)` for `la > lb`.
#[inline]
pub(crate) fn sublog(la: f64, lb: f64) -> f64 {
    la + (1.0 - pow10(lb - la)).log10()
}
