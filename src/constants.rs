/// Largest exponent (and plain value) kept at a given tower level.
///
/// An `expon` above this promotes the number one tower level up; a plain value
/// at or below it demotes one level down.
pub const CUTOFF: i64 = 300;
pub const CUTOFF_F: f64 = CUTOFF as f64;

/// Largest plain `f64` result an operator will produce before switching to
/// the logarithmic (`pt == 1`) representation.
pub const OVERFLOW: f64 = 1e300;

/// Tolerance, in log-of-log units, within which two `pt == 2` factors are
/// combined instead of the larger one simply being kept.
pub const SCALE: f64 = 14.0;

/// Below this plain value `gamma` is evaluated directly.
pub const GAMMA_DIRECT_LIMIT: f64 = 24.0;

/// Exponents with a larger `expon` are treated as even integers by `pow`.
pub const PARITY_EXPON_LIMIT: i64 = 15;

/// Integer powers up to this are computed by repeated multiplication.
pub const EXACT_POW_LIMIT: f64 = 64.0;

/// `factorial` skips the `+ 1` above this `expon`.
pub const FACTORIAL_EXPON_LIMIT: i64 = 15;

pub const LAMBERT_W_EPSILON: f64 = 1e-14;
pub const LAMBERT_W_MAX_ITERATIONS: usize = 100;
/// Below this the Newton iteration for W is seeded with zero.
pub const LAMBERT_W_SEED_LIMIT: f64 = 5.0;

/// Number of leading digits kept from an integer literal too large for `f64`.
pub const PARSE_LEADING_DIGITS: usize = 10;

/// `log10(ln 10)`, the offset between `log10(log10 x)` and `log10(ln x)`.
pub const LOG10_LN_10: f64 = 0.36221568869946325;
