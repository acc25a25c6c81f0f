use core::ops::ShrAssign;

use num_traits::{ConstOne, ConstZero};
use tracing::debug;

use crate::{
    constants::*,
    float::{self, scale10},
    special, Hypernum, HypernumError,
};

impl Hypernum {
    /// Returns the base 10 logarithm of the absolute value.
    ///
    /// Above tower height zero this just drops one level off the tower.
    pub fn log10(self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self.is_zero() { return Self::NEG_INFINITY; }
        if self.is_infinite() { return Self::INFINITY; }
        if self.pt == 0 {
            return Self::from(self.log10_f64());
        }
        Self::from_parts(self.pt - 1, self.mantissa.abs(), self.expon)
    }

    /// Natural logarithm of the absolute value.
    pub fn ln(self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self.is_zero() { return Self::NEG_INFINITY; }
        if self.is_infinite() { return Self::INFINITY; }
        let x = self.plain_value().abs();
        match self.pt {
            0 => Self::from(self.log10_f64() * core::f64::consts::LN_10),
            1 => Self::from(x * core::f64::consts::LN_10),
            // ln(10^10^x) = 10^(x + log10(ln 10))
            2 => Self::from_log10(x + LOG10_LN_10),
            // log10 and ln agree at this height
            _ => Self::from_parts(self.pt - 1, self.mantissa.abs(), self.expon),
        }
    }

    #[inline]
    pub fn log(self, base: impl Into<Hypernum>) -> Self {
        self.log10() / base.into().log10()
    }

    /// `10^self`.
    pub fn pow10(self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self == Self::INFINITY { return Self::INFINITY; }
        if self == Self::NEG_INFINITY { return Self::ZERO; }
        if self.is_zero() { return Self::ONE; }
        if self.pt == 0 {
            let plain = self.plain_value();
            if plain.abs() < CUTOFF_F {
                return Self::from(float::pow10(plain));
            }
            if plain < 0.0 { return Self::from_log10(plain); }
        }
        if self.is_negative() { return Self::ZERO; }
        Self::from_parts(self.pt + 1, self.mantissa, self.expon)
    }

    /// `e^self`.
    pub fn exp(self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self == Self::INFINITY { return Self::INFINITY; }
        if self == Self::NEG_INFINITY { return Self::ZERO; }
        let x = self.plain_value();
        if self.pt == 0 {
            let log = x * core::f64::consts::LOG10_E;
            if log.abs() < CUTOFF_F { return Self::from(x.exp()); }
            if log < 0.0 { return Self::from_log10(log); }
            return Self::from_parts(1, log, 0);
        }
        if self.is_negative() { return Self::ZERO; }
        match self.pt {
            // e^(10^x) = 10^10^(x - log10(ln 10))
            1 => Self::from_parts(2, x - LOG10_LN_10, 0),
            _ => Self::from_parts(self.pt + 1, self.mantissa.abs(), self.expon),
        }
    }

    /// Finite, plain odd integers. Anything past float precision counts as
    /// even.
    fn is_odd_integer(&self) -> bool {
        if !self.is_finite() || self.pt > 0 || self.expon > PARITY_EXPON_LIMIT {
            return false;
        }
        let plain = self.plain_value();
        plain.fract() == 0.0 && plain % 2.0 != 0.0
    }

    /// Raises this number to `power`, as `10^(log10(|self|) * power)`.
    ///
    /// Small integer powers of plain numbers are multiplied out instead, so
    /// `10^2` is exactly `100`. Otherwise a negative base yields a negative
    /// result only for odd integer powers.
    ///
    /// # Errors
    /// [`HypernumError::UnsupportedOperation`] for negative powers.
    pub fn pow(self, power: impl Into<Hypernum>) -> Result<Self, HypernumError> {
        let power = power.into();
        if power.is_zero() { return Ok(Self::ONE); }
        if power == Self::ONE { return Ok(self); }
        if power == Self::INFINITY { return Ok(Self::NAN); }
        if power == Self::NEG_INFINITY { return Ok(Self::ZERO); }
        if power.is_nan() || self.is_nan() { return Ok(Self::NAN); }
        if self == Self::INFINITY { return Ok(Self::INFINITY); }
        if self == Self::NEG_INFINITY { return Ok(Self::NAN); }
        if self.is_zero() { return Ok(Self::ZERO); }
        if power.is_negative() {
            return Err(HypernumError::UnsupportedOperation("negative powers are not supported"));
        }
        if self.pt == 0
            && power.pt == 0
            && power.is_integer()
            && power.plain_value() <= EXACT_POW_LIMIT
        {
            return self.iterpow(power);
        }

        let magnitude = (self.abs().log10() * power).pow10();
        if self.is_negative() && power.is_odd_integer() {
            return Ok(-magnitude);
        }
        Ok(magnitude)
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        self.pow(Self::HALF).unwrap_or(Self::NAN)
    }

    /// The gamma function.
    ///
    /// Evaluated directly for small plain values, from Stirling's series for
    /// larger ones, and from ever coarser `n ln n - n` style estimates once
    /// the tower grows. Negative numbers above tower height zero are treated
    /// as poles.
    pub fn gamma(self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self.is_infinite() { return self; }
        let n = self.plain_value();
        if self.is_negative() {
            if self.pt > 0 { return Self::INFINITY; }
            return Self::from(special::gamma(n));
        }
        match self.pt {
            0 if n < GAMMA_DIRECT_LIMIT => Self::from(special::gamma(n)),
            0 => Self::from(special::ln_factorial_stirling(n - 1.0, 4)).exp(),
            1 => (self * (self.ln() - 1)).exp(),
            _ => self.exp(),
        }
    }

    /// `self!`, i.e. `gamma(self + 1)`. Past float precision the `+ 1` is
    /// dropped. Small whole numbers are multiplied out exactly.
    pub fn factorial(self) -> Self {
        if self.pt == 0
            && self.is_integer()
            && !self.is_negative()
            && self.plain_value() < GAMMA_DIRECT_LIMIT
        {
            let n = self.plain_value() as u32;
            return Self::from((1..=n).map(f64::from).product::<f64>());
        }
        if self.pt > 0 || self.expon > FACTORIAL_EXPON_LIMIT {
            return self.gamma();
        }
        (self + 1).gamma()
    }

    /// Principal branch of the Lambert W function.
    ///
    /// Beyond `f64` range the asymptotic expansion `L1 - L2 + L2/L1` is used,
    /// where `L1 = ln(self)` and `L2 = ln(L1)`.
    ///
    /// # Errors
    /// [`HypernumError::ConvergenceFailure`] if Newton's method does not
    /// settle, including for arguments below `-1/e`.
    pub fn lambert_w(self) -> Result<Self, HypernumError> {
        if self.pt == 0 || !self.is_finite() {
            return special::lambert_w(self.to_f64()).map(Self::from);
        }
        if self.is_negative() {
            return Err(HypernumError::ConvergenceFailure { z: self.to_f64() });
        }
        let l1 = self.ln();
        let l2 = l1.ln();
        Ok(l1 - l2 + l2 / l1)
    }

    /// `self^count` by repeated multiplication.
    ///
    /// # Errors
    /// [`HypernumError::PowerTooLarge`] if `count` is too large to count down
    /// one at a time.
    pub fn iterpow(self, count: impl Into<Hypernum>) -> Result<Self, HypernumError> {
        let mut remaining = iteration_count(count.into(), "power")?;
        let mut acc = Self::ONE;
        while remaining > 0.0 {
            let next = acc * self;
            remaining -= 1.0;
            if next == acc || !next.is_finite() {
                debug!(remaining, "iterated power reached a fixed point");
                return Ok(next);
            }
            acc = next;
        }
        Ok(acc)
    }

    /// Tetration: `self^(self^(...^self))`, `height` copies of `self`, by
    /// iterated exponentiation. `height` is truncated to an integer.
    ///
    /// # Errors
    /// [`HypernumError::PowerTooLarge`] if `height` is too large to count down
    /// one at a time, and anything [`Hypernum::pow`] fails with.
    pub fn itertetra(self, height: impl Into<Hypernum>) -> Result<Self, HypernumError> {
        let mut remaining = iteration_count(height.into(), "tetration")?.trunc();
        let mut acc = Self::ONE;
        while remaining > 0.0 {
            let next = self.pow(acc)?;
            remaining -= 1.0;
            if next == acc || !next.is_finite() {
                debug!(remaining, "tetration reached a fixed point");
                return Ok(next);
            }
            acc = next;
        }
        Ok(acc)
    }

    /// Moves this number `levels` tower levels up (or down, if negative)
    /// in place, then renormalizes.
    ///
    /// This is a structural edit of the representation, not `pow10`/`log10`:
    /// the mantissa and exponent are kept as they are.
    ///
    /// # Errors
    /// [`HypernumError::InvalidArgument`] if the tower height would drop
    /// below zero. The number is left untouched in that case.
    pub fn shift_tower(&mut self, levels: i64) -> Result<(), HypernumError> {
        let pt = i64::try_from(self.pt)
            .ok()
            .and_then(|pt| pt.checked_add(levels))
            .filter(|pt| *pt >= 0)
            .ok_or_else(|| {
                HypernumError::InvalidArgument(format!(
                    "tower height {} shifted by {levels} would go negative",
                    self.pt
                ))
            })?;
        self.pt = pt as u64;
        self.normalize();
        Ok(())
    }

    /// Moves this number `levels` tower levels down in place.
    ///
    /// # Errors
    /// See [`Hypernum::shift_tower`].
    pub fn decrement_tower(&mut self, levels: u64) -> Result<(), HypernumError> {
        let levels = i64::try_from(levels).map_err(|_| {
            HypernumError::InvalidArgument(format!("cannot lower a tower by {levels} levels"))
        })?;
        self.shift_tower(-levels)
    }
}

/// `x >>= k` raises the tower of `x` by `k` levels.
///
/// There is no `<<=`: lowering a tower can fail, so it is
/// [`Hypernum::decrement_tower`] instead.
impl ShrAssign<u64> for Hypernum {
    fn shr_assign(&mut self, levels: u64) {
        self.pt = self.pt.saturating_add(levels);
        self.normalize();
    }
}

/// The loop count for `iterpow`/`itertetra`, rejecting counts where
/// `n - 1 == n` in floating point.
fn iteration_count(count: Hypernum, what: &'static str) -> Result<f64, HypernumError> {
    let plain = scale10(count.mantissa, count.expon);
    if count.pt > 0 || plain == plain - 1.0 {
        return Err(HypernumError::PowerTooLarge(what));
    }
    Ok(plain)
}
