//! A number type for hyper-calculator arithmetic, after Robert Munafo's
//! Hypercalc.
//!
//! A [`Hypernum`] stores a tower height `pt`, a mantissa in `[1, 10)` and a
//! decimal exponent, and stands for
//!
//! ```text
//! mantissa * 10^expon                        if pt == 0
//! 10^(10^(...(mantissa * 10^expon)...))      pt times, if pt > 0
//! ```
//!
//! so googolplexes, factorials of huge numbers and tetrations can be handled
//! without ever materializing the value. Mantissas are plain `f64`s: results
//! are approximate, and once a tower is tall enough, adding or multiplying by
//! something comparatively small leaves the number unchanged.
//!
//! ```
//! use hypernum::Hypernum;
//!
//! let googol: Hypernum = "1e100".parse().unwrap();
//! let googolplex = googol.pow10();
//! assert_eq!(googolplex.pt(), 1);
//! assert!(googolplex > googol * googol);
//! ```

use core::{cmp::Ordering, ops::*, str::FromStr};

use num_traits::{ConstOne, ConstZero, One, ToPrimitive, Zero};
use tracing::{debug, trace};

/// Builds a constant [`Hypernum`] from an already-normalized mantissa and
/// exponent at tower height zero.
///
/// # Errors
/// Will cause a compiler error if the mantissa is finite, nonzero and outside
/// `[1, 10)` in magnitude.
macro_rules! constant {
    ($mantissa: expr) => {
        constant!($mantissa, 0)
    };
    ($mantissa: expr, $expon: expr) => {{
        const MANTISSA: f64 = $mantissa;
        const {
            assert!(
                MANTISSA.is_nan()
                    || MANTISSA.is_infinite()
                    || MANTISSA == 0.0
                    || (MANTISSA >= 1.0 && MANTISSA < 10.0)
                    || (MANTISSA <= -1.0 && MANTISSA > -10.0),
                "constant hypernum mantissa outside of [1, 10)"
            );
            Hypernum { pt: 0, mantissa: MANTISSA, expon: $expon }
        }
    }};
}

pub mod constants;
use constants::*;

mod display;
pub use display::DisplayConfig;

mod error;
pub use error::HypernumError;

mod float;
use float::{addlog, scale10, split_decimal, sublog};

mod parsing;
pub use parsing::FromStrError;

mod special;

mod transcendental;

/// A real number stored as a power tower over a scientific-notation mantissa.
///
/// Every value is normalized on construction; see [`Hypernum::from_parts`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParts", into = "RawParts"))]
#[derive(Debug, Clone, Copy, PartialEq)] // Sentinels are canonical, so field equality is value equality
pub struct Hypernum {
    pt: u64,
    mantissa: f64,
    expon: i64,
}

/// The raw `(pt, mantissa, exp)` triple, with every key optional so that
/// incomplete input can be reported instead of guessed at.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawParts {
    pub pt: Option<i64>,
    pub mantissa: Option<f64>,
    pub exp: Option<i64>,
}

impl TryFrom<RawParts> for Hypernum {
    type Error = HypernumError;

    fn try_from(parts: RawParts) -> Result<Self, Self::Error> {
        let RawParts { pt: Some(pt), mantissa: Some(mantissa), exp: Some(expon) } = parts else {
            return Err(HypernumError::InvalidArgument(format!(
                "raw parts need pt, mantissa and exp (got {parts:?})"
            )));
        };
        let pt = u64::try_from(pt).map_err(|_| {
            HypernumError::InvalidArgument(format!("tower height must not be negative (got {pt})"))
        })?;
        Ok(Self::from_parts(pt, mantissa, expon))
    }
}

impl From<Hypernum> for RawParts {
    fn from(value: Hypernum) -> Self {
        value.to_parts()
    }
}

macro_rules! from_primitive_impl {
    ($($prim: ty),*) => {$(
        impl From<$prim> for Hypernum {
            #[inline]
            fn from(value: $prim) -> Self {
                Self::from_parts(0, value as f64, 0)
            }
        }
    )*};
}

from_primitive_impl!(f64, f32, i32, i64, u32, u64);

impl From<Hypernum> for f64 {
    fn from(value: Hypernum) -> Self {
        value.to_f64()
    }
}

impl ToPrimitive for Hypernum {
    fn to_f64(&self) -> Option<f64> {
        Some(Hypernum::to_f64(self))
    }

    fn to_i64(&self) -> Option<i64> {
        Hypernum::to_f64(self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_negative() { return None; }
        Hypernum::to_f64(self).to_u64()
    }
}

impl Zero for Hypernum {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Hypernum::is_zero(self)
    }

    fn set_zero(&mut self) {
        *self = Self::ZERO;
    }
}

impl ConstZero for Hypernum {
    const ZERO: Self = constant!(0.0);
}

impl One for Hypernum {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    fn set_one(&mut self) {
        *self = Self::ONE;
    }
}

impl ConstOne for Hypernum {
    const ONE: Self = constant!(1.0);
}

impl PartialEq<f64> for Hypernum {
    fn eq(&self, other: &f64) -> bool {
        self.eq(&Self::from(*other))
    }
}

impl PartialOrd<f64> for Hypernum {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Self::from(*other))
    }
}

impl PartialOrd for Hypernum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() { return None; }
        if self == other { return Some(Ordering::Equal); }
        if self.greater_than(other) { Some(Ordering::Greater) } else { Some(Ordering::Less) }
    }
}

impl Neg for Hypernum {
    type Output = Hypernum;

    fn neg(self) -> Self::Output {
        if self.is_zero() { return self; }
        Hypernum { mantissa: -self.mantissa, ..self }
    }
}

macro_rules! forward_binop_impl {
    (@lhs $impl_name: ident: $name: ident => $core: ident; $($prim: ty),*) => {$(
        impl $impl_name<Hypernum> for $prim {
            type Output = Hypernum;

            fn $name(self, rhs: Hypernum) -> Hypernum {
                Hypernum::from(self).$core(rhs)
            }
        }
    )*};
    ($($impl_assign_name: ident: $assign_name: ident, $impl_name: ident: $name: ident => $core: ident);*) => {$(
        impl<T: Into<Hypernum>> $impl_name<T> for Hypernum {
            type Output = Hypernum;

            fn $name(self, rhs: T) -> Hypernum {
                self.$core(rhs.into())
            }
        }

        impl<T: Into<Hypernum>> $impl_assign_name<T> for Hypernum {
            fn $assign_name(&mut self, rhs: T) {
                *self = self.$core(rhs.into());
            }
        }

        forward_binop_impl!(@lhs $impl_name: $name => $core; f64, i32, i64);
    )*};
}

forward_binop_impl! {
    AddAssign: add_assign, Add: add => sum;
    SubAssign: sub_assign, Sub: sub => difference;
    MulAssign: mul_assign, Mul: mul => product;
    DivAssign: div_assign, Div: div => quotient
}

impl FromStr for Hypernum {
    type Err = HypernumError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let parsed = parsing::parse_hypernum(&mut parsing::ParseHead::new(string))?;
        Ok(parsed)
    }
}

impl Hypernum {
    pub const NAN: Self = constant!(f64::NAN);
    pub const INFINITY: Self = constant!(f64::INFINITY);
    pub const NEG_INFINITY: Self = constant!(f64::NEG_INFINITY);
    pub const E: Self = constant!(core::f64::consts::E);
    pub const PI: Self = constant!(core::f64::consts::PI);
    pub const LOG10_E: Self = constant!(4.342944819032518, -1);
    pub const LN_10: Self = constant!(core::f64::consts::LN_10);
    /// `1e300`, the largest plain result an operator keeps at tower height zero.
    pub const OVERFLOW: Self = constant!(1.0, 300);
    pub(crate) const HALF: Self = constant!(5.0, -1);

    /// Builds a number from a raw tower height, mantissa and exponent,
    /// normalizing it.
    ///
    /// The triple need not be in normal form: `from_parts(0, 1.0, 400)` is
    /// promoted to tower height 1, and `from_parts(1, 2.0, 0)` is demoted to
    /// the plain value 100.
    pub fn from_parts(pt: u64, mantissa: f64, expon: i64) -> Self {
        Self { pt, mantissa, expon }.normalized()
    }

    /// Returns the raw triple.
    pub fn to_parts(&self) -> RawParts {
        RawParts {
            pt: Some(i64::try_from(self.pt).unwrap_or(i64::MAX)),
            mantissa: Some(self.mantissa),
            exp: Some(self.expon),
        }
    }

    /// Builds a non-negative number from its base-10 logarithm.
    ///
    /// Logs below `-CUTOFF` keep their integer part in the exponent, since
    /// `10^log` would flush to zero as an `f64`.
    fn from_log10(log: f64) -> Self {
        if log.is_nan() { return Self::NAN; }
        if log > CUTOFF_F { return Self::from_parts(1, log, 0); }
        if log >= -CUTOFF_F { return Self::from(float::pow10(log)); }
        if log < i64::MIN as f64 { return Self::ZERO; }
        let digits = log.floor();
        Self::from_parts(0, float::pow10(log - digits), digits as i64)
    }

    fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        if !self.mantissa.is_finite() {
            self.pt = 0;
            self.expon = 0;
            return;
        }
        let negative = self.mantissa < 0.0;
        let mut mantissa = self.mantissa.abs();
        if mantissa == 0.0 {
            if self.pt == 0 {
                *self = Self::ZERO;
                return;
            }
            // 10^0 at the innermost level; demotion below takes it from here.
            self.expon = 0;
        } else {
            let (shifted, digits) = split_decimal(mantissa);
            mantissa = shifted;
            self.expon = self.expon.saturating_add(digits);
        }

        while self.expon > CUTOFF {
            let (shifted, digits) = split_decimal(self.expon as f64 + mantissa.log10());
            mantissa = shifted;
            self.expon = digits;
            self.pt += 1;
            trace!(pt = self.pt, "promoted hypernum one tower level");
        }
        while self.pt > 0 {
            let plain = scale10(mantissa, self.expon);
            if plain > CUTOFF_F { break; }
            let (shifted, digits) = split_decimal(float::pow10(plain));
            mantissa = shifted;
            self.expon = digits;
            self.pt -= 1;
            trace!(pt = self.pt, "demoted hypernum one tower level");
        }

        self.mantissa = if negative { -mantissa } else { mantissa };
    }

    /// Tower height: the number of `10^` levels above the mantissa.
    #[inline]
    pub const fn pt(&self) -> u64 {
        self.pt
    }

    /// Signed mantissa, in `[1, 10)` in magnitude unless zero or non-finite.
    #[inline]
    pub const fn mantissa(&self) -> f64 {
        self.mantissa
    }

    #[inline]
    pub const fn expon(&self) -> i64 {
        self.expon
    }

    /// `mantissa * 10^expon`, ignoring the tower.
    #[inline]
    pub fn plain_value(&self) -> f64 {
        scale10(self.mantissa, self.expon)
    }

    /// The value as an `f64`, saturating to a signed infinity above tower
    /// height zero.
    pub fn to_f64(&self) -> f64 {
        if !self.is_finite() || self.pt == 0 { return self.plain_value(); }
        if self.is_negative() { f64::NEG_INFINITY } else { f64::INFINITY }
    }

    /// `log10(|self|)` as a float, for tower heights 0 and 1.
    fn log10_f64(&self) -> f64 {
        match self.pt {
            0 => self.mantissa.abs().log10() + self.expon as f64,
            1 => self.plain_value().abs(),
            _ => f64::INFINITY,
        }
    }

    #[inline]
    pub const fn is_nan(&self) -> bool {
        self.mantissa.is_nan()
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        self.mantissa.is_infinite()
    }

    #[inline]
    pub const fn is_finite(&self) -> bool {
        self.mantissa.is_finite()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Zero and NaN are neither positive nor negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.mantissa > 0.0
    }

    /// `-1` for negative numbers, `1` otherwise (zero counts as positive).
    #[inline]
    pub fn sign(&self) -> i8 {
        if self.is_negative() { -1 } else { 1 }
    }

    pub fn signum(&self) -> Self {
        if self.is_nan() { return Self::NAN; }
        if self.is_zero() { return Self::ZERO; }
        if self.is_negative() { -Self::ONE } else { Self::ONE }
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self { mantissa: self.mantissa.abs(), ..self }
    }

    /// Integral values, counting everything past float precision as integral.
    pub fn is_integer(&self) -> bool {
        if !self.is_finite() { return false; }
        self.pt > 0 || self.expon > PARITY_EXPON_LIMIT || self.plain_value().fract() == 0.0
    }

    #[inline]
    fn with_sign(self, negative: bool) -> Self {
        if self.is_zero() || self.is_nan() { return self; }
        let magnitude = self.mantissa.abs();
        Self { mantissa: if negative { -magnitude } else { magnitude }, ..self }
    }

    /// Compares absolute values. Both operands must not be NaN.
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        self.pt.cmp(&other.pt).then_with(|| {
            // Zero's exponent is 0 by definition, which would otherwise
            // outrank any number with a negative exponent.
            match (self.is_zero(), other.is_zero()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => self.expon.cmp(&other.expon).then_with(|| {
                    self.mantissa.abs()
                        .partial_cmp(&other.mantissa.abs())
                        .unwrap_or(Ordering::Equal)
                }),
            }
        })
    }

    /// The ordering primitive every relational operator is derived from.
    ///
    /// Always `false` when either side is NaN.
    pub fn greater_than(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() { return false; }
        if *self == Self::NEG_INFINITY { return false; }
        if *self == Self::INFINITY { return *other != Self::INFINITY; }
        if *other == Self::NEG_INFINITY { return true; }
        if *other == Self::INFINITY { return false; }
        if self.is_negative() != other.is_negative() {
            return other.is_negative();
        }
        let reverse = self.is_negative();
        match self.cmp_magnitude(other) {
            Ordering::Equal => false,
            Ordering::Greater => !reverse,
            Ordering::Less => reverse,
        }
    }

    #[inline]
    /// Returns the larger of this value and the given one.
    pub fn max(self, other: Self) -> Self {
        if self.greater_than(&other) { self } else { other }
    }

    #[inline]
    /// Returns the smaller of this value and the given one.
    pub fn min(self, other: Self) -> Self {
        if other.greater_than(&self) { self } else { other }
    }

    /// Orders two values by magnitude regardless of sign, larger first.
    /// The flag is set when they had to be swapped.
    fn in_order(self, other: Self) -> (Self, Self, bool) {
        if self.cmp_magnitude(&other) == Ordering::Less {
            (other, self, true)
        } else {
            (self, other, false)
        }
    }

    fn sum(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() { return Self::NAN; }
        if self.is_infinite() && other.is_infinite() && self.is_negative() != other.is_negative() {
            return Self::NAN;
        }
        if self.is_infinite() { return self; }
        if other.is_infinite() { return other; }
        if other.is_zero() { return self; }
        if self.is_zero() { return other; }
        if self.is_negative() != other.is_negative() {
            return self.difference(-other);
        }

        let (x, y, _) = self.in_order(other);
        let plain = x.plain_value() + y.plain_value();
        match x.pt {
            0 if plain.is_normal() => Self::from(plain),
            // Sums below f64 range are taken in logs too.
            0 | 1 => {
                Self::from_log10(addlog(x.log10_f64(), y.log10_f64())).with_sign(x.is_negative())
            }
            _ => {
                debug!(pt = x.pt, "addend negligible beside a taller tower");
                x
            }
        }
    }

    fn difference(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() { return Self::NAN; }
        if self.is_infinite() && other.is_infinite() {
            // Inf - Inf is undefined; Inf - (-Inf) is just Inf.
            return if self.is_negative() == other.is_negative() { Self::NAN } else { self };
        }
        if self.is_infinite() { return self; }
        if other.is_infinite() { return -other; }
        if other.is_zero() { return self; }
        if self.is_zero() { return -other; }
        if self.is_negative() != other.is_negative() {
            return self.sum(-other);
        }
        if self == other { return Self::ZERO; }

        let (x, y, swapped) = self.in_order(other);
        // |self| < |other| flips the sign of the result.
        let negative = self.is_negative() != swapped;
        let plain = self.plain_value() - other.plain_value();
        match x.pt {
            0 if plain.is_normal() => Self::from(plain),
            0 | 1 => {
                let log = sublog(x.log10_f64(), y.log10_f64());
                if log == f64::NEG_INFINITY { return Self::ZERO; }
                Self::from_log10(log).with_sign(negative)
            }
            _ => {
                debug!(pt = x.pt, "subtrahend negligible beside a taller tower");
                x.with_sign(negative)
            }
        }
    }

    fn product(self, other: Self) -> Self {
        self.mul_with_tolerance(other, SCALE)
    }

    /// Multiplies, combining two tower-height-2 factors only when their
    /// log-of-log values are within `scale` of each other; otherwise the
    /// larger factor is returned as is.
    ///
    /// The `*` operator uses [`SCALE`].
    pub fn mul_with_tolerance(self, other: impl Into<Hypernum>, scale: f64) -> Self {
        let other = other.into();
        if self.is_nan() || other.is_nan() { return Self::NAN; }
        if self.is_zero() || other.is_zero() { return Self::ZERO; }
        let negative = self.is_negative() != other.is_negative();
        if self.is_infinite() || other.is_infinite() {
            return Self::INFINITY.with_sign(negative);
        }

        let (a, b, _) = self.in_order(other);
        let magnitude = match (a.pt, b.pt) {
            (0, _) => {
                let (pa, pb) = (a.plain_value().abs(), b.plain_value().abs());
                let product = pa * pb;
                if product > OVERFLOW || ![pa, pb, product].iter().all(|p| p.is_normal()) {
                    Self::from_log10(a.log10_f64() + b.log10_f64())
                } else {
                    Self::from(product)
                }
            }
            (1, 0) | (1, 1) => Self::from_log10(a.log10_f64() + b.log10_f64()),
            (2, 2) if a.plain_value().abs() - b.plain_value().abs() < scale => Self::from_parts(
                2,
                addlog(a.plain_value().abs(), b.plain_value().abs()),
                0,
            ),
            _ => {
                debug!(pt = a.pt, other_pt = b.pt, "factor negligible beside a taller tower");
                a.abs()
            }
        };
        magnitude.with_sign(negative)
    }

    fn quotient(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() { return Self::NAN; }
        if other.is_zero() { return Self::NAN; }
        let negative = self.is_negative() != other.is_negative();
        if self.is_infinite() && other.is_infinite() { return Self::NAN; }
        if self.is_infinite() { return Self::INFINITY.with_sign(negative); }
        if other.is_infinite() || self.is_zero() { return Self::ZERO; }

        let magnitude = match (self.pt, other.pt) {
            (0, 0) => {
                let (pa, pb) = (self.plain_value().abs(), other.plain_value().abs());
                let quotient = pa / pb;
                // Operands or results outside f64 range go through logs.
                if quotient > OVERFLOW || ![pa, pb, quotient].iter().all(|p| p.is_normal()) {
                    Self::from_log10(self.log10_f64() - other.log10_f64())
                } else {
                    Self::from(quotient)
                }
            }
            (1, 0) | (0, 1) | (1, 1) => Self::from_log10(self.log10_f64() - other.log10_f64()),
            (p, q) if p < q => return Self::ZERO,
            (p, q) if p > q => self.abs(),
            _ => match self.plain_value().abs().partial_cmp(&other.plain_value().abs()) {
                Some(Ordering::Less) => return Self::ZERO,
                Some(Ordering::Equal) => Self::ONE,
                _ => self.abs(),
            },
        };
        magnitude.with_sign(negative)
    }
}
