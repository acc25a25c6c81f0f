use thiserror::Error;

use crate::{constants::PARSE_LEADING_DIGITS, Hypernum};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Error)]
/// An error that can occur when parsing a [`Hypernum`].
pub enum FromStrError {
    /// Encountered malformed input. Holds the byte index where parsing failed.
    #[error("malformed input at character {0}")]
    MalformedInput(usize),
}

#[derive(Copy, Clone)]
pub struct ParseHead<'s> {
    input: &'s str,
    index: usize,
}

impl<'s> ParseHead<'s> {
    pub fn new(input: &'s str) -> Self {
        Self { input, index: 0 }
    }

    fn error(&self) -> FromStrError {
        FromStrError::MalformedInput(self.index)
    }

    fn advance(&mut self, len: usize) -> &'s str {
        let (taken, rest) = self.input.split_at(len);
        self.input = rest;
        self.index += len;
        taken
    }

    fn chomp(&mut self, pattern: &str) -> Result<(), FromStrError> {
        if !self.input.starts_with(pattern) {
            return Err(self.error());
        }
        self.advance(pattern.len());
        Ok(())
    }

    fn chomp_any(&mut self, patterns: &[&str]) -> Result<(), FromStrError> {
        patterns
            .iter()
            .find_map(|pattern| self.chomp(pattern).ok())
            .ok_or(self.error())
    }

    /// Takes a non-empty run of ASCII digits.
    fn digits(&mut self) -> Result<&'s str, FromStrError> {
        let len = self
            .input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.input.len());
        if len == 0 {
            return Err(self.error());
        }
        Ok(self.advance(len))
    }

    fn assert(&self, f: impl FnOnce(&str) -> bool) -> Result<(), FromStrError> {
        f(self.input).then_some(()).ok_or(self.error())
    }
}

// Parsing rules:
// <root> ::= "NaN" | "Inf" | "-Inf" | <tower>? <sign>? <dec> <exp>?
// <tower> ::= <int> ("p" | "P")
// <sign> ::= "+" | "-"
// <dec> ::= <int> ("." <int>?)?
// <exp> ::= ("e" | "E" | "⏨") <sign>? <int>
// <int> ::= DIGIT+

pub fn parse_hypernum(input: &mut ParseHead<'_>) -> Result<Hypernum, FromStrError> {
    for (token, value) in [
        ("NaN", Hypernum::NAN),
        ("Inf", Hypernum::INFINITY),
        ("-Inf", Hypernum::NEG_INFINITY),
    ] {
        if input.chomp(token).is_ok() {
            input.assert(str::is_empty)?;
            return Ok(value);
        }
    }

    let pt = parse_tower(input)?;
    let is_negative = parse_sign(input);

    let int_index = input.index;
    let int = input.digits()?;
    let frac = if input.chomp(".").is_ok() {
        input.digits().unwrap_or("")
    } else {
        ""
    };
    let explicit_exp = parse_exp(input)?;
    input.assert(str::is_empty)?;

    let (mantissa, expon) = decimal_parts(int, frac)
        .ok_or(FromStrError::MalformedInput(int_index))?;
    let mantissa = if is_negative { -mantissa } else { mantissa };
    Ok(Hypernum::from_parts(pt, mantissa, expon.saturating_add(explicit_exp)))
}

/// `<int>p`, if present. Rewinds when the digits turn out to be the mantissa.
fn parse_tower(input: &mut ParseHead<'_>) -> Result<u64, FromStrError> {
    let save = *input;
    let Ok(digits) = input.digits() else {
        return Ok(0);
    };
    if input.chomp_any(&["p", "P"]).is_err() {
        *input = save;
        return Ok(0);
    }
    digits.parse().map_err(|_| save.error())
}

fn parse_sign(input: &mut ParseHead<'_>) -> bool {
    if input.chomp("-").is_ok() {
        return true;
    }
    let _ = input.chomp("+");
    false
}

fn parse_exp(input: &mut ParseHead<'_>) -> Result<i64, FromStrError> {
    if input.chomp_any(&["e", "E", "⏨"]).is_err() {
        return Ok(0);
    }
    let is_negative = parse_sign(input);
    let index = input.index;
    let magnitude: i64 = input
        .digits()?
        .parse()
        .map_err(|_| FromStrError::MalformedInput(index))?;
    Ok(if is_negative { -magnitude } else { magnitude })
}

/// Turns the decimal digits into an unnormalized `(mantissa, expon)` pair.
///
/// Integer parts too large for an `f64` keep only their leading digits, with
/// the rest folded into the exponent.
fn decimal_parts(int: &str, frac: &str) -> Option<(f64, i64)> {
    let value: f64 = format!("{int}.{frac}0").parse().ok()?;
    if value.is_finite() {
        return Some((value, 0));
    }
    let significant = int.trim_start_matches('0');
    let leading = &significant[..PARSE_LEADING_DIGITS.min(significant.len())];
    let dropped = (significant.len() - leading.len()) as i64;
    Some((leading.parse().ok()?, dropped))
}
