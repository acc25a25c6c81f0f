use core::fmt;

use crate::{
    float::{pow10, scale10},
    Hypernum,
};

/// Thresholds for the text renderings of a [`Hypernum`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Towers at least this tall are shown as `N PT mantissa e expon`
    /// instead of nested `10^(...)`.
    pub str_pt_limit: u64,
    /// At tower height zero, exponents below this (in magnitude) are written
    /// out as plain decimals.
    pub str_exp_limit: i64,
    /// At tower height one, exponents below this are written as
    /// `m * 10^d` with the exponent spelled out in full.
    pub str_p1_exp_limit: i64,
    /// LaTeX counterpart of `str_pt_limit`.
    pub latex_pt_limit: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            str_pt_limit: 6,
            str_exp_limit: 16,
            str_p1_exp_limit: 11,
            latex_pt_limit: 3,
        }
    }
}

/// `printf`-style `%g`: six significant digits, trailing zeros dropped,
/// scientific notation outside `1e-4..1e6`.
fn general(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    let scientific = format!("{x:.5e}");
    let (digits, exp) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        return trim_zeros(format!("{x:.decimals$}"));
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{sign}{:02}", trim_zeros(digits.to_owned()), exp.abs())
}

fn trim_zeros(mut s: String) -> String {
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

/// Splits the plain value `l` of a height-1 number into `(m, d)` with
/// `10^l = m * 10^d`.
fn split_log(mantissa: f64, expon: i64) -> (f64, i64) {
    let log = scale10(mantissa, expon);
    let digits = log.floor();
    (pow10(log - digits), digits as i64)
}

/// Renders a nonnegative `(pt, mantissa, expon)` triple in the short form.
pub fn render(pt: u64, mantissa: f64, expon: i64, config: &DisplayConfig) -> String {
    if pt == 0 {
        if expon.abs() < config.str_exp_limit {
            return format!("{}", scale10(mantissa, expon));
        }
        return format!("{} * 10^{expon}", general(mantissa));
    }
    if pt == 1 && expon < config.str_p1_exp_limit {
        let (m, d) = split_log(mantissa, expon);
        return format!("{} * 10^{d}", general(m));
    }
    if pt < config.str_pt_limit {
        return format!("10^({})", render(pt - 1, mantissa, expon, config));
    }
    format!("{pt} PT {mantissa:.6}e{expon}")
}

fn latex_scinote(mantissa: f64, expon: i64) -> String {
    format!("{}\\times 10^{{{expon}}}", general(mantissa))
}

/// LaTeX counterpart of [`render`], without the surrounding `$`.
pub fn render_latex(pt: u64, mantissa: f64, expon: i64, config: &DisplayConfig) -> String {
    if pt == 0 {
        if expon.abs() < config.str_exp_limit {
            return format!("{}", scale10(mantissa, expon));
        }
        return latex_scinote(mantissa, expon);
    }
    if pt == 1 && expon < config.str_p1_exp_limit {
        let (m, d) = split_log(mantissa, expon);
        return latex_scinote(m, d);
    }
    if pt < config.latex_pt_limit {
        return format!("10^{{{}}}", render_latex(pt - 1, mantissa, expon, config));
    }
    format!("{pt} {{\\rm \\ PT\\ }} {}", latex_scinote(mantissa, expon))
}

impl Hypernum {
    /// The short form with custom thresholds. `Display` uses the defaults.
    pub fn to_string_with(&self, config: &DisplayConfig) -> String {
        if let Some(special) = self.special_name() {
            return special.to_owned();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{}", render(self.pt, self.mantissa.abs(), self.expon, config))
    }

    /// Math-markup rendering, wrapped in `$...$`.
    pub fn to_latex(&self) -> String {
        self.to_latex_with(&DisplayConfig::default())
    }

    pub fn to_latex_with(&self, config: &DisplayConfig) -> String {
        if self.is_nan() {
            return "$\\rm NaN$".to_owned();
        }
        if self.is_infinite() {
            return if self.is_negative() { "$-\\infty$" } else { "$\\infty$" }.to_owned();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("${sign}{}$", render_latex(self.pt, self.mantissa.abs(), self.expon, config))
    }

    /// The exact `<pt>p<mantissa>e<expon>` form, which parses back to the
    /// same value.
    pub fn to_tower_notation(&self) -> String {
        if let Some(special) = self.special_name() {
            return special.to_owned();
        }
        if self.pt == 0 {
            return format!("{}e{}", self.mantissa, self.expon);
        }
        format!("{}p{}e{}", self.pt, self.mantissa, self.expon)
    }

    fn special_name(&self) -> Option<&'static str> {
        if self.is_nan() {
            Some("NaN")
        } else if *self == Self::INFINITY {
            Some("Inf")
        } else if *self == Self::NEG_INFINITY {
            Some("-Inf")
        } else {
            None
        }
    }
}

impl fmt::Display for Hypernum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&DisplayConfig::default()))
    }
}
