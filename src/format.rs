//! Number formatting for tick labels.
//!
//! Formats are written the way plot authors usually write them: `g`, `.3g`, `.2f`, `e`,
//! `.1e`, `d`. The `g` family follows the C `%g` rules (significant digits, switch to
//! exponent form for very large or small magnitudes, trailing zeros trimmed).

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

const DEFAULT_PRECISION: usize = 6;

/// A parsed numeric display format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// `%g` with the given number of significant digits
    General(usize),
    /// Fixed number of decimals
    Fixed(usize),
    /// Scientific notation with the given number of decimals
    Exponent(usize),
    /// Rounded integer
    Integer,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::General(DEFAULT_PRECISION)
    }
}

impl FromStr for NumberFormat {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidNumberFormat {
            spec: spec.to_string(),
        };
        let s = spec.trim();
        let (precision, kind) = match s.strip_prefix('.') {
            Some(rest) => {
                let split = rest.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
                let (digits, kind) = rest.split_at(split);
                let p: usize = digits.parse().map_err(|_| invalid())?;
                (Some(p), kind)
            }
            None => (None, s),
        };
        match kind {
            "g" | "G" => Ok(NumberFormat::General(
                precision.unwrap_or(DEFAULT_PRECISION).max(1),
            )),
            "f" | "F" => Ok(NumberFormat::Fixed(precision.unwrap_or(DEFAULT_PRECISION))),
            "e" | "E" => Ok(NumberFormat::Exponent(
                precision.unwrap_or(DEFAULT_PRECISION),
            )),
            "d" if precision.is_none() => Ok(NumberFormat::Integer),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::General(p) if *p == DEFAULT_PRECISION => write!(f, "g"),
            NumberFormat::General(p) => write!(f, ".{p}g"),
            NumberFormat::Fixed(p) => write!(f, ".{p}f"),
            NumberFormat::Exponent(p) => write!(f, ".{p}e"),
            NumberFormat::Integer => write!(f, "d"),
        }
    }
}

impl NumberFormat {
    /// Format a value for display
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return non_finite(value);
        }
        match *self {
            NumberFormat::General(p) => format_general(value, p),
            NumberFormat::Fixed(p) => format!("{value:.p$}"),
            NumberFormat::Exponent(p) => format_exponent(value, p),
            NumberFormat::Integer => format!("{}", value.round() as i64),
        }
    }

    /// Round a value to what this format would display
    pub fn round_trip(&self, value: f64) -> f64 {
        self.format(value).parse().unwrap_or(value)
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Split Rust's `{:e}` output into mantissa and exponent
fn split_exponent(s: &str) -> (&str, i32) {
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn exponent_suffix(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exp.abs())
}

fn format_exponent(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$e}");
    let (mantissa, exp) = split_exponent(&s);
    format!("{mantissa}{}", exponent_suffix(exp))
}

fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = precision.saturating_sub(1);
    // Rounding to significant digits first decides the exponent, as %g does
    let sci = format!("{value:.digits$e}");
    let (mantissa, exp) = split_exponent(&sci);
    if exp < -4 || exp >= precision as i32 {
        format!("{}{}", trim_fraction(mantissa), exponent_suffix(exp))
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        trim_fraction(&fixed).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(v: f64) -> String {
        NumberFormat::default().format(v)
    }

    #[test]
    fn general_matches_printf() {
        assert_eq!(g(0.0), "0");
        assert_eq!(g(100.0), "100");
        assert_eq!(g(0.5), "0.5");
        assert_eq!(g(-2.5), "-2.5");
        assert_eq!(g(1e-5), "1e-05");
        assert_eq!(g(1_000_000.0), "1e+06");
        assert_eq!(g(123_456.0), "123456");
        assert_eq!(g(0.1 + 0.2), "0.3");
        assert_eq!(g(0.0001), "0.0001");
    }

    #[test]
    fn general_precision() {
        let f: NumberFormat = ".3g".parse().unwrap();
        assert_eq!(f.format(3.14159), "3.14");
        assert_eq!(f.format(1234.0), "1.23e+03");
    }

    #[test]
    fn fixed_and_exponent() {
        let f: NumberFormat = ".2f".parse().unwrap();
        assert_eq!(f.format(2.0), "2.00");
        let e: NumberFormat = ".1e".parse().unwrap();
        assert_eq!(e.format(12345.0), "1.2e+04");
        let d: NumberFormat = "d".parse().unwrap();
        assert_eq!(d.format(4.6), "5");
    }

    #[test]
    fn invalid_specs_rejected() {
        for spec in ["", "x", ".f3", ".2d", "%g"] {
            assert_eq!(
                spec.parse::<NumberFormat>(),
                Err(ConfigError::InvalidNumberFormat {
                    spec: spec.to_string()
                }),
                "spec {spec:?}"
            );
        }
    }

    #[test]
    fn round_trip_rounds_to_display() {
        let f = NumberFormat::default();
        assert_eq!(f.round_trip(0.123456789), 0.123457);
        assert_eq!(f.round_trip(97.0), 97.0);
    }
}
