//! Characteristic polynomial parsing.
//!
//! Accepted input is a sum of terms in `s` written without separators other
//! than the signs themselves, e.g. `s^5+s^4+10s^3+72s^2+152s+240`:
//!
//! ```text
//! polynomial = term { ('+' | '-') term }
//! term       = [sign] [number ['*']] 's' ['^' integer]
//!            | [sign] number
//! ```
//!
//! Whitespace is ignored. Repeated powers are summed.

use std::str::FromStr;

use crate::error::{Result, SigflowError};

/// Highest power accepted by the parser.
pub const MAX_DEGREE: usize = 100;

/// Polynomial coefficients, highest power first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Parse polynomial text such as `s^3+3s^2+3s+1`.
    pub fn parse(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(SigflowError::polynomial(text, "empty equation"));
        }

        let terms = split_terms(&compact)
            .into_iter()
            .map(parse_term)
            .collect::<Result<Vec<_>>>()?;

        let max_power = terms.iter().map(|(p, _)| *p).max().unwrap_or(0);
        let mut coefficients = vec![0.0; max_power + 1];
        for (power, coeff) in terms {
            coefficients[max_power - power] += coeff;
        }

        Ok(Self { coefficients })
    }

    /// Coefficients, highest power first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

impl FromStr for Polynomial {
    type Err = SigflowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split before every sign, keeping the sign with its term.
fn split_terms(text: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if (ch == '+' || ch == '-') && i > start {
            terms.push(&text[start..i]);
            start = i;
        }
    }
    terms.push(&text[start..]);
    terms
}

/// Parse one signed term into `(power, coefficient)`.
fn parse_term(term: &str) -> Result<(usize, f64)> {
    let Some(s_pos) = term.find('s') else {
        return Ok((0, parse_number(term, term)?));
    };

    let prefix = &term[..s_pos];
    let suffix = &term[s_pos + 1..];

    let power = if suffix.is_empty() {
        1
    } else if let Some(exp) = suffix.strip_prefix('^') {
        exp.parse::<usize>()
            .map_err(|_| SigflowError::polynomial(term, format!("invalid exponent '{}'", exp)))?
    } else {
        return Err(SigflowError::polynomial(
            term,
            format!("unexpected text after 's': '{}'", suffix),
        ));
    };

    if power > MAX_DEGREE {
        return Err(SigflowError::polynomial(
            term,
            format!("degree {} exceeds the supported maximum of {}", power, MAX_DEGREE),
        ));
    }

    let numeral = prefix.strip_suffix('*').unwrap_or(prefix);
    let coeff = match numeral {
        "" | "+" => 1.0,
        "-" => -1.0,
        _ => parse_number(numeral, term)?,
    };

    Ok((power, coeff))
}

fn parse_number(text: &str, term: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SigflowError::polynomial(
            term,
            format!("'{}' is not a number", text),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_polynomial() {
        let p = Polynomial::parse("s^5+s^4+10s^3+72s^2+152s+240").unwrap();
        assert_eq!(p.degree(), 5);
        assert_eq!(p.coefficients(), &[1.0, 1.0, 10.0, 72.0, 152.0, 240.0]);
    }

    #[test]
    fn test_parse_signs_and_gaps() {
        let p: Polynomial = "-2s^3 + s - 0.5".parse().unwrap();
        assert_eq!(p.coefficients(), &[-2.0, 0.0, 1.0, -0.5]);

        let p = Polynomial::parse("s^2-s+1").unwrap();
        assert_eq!(p.coefficients(), &[1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_parse_explicit_multiplication() {
        let p = Polynomial::parse("3*s^2+2*s+1").unwrap();
        assert_eq!(p.coefficients(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_repeated_powers_are_summed() {
        let p = Polynomial::parse("s^2+s+s+1").unwrap();
        assert_eq!(p.coefficients(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_constant_polynomial() {
        let p = Polynomial::parse("7").unwrap();
        assert_eq!(p.degree(), 0);
        assert_eq!(p.coefficients(), &[7.0]);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "+", "s^", "s^x", "3x^2+1", "s^2s", "abc", "s^2++1"] {
            let err = Polynomial::parse(bad).unwrap_err();
            assert!(
                matches!(err, SigflowError::PolynomialParseError { .. }),
                "{:?} should fail to parse",
                bad
            );
        }
    }

    #[test]
    fn test_degree_limit() {
        assert!(Polynomial::parse("s^1000+1").is_err());
    }
}
