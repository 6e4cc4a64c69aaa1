//! Gain algebra for signal-flow graph expressions.
//!
//! Gains are opaque algebraic tokens (`g1`, `-h2`, `2`). They are combined
//! with a deliberately small set of rules:
//!
//! - `multiply(a, b)`: `1` is the identity, otherwise `a*b` (no reordering)
//! - `add(a, b)`: `0` is the identity, otherwise `a+b`
//! - `normalize(g)`: factors sorted, literal `1` factors dropped
//! - `simplify(e)`: literal `1` factors dropped from a product
//!
//! No numeric evaluation, distribution or cancellation is performed. Signs
//! embedded in a token (`-h2`) are part of the token text.
//!
//! Loop deduplication compares [`Gain::normalized`] keys, so those rules must
//! stay stable and independent of factor order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The multiplicative identity as text.
pub const UNITY: &str = "1";

/// The additive identity as text.
pub const ZERO: &str = "0";

/// A branch, path or loop gain.
///
/// A gain is either a single numeric literal or an ordered product of
/// factors. Factor order is preserved for display; [`Gain::normalized`]
/// provides the order-independent identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gain {
    /// A bare numeric literal such as `1`, `2` or `-0.5`
    Literal(String),
    /// Ordered product of factors, e.g. `g1*g2*-h1`
    Product(Vec<String>),
}

impl Gain {
    /// The unit gain `1`.
    pub fn one() -> Self {
        Gain::Literal(UNITY.to_string())
    }

    /// Interpret a gain token.
    ///
    /// Text without `*` that reads as a number becomes a [`Gain::Literal`];
    /// anything else is split into product factors on `*`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if !text.contains('*') && is_numeric(text) {
            return Gain::Literal(text.to_string());
        }
        Gain::Product(text.split('*').map(|f| f.trim().to_string()).collect())
    }

    fn from_factors(mut factors: Vec<String>) -> Self {
        match factors.len() {
            0 => Gain::one(),
            1 if is_numeric(&factors[0]) => Gain::Literal(factors.remove(0)),
            _ => Gain::Product(factors),
        }
    }

    /// Check for the literal unit gain.
    pub fn is_one(&self) -> bool {
        matches!(self, Gain::Literal(t) if t == UNITY)
    }

    /// The factors of this gain, in display order.
    pub fn factors(&self) -> Vec<&str> {
        match self {
            Gain::Literal(t) => vec![t.as_str()],
            Gain::Product(f) => f.iter().map(String::as_str).collect(),
        }
    }

    /// Multiply two gains. `1` on either side is elided, nothing else is.
    pub fn multiply(&self, other: &Gain) -> Gain {
        if self.is_one() {
            return other.clone();
        }
        if other.is_one() {
            return self.clone();
        }
        let factors = self
            .factors()
            .into_iter()
            .chain(other.factors())
            .map(str::to_string)
            .collect();
        Gain::Product(factors)
    }

    /// Order-independent identity key used for loop comparison.
    pub fn normalized(&self) -> String {
        let mut parts: Vec<&str> = self
            .factors()
            .into_iter()
            .filter(|f| *f != UNITY)
            .collect();
        if parts.is_empty() {
            return UNITY.to_string();
        }
        parts.sort_unstable();
        parts.join("*")
    }

    /// Drop literal `1` factors from a product. Cosmetic only.
    pub fn simplified(&self) -> Gain {
        match self {
            Gain::Product(f) if f.len() > 1 && f.iter().any(|p| p == UNITY) => {
                Gain::from_factors(f.iter().filter(|p| *p != UNITY).cloned().collect())
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gain::Literal(t) => f.write_str(t),
            Gain::Product(factors) => f.write_str(&factors.join("*")),
        }
    }
}

impl From<String> for Gain {
    fn from(text: String) -> Self {
        Gain::parse(&text)
    }
}

impl From<&str> for Gain {
    fn from(text: &str) -> Self {
        Gain::parse(text)
    }
}

impl From<Gain> for String {
    fn from(gain: Gain) -> Self {
        gain.to_string()
    }
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

/// Textual multiplication with `1` as identity.
pub fn multiply(a: &str, b: &str) -> String {
    if a == UNITY {
        return b.to_string();
    }
    if b == UNITY {
        return a.to_string();
    }
    format!("{}*{}", a, b)
}

/// Textual addition with `0` as identity.
///
/// A right operand that already carries a leading `-` is appended directly,
/// so `add("1", "-(x)")` renders as `1-(x)`.
pub fn add(a: &str, b: &str) -> String {
    if a == ZERO {
        return b.to_string();
    }
    if b == ZERO {
        return a.to_string();
    }
    if b.starts_with('-') {
        format!("{}{}", a, b)
    } else {
        format!("{}+{}", a, b)
    }
}

/// Sort the factors of a product and drop literal `1` factors.
pub fn normalize(gain: &str) -> String {
    Gain::parse(gain).normalized()
}

/// Drop literal `1` factors from a `*`-joined expression.
///
/// Expressions without `*` are returned unchanged. Factors are found by
/// plain splitting, so sums such as `1-(a*b)` are left intact.
pub fn simplify(expr: &str) -> String {
    if !expr.contains('*') {
        return expr.to_string();
    }
    let parts: Vec<&str> = expr.split('*').map(str::trim).collect();
    if !parts.contains(&UNITY) {
        return expr.to_string();
    }
    let kept: Vec<&str> = parts.into_iter().filter(|p| *p != UNITY).collect();
    if kept.is_empty() {
        UNITY.to_string()
    } else {
        kept.join("*")
    }
}
