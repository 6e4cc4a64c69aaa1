//! Routh-Hurwitz stability checking.
//!
//! The check proceeds in stages:
//!
//! 1. Parse the polynomial text into dense coefficients ([`Polynomial`])
//! 2. Necessary condition: every nonzero coefficient shares the leading sign.
//!    If not, the polynomial is reported unstable and no table is built.
//! 3. Build the Routh array ([`RouthTable`])
//! 4. Count sign changes in the first column
//! 5. Estimate right-half-plane pole locations
//!
//! The pole estimates are a heuristic: at each sign change the three
//! first-column entries around it are read as the coefficients of a
//! quadratic and its positive real roots are reported. They are not the
//! roots of the polynomial and should only be presented as approximations.

mod polynomial;
mod table;

pub use polynomial::{Polynomial, MAX_DEGREE};
pub use table::RouthTable;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::Result;

/// Decimal places kept in pole estimates.
pub const POLE_DECIMALS: i32 = 4;

/// Pole label reported when the necessary condition fails.
pub const POLE_NA_LABEL: &str = "N/A - System fails necessary condition";

/// Stability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No sign changes in the first column
    Stable,
    /// One right-half-plane root per sign change
    Unstable { sign_changes: usize },
    /// Coefficients of mixed sign; table not built
    FailsNecessaryCondition,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stable => write!(f, "Stable System - No sign changes in first column"),
            Verdict::Unstable { sign_changes } => write!(
                f,
                "Unstable System - {} sign change(s) in first column",
                sign_changes
            ),
            Verdict::FailsNecessaryCondition => {
                write!(f, "Unstable: Coefficients have different signs")
            }
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of a stability check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouthReport {
    /// Coefficients, highest power first
    pub coefficients: Vec<f64>,
    /// Routh array rows (empty when the necessary condition fails)
    pub table: Vec<Vec<f64>>,
    pub verdict: Verdict,
    pub sign_change_count: usize,
    /// Pole labels for display
    pub poles: Vec<String>,
    /// Estimated right-half-plane pole locations
    #[serde(skip)]
    pub pole_estimates: Vec<f64>,
}

/// Check that all nonzero coefficients share the sign of the leading one.
pub fn necessary_condition_holds(coefficients: &[f64]) -> bool {
    let Some(&lead) = coefficients.first() else {
        return true;
    };
    let lead_sign = sign(lead);
    coefficients
        .iter()
        .all(|&c| c == 0.0 || sign(c) == lead_sign)
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Heuristic right-half-plane pole locations from the first column.
///
/// For every sign change between entries `i-1` and `i` that has an entry
/// `i+1` after it, `(fc[i-1], fc[i], fc[i+1])` are taken as the `(a, b, c)`
/// of `a*x^2 + b*x + c` and its positive real roots are kept, rounded to
/// [`POLE_DECIMALS`] places.
pub fn estimate_rhp_poles(first_column: &[f64]) -> Vec<f64> {
    let scale = 10f64.powi(POLE_DECIMALS);
    let mut poles = Vec::new();

    for i in 1..first_column.len().saturating_sub(1) {
        let (a, b, c) = (first_column[i - 1], first_column[i], first_column[i + 1]);
        if a * b >= 0.0 || a == 0.0 || b == 0.0 {
            continue;
        }
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            continue;
        }
        let root = discriminant.sqrt();
        for r in [(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)] {
            if r > 0.0 {
                poles.push((r * scale).round() / scale);
            }
        }
    }

    poles
}

/// Run the stability check on parsed coefficients.
pub fn check_polynomial(polynomial: &Polynomial) -> Result<RouthReport> {
    let coefficients = polynomial.coefficients().to_vec();

    if !necessary_condition_holds(&coefficients) {
        tracing::debug!(?coefficients, "necessary condition failed");
        return Ok(RouthReport {
            coefficients,
            table: Vec::new(),
            verdict: Verdict::FailsNecessaryCondition,
            sign_change_count: 0,
            poles: vec![POLE_NA_LABEL.to_string()],
            pole_estimates: Vec::new(),
        });
    }

    let table = RouthTable::build(&coefficients)?;
    let sign_changes = table.sign_changes();
    let pole_estimates = estimate_rhp_poles(&table.first_column());
    let verdict = if sign_changes == 0 {
        Verdict::Stable
    } else {
        Verdict::Unstable { sign_changes }
    };
    tracing::debug!(degree = polynomial.degree(), sign_changes, "routh table built");

    Ok(RouthReport {
        coefficients,
        table: table.into_rows(),
        verdict,
        sign_change_count: sign_changes,
        poles: pole_estimates
            .iter()
            .map(|p| format!("{:.*}", POLE_DECIMALS as usize, p))
            .collect(),
        pole_estimates,
    })
}

/// Parse polynomial text and run the stability check.
pub fn check_stability(text: &str) -> Result<RouthReport> {
    let polynomial = Polynomial::parse(text)?;
    check_polynomial(&polynomial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SigflowError;
    use approx::assert_relative_eq;

    #[test]
    fn test_stable_third_order() {
        let report = check_stability("s^3+3s^2+3s+1").unwrap();
        assert_eq!(report.verdict, Verdict::Stable);
        assert_eq!(report.sign_change_count, 0);
        assert!(report.poles.is_empty());
        assert_eq!(report.table.len(), 4);
        assert_relative_eq!(report.table[2][0], 8.0 / 3.0);
        assert_eq!(
            report.verdict.to_string(),
            "Stable System - No sign changes in first column"
        );
    }

    #[test]
    fn test_necessary_condition_fast_path() {
        let report = check_stability("s^2-s+1").unwrap();
        assert_eq!(report.verdict, Verdict::FailsNecessaryCondition);
        assert!(report.table.is_empty());
        assert_eq!(report.poles, vec![POLE_NA_LABEL.to_string()]);
        assert_eq!(
            report.verdict.to_string(),
            "Unstable: Coefficients have different signs"
        );
    }

    #[test]
    fn test_zero_coefficients_do_not_fail_condition() {
        assert!(necessary_condition_holds(&[1.0, 0.0, 2.0]));
        assert!(necessary_condition_holds(&[-1.0, -2.0, 0.0]));
        assert!(!necessary_condition_holds(&[1.0, -2.0]));
    }

    #[test]
    fn test_unstable_with_sign_changes() {
        // s^3 + s^2 + 2s + 8, first column [1, 1, -6, 8]
        let report = check_stability("s^3+s^2+2s+8").unwrap();
        assert_eq!(report.verdict, Verdict::Unstable { sign_changes: 2 });
        assert_eq!(
            report.verdict.to_string(),
            "Unstable System - 2 sign change(s) in first column"
        );
        // Only the change at row 2 has a following row: 1x^2 - 6x + 8
        assert_eq!(report.pole_estimates, vec![4.0, 2.0]);
        assert_eq!(report.poles, vec!["4.0000", "2.0000"]);
    }

    #[test]
    fn test_pole_estimate_rounding() {
        // x^2 - 3x + 1 -> (3 ± √5) / 2
        let poles = estimate_rhp_poles(&[1.0, -3.0, 1.0]);
        assert_eq!(poles, vec![2.618, 0.382]);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = check_stability("s^2+2q+1").unwrap_err();
        assert!(matches!(err, SigflowError::PolynomialParseError { .. }));
    }

    #[test]
    fn test_degenerate_case_is_reported() {
        let err = check_stability("s^2+1").unwrap_err();
        assert!(matches!(err, SigflowError::RouthDegenerateCase { .. }));
    }

    #[test]
    fn test_degenerate_branches_from_text() {
        let err = check_stability("s^3+0.0000001s^2+1e300s+1e300").unwrap_err();
        assert!(matches!(err, SigflowError::RouthDegenerateCase { row: 3, .. }));

        let err = check_stability("s^2+s").unwrap_err();
        assert!(matches!(err, SigflowError::RouthDegenerateCase { row: 2, .. }));
    }

    #[test]
    fn test_report_json_shape() {
        let report = check_stability("s^2+3s+2").unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["signChangeCount"], 0);
        assert_eq!(v["verdict"], "Stable System - No sign changes in first column");
        assert_eq!(v["table"][0], serde_json::json!([1.0, 2.0]));
        assert!(v.get("poleEstimates").is_none());
    }
}
