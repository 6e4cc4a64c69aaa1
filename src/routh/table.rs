//! Routh array construction.

use crate::error::{Result, SigflowError};

/// A Routh array, one row per power from `s^n` down to `s^0`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouthTable {
    rows: Vec<Vec<f64>>,
    /// Rows replaced by the derivative of the row above
    substituted: Vec<usize>,
}

impl RouthTable {
    /// Build the array from coefficients ordered highest power first.
    ///
    /// Row 0 holds the even-index coefficients and row 1 the odd-index ones.
    /// Every later row `i` is computed from rows `i-1` and `i-2`:
    ///
    /// ```text
    /// r[i][j] = (a*d - b*c) / a
    /// a = r[i-1][0], b = r[i-1][j+1], c = r[i-2][0], d = r[i-2][j+1]
    /// ```
    ///
    /// with missing entries read as zero. A computed row that is entirely
    /// zero is replaced once by the derivative of the row above it. A zero
    /// pivot or non-finite entry fails with
    /// [`SigflowError::RouthDegenerateCase`].
    ///
    /// The derivative of a single-entry row is empty, so a zero row below it
    /// is also rejected. This is the case of a root at the origin: any
    /// polynomial with a zero constant term, such as `s^2+s`, fails here.
    pub fn build(coefficients: &[f64]) -> Result<Self> {
        let n = coefficients.len();
        if n == 0 {
            return Err(SigflowError::degenerate(0, "no coefficients"));
        }

        let even: Vec<f64> = coefficients.iter().step_by(2).copied().collect();
        let odd: Vec<f64> = coefficients.iter().skip(1).step_by(2).copied().collect();

        let mut rows = vec![even, odd];
        rows.truncate(n);
        let mut substituted = Vec::new();

        for i in 2..n {
            let prev = &rows[i - 1];
            let prev2 = &rows[i - 2];
            let width = prev2.len().saturating_sub(1);

            let mut row = Vec::with_capacity(width);
            if width > 0 {
                let a = match prev.first() {
                    Some(&a) if a != 0.0 => a,
                    _ => {
                        return Err(SigflowError::degenerate(
                            i,
                            format!("zero pivot in first column of row {}", i - 1),
                        ))
                    }
                };
                let c = prev2[0];
                for j in 0..width {
                    let b = prev.get(j + 1).copied().unwrap_or(0.0);
                    let d = prev2.get(j + 1).copied().unwrap_or(0.0);
                    let value = (a * d - b * c) / a;
                    if !value.is_finite() {
                        return Err(SigflowError::degenerate(
                            i,
                            format!("non-finite entry in column {}", j),
                        ));
                    }
                    row.push(value);
                }
            }

            if row.iter().all(|v| *v == 0.0) {
                row = derivative(prev);
                if row.iter().all(|v| *v == 0.0) {
                    return Err(SigflowError::degenerate(
                        i,
                        "zero row and auxiliary polynomial derivative also vanishes",
                    ));
                }
                tracing::warn!(row = i, "zero row replaced by auxiliary polynomial derivative");
                substituted.push(i);
            }

            rows.push(row);
        }

        Ok(Self { rows, substituted })
    }

    /// All rows, highest power first.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Indices of rows filled from an auxiliary polynomial.
    pub fn substituted_rows(&self) -> &[usize] {
        &self.substituted
    }

    /// Leading entry of every row.
    pub fn first_column(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.first().copied()).collect()
    }

    /// Number of strict sign changes down the first column.
    pub fn sign_changes(&self) -> usize {
        self.first_column()
            .windows(2)
            .filter(|w| w[0] * w[1] < 0.0)
            .count()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

/// Derivative of a row read as descending-power polynomial coefficients.
///
/// `row[k] * (len - k - 1)`, dropping the last (constant) entry.
fn derivative(row: &[f64]) -> Vec<f64> {
    let len = row.len();
    row.iter()
        .enumerate()
        .take(len.saturating_sub(1))
        .map(|(k, v)| v * (len - k - 1) as f64)
        .collect()
}
