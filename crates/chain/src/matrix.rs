//! Transition matrix construction and validation.

use ndarray::Array2;

use crate::error::ChainError;

/// Absolute tolerance for the row-sum stochasticity check.
pub const ROW_SUM_ATOL: f64 = 1e-8;

/// Relative tolerance for the row-sum stochasticity check.
///
/// Rows pass when `|sum - 1| <= ROW_SUM_ATOL + ROW_SUM_RTOL * 1.0`, the
/// combined absolute/relative comparison used for the stochasticity stage.
pub const ROW_SUM_RTOL: f64 = 1e-8;

/// An n x n row-stochastic transition matrix.
///
/// Each row `i` contains the probabilities of transitioning from state `i`
/// to every state. Construction validates shape and entry domain; row sums
/// are checked separately by [`check_stochastic`](Self::check_stochastic) so
/// the solver can record that stage in its trace.
///
/// Immutable once constructed; one instance is owned by a single solve or
/// simulate invocation.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    p: Array2<f64>,
}

impl TransitionMatrix {
    /// Builds a transition matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::MalformedInput`] if the matrix is empty,
    /// ragged, non-square, or contains non-finite or negative entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ChainError> {
        let n = rows.len();
        if n == 0 {
            return Err(ChainError::MalformedInput {
                reason: "matrix is empty".to_string(),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(ChainError::MalformedInput {
                    reason: format!(
                        "matrix is not square: row {i} has {} entries, expected {n}",
                        row.len()
                    ),
                });
            }
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() {
                    return Err(ChainError::MalformedInput {
                        reason: format!("entry [{i}][{j}] is not finite: {p}"),
                    });
                }
                if p < 0.0 {
                    return Err(ChainError::MalformedInput {
                        reason: format!("entry [{i}][{j}] is negative: {p}"),
                    });
                }
            }
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let p = Array2::from_shape_vec((n, n), flat)
            .expect("shape checked above");
        Ok(Self { p })
    }

    /// Number of states (the matrix dimension n).
    pub fn n_states(&self) -> usize {
        self.p.nrows()
    }

    /// The underlying n x n probability array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.p
    }

    /// The matrix as nested row vectors, for records and JSON output.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        to_rows(&self.p)
    }

    /// The sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.p.rows().into_iter().map(|r| r.sum()).collect()
    }

    /// Checks that every row sums to 1 within tolerance.
    ///
    /// Returns the row sums on success so the caller can record them.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotStochastic`] with the first offending row.
    pub fn check_stochastic(&self) -> Result<Vec<f64>, ChainError> {
        let sums = self.row_sums();
        for (i, &sum) in sums.iter().enumerate() {
            if !row_sum_close_to_one(sum) {
                return Err(ChainError::NotStochastic { row: i, sum });
            }
        }
        Ok(sums)
    }
}

/// Combined absolute/relative comparison of a row sum against 1.
fn row_sum_close_to_one(sum: f64) -> bool {
    (sum - 1.0).abs() <= ROW_SUM_ATOL + ROW_SUM_RTOL
}

/// Converts an array to nested row vectors, for records and JSON output.
pub(crate) fn to_rows(a: &Array2<f64>) -> Vec<Vec<f64>> {
    a.rows().into_iter().map(|r| r.to_vec()).collect()
}
