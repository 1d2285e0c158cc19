//! Dense linear solve for the normalized balance system.
//!
//! A plain LU factorization with partial pivoting is all the solver needs:
//! the systems are small (one per solve call, n x n for n states) and dense.

use ndarray::{Array1, Array2};

use crate::error::ChainError;

/// Pivots with magnitude at or below this are treated as singular.
const PIVOT_EPS: f64 = 1e-12;

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
///
/// Consumes its arguments; both are scratch space for the elimination.
///
/// # Errors
///
/// Returns [`ChainError::SingularSystem`] when no usable pivot exists in
/// some column, i.e. the system has no unique solution.
pub(crate) fn solve_dense(
    mut a: Array2<f64>,
    mut b: Array1<f64>,
) -> Result<Array1<f64>, ChainError> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    // Forward elimination.
    for col in 0..n {
        // Partial pivoting: pick the row with the largest magnitude in this column.
        let mut pivot_row = col;
        let mut pivot_mag = a[[col, col]].abs();
        for row in (col + 1)..n {
            let mag = a[[row, col]].abs();
            if mag > pivot_mag {
                pivot_row = row;
                pivot_mag = mag;
            }
        }
        if pivot_mag <= PIVOT_EPS {
            return Err(ChainError::SingularSystem);
        }
        if pivot_row != col {
            for j in 0..n {
                let tmp = a[[col, j]];
                a[[col, j]] = a[[pivot_row, j]];
                a[[pivot_row, j]] = tmp;
            }
            b.swap(col, pivot_row);
        }

        let pivot = a[[col, col]];
        for row in (col + 1)..n {
            let factor = a[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                a[[row, j]] -= factor * a[[col, j]];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row];
        for j in (row + 1)..n {
            sum -= a[[row, j]] * x[j];
        }
        x[row] = sum / a[[row, row]];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn solve_identity() {
        let a = Array2::eye(3);
        let b = array![1.0, 2.0, 3.0];
        let x = solve_dense(a, b).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_2x2() {
        // x + y = 3, x - y = 1 => x = 2, y = 1
        let a = array![[1.0, 1.0], [1.0, -1.0]];
        let b = array![3.0, 1.0];
        let x = solve_dense(a, b).unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_requires_pivoting() {
        // Zero in the top-left forces a row swap.
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![5.0, 7.0];
        let x = solve_dense(a, b).unwrap();
        assert_abs_diff_eq!(x[0], 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_3x3_general() {
        let a = array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let b = array![8.0, -11.0, -3.0];
        let x = solve_dense(a, b).unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-10);
    }

    #[test]
    fn solve_singular_zero_row() {
        let a = array![[0.0, 0.0], [1.0, 1.0]];
        let b = array![0.0, 1.0];
        let result = solve_dense(a, b);
        assert!(matches!(result, Err(ChainError::SingularSystem)));
    }

    #[test]
    fn solve_singular_dependent_rows() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];
        let result = solve_dense(a, b);
        assert!(matches!(result, Err(ChainError::SingularSystem)));
    }

    #[test]
    fn solve_1x1() {
        let a = array![[4.0]];
        let b = array![2.0];
        let x = solve_dense(a, b).unwrap();
        assert_abs_diff_eq!(x[0], 0.5, epsilon = 1e-12);
    }
}
