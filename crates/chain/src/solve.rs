//! Stationary distribution solver.
//!
//! Finds the probability vector `pi` with `pi P = pi` and `sum(pi) = 1` by
//! solving the balance equations with a normalization substitution, and
//! records every intermediate stage for display.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::ChainError;
use crate::fraction::nearest_fraction;
use crate::linalg::solve_dense;
use crate::matrix::{TransitionMatrix, to_rows};
use crate::trace::StageRecord;

/// Verification tolerance on the Euclidean norm of `pi P - pi`.
///
/// Tolerance policy: the stochasticity check uses the looser combined
/// row-sum tolerance ([`crate::matrix::ROW_SUM_ATOL`]); this tighter bound
/// only annotates trust in the solved vector and never fails the call.
pub const VERIFY_TOL: f64 = 1e-10;

/// Largest denominator used for the display fractions in the solution stage.
const FRACTION_MAX_DENOMINATOR: u64 = 1000;

/// A solved stationary distribution with its full five-stage trace.
#[derive(Debug, Clone)]
pub struct StationarySolution {
    /// The stationary distribution `pi`.
    pub stationary: Vec<f64>,
    /// One record per pipeline stage, in execution order.
    pub trace: Vec<StageRecord>,
}

/// Computes the stationary distribution of a transition matrix.
///
/// Runs the five-stage pipeline: stochasticity check, balance-equation
/// setup (`A = P^T - I`), normalization substitution (last equation
/// replaced by `sum(pi) = 1`), dense linear solve, and fixed-point
/// verification. Pure function of its input; each stage appends a
/// [`StageRecord`] to the returned trace.
///
/// # Errors
///
/// * [`ChainError::NotStochastic`] if a row sum deviates from 1 beyond
///   tolerance.
/// * [`ChainError::SingularSystem`] if the normalized system has no unique
///   solution. Reducible chains with multiple stationary distributions end
///   up here: the substitution only yields a unique system for chains with
///   a unique stationary distribution.
pub fn solve_stationary(matrix: &TransitionMatrix) -> Result<StationarySolution, ChainError> {
    let n = matrix.n_states();
    debug!(n_states = n, "solving for stationary distribution");
    let mut trace = Vec::with_capacity(5);

    // Stage 1: every row must sum to 1.
    let row_sums = matrix.check_stochastic()?;
    trace.push(StageRecord::Stochasticity {
        matrix: matrix.to_rows(),
        row_sums,
        valid: true,
    });

    // Stage 2: pi P = pi transposed to act on pi as a column: (P^T - I) pi = 0.
    let pt = matrix.as_array().t().to_owned();
    let a = &pt - &Array2::<f64>::eye(n);
    trace.push(StageRecord::BalanceSetup {
        transposed: to_rows(&pt),
        coefficients: to_rows(&a),
    });

    // Stage 3: the balance system is rank-deficient by one, so the last
    // equation is replaced with sum(pi) = 1.
    let mut a_norm = a;
    a_norm.row_mut(n - 1).fill(1.0);
    let mut b = Array1::zeros(n);
    b[n - 1] = 1.0;
    trace.push(StageRecord::Normalization {
        coefficients: to_rows(&a_norm),
        rhs: b.to_vec(),
    });

    // Stage 4: solve A' pi = b.
    let pi = solve_dense(a_norm, b)?;
    let fractions = pi
        .iter()
        .map(|&x| nearest_fraction(x, FRACTION_MAX_DENOMINATOR))
        .collect();
    trace.push(StageRecord::Solution {
        stationary: pi.to_vec(),
        fractions,
    });

    // Stage 5: check the fixed point. Annotates only, never fails.
    let product = pi.dot(matrix.as_array());
    let error = (&product - &pi).mapv(|d| d * d).sum().sqrt();
    let valid = error < VERIFY_TOL;
    debug!(error, valid, "verified stationary vector");
    trace.push(StageRecord::Verification {
        product: product.to_vec(),
        stationary: pi.to_vec(),
        error,
        valid,
    });

    Ok(StationarySolution {
        stationary: pi.to_vec(),
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn matrix(rows: &[Vec<f64>]) -> TransitionMatrix {
        TransitionMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn two_state_flip() {
        let m = matrix(&[vec![0.0, 1.0], vec![1.0, 0.0]]);
        let solution = solve_stationary(&m).unwrap();
        assert_relative_eq!(solution.stationary[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(solution.stationary[1], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn single_state_is_trivial() {
        let m = matrix(&[vec![1.0]]);
        let solution = solve_stationary(&m).unwrap();
        assert_eq!(solution.stationary.len(), 1);
        assert_relative_eq!(solution.stationary[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn three_state_known_solution() {
        // pi = [3/14, 1/2, 2/7] for this chain.
        let m = matrix(&[
            vec![0.5, 0.3, 0.2],
            vec![0.1, 0.7, 0.2],
            vec![0.2, 0.3, 0.5],
        ]);
        let solution = solve_stationary(&m).unwrap();
        assert_relative_eq!(solution.stationary[0], 3.0 / 14.0, epsilon = 1e-10);
        assert_relative_eq!(solution.stationary[1], 0.5, epsilon = 1e-10);
        assert_relative_eq!(solution.stationary[2], 2.0 / 7.0, epsilon = 1e-10);
    }

    #[test]
    fn not_stochastic_rejected() {
        let m = matrix(&[vec![0.5, 0.49], vec![0.5, 0.5]]);
        let err = solve_stationary(&m).unwrap_err();
        assert!(matches!(err, ChainError::NotStochastic { row: 0, .. }));
    }

    #[test]
    fn identity_is_singular() {
        // Every distribution is stationary for the identity chain, so the
        // normalized system has no unique solution.
        let m = matrix(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let err = solve_stationary(&m).unwrap_err();
        assert!(matches!(err, ChainError::SingularSystem));
    }

    #[test]
    fn trace_has_five_stages_in_order() {
        let m = matrix(&[vec![0.0, 1.0], vec![1.0, 0.0]]);
        let solution = solve_stationary(&m).unwrap();
        let labels: Vec<_> = solution.trace.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            vec![
                "stochastic matrix check",
                "balance equation setup",
                "normalization substitution",
                "linear system solution",
                "fixed point verification",
            ]
        );
    }

    #[test]
    fn balance_setup_records_transpose() {
        let m = matrix(&[vec![0.9, 0.1], vec![0.4, 0.6]]);
        let solution = solve_stationary(&m).unwrap();
        match &solution.trace[1] {
            StageRecord::BalanceSetup {
                transposed,
                coefficients,
            } => {
                assert_abs_diff_eq!(transposed[0][1], 0.4, epsilon = 1e-12);
                assert_abs_diff_eq!(transposed[1][0], 0.1, epsilon = 1e-12);
                // A = P^T - I
                assert_abs_diff_eq!(coefficients[0][0], -0.1, epsilon = 1e-12);
                assert_abs_diff_eq!(coefficients[1][1], -0.4, epsilon = 1e-12);
            }
            other => panic!("expected BalanceSetup, got {other:?}"),
        }
    }

    #[test]
    fn normalization_records_substituted_system() {
        let m = matrix(&[
            vec![0.5, 0.3, 0.2],
            vec![0.1, 0.7, 0.2],
            vec![0.2, 0.3, 0.5],
        ]);
        let solution = solve_stationary(&m).unwrap();
        match &solution.trace[2] {
            StageRecord::Normalization { coefficients, rhs } => {
                assert_eq!(coefficients[2], vec![1.0, 1.0, 1.0]);
                assert_eq!(rhs, &vec![0.0, 0.0, 1.0]);
            }
            other => panic!("expected Normalization, got {other:?}"),
        }
    }

    #[test]
    fn solution_stage_reports_fractions() {
        let m = matrix(&[vec![0.0, 1.0], vec![1.0, 0.0]]);
        let solution = solve_stationary(&m).unwrap();
        match &solution.trace[3] {
            StageRecord::Solution { fractions, .. } => {
                assert_eq!(fractions, &vec!["1/2".to_string(), "1/2".to_string()]);
            }
            other => panic!("expected Solution, got {other:?}"),
        }
    }

    #[test]
    fn verification_stage_passes_for_valid_chain() {
        let m = matrix(&[
            vec![0.5, 0.3, 0.2],
            vec![0.1, 0.7, 0.2],
            vec![0.2, 0.3, 0.5],
        ]);
        let solution = solve_stationary(&m).unwrap();
        match &solution.trace[4] {
            StageRecord::Verification { error, valid, .. } => {
                assert!(*valid, "verification failed with error {error}");
                assert!(*error < VERIFY_TOL);
            }
            other => panic!("expected Verification, got {other:?}"),
        }
    }

    #[test]
    fn stationary_sums_to_one() {
        let m = matrix(&[
            vec![0.2, 0.5, 0.3],
            vec![0.3, 0.2, 0.5],
            vec![0.5, 0.3, 0.2],
        ]);
        let solution = solve_stationary(&m).unwrap();
        let total: f64 = solution.stationary.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }
}
