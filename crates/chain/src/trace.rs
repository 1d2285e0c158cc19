//! Stage records for the solver's pedagogical trace.

use serde::Serialize;

/// One record per solver pipeline stage.
///
/// Records carry the intermediate matrices and vectors relevant to their
/// stage, as plain nested rows so they serialize to the JSON shape the
/// caller displays. They exist purely for observability: later stages
/// recompute from the canonical matrix and never read earlier records.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageRecord {
    /// Stage 1: row sums compared against 1.
    Stochasticity {
        /// The transition matrix under test.
        matrix: Vec<Vec<f64>>,
        /// Sum of each row.
        row_sums: Vec<f64>,
        /// Whether every row passed the tolerance check.
        valid: bool,
    },

    /// Stage 2: the balance equations `(P^T - I) pi = 0`.
    BalanceSetup {
        /// The transposed transition matrix `P^T`.
        transposed: Vec<Vec<f64>>,
        /// The coefficient matrix `A = P^T - I`.
        coefficients: Vec<Vec<f64>>,
    },

    /// Stage 3: the redundant last balance equation replaced by `sum(pi) = 1`.
    Normalization {
        /// `A` with its last row forced to all ones.
        coefficients: Vec<Vec<f64>>,
        /// Right-hand side: zeros with a trailing 1.
        rhs: Vec<f64>,
    },

    /// Stage 4: the solved stationary vector.
    Solution {
        /// The stationary distribution.
        stationary: Vec<f64>,
        /// Each component as the nearest fraction with denominator <= 1000.
        fractions: Vec<String>,
    },

    /// Stage 5: fixed-point check of `pi P` against `pi`.
    Verification {
        /// The product `pi P`.
        product: Vec<f64>,
        /// The stationary vector being verified.
        stationary: Vec<f64>,
        /// Euclidean norm of `pi P - pi`.
        error: f64,
        /// Whether the error is below the verification tolerance.
        valid: bool,
    },
}

impl StageRecord {
    /// Human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            StageRecord::Stochasticity { .. } => "stochastic matrix check",
            StageRecord::BalanceSetup { .. } => "balance equation setup",
            StageRecord::Normalization { .. } => "normalization substitution",
            StageRecord::Solution { .. } => "linear system solution",
            StageRecord::Verification { .. } => "fixed point verification",
        }
    }
}
