//! State-probability evolution over a fixed number of steps.

use ndarray::Array1;
use serde::Serialize;
use tracing::debug;

use crate::error::ChainError;
use crate::matrix::TransitionMatrix;

/// One snapshot of the evolving distribution.
///
/// Entries are independent copies; mutating one recorded state never
/// affects another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Step index; 0 is the caller-supplied initial distribution.
    pub step: usize,
    /// The distribution after `step` applications of the transition matrix.
    pub state: Vec<f64>,
    /// Human-readable label for display.
    pub description: String,
}

/// Evolves a distribution by repeated left-multiplication with `P`.
///
/// Records the initial distribution as step 0, then `next = current * P`
/// for exactly `steps` iterations. No convergence check and no early exit:
/// the result always has `steps + 1` entries. The initial distribution is
/// taken as-is; whether it is a proper probability vector is the caller's
/// responsibility.
///
/// # Errors
///
/// Returns [`ChainError::DimensionMismatch`] if `initial` does not have one
/// entry per state.
pub fn simulate_steps(
    matrix: &TransitionMatrix,
    initial: &[f64],
    steps: usize,
) -> Result<Vec<StepRecord>, ChainError> {
    let n = matrix.n_states();
    if initial.len() != n {
        return Err(ChainError::DimensionMismatch {
            expected: n,
            got: initial.len(),
        });
    }
    debug!(n_states = n, steps, "simulating distribution evolution");

    let mut records = Vec::with_capacity(steps + 1);
    let mut current = Array1::from(initial.to_vec());
    records.push(StepRecord {
        step: 0,
        state: current.to_vec(),
        description: "initial distribution".to_string(),
    });

    for i in 1..=steps {
        current = current.dot(matrix.as_array());
        let plural = if i > 1 { "s" } else { "" };
        records.push(StepRecord {
            step: i,
            state: current.to_vec(),
            description: format!("after {i} step{plural}"),
        });
    }

    Ok(records)
}
