//! Evolve command: n-step distribution evolution.

use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use steady_chain::{ChainError, TransitionMatrix, simulate_steps};

use crate::cli::EvolveArgs;
use crate::request;

/// JSON request body for `steady evolve`.
///
/// `n_steps` is unsigned at the schema level, so negative counts are
/// rejected during deserialization.
#[derive(Debug, Deserialize)]
struct EvolveRequest {
    /// Row-major transition matrix.
    matrix: Vec<Vec<f64>>,
    /// Distribution at step 0. Taken as-is, not validated to sum to 1.
    initial_state: Vec<f64>,
    /// Number of steps to simulate.
    n_steps: u64,
}

/// Run the evolution and print the JSON response to stdout.
pub fn run(args: EvolveArgs) -> Result<()> {
    let body = request::read_body(&args.input)?;
    let response = respond(&body);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Builds the response for one request body; bad input becomes
/// `{"error": ...}`, never a panic.
fn respond(body: &str) -> serde_json::Value {
    match handle(body) {
        Ok(value) => value,
        Err(e) => json!({ "error": e.to_string() }),
    }
}

fn handle(body: &str) -> Result<serde_json::Value, ChainError> {
    let request: EvolveRequest =
        serde_json::from_str(body).map_err(|e| ChainError::MalformedInput {
            reason: e.to_string(),
        })?;
    let n_steps = usize::try_from(request.n_steps).map_err(|_| ChainError::MalformedInput {
        reason: format!("n_steps {} is too large", request.n_steps),
    })?;

    let matrix = TransitionMatrix::from_rows(&request.matrix)?;
    let steps = simulate_steps(&matrix, &request.initial_state, n_steps)?;
    info!(
        n_states = matrix.n_states(),
        n_steps, "distribution evolution simulated"
    );

    Ok(json!({
        "success": true,
        "steps": steps,
    }))
}
