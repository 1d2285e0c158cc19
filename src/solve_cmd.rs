//! Solve command: stationary distribution with a full derivation trace.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use steady_chain::{ChainError, StageRecord, TransitionMatrix, solve_stationary};

use crate::cli::SolveArgs;
use crate::request;

/// JSON request body for `steady solve`.
#[derive(Debug, Deserialize)]
struct SolveRequest {
    /// Row-major transition matrix.
    matrix: Vec<Vec<f64>>,
}

/// One trace stage as emitted in the response, with its pipeline position.
#[derive(Serialize)]
struct StageOut<'a> {
    step: usize,
    title: &'static str,
    #[serde(flatten)]
    record: &'a StageRecord,
}

/// Run the solve pipeline and print the JSON response to stdout.
pub fn run(args: SolveArgs) -> Result<()> {
    let body = request::read_body(&args.input)?;
    let response = respond(&body);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Builds the response for one request body.
///
/// Schema violations and solver errors both become `{"error": ...}`; bad
/// input never panics and never produces a partial result.
fn respond(body: &str) -> serde_json::Value {
    match handle(body) {
        Ok(value) => value,
        Err(e) => json!({ "error": e.to_string() }),
    }
}

fn handle(body: &str) -> Result<serde_json::Value, ChainError> {
    let request: SolveRequest =
        serde_json::from_str(body).map_err(|e| ChainError::MalformedInput {
            reason: e.to_string(),
        })?;
    let matrix = TransitionMatrix::from_rows(&request.matrix)?;
    let solution = solve_stationary(&matrix)?;
    info!(n_states = matrix.n_states(), "stationary distribution solved");

    let steps: Vec<StageOut<'_>> = solution
        .trace
        .iter()
        .enumerate()
        .map(|(i, record)| StageOut {
            step: i + 1,
            title: record.label(),
            record,
        })
        .collect();
    Ok(json!({
        "success": true,
        "steady_state": solution.stationary,
        "steps": steps,
    }))
}
