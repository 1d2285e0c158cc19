//! Stationary distributions and state-probability evolution for finite,
//! discrete-time Markov chains.
//!
//! The solver validates that the input matrix is row-stochastic, builds the
//! balance equations `(P^T - I) pi = 0`, replaces the redundant last
//! equation with the normalization constraint `sum(pi) = 1`, solves the
//! resulting dense system, and verifies the fixed point — recording every
//! stage so a caller can display the full derivation.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//!  │   matrix     │────▶│     solve      │────▶│    trace     │
//!  │  (validate)  │     │  (balance eqs) │     │  (5 stages)  │
//!  └──────────────┘     └────────────────┘     └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use steady_chain::{TransitionMatrix, solve_stationary};
//!
//! let matrix = TransitionMatrix::from_rows(&[
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//! ]).unwrap();
//!
//! let solution = solve_stationary(&matrix).unwrap();
//! assert!((solution.stationary[0] - 0.5).abs() < 1e-10);
//! assert_eq!(solution.trace.len(), 5);
//! ```
//!
//! Every operation is a pure function of its inputs: no shared state, no
//! I/O, and concurrent calls need no locking.

pub mod error;
pub mod evolve;
pub mod fraction;
mod linalg;
pub mod matrix;
pub mod solve;
pub mod trace;

pub use error::ChainError;
pub use evolve::{StepRecord, simulate_steps};
pub use fraction::nearest_fraction;
pub use matrix::TransitionMatrix;
pub use solve::{StationarySolution, solve_stationary};
pub use trace::StageRecord;
