use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Steady step-by-step Markov chain analyzer.
#[derive(Parser)]
#[command(
    name = "steady",
    version,
    about = "Step-by-step steady-state analyzer for finite Markov chains"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the stationary distribution of a transition matrix.
    Solve(SolveArgs),
    /// Evolve an initial distribution over a fixed number of steps.
    Evolve(EvolveArgs),
}

/// Arguments for the `solve` subcommand.
#[derive(clap::Args)]
pub struct SolveArgs {
    /// Path to the JSON request ({"matrix": [[..],..]}); stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the `evolve` subcommand.
#[derive(clap::Args)]
pub struct EvolveArgs {
    /// Path to the JSON request ({"matrix": .., "initial_state": [..],
    /// "n_steps": N}); stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}
