mod cli;
mod evolve_cmd;
mod logging;
mod request;
mod solve_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Solve(args) => solve_cmd::run(args),
        Command::Evolve(args) => evolve_cmd::run(args),
    }
}
