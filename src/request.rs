//! Shared request plumbing for the CLI subcommands.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Reads the JSON request body from a file, or stdin when no path is given.
pub fn read_body(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read request from stdin")?;
            Ok(body)
        }
    }
}
