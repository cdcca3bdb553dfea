//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. `execute` functions
//! return the command's result; `run` functions also print it.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

pub mod convert;
pub mod price;
pub mod simulate;
pub mod validate;
pub mod var;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Prints `value` as pretty JSON or through `text`.
pub(crate) fn emit<T, F>(value: &T, format: OutputFormat, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text(value)),
    }
    Ok(())
}
