//! # Regvar CLI
//!
//! Library side of the `regvar` binary: configuration, CSV I/O and the
//! command implementations.

pub mod commands;
pub mod config;
pub mod error;
pub mod io;

pub use error::{CliError, Result};
