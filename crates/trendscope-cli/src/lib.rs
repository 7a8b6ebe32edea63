//! Trendscope CLI library.
//!
//! Configuration loading, provider selection, command execution and output
//! formatting for the `trendscope` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod providers;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
