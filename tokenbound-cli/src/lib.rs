//! Command-line tool for ERC-6551 token-bound accounts.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing and command dispatch
//! - [`config`] - TOML configuration with environment variable expansion
//! - [`error`] - CLI error types

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{Cli, run};
pub use error::CliError;
