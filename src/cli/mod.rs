//! CLI module
//!
//! Command-line interface for the gateway client.
//!
//! # Commands
//!
//! - `decode` - Decode a response body from a file or stdin
//! - `register` - Build, post and decode a registration
//! - `validate` - Check a gateway configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
