//! Command-line interface.
//!
//! Provides argument parsing and the watch command.

pub mod args;
pub mod commands;

pub use args::Cli;
