//! CLI module for homework-bot - command-line interface.
//!
//! There are no subcommands: the binary runs the poll loop until killed.

pub mod commands;

pub use commands::Cli;
