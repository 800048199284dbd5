//! CLI module for outcall - command-line interface and subcommands.
//!
//! Running with no subcommand starts the stdio MCP server.

pub mod commands;

pub use commands::Cli;
