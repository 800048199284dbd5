//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP server on stdio (default)
//! - tools: print the tool catalog
//! - patients: print the patient directory
//! - call: invoke one tool and print its response

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Outcall - MCP tool server for outbound telephony calls
#[derive(Parser, Debug)]
#[command(name = "outcall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the outbound call API (overrides config and OUTBOUND_CALL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// List the available tools
    Tools,

    /// List the patients in the directory
    Patients,

    /// Invoke a single tool and print the response
    Call {
        /// Tool name, e.g. get_patient_details
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
