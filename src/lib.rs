//! Outcall - an MCP tool server for outbound telephony calls
//!
//! Exposes three tools to an agent host over newline-delimited JSON-RPC on stdio:
//! placing an outbound call, looking up a patient in the reference directory,
//! and calling a patient by identifier with a personalized script.

pub mod call;
pub mod config;
pub mod directory;
pub mod error;
pub mod mcp;
pub mod tools;

pub use error::{OutcallError, Result};
