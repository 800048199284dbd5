//! Outbound call layer - request shaping and the external call API client
//!
//! This module provides:
//! - CallArgs / CallRequest: argument validation and default substitution
//! - CallResult: the normalized API answer
//! - CallInvoker trait with HTTP and recording mock implementations

pub mod client;
pub mod request;
pub mod result;

pub use client::{CallInvoker, HttpCallInvoker, MockCallInvoker, OUTBOUND_CALL_PATH};
pub use request::{CallArgs, CallRequest, DEFAULT_FIRST_MESSAGE, DEFAULT_PROMPT};
pub use result::CallResult;
