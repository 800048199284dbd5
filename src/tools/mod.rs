//! Tool System - catalog, dispatch, and response rendering

mod args;
mod catalog;
mod definition;
mod dispatcher;
pub mod render;
mod response;

pub use args::PatientArgs;
pub use catalog::{DEFAULT_CALL_PURPOSE, ToolCatalog};
pub use definition::{ParamType, Tool, ToolDescriptor, ToolKind, ToolParam};
pub use dispatcher::ToolDispatcher;
pub use response::{ToolContent, ToolResponse};
