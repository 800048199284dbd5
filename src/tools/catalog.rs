//! Static tool catalog
//!
//! Built once at startup and never modified; listing always returns the same
//! descriptors in the same order.

use crate::call::{DEFAULT_FIRST_MESSAGE, DEFAULT_PROMPT};

use super::definition::{Tool, ToolDescriptor, ToolKind, ToolParam};

/// Purpose used by `call_patient_by_id` when none is given
pub const DEFAULT_CALL_PURPOSE: &str = "follow-up appointment";

/// Catalog of the tools this server exposes
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl ToolCatalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        let tools = vec![
            Tool::new(
                ToolKind::MakeOutboundCall,
                "Initiate an outbound phone call using ElevenLabs AI agent",
            )
            .with_param(ToolParam::required_string(
                "number",
                "Phone number to call (include country code, e.g., +1234567890)",
            ))
            .with_param(ToolParam::optional_string(
                "prompt",
                "Custom prompt/instructions for the AI agent during the call",
                DEFAULT_PROMPT,
            ))
            .with_param(ToolParam::optional_string(
                "first_message",
                "The first message the AI agent will say when the call connects",
                DEFAULT_FIRST_MESSAGE,
            )),
            Tool::new(ToolKind::GetPatientDetails, "Retrieve patient details by patient ID").with_param(
                ToolParam::required_string("patient_id", "The unique patient ID to look up"),
            ),
            Tool::new(
                ToolKind::CallPatientById,
                "Look up patient details and initiate an outbound call to schedule their appointment",
            )
            .with_param(ToolParam::required_string("patient_id", "The unique patient ID to call"))
            .with_param(ToolParam::optional_string(
                "call_purpose",
                "Purpose of the call (e.g., 'follow-up appointment', 'test results', 'medication reminder')",
                DEFAULT_CALL_PURPOSE,
            )),
        ];

        Self { tools }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Get a tool by kind
    pub fn by_kind(&self, kind: ToolKind) -> Option<&Tool> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    /// List all tool names
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Get all tools
    pub fn all(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    /// Descriptors for a listing request
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(Tool::to_descriptor).collect()
    }
}
