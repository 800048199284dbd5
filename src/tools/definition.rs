//! Tool definitions and parameter schemas
//!
//! Each tool is a declarative entry: name, description, and the parameters it
//! accepts with their types, required flags and defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The finite set of tools this server can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Dial a number directly with caller-supplied texts
    MakeOutboundCall,
    /// Look up a directory record
    GetPatientDetails,
    /// Look up a directory record and dial it with personalized texts
    CallPatientById,
}

impl ToolKind {
    /// Wire name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::MakeOutboundCall => "make_outbound_call",
            Self::GetPatientDetails => "get_patient_details",
            Self::CallPatientById => "call_patient_by_id",
        }
    }
}

/// JSON schema type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
}

/// A single tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParam {
    /// A required string parameter
    pub fn required_string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// An optional string parameter with a default value
    pub fn optional_string(
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            description: description.into(),
            required: false,
            default: Some(Value::String(default.into())),
        }
    }
}

/// Descriptor advertised to the agent host on a listing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub params: Vec<ToolParam>,
}

impl Tool {
    /// Create a tool with no parameters
    pub fn new(kind: ToolKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, param: ToolParam) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&ToolParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Default value of a string parameter, if it declares one
    pub fn default_str(&self, name: &str) -> Option<&str> {
        self.param(name)
            .and_then(|p| p.default.as_ref())
            .and_then(Value::as_str)
    }

    /// Names of the required parameters, in declaration order
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// JSON schema for the input object
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.param_type));
            prop.insert("description".to_string(), Value::String(param.description.clone()));
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_params()
        })
    }

    /// Convert to the descriptor returned by `tools/list`
    pub fn to_descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_serialization() {
        for kind in [
            ToolKind::MakeOutboundCall,
            ToolKind::GetPatientDetails,
            ToolKind::CallPatientById,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_tool_new() {
        let tool = Tool::new(ToolKind::GetPatientDetails, "Look up a patient");
        assert_eq!(tool.name, "get_patient_details");
        assert!(tool.params.is_empty());
        assert!(tool.required_params().is_empty());
    }

    #[test]
    fn test_tool_input_schema() {
        let tool = Tool::new(ToolKind::CallPatientById, "Call a patient")
            .with_param(ToolParam::required_string("patient_id", "Patient ID"))
            .with_param(ToolParam::optional_string("call_purpose", "Why", "check-up"));

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["patient_id"]["type"], "string");
        assert_eq!(schema["properties"]["patient_id"]["description"], "Patient ID");
        assert!(schema["properties"]["patient_id"].get("default").is_none());
        assert_eq!(schema["properties"]["call_purpose"]["default"], "check-up");
        assert_eq!(schema["required"], json!(["patient_id"]));
    }

    #[test]
    fn test_tool_default_str() {
        let tool = Tool::new(ToolKind::CallPatientById, "Call a patient")
            .with_param(ToolParam::optional_string("call_purpose", "Why", "check-up"));
        assert_eq!(tool.default_str("call_purpose"), Some("check-up"));
        assert_eq!(tool.default_str("patient_id"), None);
    }

    #[test]
    fn test_tool_descriptor_serialization() {
        let tool = Tool::new(ToolKind::GetPatientDetails, "Look up a patient")
            .with_param(ToolParam::required_string("patient_id", "Patient ID"));
        let json = serde_json::to_value(tool.to_descriptor()).unwrap();
        assert_eq!(json["name"], "get_patient_details");
        assert_eq!(json["inputSchema"]["required"][0], "patient_id");
        assert!(json.get("input_schema").is_none());
    }

    #[test]
    fn test_param_type_serialization() {
        assert_eq!(serde_json::to_string(&ParamType::String).unwrap(), "\"string\"");
    }
}
