//! Outbound call API response

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized outcome of one outbound call request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult {
    pub success: bool,
    /// Provider-assigned call identifier, echoed back unchecked
    #[serde(rename = "callSid", skip_serializing_if = "Option::is_none")]
    pub call_sid: Option<String>,
}

impl CallResult {
    /// A successful result with the given call SID
    pub fn success(call_sid: impl Into<String>) -> Self {
        Self {
            success: true,
            call_sid: Some(call_sid.into()),
        }
    }

    /// Read a result from the API's JSON body.
    ///
    /// Missing or mistyped fields fall back to `false` / `None` instead of failing.
    pub fn from_value(body: &Value) -> Self {
        let call_sid = match body.get("callSid") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            success: body["success"].as_bool().unwrap_or(false),
            call_sid,
        }
    }

    /// Label shown to the operator
    pub fn status_label(&self) -> &'static str {
        if self.success { "Success" } else { "Failed" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let result = CallResult::from_value(&json!({"success": true, "callSid": "CA123"}));
        assert_eq!(result, CallResult::success("CA123"));
        assert_eq!(result.status_label(), "Success");
    }

    #[test]
    fn test_from_value_missing_fields() {
        let result = CallResult::from_value(&json!({}));
        assert!(!result.success);
        assert!(result.call_sid.is_none());
        assert_eq!(result.status_label(), "Failed");
    }

    #[test]
    fn test_from_value_odd_types() {
        let result = CallResult::from_value(&json!({"success": "yes", "callSid": 42}));
        assert!(!result.success);
        assert_eq!(result.call_sid.as_deref(), Some("42"));
    }

    #[test]
    fn test_from_value_non_object() {
        let result = CallResult::from_value(&json!("accepted"));
        assert_eq!(result, CallResult::default());
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let json = serde_json::to_string(&CallResult::success("CA9")).unwrap();
        assert_eq!(json, r#"{"success":true,"callSid":"CA9"}"#);
    }
}
