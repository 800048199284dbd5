//! Arguments of the directory-backed tools

use serde_json::Value;

use crate::call::request::string_arg;
use crate::error::{OutcallError, Result};

/// Arguments of `get_patient_details` and `call_patient_by_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientArgs {
    pub patient_id: Option<String>,
    pub call_purpose: Option<String>,
}

impl PatientArgs {
    /// Extract arguments from a tool-call JSON object
    pub fn from_value(args: &Value) -> Self {
        Self {
            patient_id: string_arg(args, "patient_id"),
            call_purpose: string_arg(args, "call_purpose"),
        }
    }

    /// The trimmed identifier, or `MissingIdentifier` when absent or blank
    pub fn validated_id(&self) -> Result<&str> {
        self.patient_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(OutcallError::MissingIdentifier)
    }

    /// The call purpose, or `default` when absent or blank
    pub fn call_purpose_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.call_purpose
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validated_id() {
        let args = PatientArgs::from_value(&json!({"patient_id": " 12345 "}));
        assert_eq!(args.validated_id().unwrap(), "12345");
    }

    #[test]
    fn test_missing_id() {
        for value in [json!({}), json!({"patient_id": ""}), json!({"patient_id": 12345}), json!(null)] {
            let args = PatientArgs::from_value(&value);
            assert!(matches!(args.validated_id(), Err(OutcallError::MissingIdentifier)));
        }
    }

    #[test]
    fn test_call_purpose_default() {
        let args = PatientArgs::from_value(&json!({"patient_id": "1"}));
        assert_eq!(args.call_purpose_or("follow-up appointment"), "follow-up appointment");

        let args = PatientArgs::from_value(&json!({"patient_id": "1", "call_purpose": ""}));
        assert_eq!(args.call_purpose_or("follow-up appointment"), "follow-up appointment");
    }

    #[test]
    fn test_call_purpose_given() {
        let args = PatientArgs::from_value(&json!({"patient_id": "1", "call_purpose": "test results"}));
        assert_eq!(args.call_purpose_or("follow-up appointment"), "test results");
    }
}
