//! Outbound call request shaping
//!
//! Validates caller arguments and merges them with the default agent texts to
//! produce the exact payload the outbound call API expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directory::PatientRecord;
use crate::error::{OutcallError, Result};

/// Agent instructions used when the caller supplies none
pub const DEFAULT_PROMPT: &str = "You are a helpful assistant making an outbound call. You are a Hospital AI Agent, an outbound receptionist agent. You are calling a patient to book an appointment for them. Be friendly and professional and answer all questions.";

/// Greeting used when the caller supplies none
pub const DEFAULT_FIRST_MESSAGE: &str = "Hello, I am a Hospital AI Agent, It seems you are due for your follow up appointment! Could you let me know when you are available?";

/// Read a string argument, treating non-strings as absent
pub(crate) fn string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Raw arguments of a direct call, as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    pub number: Option<String>,
    pub prompt: Option<String>,
    pub first_message: Option<String>,
}

impl CallArgs {
    /// Create arguments for a number with default texts
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            ..Default::default()
        }
    }

    /// Extract arguments from a tool-call JSON object
    pub fn from_value(args: &Value) -> Self {
        Self {
            number: string_arg(args, "number"),
            prompt: string_arg(args, "prompt"),
            first_message: string_arg(args, "first_message"),
        }
    }

    /// Arguments for calling a directory patient, with agent texts written
    /// around the patient's care details and the purpose of the call
    pub fn for_patient(patient: &PatientRecord, call_purpose: &str) -> Self {
        let prompt = format!(
            "You are a Hospital AI Agent, an outbound receptionist agent calling {name}. \
             You are calling to help schedule their {purpose}. \
             The patient's last appointment was on {last} with {doctor} in the {department} department. \
             Their next appointment is due around {next}. \
             Be friendly, professional, and answer all questions. \
             Use their name during the conversation to make it personal.",
            name = patient.name,
            purpose = call_purpose,
            last = patient.last_appointment,
            doctor = patient.doctor,
            department = patient.department,
            next = patient.next_appointment_due,
        );

        let first_message = format!(
            "Hello {name}, this is the Hospital AI Assistant calling from {department}. \
             I hope you're doing well! \
             I'm calling because you're due for your {purpose} with {doctor}. \
             Would you like to schedule that appointment today?",
            name = patient.name,
            department = patient.department,
            purpose = call_purpose,
            doctor = patient.doctor,
        );

        Self::new(patient.phone_number.clone())
            .with_prompt(prompt)
            .with_first_message(first_message)
    }

    /// Set prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set first message
    pub fn with_first_message(mut self, first_message: impl Into<String>) -> Self {
        self.first_message = Some(first_message.into());
        self
    }

    /// The trimmed number, or `MissingNumber` when absent or blank.
    ///
    /// No format check is made: any non-blank string is dialed as given.
    pub fn validated_number(&self) -> Result<&str> {
        non_blank(self.number.as_deref())
            .map(str::trim)
            .ok_or(OutcallError::MissingNumber)
    }
}

/// Payload posted to `<base-url>/outbound-call`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub number: String,
    pub prompt: String,
    pub first_message: String,
}

impl CallRequest {
    /// Validate the arguments and fill in defaults
    pub fn build(args: &CallArgs) -> Result<Self> {
        let number = args.validated_number()?;
        Ok(Self {
            number: number.to_string(),
            prompt: non_blank(args.prompt.as_deref())
                .unwrap_or(DEFAULT_PROMPT)
                .to_string(),
            first_message: non_blank(args.first_message.as_deref())
                .unwrap_or(DEFAULT_FIRST_MESSAGE)
                .to_string(),
        })
    }
}
