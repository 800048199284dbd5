//! Human-readable rendering of tool outcomes
//!
//! Every function here is total: whatever the outcome, the caller gets text.
//! The texts are meant for an operator reading the agent transcript, not for
//! machine parsing.

use crate::call::{CallRequest, CallResult};
use crate::directory::PatientRecord;
use crate::error::OutcallError;

/// Shown in place of a call SID the provider did not return
const MISSING_CALL_SID: &str = "unknown";

/// Direct call accepted by the API; `number` is echoed as the caller gave it
pub fn call_succeeded(number: &str, request: &CallRequest, result: &CallResult) -> String {
    format!(
        "✅ Call initiated successfully!\n\
         \n\
         📞 **Call Details:**\n\
         - **Number:** {number}\n\
         - **Call SID:** {sid}\n\
         - **Status:** {status}\n\
         \n\
         🤖 **AI Agent Configuration:**\n\
         - **Prompt:** {prompt}\n\
         - **First Message:** {first_message}\n\
         \n\
         The call is now in progress. The recipient should receive the call shortly.",
        sid = result.call_sid.as_deref().unwrap_or(MISSING_CALL_SID),
        status = result.status_label(),
        prompt = request.prompt,
        first_message = request.first_message,
    )
}

/// Direct call rejected by the API or never delivered
pub fn call_failed(number: &str, error: &OutcallError, base_url: &str) -> String {
    format!(
        "❌ Failed to initiate call to {number}\n\
         \n\
         **Error:** {error}\n\
         \n\
         Please check:\n\
         - Your API server is running at {base_url}\n\
         - The phone number format is correct (include country code)\n\
         - Your Twilio and ElevenLabs credentials are properly configured",
    )
}

/// Caller arguments failed validation
pub fn invalid_arguments(tool: &str, error: &OutcallError) -> String {
    format!("❌ Invalid arguments for {tool}\n\n**Error:** {error}")
}

/// Directory record found
pub fn patient_details(patient: &PatientRecord) -> String {
    format!(
        "👤 **Patient Details Found**\n\
         \n\
         **Patient ID:** {id}\n\
         **Name:** {name}\n\
         **Phone:** {phone}\n\
         **Email:** {email}\n\
         **Last Appointment:** {last}\n\
         **Next Appointment Due:** {next}\n\
         **Assigned Doctor:** {doctor}\n\
         **Department:** {department}",
        id = patient.id,
        name = patient.name,
        phone = patient.phone_number,
        email = patient.email,
        last = patient.last_appointment,
        next = patient.next_appointment_due,
        doctor = patient.doctor,
        department = patient.department,
    )
}

/// No directory record for the identifier
pub fn patient_not_found(patient_id: &str, known_ids: &[&str]) -> String {
    format!(
        "❌ Patient not found with ID: {patient_id}\n\nAvailable test patient IDs: {}",
        known_ids.join(", ")
    )
}

/// Summary block placed ahead of the call text of a successful patient call
pub fn patient_call_succeeded(patient: &PatientRecord, call_purpose: &str, call_text: &str) -> String {
    format!(
        "🏥 **Patient Call Initiated**\n\
         \n\
         📋 **Patient Information:**\n\
         - **Name:** {name}\n\
         - **ID:** {id}\n\
         - **Department:** {department}\n\
         - **Doctor:** {doctor}\n\
         - **Call Purpose:** {call_purpose}\n\
         \n\
         {call_text}",
        name = patient.name,
        id = patient.id,
        department = patient.department,
        doctor = patient.doctor,
    )
}

/// Patient call failed after the record was found
pub fn patient_call_failed(patient_id: &str, error: &OutcallError) -> String {
    format!("❌ Failed to call patient with ID {patient_id}\n\n**Error:** {error}")
}
