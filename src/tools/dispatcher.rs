//! Tool dispatch
//!
//! Routes a tool invocation to one of three flows (direct call, directory
//! lookup, lookup-then-call) and converts every flow error into a rendered
//! response. Only an unknown tool name is returned as an error.

use std::sync::Arc;

use log::{debug, error, warn};
use serde_json::Value;

use crate::call::{CallArgs, CallInvoker, CallRequest, CallResult};
use crate::directory::Directory;
use crate::error::{OutcallError, Result};

use super::args::PatientArgs;
use super::catalog::{DEFAULT_CALL_PURPOSE, ToolCatalog};
use super::definition::{ToolDescriptor, ToolKind};
use super::render;
use super::response::ToolResponse;

/// Entry point for tool listing and invocation
pub struct ToolDispatcher {
    catalog: ToolCatalog,
    directory: Arc<Directory>,
    invoker: Arc<dyn CallInvoker>,
}

impl ToolDispatcher {
    /// Create a dispatcher over the built-in catalog
    pub fn new(directory: Arc<Directory>, invoker: Arc<dyn CallInvoker>) -> Self {
        Self {
            catalog: ToolCatalog::builtin(),
            directory,
            invoker,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Descriptors of every tool, identical on every call
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.catalog.descriptors()
    }

    /// Invoke a tool by name
    pub async fn call_tool(&self, name: &str, args: &Value) -> Result<ToolResponse> {
        let tool = self
            .catalog
            .get(name)
            .ok_or_else(|| OutcallError::UnknownTool(name.to_string()))?;

        debug!("Dispatching tool {}", tool.name);

        let response = match tool.kind {
            ToolKind::MakeOutboundCall => self.make_outbound_call(args).await,
            ToolKind::GetPatientDetails => self.get_patient_details(args),
            ToolKind::CallPatientById => self.call_patient_by_id(args).await,
        };

        Ok(response)
    }

    /// Build the payload and place the call; errors are returned, not rendered
    async fn place_call(&self, args: &CallArgs) -> Result<(CallRequest, CallResult)> {
        let request = CallRequest::build(args)?;

        tracing::info!(
            number = %request.number,
            prompt = %request.prompt,
            first_message = %request.first_message,
            "Initiating outbound call"
        );

        let result = self.invoker.place_call(&request).await?;
        debug!(
            "Call to {} accepted: success={} sid={:?}",
            request.number, result.success, result.call_sid
        );
        Ok((request, result))
    }

    async fn make_outbound_call(&self, args: &Value) -> ToolResponse {
        let call_args = CallArgs::from_value(args);
        // Texts echo the number as received; only the payload is trimmed
        let number = call_args.number.as_deref().unwrap_or_default();

        match self.place_call(&call_args).await {
            Ok((request, result)) => ToolResponse::text(render::call_succeeded(number, &request, &result)),
            Err(e) if e.is_external() => {
                error!("Error making outbound call: {}", e);
                ToolResponse::error(render::call_failed(number, &e, self.invoker.base_url()))
            }
            Err(e) => {
                warn!("Rejected make_outbound_call: {}", e);
                ToolResponse::error(render::invalid_arguments(ToolKind::MakeOutboundCall.name(), &e))
            }
        }
    }

    fn get_patient_details(&self, args: &Value) -> ToolResponse {
        let patient_args = PatientArgs::from_value(args);
        let patient_id = match patient_args.validated_id() {
            Ok(id) => id,
            Err(e) => {
                warn!("Rejected get_patient_details: {}", e);
                return ToolResponse::error(render::invalid_arguments(
                    ToolKind::GetPatientDetails.name(),
                    &e,
                ));
            }
        };

        match self.directory.get(patient_id) {
            Some(patient) => ToolResponse::text(render::patient_details(patient)),
            None => ToolResponse::text(render::patient_not_found(patient_id, &self.directory.ids())),
        }
    }

    async fn call_patient_by_id(&self, args: &Value) -> ToolResponse {
        let patient_args = PatientArgs::from_value(args);
        let patient_id = match patient_args.validated_id() {
            Ok(id) => id,
            Err(e) => {
                warn!("Rejected call_patient_by_id: {}", e);
                return ToolResponse::error(render::invalid_arguments(
                    ToolKind::CallPatientById.name(),
                    &e,
                ));
            }
        };

        let Some(patient) = self.directory.get(patient_id) else {
            return ToolResponse::text(render::patient_not_found(patient_id, &self.directory.ids()));
        };

        let default_purpose = self
            .catalog
            .by_kind(ToolKind::CallPatientById)
            .and_then(|t| t.default_str("call_purpose"))
            .unwrap_or(DEFAULT_CALL_PURPOSE);
        let call_purpose = patient_args.call_purpose_or(default_purpose);

        tracing::info!(
            patient = %patient.name,
            patient_id = %patient_id,
            call_purpose = %call_purpose,
            "Calling patient"
        );

        match self.place_call(&CallArgs::for_patient(patient, call_purpose)).await {
            Ok((request, result)) => {
                let call_text = render::call_succeeded(&patient.phone_number, &request, &result);
                ToolResponse::text(render::patient_call_succeeded(patient, call_purpose, &call_text))
            }
            Err(e) => {
                error!("Error calling patient {}: {}", patient_id, e);
                ToolResponse::error(render::patient_call_failed(patient_id, &e))
            }
        }
    }
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.catalog.list())
            .field("patients", &self.directory.len())
            .field("base_url", &self.invoker.base_url())
            .finish()
    }
}
