//! Outbound call API client
//!
//! Defines the CallInvoker trait and the HTTP implementation that posts a
//! CallRequest to `<base-url>/outbound-call`.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{OutcallError, Result};

use super::request::CallRequest;
use super::result::CallResult;

/// Path appended to the configured base URL
pub const OUTBOUND_CALL_PATH: &str = "/outbound-call";

/// Places exactly one outbound call per invocation. Never retries.
#[async_trait]
pub trait CallInvoker: Send + Sync {
    /// Send the request and normalize the provider's answer
    async fn place_call(&self, request: &CallRequest) -> Result<CallResult>;

    /// Base URL of the API, shown to operators when a call fails
    fn base_url(&self) -> &str;
}

/// reqwest-backed invoker
pub struct HttpCallInvoker {
    client: Client,
    base_url: String,
}

impl HttpCallInvoker {
    /// Create an invoker for the given base URL.
    ///
    /// No request timeout is set; idle connections are not kept between calls.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| OutcallError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, OUTBOUND_CALL_PATH)
    }
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("").to_string()
}

#[async_trait]
impl CallInvoker for HttpCallInvoker {
    async fn place_call(&self, request: &CallRequest) -> Result<CallResult> {
        let response = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(OutcallError::ExternalApi {
                status: status.as_u16(),
                status_text: status_text(status),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OutcallError::Transport(format!("Failed to parse response: {}", e)))?;

        Ok(CallResult::from_value(&body))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for HttpCallInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCallInvoker")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Canned answer returned by [`MockCallInvoker`]
#[derive(Debug, Clone)]
enum MockReply {
    Result(CallResult),
    Status { status: u16, body: String },
    Transport(String),
}

/// Invoker that records every request and answers with a fixed reply
#[derive(Debug)]
pub struct MockCallInvoker {
    reply: MockReply,
    base_url: String,
    requests: Mutex<Vec<CallRequest>>,
}

impl MockCallInvoker {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            base_url: "http://mock.invalid".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the given result
    pub fn returning(result: CallResult) -> Self {
        Self::with_reply(MockReply::Result(result))
    }

    /// Answer every call successfully with the given call SID
    pub fn succeeding(call_sid: impl Into<String>) -> Self {
        Self::returning(CallResult::success(call_sid))
    }

    /// Answer every call with an HTTP error status and body
    pub fn failing_with_status(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Status {
            status,
            body: body.into(),
        })
    }

    /// Answer every call with a transport failure
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Transport(message.into()))
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<CallRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CallInvoker for MockCallInvoker {
    async fn place_call(&self, request: &CallRequest) -> Result<CallResult> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.reply {
            MockReply::Result(result) => Ok(result.clone()),
            MockReply::Status { status, body } => Err(OutcallError::ExternalApi {
                status: *status,
                status_text: StatusCode::from_u16(*status)
                    .map(status_text)
                    .unwrap_or_default(),
                body: body.clone(),
            }),
            MockReply::Transport(message) => Err(OutcallError::Transport(message.clone())),
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
