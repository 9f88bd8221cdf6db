//! In-memory transport for handler tests

use std::cell::RefCell;
use steamtools_core::{Credentials, ToolError, ToolMessage, ToolParameters, UpstreamError};

use crate::steam_api::SteamEndpoints;
use crate::tools::{Tool, ToolContext};
use crate::transport::{HttpTransport, UpstreamRequest, UpstreamResponse};

pub(crate) const TEST_KEY: &str = "test-key";
pub(crate) const STEAM_ID: &str = "76561197960435530";

/// Replies with one canned response and records every request
pub(crate) struct FakeTransport {
    reply: Result<(u16, String), String>,
    requests: RefCell<Vec<UpstreamRequest>>,
}

impl FakeTransport {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            reply: Ok((status, body.to_string())),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Err("connection refused".to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> UpstreamRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpTransport for FakeTransport {
    fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.requests.borrow_mut().push(request.clone());
        match &self.reply {
            Ok((status, body)) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            Err(e) => Err(UpstreamError::Transport(e.clone())),
        }
    }
}

pub(crate) fn params(value: serde_json::Value) -> ToolParameters {
    serde_json::from_value(value).expect("parameters must be a JSON object")
}

pub(crate) fn invoke_with(
    tool: Tool,
    transport: &FakeTransport,
    credentials: &Credentials,
    parameters: serde_json::Value,
) -> Result<ToolMessage, ToolError> {
    let endpoints = SteamEndpoints::default();
    let ctx = ToolContext::new(transport, &endpoints, credentials);
    tool.invoke(&ctx, &params(parameters))
}

pub(crate) fn invoke(
    tool: Tool,
    transport: &FakeTransport,
    parameters: serde_json::Value,
) -> Result<ToolMessage, ToolError> {
    invoke_with(tool, transport, &Credentials::with_api_key(TEST_KEY), parameters)
}

/// JSON record from a successful invocation
pub(crate) fn record(result: Result<ToolMessage, ToolError>) -> serde_json::Value {
    match result {
        Ok(ToolMessage::Json { json }) => json,
        other => panic!("expected a JSON record, got {:?}", other),
    }
}

pub(crate) fn notice(result: Result<ToolMessage, ToolError>) -> String {
    match result {
        Ok(ToolMessage::Text { text }) => text,
        other => panic!("expected a text notice, got {:?}", other),
    }
}
