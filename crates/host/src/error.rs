//! HTTP mapping for invocation failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use steamtools_core::{CredentialValidationError, ToolError};

#[derive(Debug)]
pub enum HostError {
    UnknownTool(String),
    Tool(ToolError),
    Credentials(CredentialValidationError),
    Internal(String),
}

impl From<ToolError> for HostError {
    fn from(e: ToolError) -> Self {
        HostError::Tool(e)
    }
}

impl From<CredentialValidationError> for HostError {
    fn from(e: CredentialValidationError) -> Self {
        HostError::Credentials(e)
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            HostError::Tool(e) => write!(f, "{}", e),
            HostError::Credentials(e) => write!(f, "{}", e),
            HostError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl HostError {
    fn status(&self) -> StatusCode {
        match self {
            HostError::UnknownTool(_) => StatusCode::NOT_FOUND,
            HostError::Tool(ToolError::Configuration(_) | ToolError::InvalidParameter(_)) => {
                StatusCode::BAD_REQUEST
            }
            HostError::Tool(ToolError::Upstream { .. }) => StatusCode::BAD_GATEWAY,
            HostError::Tool(ToolError::Serialization(_)) | HostError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            HostError::Credentials(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
