//! Error taxonomy for tool invocations

use thiserror::Error;

/// Why a tool invocation failed
#[derive(Debug, Error)]
pub enum ToolError {
    /// Credential missing or unusable; raised before any upstream call
    #[error("{0}")]
    Configuration(String),

    /// Caller parameter missing or malformed; raised before any upstream call
    #[error("{0}")]
    InvalidParameter(String),

    /// The upstream call or its response could not be used
    #[error("Failed to {action}: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("Failed to encode result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn upstream(action: &'static str, source: UpstreamError) -> Self {
        ToolError::Upstream { action, source }
    }

    /// True when the failure happened before anything was sent upstream
    pub fn is_input_error(&self) -> bool {
        matches!(self, ToolError::Configuration(_) | ToolError::InvalidParameter(_))
    }
}

/// Failures talking to the Steam Web API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("API key is invalid or unauthorized.")]
    Unauthorized,

    #[error("Access denied. The API key may not have sufficient permissions.")]
    Forbidden,

    /// 404, carrying the operation's explanation of what is missing
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Steam API request failed with status code: {0}")]
    Status(u16),

    /// Response was not JSON or lacked an expected key
    #[error("{0}")]
    Format(String),

    /// `playerstats.error` reported by the API itself
    #[error("Steam API returned an error: {0}")]
    Api(String),

    #[error("{0}")]
    Transport(String),
}

/// Raised while checking credentials on save
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CredentialValidationError(pub String);
