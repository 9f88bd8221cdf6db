//! Shared types for the Steam Web API tools
//!
//! Everything the host runtime sees lives here: credentials, invocation
//! parameters, the messages a tool emits and the records inside them.

pub mod constants;
pub mod error;
pub mod format;
pub mod messages;
pub mod models;
pub mod records;

pub use error::{CredentialValidationError, ToolError, UpstreamError};
pub use messages::ToolMessage;
pub use models::{Credentials, ToolParameters};
pub use records::*;
