//! Steam Web API tools
//!
//! Nine read-only tools over the Steam Web API plus the credential check the
//! provider runs on save. Each tool makes exactly one blocking request.

pub mod provider;
pub mod steam_api;
pub mod tools;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use provider::SteamProvider;
pub use steam_api::SteamEndpoints;
pub use tools::{Tool, ToolContext};
pub use transport::{HttpTransport, Method, ReqwestTransport, UpstreamRequest, UpstreamResponse};
