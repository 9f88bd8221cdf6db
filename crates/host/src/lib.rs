//! Plugin host for the Steam Web API tools
//!
//! Provides:
//! - Tool listing and invocation over HTTP
//! - Credential validation for the provider account

pub mod config;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use steamtools_client::SteamEndpoints;
use steamtools_core::Credentials;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub endpoints: SteamEndpoints,
    pub steam_api_key: Option<String>,
}

impl AppState {
    pub fn from_config(config: &config::Config) -> Self {
        Self {
            endpoints: config.endpoints(),
            steam_api_key: config.steam_api_key.clone(),
        }
    }

    /// Credentials for one invocation; a missing key falls back to the server's
    pub fn credentials(&self, supplied: Option<Credentials>) -> Credentials {
        let supplied = supplied.unwrap_or_default();
        let api_key = match supplied.api_key() {
            Some(key) => Some(key.to_string()),
            None => self.steam_api_key.clone(),
        };
        Credentials {
            api_key,
            steam_id: supplied.steam_id,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/tools", get(routes::list_tools))
        .route("/tools/{name}/invoke", post(routes::invoke_tool))
        .route("/credentials/validate", post(routes::validate_credentials))
        .with_state(state)
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_fall_back_to_server_key() {
        let state = AppState {
            endpoints: SteamEndpoints::default(),
            steam_api_key: Some("server-key".into()),
        };

        assert_eq!(state.credentials(None).api_key.as_deref(), Some("server-key"));

        let blank = Credentials { api_key: Some("".into()), steam_id: None };
        assert_eq!(state.credentials(Some(blank)).api_key.as_deref(), Some("server-key"));

        let own = Credentials::with_api_key("caller-key");
        assert_eq!(state.credentials(Some(own)).api_key.as_deref(), Some("caller-key"));
    }
}
