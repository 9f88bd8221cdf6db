//! REST API routes

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use steamtools_client::tools::ParameterSpec;
use steamtools_client::{ReqwestTransport, SteamProvider, Tool, ToolContext};
use steamtools_core::{Credentials, ToolMessage, ToolParameters};

use crate::error::HostError;
use crate::AppState;

#[derive(Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParameterSpec],
}

pub async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(
        Tool::ALL
            .into_iter()
            .map(|tool| ToolInfo {
                name: tool.name(),
                description: tool.description(),
                parameters: tool.parameters(),
            })
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub parameters: ToolParameters,
}

pub async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<InvokeRequest>,
) -> Result<Json<ToolMessage>, HostError> {
    let tool = Tool::from_name(&name).ok_or(HostError::UnknownTool(name))?;
    let credentials = state.credentials(body.credentials);
    let endpoints = state.endpoints.clone();
    let parameters = body.parameters;

    tracing::info!(tool = tool.name(), "Invoking tool");

    // reqwest's blocking client owns a runtime and must stay off the async workers
    let message = tokio::task::spawn_blocking(move || -> Result<ToolMessage, HostError> {
        let transport = ReqwestTransport::new().map_err(|e| HostError::Internal(e.to_string()))?;
        let ctx = ToolContext::new(&transport, &endpoints, &credentials);
        Ok(tool.invoke(&ctx, &parameters)?)
    })
    .await
    .map_err(|e| HostError::Internal(format!("Tool task failed: {}", e)))??;

    if let ToolMessage::Text { text } = &message {
        tracing::debug!(tool = tool.name(), "Empty result: {}", text);
    }

    Ok(Json(message))
}

#[derive(Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
}

pub async fn validate_credentials(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<ValidationResponse>, HostError> {
    let endpoints = state.endpoints.clone();

    tokio::task::spawn_blocking(move || -> Result<(), HostError> {
        let transport = ReqwestTransport::new().map_err(|e| HostError::Internal(e.to_string()))?;
        Ok(SteamProvider::new(&transport, &endpoints).validate_credentials(&credentials)?)
    })
    .await
    .map_err(|e| HostError::Internal(format!("Validation task failed: {}", e)))??;

    Ok(Json(ValidationResponse { valid: true }))
}
