//! Credential provider: validation on save and a non-throwing profile lookup

use steamtools_core::{
    CredentialValidationError, Credentials, PlayerSummary, ResultRecord, UpstreamError,
};

use crate::steam_api::{SteamEndpoints, INVALID_FORMAT};
use crate::tools::{fetch_players, SteamPlayer};
use crate::transport::HttpTransport;

pub struct SteamProvider<'a> {
    transport: &'a dyn HttpTransport,
    endpoints: &'a SteamEndpoints,
}

impl<'a> SteamProvider<'a> {
    pub fn new(transport: &'a dyn HttpTransport, endpoints: &'a SteamEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// One-shot check that the key works and the Steam ID resolves to an account
    pub fn validate_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<(), CredentialValidationError> {
        let api_key = credentials
            .api_key()
            .ok_or_else(|| invalid("Steam API Key cannot be empty"))?;
        let steam_id = credentials
            .steam_id()
            .ok_or_else(|| invalid("Steam ID cannot be empty"))?;

        let players = fetch_players(self.transport, self.endpoints, api_key, steam_id)
            .map_err(|e| {
                tracing::warn!(error = %e, "Credential validation failed");
                match e {
                    UpstreamError::Status(status) => invalid(&format!(
                        "API validation failed with status code: {}",
                        status
                    )),
                    UpstreamError::Format(msg) if msg == INVALID_FORMAT => invalid(INVALID_FORMAT),
                    other => invalid(&format!("Credential validation failed: {}", other)),
                }
            })?;

        if players.is_empty() {
            return Err(invalid(&format!("No Steam user found with ID: {}", steam_id)));
        }

        tracing::info!(steam_id = %steam_id, "Steam credentials validated");
        Ok(())
    }

    /// Profile of `steam_id`, reporting failures inside the record instead of as errors
    pub fn player_summary(
        &self,
        credentials: &Credentials,
        steam_id: &str,
    ) -> ResultRecord<PlayerSummary> {
        let Some(api_key) = credentials.api_key() else {
            return ResultRecord::failed("API Key does not exist");
        };

        match fetch_players(self.transport, self.endpoints, api_key, steam_id) {
            Ok(players) => match players.into_iter().next() {
                Some(player) => ResultRecord::ok(PlayerSummary {
                    player: SteamPlayer::into_profile(player),
                }),
                None => ResultRecord::failed(format!("No Steam user found with ID: {}", steam_id)),
            },
            Err(UpstreamError::Status(status)) => ResultRecord::failed(format!(
                "Steam API request failed: HTTP status code {}",
                status
            )),
            Err(UpstreamError::Format(msg)) if msg == INVALID_FORMAT => {
                ResultRecord::failed(INVALID_FORMAT)
            }
            Err(e) => ResultRecord::failed(format!("Failed to get player profile: {}", e)),
        }
    }
}

fn invalid(message: &str) -> CredentialValidationError {
    CredentialValidationError(message.to_string())
}
