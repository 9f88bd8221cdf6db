//! Invocation inputs supplied by the host runtime

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ToolError;

/// Provider credentials, read-only to the tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: Option<String>,

    /// Only used when validating the provider's own account
    #[serde(default)]
    pub steam_id: Option<String>,
}

impl Credentials {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            steam_id: None,
        }
    }

    /// API key, if present and not blank
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn steam_id(&self) -> Option<&str> {
        non_blank(self.steam_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Caller parameters: string keys mapped to strings, numbers or booleans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolParameters(HashMap<String, serde_json::Value>);

impl ToolParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// String form of a parameter. Null and empty strings count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self.0.get(key)? {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Required parameter, failing with `message` when absent
    pub fn required(&self, key: &str, message: &str) -> Result<String, ToolError> {
        self.get(key)
            .ok_or_else(|| ToolError::InvalidParameter(message.to_string()))
    }

    /// Boolean flag given as "true"/"false" (any case) or a JSON bool.
    /// Only an absent or null value takes `default`; an empty string is false.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            None | Some(serde_json::Value::Null) => default,
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            Some(_) => false,
        }
    }

    /// Non-negative integer with a default, failing with `message` when malformed
    pub fn number_or(&self, key: &str, default: u32, message: &str) -> Result<u32, ToolError> {
        match self.get(key) {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ToolError::InvalidParameter(message.to_string())),
            None => Ok(default),
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for ToolParameters {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_lookup() {
        let params: ToolParameters = serde_json::from_value(serde_json::json!({
            "steamid": "76561197960435530",
            "appid": 440,
            "language": "",
            "include_appinfo": "FALSE",
            "include_played_free_games": true,
            "count": null
        }))
        .unwrap();

        assert_eq!(params.get("steamid").as_deref(), Some("76561197960435530"));
        assert_eq!(params.get("appid").as_deref(), Some("440"));
        assert_eq!(params.get("language"), None);
        assert_eq!(params.get("count"), None);
        assert!(!params.flag("include_appinfo", true));
        assert!(params.flag("include_played_free_games", false));
        assert!(params.flag("missing", true));
        assert!(params.flag("count", true));
    }

    #[test]
    fn test_empty_flag_is_false() {
        let params = ToolParameters::new()
            .with("include_appinfo", "")
            .with("include_played_free_games", "True");

        assert!(!params.flag("include_appinfo", true));
        assert!(params.flag("include_played_free_games", false));
    }

    #[test]
    fn test_required_and_numbers() {
        let params = ToolParameters::new().with("count", "five").with("maxlength", 120);

        let err = params.required("steamid", "Steam ID cannot be empty.").unwrap_err();
        assert_eq!(err.to_string(), "Steam ID cannot be empty.");

        assert!(params.number_or("count", 3, "bad count").is_err());
        assert_eq!(params.number_or("maxlength", 300, "bad").unwrap(), 120);
        assert_eq!(params.number_or("absent", 300, "bad").unwrap(), 300);
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let creds = Credentials {
            api_key: Some("  ".into()),
            steam_id: Some("76561197960435530".into()),
        };
        assert_eq!(creds.api_key(), None);
        assert_eq!(creds.steam_id(), Some("76561197960435530"));
    }
}
