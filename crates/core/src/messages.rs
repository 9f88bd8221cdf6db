//! Messages handed back to the host runtime

use serde::{Deserialize, Serialize};

/// The single output of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolMessage {
    /// Structured result record
    Json { json: serde_json::Value },

    /// Informational notice, used when upstream returned an empty result
    Text { text: String },
}

impl ToolMessage {
    pub fn json<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        Ok(ToolMessage::Json {
            json: serde_json::to_value(record)?,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        ToolMessage::Text { text: text.into() }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ToolMessage::Json { json } => Some(json),
            ToolMessage::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolMessage::Text { text } => Some(text),
            ToolMessage::Json { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let text = serde_json::to_value(ToolMessage::text("No news found for game ID 440")).unwrap();
        assert_eq!(text, serde_json::json!({"type": "text", "text": "No news found for game ID 440"}));

        let json = ToolMessage::json(&serde_json::json!({"success": true})).unwrap();
        assert_eq!(
            serde_json::to_value(&json).unwrap(),
            serde_json::json!({"type": "json", "json": {"success": true}})
        );
    }
}
