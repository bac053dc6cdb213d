//! Tool call results.

use serde::Serialize;
use serde_json::Value;

/// Text result of one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Text shown to the caller.
    pub text: String,
    /// Whether the call failed.
    pub is_error: bool,
}

impl ToolResponse {
    /// Creates a successful response.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates a failed response.
    #[must_use]
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Creates a successful response holding pretty-printed JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::success(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
    }
}
