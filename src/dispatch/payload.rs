//! Parsed response bodies.

use serde_json::Value;

/// Body of a remote response, parsed according to its content type.
///
/// Callers must check which shape they received; the same route may answer
/// with JSON on success and text on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchPayload {
    /// Body declared as JSON and parsed successfully.
    Json(Value),
    /// Any other body, verbatim.
    Text(String),
}

impl DispatchPayload {
    /// Interprets a raw body.
    ///
    /// A body declared as JSON that fails to parse is kept as text.
    #[must_use]
    pub fn from_body(text: String, declared_json: bool) -> Self {
        if declared_json {
            serde_json::from_str(&text).map_or_else(|_| Self::Text(text), Self::Json)
        } else {
            Self::Text(text)
        }
    }

    /// Returns the JSON value, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns whether the body is JSON `null` or whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Json(value) => value.is_null(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// Converts the body into a JSON value; text becomes a JSON string.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Renders the body for display: text verbatim, JSON pretty-printed.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

impl Default for DispatchPayload {
    fn default() -> Self {
        Self::Text(String::new())
    }
}
