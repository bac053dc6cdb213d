//! Read-only endpoint listing entry.

use super::EndpointConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Endpoint details safe to show to operators. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    /// Unique endpoint name.
    pub name: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Configured base URL.
    pub base_url: String,
    /// Whether this is the active endpoint.
    pub is_active: bool,
    /// Last activation time.
    #[serde(rename = "lastUsed", skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<&EndpointConfig> for EndpointSummary {
    fn from(config: &EndpointConfig) -> Self {
        Self {
            name: config.name().as_str().to_owned(),
            display_name: config.display_name().to_owned(),
            base_url: config.base_url().as_str().to_owned(),
            is_active: config.is_active(),
            last_used_at: config.last_used_at(),
        }
    }
}
