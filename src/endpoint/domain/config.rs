//! Endpoint configuration record.

use super::{BaseUrl, Credential, EndpointName};
use chrono::{DateTime, Utc};

/// One configured remote target.
///
/// The `is_active` flag is only changed by [`super::EndpointStore`], which
/// keeps it in step with the store's active pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    name: EndpointName,
    display_name: String,
    credential: Credential,
    base_url: BaseUrl,
    port: u16,
    is_active: bool,
    last_used_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEndpointData {
    /// Persisted store key.
    pub name: EndpointName,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted bearer credential.
    pub credential: Credential,
    /// Persisted base URL.
    pub base_url: BaseUrl,
    /// Persisted informational port.
    pub port: u16,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted last activation time.
    pub last_used_at: Option<DateTime<Utc>>,
}

impl EndpointConfig {
    /// Creates an inactive endpoint.
    ///
    /// The display name falls back to the endpoint name when absent or blank.
    #[must_use]
    pub fn new(
        name: EndpointName,
        credential: Credential,
        base_url: BaseUrl,
        label: Option<String>,
    ) -> Self {
        let display_name = label
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| name.as_str().to_owned());
        let port = base_url.port();
        Self {
            name,
            display_name,
            credential,
            base_url,
            port,
            is_active: false,
            last_used_at: None,
        }
    }

    /// Reconstructs an endpoint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEndpointData) -> Self {
        Self {
            name: data.name,
            display_name: data.display_name,
            credential: data.credential,
            base_url: data.base_url,
            port: data.port,
            is_active: data.is_active,
            last_used_at: data.last_used_at,
        }
    }

    /// Returns the unique endpoint name.
    #[must_use]
    pub const fn name(&self) -> &EndpointName {
        &self.name
    }

    /// Returns the human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the bearer credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the informational port recorded when the endpoint was added.
    ///
    /// Routing never uses this value; requests always go to the base URL.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether this endpoint is the active one.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns when the endpoint was last made active.
    #[must_use]
    pub const fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    pub(super) fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    pub(super) fn mark_used(&mut self, at: DateTime<Utc>) {
        self.last_used_at = Some(at);
    }
}
