//! Wire model of the persisted endpoint document.
//!
//! The document is a JSON object keyed by endpoint name:
//!
//! ```json
//! {
//!   "vaults": {
//!     "work": {
//!       "apiKey": "k1",
//!       "baseUrl": "http://localhost:27123",
//!       "name": "Work",
//!       "port": 27123,
//!       "isActive": true,
//!       "lastUsed": "2024-05-01T09:30:00Z"
//!     }
//!   },
//!   "defaultVault": "work",
//!   "activeVault": "work"
//! }
//! ```
//!
//! Key order in `vaults` is the store's insertion order.

use crate::endpoint::domain::{
    BaseUrl, Credential, DEFAULT_PORT, EndpointConfig, EndpointDomainError, EndpointName,
    EndpointStore, PersistedEndpointData,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a persisted document could not be turned into a store.
#[derive(Debug, Error)]
pub enum PersistedStoreError {
    /// The document is not valid JSON or lacks the `vaults` object.
    #[error("malformed endpoint document: {0}")]
    Document(#[from] serde_json::Error),

    /// One endpoint record has the wrong shape.
    #[error("malformed record for endpoint '{name}': {source}")]
    Record {
        /// Key of the offending record.
        name: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// One endpoint record holds an invalid value.
    #[error("invalid record for endpoint '{name}': {source}")]
    InvalidRecord {
        /// Key of the offending record.
        name: String,
        /// Validation failure.
        #[source]
        source: EndpointDomainError,
    },

    /// The records are individually valid but inconsistent as a whole.
    #[error("inconsistent endpoint document: {0}")]
    Inconsistent(#[from] EndpointDomainError),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedDocument {
    vaults: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_vault: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_vault: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    name: String,
    api_key: String,
    base_url: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_used: Option<DateTime<Utc>>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl PersistedRecord {
    fn from_config(endpoint: &EndpointConfig) -> Self {
        Self {
            name: endpoint.display_name().to_owned(),
            api_key: endpoint.credential().expose().to_owned(),
            base_url: endpoint.base_url().as_str().to_owned(),
            port: endpoint.port(),
            is_active: endpoint.is_active(),
            last_used: endpoint.last_used_at(),
        }
    }

    fn into_config(self, key: &str) -> Result<EndpointConfig, EndpointDomainError> {
        if self.port == 0 {
            return Err(EndpointDomainError::InvalidBaseUrl {
                url: self.base_url,
                reason: "port must be between 1 and 65535".to_owned(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(EndpointDomainError::EmptyName);
        }

        Ok(EndpointConfig::from_persisted(PersistedEndpointData {
            name: EndpointName::new(key)?,
            display_name: self.name,
            credential: Credential::new(self.api_key)?,
            base_url: BaseUrl::parse(self.base_url)?,
            port: self.port,
            is_active: self.is_active,
            last_used_at: self.last_used,
        }))
    }
}

/// Decodes a persisted document into a validated store.
///
/// # Errors
///
/// Returns [`PersistedStoreError`] when the text is not a well-formed
/// endpoint document.
pub fn decode_store(text: &str) -> Result<EndpointStore, PersistedStoreError> {
    let document: PersistedDocument = serde_json::from_str(text)?;

    let mut endpoints = Vec::with_capacity(document.vaults.len());
    for (key, value) in document.vaults {
        let record: PersistedRecord =
            serde_json::from_value(value).map_err(|source| PersistedStoreError::Record {
                name: key.clone(),
                source,
            })?;
        let endpoint = record
            .into_config(&key)
            .map_err(|source| PersistedStoreError::InvalidRecord { name: key, source })?;
        endpoints.push(endpoint);
    }

    let default_name = document.default_vault.map(EndpointName::new).transpose()?;
    let active_name = document.active_vault.map(EndpointName::new).transpose()?;
    Ok(EndpointStore::from_persisted(
        endpoints,
        default_name,
        active_name,
    )?)
}

/// Encodes a store as a pretty-printed persisted document.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when encoding fails.
pub fn encode_store(store: &EndpointStore) -> Result<String, serde_json::Error> {
    let mut vaults = Map::new();
    for endpoint in store.endpoints() {
        vaults.insert(
            endpoint.name().as_str().to_owned(),
            serde_json::to_value(PersistedRecord::from_config(endpoint))?,
        );
    }

    let document = PersistedDocument {
        vaults,
        default_vault: store.default_name().map(|name| name.as_str().to_owned()),
        active_vault: store.active_name().map(|name| name.as_str().to_owned()),
    };
    serde_json::to_string_pretty(&document)
}
