//! Error types for request dispatch.

use super::DispatchPayload;
use crate::endpoint::services::EndpointRegistryError;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Classified failure of one dispatched request.
///
/// [`DispatchError::Connection`] means the remote could not be reached;
/// [`DispatchError::RemoteApi`] means it was reached and rejected the
/// request. Callers rely on the two never being conflated.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The named endpoint is not registered.
    #[error("Vault '{0}' not found")]
    EndpointNotFound(String),

    /// No endpoint was named and none is active.
    #[error("No active vault configured. Please set an active vault or specify a vault name.")]
    NoActiveEndpoint,

    /// The remote could not be reached.
    #[error("Failed to connect to vault '{endpoint}': {message}")]
    Connection {
        /// Name of the endpoint that was targeted.
        endpoint: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The remote answered with a non-success status.
    #[error("HTTP {status}: {status_text}")]
    RemoteApi {
        /// Name of the endpoint that was targeted.
        endpoint: String,
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Parsed response body.
        body: Box<DispatchPayload>,
    },

    /// The request could not be built from the endpoint configuration.
    #[error("Invalid request for vault '{endpoint}': {message}")]
    InvalidRequest {
        /// Name of the endpoint that was targeted.
        endpoint: String,
        /// What was wrong with the request.
        message: String,
    },

    /// The endpoint registry failed while resolving the target.
    #[error(transparent)]
    Registry(EndpointRegistryError),
}

impl DispatchError {
    /// Builds a connection error from a transport failure, including its
    /// source chain in the message.
    pub(super) fn connection(endpoint: &str, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Connection {
            endpoint: endpoint.to_owned(),
            message,
        }
    }

    pub(super) fn invalid_request(endpoint: &str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            endpoint: endpoint.to_owned(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status when the remote rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<EndpointRegistryError> for DispatchError {
    fn from(err: EndpointRegistryError) -> Self {
        match err {
            EndpointRegistryError::NotFound(name) => Self::EndpointNotFound(name),
            other => Self::Registry(other),
        }
    }
}
