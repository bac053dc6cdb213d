//! Error types for endpoint domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating endpoint domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointDomainError {
    /// The endpoint name is empty after trimming.
    #[error("endpoint name must not be empty")]
    EmptyName,

    /// The credential is empty after trimming.
    #[error("endpoint credential must not be empty")]
    EmptyCredential,

    /// The base URL is not an absolute `http` or `https` URL with a host.
    #[error("base URL '{url}' is invalid: {reason}")]
    InvalidBaseUrl {
        /// The rejected input.
        url: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// An endpoint with the same name is already in the store.
    #[error("endpoint '{0}' already exists")]
    DuplicateEndpoint(String),

    /// No endpoint with the given name is in the store.
    #[error("endpoint '{0}' not found")]
    UnknownEndpoint(String),

    /// A default or active pointer refers to an endpoint that is not stored.
    #[error("{pointer} endpoint '{name}' does not refer to a stored endpoint")]
    DanglingPointer {
        /// Which pointer is dangling (`default` or `active`).
        pointer: &'static str,
        /// The missing endpoint name.
        name: String,
    },
}
