//! Port through which the dispatcher looks up endpoints.

use crate::endpoint::domain::EndpointConfig;
use crate::endpoint::services::EndpointRegistryResult;
use async_trait::async_trait;

/// Read-only endpoint lookup used by the dispatcher.
///
/// The dispatcher never mutates endpoint state; it only asks for the
/// configuration to send a request with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// Returns the configuration of the named endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::endpoint::services::EndpointRegistryError::NotFound`]
    /// when no endpoint has that name.
    async fn endpoint(&self, name: &str) -> EndpointRegistryResult<EndpointConfig>;

    /// Returns the active endpoint, or `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint store cannot be loaded.
    async fn active_endpoint(&self) -> EndpointRegistryResult<Option<EndpointConfig>>;
}
