//! Repository port for loading and saving the endpoint store.

use crate::endpoint::domain::EndpointStore;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for endpoint store persistence operations.
pub type EndpointStoreResult<T> = Result<T, EndpointStoreError>;

/// Outcome of loading the persisted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// The loaded store, or an empty store when nothing usable was found.
    pub store: EndpointStore,
    /// Set when persisted data existed but was discarded as malformed.
    pub warning: Option<String>,
}

impl LoadOutcome {
    /// Wraps a successfully loaded store.
    #[must_use]
    pub const fn loaded(store: EndpointStore) -> Self {
        Self {
            store,
            warning: None,
        }
    }

    /// Builds the empty-store outcome used when malformed data was skipped.
    #[must_use]
    pub fn recovered(warning: impl Into<String>) -> Self {
        Self {
            store: EndpointStore::empty(),
            warning: Some(warning.into()),
        }
    }
}

/// Persistence contract for the endpoint store.
///
/// Implementations replace the whole persisted store on every save; a
/// reader must never observe a partially written store.
#[async_trait]
pub trait EndpointStoreRepository: Send + Sync {
    /// Loads the persisted store.
    ///
    /// Missing data yields an empty store. Malformed data yields an empty
    /// store together with a warning rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] when existing data cannot be read.
    async fn load(&self) -> EndpointStoreResult<LoadOutcome>;

    /// Durably replaces the persisted store with `store`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] or
    /// [`EndpointStoreError::Serialization`] when the write cannot complete.
    async fn save(&self, store: &EndpointStore) -> EndpointStoreResult<()>;
}

/// Errors returned by endpoint store repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EndpointStoreError {
    /// Filesystem failure while reading or writing the store.
    #[error("endpoint store I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// The store could not be encoded.
    #[error("endpoint store serialisation error: {0}")]
    Serialization(Arc<dyn std::error::Error + Send + Sync>),
}

impl EndpointStoreError {
    /// Wraps a filesystem error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Wraps an encoding error.
    pub fn serialization(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Serialization(Arc::new(err))
    }
}
