//! In-memory repository for endpoint store tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::endpoint::{
    domain::EndpointStore,
    ports::{EndpointStoreError, EndpointStoreRepository, EndpointStoreResult, LoadOutcome},
};

/// Thread-safe in-memory endpoint store repository.
///
/// Clones share state, so a test can keep one handle to inspect what the
/// registry saved through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEndpointStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    store: EndpointStore,
    load_warning: Option<String>,
    loads: usize,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryEndpointStore {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `store`.
    #[must_use]
    pub fn with_store(store: EndpointStore) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState {
                store,
                ..InMemoryState::default()
            })),
        }
    }

    /// Creates a repository whose load reports malformed data.
    #[must_use]
    pub fn malformed(warning: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState {
                load_warning: Some(warning.into()),
                ..InMemoryState::default()
            })),
        }
    }

    /// Makes subsequent saves fail (or succeed again).
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] if the state lock is poisoned.
    pub fn set_fail_saves(&self, fail: bool) -> EndpointStoreResult<()> {
        self.write_state()?.fail_saves = fail;
        Ok(())
    }

    /// Returns the most recently saved store.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] if the state lock is poisoned.
    pub fn stored(&self) -> EndpointStoreResult<EndpointStore> {
        Ok(self.read_state()?.store.clone())
    }

    /// Returns how many times the store has been loaded.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] if the state lock is poisoned.
    pub fn load_count(&self) -> EndpointStoreResult<usize> {
        Ok(self.read_state()?.loads)
    }

    /// Returns how many saves have succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Io`] if the state lock is poisoned.
    pub fn save_count(&self) -> EndpointStoreResult<usize> {
        Ok(self.read_state()?.saves)
    }

    fn read_state(&self) -> EndpointStoreResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| EndpointStoreError::io(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> EndpointStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| EndpointStoreError::io(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl EndpointStoreRepository for InMemoryEndpointStore {
    async fn load(&self) -> EndpointStoreResult<LoadOutcome> {
        let mut state = self.write_state()?;
        state.loads += 1;
        Ok(state.load_warning.as_ref().map_or_else(
            || LoadOutcome::loaded(state.store.clone()),
            LoadOutcome::recovered,
        ))
    }

    async fn save(&self, store: &EndpointStore) -> EndpointStoreResult<()> {
        let mut state = self.write_state()?;
        if state.fail_saves {
            return Err(EndpointStoreError::io(std::io::Error::other(
                "simulated save failure",
            )));
        }
        state.store = store.clone();
        state.saves += 1;
        Ok(())
    }
}
