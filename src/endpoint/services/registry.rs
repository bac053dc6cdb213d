//! Service layer for endpoint registration and selection.
//!
//! Provides [`EndpointRegistry`], which owns the in-memory endpoint store,
//! loads it lazily on first use, and persists every mutation before
//! reporting success.

use crate::dispatch::ports::EndpointResolver;
use crate::endpoint::{
    domain::{
        BaseUrl, Credential, EndpointConfig, EndpointDomainError, EndpointName, EndpointRemoval,
        EndpointStore, EndpointSummary,
    },
    ports::{EndpointStoreError, EndpointStoreRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

/// Request payload for adding an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEndpointRequest {
    name: String,
    credential: String,
    base_url: Option<String>,
    display_name: Option<String>,
    make_active: bool,
}

impl AddEndpointRequest {
    /// Creates a request with the mandatory name and credential.
    #[must_use]
    pub fn new(name: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credential: credential.into(),
            base_url: None,
            display_name: None,
            make_active: false,
        }
    }

    /// Sets the base URL. The default is `http://localhost:27123`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the human-readable display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Makes the new endpoint active once added.
    #[must_use]
    pub const fn make_active(mut self, make_active: bool) -> Self {
        self.make_active = make_active;
        self
    }
}

/// Service-level errors for endpoint registry operations.
#[derive(Debug, Clone, Error)]
pub enum EndpointRegistryError {
    /// No endpoint has the requested name.
    #[error("endpoint '{0}' not found")]
    NotFound(String),

    /// An endpoint with the requested name already exists.
    #[error("endpoint '{0}' already exists")]
    AlreadyExists(String),

    /// Input failed domain validation.
    #[error(transparent)]
    Domain(EndpointDomainError),

    /// The persisted store could not be read or written.
    #[error(transparent)]
    Store(#[from] EndpointStoreError),
}

impl From<EndpointDomainError> for EndpointRegistryError {
    fn from(err: EndpointDomainError) -> Self {
        match err {
            EndpointDomainError::UnknownEndpoint(name) => Self::NotFound(name),
            EndpointDomainError::DuplicateEndpoint(name) => Self::AlreadyExists(name),
            other => Self::Domain(other),
        }
    }
}

/// Result type for endpoint registry operations.
pub type EndpointRegistryResult<T> = Result<T, EndpointRegistryError>;

#[derive(Debug)]
struct RegistryState {
    store: Mutex<EndpointStore>,
    load_warning: Option<String>,
}

/// Endpoint registration and active-selection service.
///
/// The store is loaded at most once per registry; concurrent first callers
/// wait on the same load. Mutations are serialised: each one is applied to
/// a copy, saved, and only then committed to memory, so a failed save
/// leaves memory and disk in agreement.
pub struct EndpointRegistry<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    state: OnceCell<RegistryState>,
}

impl<R, C> EndpointRegistry<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    /// Creates a registry that has not yet loaded its store.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            state: OnceCell::const_new(),
        }
    }

    /// Loads the persisted store unless it is already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::Store`] when the store cannot be
    /// read. A later call retries the load.
    pub async fn initialize(&self) -> EndpointRegistryResult<()> {
        self.state().await.map(|_| ())
    }

    /// Returns the warning recorded when malformed persisted data was
    /// discarded during initialisation.
    #[must_use]
    pub fn load_warning(&self) -> Option<&str> {
        self.state
            .get()
            .and_then(|state| state.load_warning.as_deref())
    }

    /// Lists every endpoint in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::Store`] when initialisation fails.
    pub async fn list(&self) -> EndpointRegistryResult<Vec<EndpointSummary>> {
        let store = self.state().await?.store.lock().await;
        Ok(store.endpoints().iter().map(EndpointSummary::from).collect())
    }

    /// Returns the full configuration of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::NotFound`] when `name` is absent.
    pub async fn get(&self, name: &str) -> EndpointRegistryResult<EndpointConfig> {
        let store = self.state().await?.store.lock().await;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| EndpointRegistryError::NotFound(name.to_owned()))
    }

    /// Returns the active endpoint, or `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::Store`] when initialisation fails.
    pub async fn get_active(&self) -> EndpointRegistryResult<Option<EndpointConfig>> {
        let store = self.state().await?.store.lock().await;
        Ok(store.active().cloned())
    }

    /// Returns a copy of the whole store, including default and active
    /// pointers.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::Store`] when initialisation fails.
    pub async fn snapshot(&self) -> EndpointRegistryResult<EndpointStore> {
        let store = self.state().await?.store.lock().await;
        Ok(store.clone())
    }

    /// Adds a new endpoint and persists the store.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::AlreadyExists`] when the name is
    /// taken, [`EndpointRegistryError::Domain`] when input is invalid, or
    /// [`EndpointRegistryError::Store`] when the save fails.
    pub async fn add(&self, request: AddEndpointRequest) -> EndpointRegistryResult<EndpointConfig> {
        let AddEndpointRequest {
            name,
            credential,
            base_url,
            display_name,
            make_active,
        } = request;

        let endpoint_name = EndpointName::new(name)?;
        let endpoint_credential = Credential::new(credential)?;
        let endpoint_url = base_url.map(BaseUrl::parse).transpose()?.unwrap_or_default();
        let endpoint = EndpointConfig::new(
            endpoint_name,
            endpoint_credential,
            endpoint_url,
            display_name,
        );

        let added = self
            .mutate(move |store, now| {
                store
                    .insert(endpoint, make_active.then_some(now))
                    .cloned()
            })
            .await?;
        tracing::info!(
            endpoint = %added.name(),
            base_url = %added.base_url(),
            active = added.is_active(),
            "added endpoint"
        );
        Ok(added)
    }

    /// Removes `name` and persists the store.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::NotFound`] when `name` is absent, or
    /// [`EndpointRegistryError::Store`] when the save fails.
    pub async fn remove(&self, name: &str) -> EndpointRegistryResult<EndpointRemoval> {
        let removal = self.mutate(|store, _| store.remove(name)).await?;
        tracing::info!(
            endpoint = %removal.removed.name(),
            was_active = removal.was_active,
            active = removal.active_name.as_ref().map(EndpointName::as_str),
            "removed endpoint"
        );
        Ok(removal)
    }

    /// Makes `name` the active endpoint and persists the store.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointRegistryError::NotFound`] when `name` is absent, or
    /// [`EndpointRegistryError::Store`] when the save fails.
    pub async fn set_active(&self, name: &str) -> EndpointRegistryResult<EndpointConfig> {
        let activated = self
            .mutate(|store, now| store.activate(name, now).cloned())
            .await?;
        tracing::info!(endpoint = %activated.name(), "activated endpoint");
        Ok(activated)
    }

    async fn state(&self) -> EndpointRegistryResult<&RegistryState> {
        self.state
            .get_or_try_init(|| async {
                let outcome = self.repository.load().await?;
                if let Some(warning) = &outcome.warning {
                    tracing::warn!(%warning, "starting with an empty endpoint store");
                }
                tracing::debug!(endpoints = outcome.store.len(), "endpoint registry initialised");
                Ok::<_, EndpointRegistryError>(RegistryState {
                    store: Mutex::new(outcome.store),
                    load_warning: outcome.warning,
                })
            })
            .await
    }

    async fn mutate<T, F>(&self, apply: F) -> EndpointRegistryResult<T>
    where
        F: FnOnce(&mut EndpointStore, DateTime<Utc>) -> Result<T, EndpointDomainError> + Send,
        T: Send,
    {
        let mut current = self.state().await?.store.lock().await;
        let mut next = current.clone();
        let outcome = apply(&mut next, self.clock.utc())?;
        self.repository.save(&next).await?;
        *current = next;
        Ok(outcome)
    }
}

#[async_trait]
impl<R, C> EndpointResolver for EndpointRegistry<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    async fn endpoint(&self, name: &str) -> EndpointRegistryResult<EndpointConfig> {
        self.get(name).await
    }

    async fn active_endpoint(&self) -> EndpointRegistryResult<Option<EndpointConfig>> {
        self.get_active().await
    }
}
