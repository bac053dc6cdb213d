//! Endpoint store aggregate root.

use super::{EndpointConfig, EndpointDomainError, EndpointName};
use chrono::{DateTime, Utc};

/// The whole registry of endpoints with its default and active pointers.
///
/// Endpoints keep their insertion order, which makes default reassignment
/// after a removal deterministic. Every change to the active endpoint goes
/// through one internal helper that updates the pointer and the per-record
/// flags together, so a store value never shows them disagreeing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointStore {
    endpoints: Vec<EndpointConfig>,
    default_name: Option<EndpointName>,
    active_name: Option<EndpointName>,
}

/// Result of removing an endpoint from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRemoval {
    /// The endpoint that was removed.
    pub removed: EndpointConfig,
    /// Whether the removed endpoint was the active one.
    pub was_active: bool,
    /// The active endpoint after removal.
    pub active_name: Option<EndpointName>,
}

impl EndpointStore {
    /// Creates an empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reconstructs a store from persisted parts.
    ///
    /// Per-record active flags are reconciled to the active pointer: the
    /// record it names is marked active and every other record inactive.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::DuplicateEndpoint`] when two records
    /// share a name, or [`EndpointDomainError::DanglingPointer`] when the
    /// default or active pointer names a missing record.
    pub fn from_persisted(
        endpoints: Vec<EndpointConfig>,
        default_name: Option<EndpointName>,
        active_name: Option<EndpointName>,
    ) -> Result<Self, EndpointDomainError> {
        let mut store = Self::empty();
        for endpoint in endpoints {
            if store.contains(endpoint.name().as_str()) {
                return Err(EndpointDomainError::DuplicateEndpoint(
                    endpoint.name().as_str().to_owned(),
                ));
            }
            store.endpoints.push(endpoint);
        }

        for (pointer, target) in [("default", &default_name), ("active", &active_name)] {
            if let Some(missing) = target
                && !store.contains(missing.as_str())
            {
                return Err(EndpointDomainError::DanglingPointer {
                    pointer,
                    name: missing.as_str().to_owned(),
                });
            }
        }

        store.default_name = default_name;
        store.point_active_at(active_name, None);
        Ok(store)
    }

    /// Returns all endpoints in insertion order.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointConfig] {
        &self.endpoints
    }

    /// Returns the number of stored endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns whether the store holds no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Returns whether an endpoint with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Finds an endpoint by name.
    ///
    /// The lookup key is trimmed the same way [`EndpointName::new`] trims.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EndpointConfig> {
        let key = name.trim();
        self.endpoints.iter().find(|endpoint| endpoint.name() == key)
    }

    /// Returns the default endpoint name.
    #[must_use]
    pub const fn default_name(&self) -> Option<&EndpointName> {
        self.default_name.as_ref()
    }

    /// Returns the active endpoint name.
    #[must_use]
    pub const fn active_name(&self) -> Option<&EndpointName> {
        self.active_name.as_ref()
    }

    /// Returns the active endpoint, if one is selected.
    #[must_use]
    pub fn active(&self) -> Option<&EndpointConfig> {
        self.active_name
            .as_ref()
            .and_then(|name| self.get(name.as_str()))
    }

    /// Adds a new endpoint.
    ///
    /// The first endpoint added while no default is set becomes the default.
    /// When `activate_at` is given the endpoint is also made active and its
    /// last-used time is set.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::DuplicateEndpoint`] when the name is
    /// already present. The store is left unchanged in that case.
    pub fn insert(
        &mut self,
        endpoint: EndpointConfig,
        activate_at: Option<DateTime<Utc>>,
    ) -> Result<&EndpointConfig, EndpointDomainError> {
        if self.contains(endpoint.name().as_str()) {
            return Err(EndpointDomainError::DuplicateEndpoint(
                endpoint.name().as_str().to_owned(),
            ));
        }

        let name = endpoint.name().clone();
        self.endpoints.push(endpoint);
        if self.default_name.is_none() {
            self.default_name = Some(name.clone());
        }
        if let Some(at) = activate_at {
            self.point_active_at(Some(name.clone()), Some(at));
        }
        self.require(name.as_str())
    }

    /// Removes an endpoint by name.
    ///
    /// A removed default is replaced by the first remaining endpoint in
    /// insertion order. A removed active endpoint is replaced by the
    /// (possibly new) default, or cleared when nothing remains.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::UnknownEndpoint`] when no endpoint has
    /// the given name.
    pub fn remove(&mut self, name: &str) -> Result<EndpointRemoval, EndpointDomainError> {
        let key = name.trim();
        let index = self
            .endpoints
            .iter()
            .position(|endpoint| endpoint.name() == key)
            .ok_or_else(|| EndpointDomainError::UnknownEndpoint(name.to_owned()))?;
        let removed = self.endpoints.remove(index);

        if self.default_name.as_ref().is_some_and(|current| current == key) {
            self.default_name = self
                .endpoints
                .first()
                .map(|endpoint| endpoint.name().clone());
        }

        let was_active = self.active_name.as_ref().is_some_and(|current| current == key);
        if was_active {
            self.point_active_at(self.default_name.clone(), None);
        }

        Ok(EndpointRemoval {
            removed,
            was_active,
            active_name: self.active_name.clone(),
        })
    }

    /// Makes `name` the active endpoint and stamps its last-used time.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::UnknownEndpoint`] when no endpoint has
    /// the given name.
    pub fn activate(
        &mut self,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<&EndpointConfig, EndpointDomainError> {
        let target = self.require(name)?.name().clone();
        self.point_active_at(Some(target), Some(at));
        self.require(name)
    }

    fn require(&self, name: &str) -> Result<&EndpointConfig, EndpointDomainError> {
        self.get(name)
            .ok_or_else(|| EndpointDomainError::UnknownEndpoint(name.to_owned()))
    }

    /// Moves the active pointer and rewrites every record's flag to match.
    ///
    /// Callers guarantee that `target`, when present, names a stored record.
    fn point_active_at(&mut self, target: Option<EndpointName>, used_at: Option<DateTime<Utc>>) {
        for endpoint in &mut self.endpoints {
            let selected = target.as_ref().is_some_and(|name| name == endpoint.name());
            endpoint.set_active(selected);
            if selected && let Some(at) = used_at {
                endpoint.mark_used(at);
            }
        }
        self.active_name = target;
    }
}
