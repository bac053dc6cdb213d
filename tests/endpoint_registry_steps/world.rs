//! Shared world state for endpoint registry BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tempfile::TempDir;
use vault_relay::config::RelayConfig;
use vault_relay::endpoint::{
    adapters::JsonFileEndpointStore,
    domain::EndpointConfig,
    services::{AddEndpointRequest, EndpointRegistry, EndpointRegistryError},
};

/// Registry type used by the BDD world.
pub type TestRegistry = EndpointRegistry<JsonFileEndpointStore, DefaultClock>;

/// Scenario world for endpoint registry behaviour tests.
pub struct RegistryWorld {
    /// Directory holding the persisted store for this scenario.
    pub config_dir: TempDir,
    /// The registry under test.
    pub registry: TestRegistry,
    /// Result of the last add attempt.
    pub last_add_result: Option<Result<EndpointConfig, EndpointRegistryError>>,
}

impl RegistryWorld {
    /// Creates a world backed by a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "A scenario cannot run without its config directory"
    )]
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("create scenario config dir");
        let registry = open_registry(&config_dir);
        Self {
            config_dir,
            registry,
            last_add_result: None,
        }
    }

    /// Replaces the registry with a new one reading the same directory.
    pub fn restart(&mut self) {
        self.registry = open_registry(&self.config_dir);
    }
}

impl Default for RegistryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}

fn open_registry(config_dir: &TempDir) -> TestRegistry {
    let config = RelayConfig::with_dir(config_dir.path());
    EndpointRegistry::new(
        Arc::new(JsonFileEndpointStore::new(&config)),
        Arc::new(DefaultClock),
    )
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds an [`AddEndpointRequest`] from a name and credential.
pub fn build_request(name: &str, credential: &str) -> AddEndpointRequest {
    AddEndpointRequest::new(name, credential)
}
