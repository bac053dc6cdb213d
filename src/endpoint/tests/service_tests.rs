//! Service orchestration tests for the endpoint registry.

use std::sync::Arc;

use super::FixedClock;
use crate::endpoint::{
    adapters::memory::InMemoryEndpointStore,
    domain::{BaseUrl, Credential, EndpointConfig, EndpointName, EndpointStore},
    services::{AddEndpointRequest, EndpointRegistry, EndpointRegistryError},
};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

type TestRegistry = EndpointRegistry<InMemoryEndpointStore, DefaultClock>;

#[fixture]
fn repository() -> InMemoryEndpointStore {
    InMemoryEndpointStore::new()
}

fn registry_over(repository: &InMemoryEndpointStore) -> TestRegistry {
    EndpointRegistry::new(Arc::new(repository.clone()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_then_get_returns_what_was_passed(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("work", "k1").with_base_url("http://10.0.0.5:27124"))
        .await
        .expect("add should succeed");

    let fetched = registry.get("work").await.expect("work exists");

    assert_eq!(fetched.credential().expose(), "k1");
    assert_eq!(fetched.base_url().as_str(), "http://10.0.0.5:27124");
    assert_eq!(fetched.port(), 27124);
    assert_eq!(fetched.display_name(), "work");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_defaults_base_url_and_persists_before_returning(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("home", "k2"))
        .await
        .expect("add should succeed");

    let stored = repository.stored().expect("state readable");
    let home = stored.get("home").expect("home persisted");
    assert_eq!(home.base_url().as_str(), "http://localhost:27123");
    assert_eq!(stored.default_name().map(EndpointName::as_str), Some("home"));
    assert_eq!(stored.active_name(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_on_existing_name_fails_and_keeps_the_original(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("work", "k1"))
        .await
        .expect("first add succeeds");

    let result = registry
        .add(AddEndpointRequest::new("work", "other").with_base_url("http://10.1.1.1:1234"))
        .await;

    assert!(matches!(result, Err(EndpointRegistryError::AlreadyExists(name)) if name == "work"));
    let kept = registry.get("work").await.expect("work exists");
    assert_eq!(kept.credential().expose(), "k1");
    assert_eq!(kept.base_url().as_str(), "http://localhost:27123");
    assert_eq!(repository.save_count().expect("state readable"), 1);
}

#[rstest]
#[case::blank_name("  ", "k1", None)]
#[case::blank_credential("work", " ", None)]
#[case::relative_url("work", "k1", Some("localhost:27123"))]
#[case::unsupported_scheme("work", "k1", Some("ftp://localhost"))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_input_is_rejected_without_saving(
    repository: InMemoryEndpointStore,
    #[case] name: &str,
    #[case] credential: &str,
    #[case] base_url: Option<&str>,
) {
    let registry = registry_over(&repository);
    let mut request = AddEndpointRequest::new(name, credential);
    if let Some(url) = base_url {
        request = request.with_base_url(url);
    }

    let result = registry.add(request).await;

    assert!(matches!(result, Err(EndpointRegistryError::Domain(_))));
    assert_eq!(repository.save_count().expect("state readable"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_names_are_not_found(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);

    assert!(matches!(
        registry.get("ghost").await,
        Err(EndpointRegistryError::NotFound(_))
    ));
    assert!(matches!(
        registry.remove("ghost").await,
        Err(EndpointRegistryError::NotFound(_))
    ));
    assert!(matches!(
        registry.set_active("ghost").await,
        Err(EndpointRegistryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn padded_names_address_the_trimmed_endpoint(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new(" work ", "k1"))
        .await
        .expect("add should succeed");

    assert_eq!(
        registry.get(" work ").await.expect("found").name().as_str(),
        "work"
    );
    registry.set_active("work ").await.expect("activates");
    registry.remove(" work").await.expect("removes");
    assert!(repository.stored().expect("state readable").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_active_endpoint_is_a_normal_state(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("work", "k1"))
        .await
        .expect("add should succeed");

    assert_eq!(registry.get_active().await.expect("lookup succeeds"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_and_home_example(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);

    registry
        .add(
            AddEndpointRequest::new("work", "k1")
                .with_base_url("http://localhost:27123")
                .make_active(true),
        )
        .await
        .expect("add work");
    let active = registry.get_active().await.expect("lookup succeeds");
    assert_eq!(active.map(|config| config.name().as_str().to_owned()).as_deref(), Some("work"));

    registry
        .add(AddEndpointRequest::new("home", "k2").make_active(false))
        .await
        .expect("add home");
    let still_active = registry.get_active().await.expect("lookup succeeds");
    assert_eq!(
        still_active.map(|config| config.name().as_str().to_owned()).as_deref(),
        Some("work")
    );

    registry.set_active("home").await.expect("activate home");
    let now_active = registry
        .get_active()
        .await
        .expect("lookup succeeds")
        .expect("an endpoint is active");
    assert_eq!(now_active.name().as_str(), "home");

    let listing = registry.list().await.expect("list succeeds");
    let work = listing
        .iter()
        .find(|summary| summary.name == "work")
        .expect("work listed");
    assert!(!work.is_active);
    assert_eq!(
        listing.iter().filter(|summary| summary.is_active).count(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_active_is_the_only_path_that_stamps_last_used() {
    let repository = InMemoryEndpointStore::new();
    let clock = Arc::new(FixedClock::at(2024, 6, 1));
    let registry = EndpointRegistry::new(Arc::new(repository.clone()), Arc::clone(&clock));

    registry
        .add(AddEndpointRequest::new("work", "k1"))
        .await
        .expect("add work");
    assert_eq!(
        registry.get("work").await.expect("work exists").last_used_at(),
        None
    );

    clock.advance_days(2);
    registry.set_active("work").await.expect("activate work");

    let stored = repository.stored().expect("state readable");
    assert_eq!(
        stored.get("work").expect("work persisted").last_used_at(),
        Some(clock.utc())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_the_active_endpoint_reports_the_replacement(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("work", "k1"))
        .await
        .expect("add work");
    registry
        .add(AddEndpointRequest::new("home", "k2").make_active(true))
        .await
        .expect("add home");

    let removal = registry.remove("home").await.expect("remove home");

    assert!(removal.was_active);
    assert_eq!(
        removal.active_name.as_ref().map(EndpointName::as_str),
        Some("work")
    );
    let active = registry
        .get_active()
        .await
        .expect("lookup succeeds")
        .expect("work becomes active");
    assert!(active.is_active());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_save_leaves_memory_matching_disk(repository: InMemoryEndpointStore) {
    let registry = registry_over(&repository);
    registry
        .add(AddEndpointRequest::new("work", "k1").make_active(true))
        .await
        .expect("add work");
    let before = registry.snapshot().await.expect("snapshot");

    repository.set_fail_saves(true).expect("state writable");
    let added = registry.add(AddEndpointRequest::new("home", "k2")).await;
    let removed = registry.remove("work").await;

    assert!(matches!(added, Err(EndpointRegistryError::Store(_))));
    assert!(matches!(removed, Err(EndpointRegistryError::Store(_))));
    assert_eq!(registry.snapshot().await.expect("snapshot"), before);
    assert_eq!(repository.stored().expect("state readable"), before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_is_loaded_once_for_concurrent_first_callers() {
    let mut seeded = EndpointStore::empty();
    seeded
        .insert(
            EndpointConfig::new(
                EndpointName::new("work").expect("valid name"),
                Credential::new("k1").expect("valid credential"),
                BaseUrl::default(),
                None,
            ),
            None,
        )
        .expect("seed store");
    let repository = InMemoryEndpointStore::with_store(seeded);
    let registry = Arc::new(registry_over(&repository));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let shared = Arc::clone(&registry);
        handles.push(tokio::spawn(async move { shared.list().await }));
    }
    for handle in handles {
        let listing = handle
            .await
            .expect("task joins")
            .expect("list succeeds");
        assert_eq!(listing.len(), 1);
    }

    assert_eq!(repository.load_count().expect("state readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_adds_are_all_persisted(repository: InMemoryEndpointStore) {
    let registry = Arc::new(registry_over(&repository));

    let mut handles = Vec::new();
    for index in 0..10 {
        let shared = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            shared
                .add(AddEndpointRequest::new(format!("vault-{index}"), "key"))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task joins").expect("add succeeds");
    }

    assert_eq!(repository.stored().expect("state readable").len(), 10);
    assert_eq!(repository.save_count().expect("state readable"), 10);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_store_starts_empty_with_a_warning() {
    let repository = InMemoryEndpointStore::malformed("vaults.json is not valid JSON");
    let registry = registry_over(&repository);

    registry.initialize().await.expect("initialise");
    registry.initialize().await.expect("initialise again");

    assert!(registry.list().await.expect("list succeeds").is_empty());
    assert_eq!(
        registry.load_warning(),
        Some("vaults.json is not valid JSON")
    );
    assert_eq!(repository.load_count().expect("state readable"), 1);
}
