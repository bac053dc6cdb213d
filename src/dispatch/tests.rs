//! Unit tests for endpoint resolution and error classification.

use super::ports::MockEndpointResolver;
use super::{DispatchError, DispatchPayload, DispatchRequest, Dispatcher, DispatcherSettings};
use crate::endpoint::domain::{BaseUrl, Credential, EndpointConfig, EndpointName};
use crate::endpoint::services::EndpointRegistryError;
use rstest::{fixture, rstest};
use std::sync::Arc;

fn endpoint(name: &str, base_url: &str) -> EndpointConfig {
    EndpointConfig::new(
        EndpointName::new(name).expect("valid name"),
        Credential::new("secret-key").expect("valid credential"),
        BaseUrl::parse(base_url).expect("valid url"),
        None,
    )
}

fn dispatcher(resolver: MockEndpointResolver) -> Dispatcher<MockEndpointResolver> {
    Dispatcher::new(Arc::new(resolver), &DispatcherSettings::default()).expect("client builds")
}

#[fixture]
fn resolver() -> MockEndpointResolver {
    MockEndpointResolver::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unnamed_request_without_active_endpoint_is_no_active(mut resolver: MockEndpointResolver) {
    resolver
        .expect_active_endpoint()
        .times(1)
        .returning(|| Ok(None));

    let result = dispatcher(resolver)
        .dispatch(DispatchRequest::get("/active/"))
        .await;

    assert!(matches!(result, Err(DispatchError::NoActiveEndpoint)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_named_endpoint_is_not_found(mut resolver: MockEndpointResolver) {
    resolver
        .expect_endpoint()
        .withf(|name| name == "ghost")
        .times(1)
        .returning(|name| Err(EndpointRegistryError::NotFound(name.to_owned())));
    resolver.expect_active_endpoint().never();

    let result = dispatcher(resolver)
        .dispatch(DispatchRequest::get("/").on_endpoint(Some("ghost".to_owned())))
        .await;

    assert!(matches!(result, Err(DispatchError::EndpointNotFound(name)) if name == "ghost"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_a_connection_error(mut resolver: MockEndpointResolver) {
    resolver
        .expect_active_endpoint()
        .returning(|| Ok(Some(endpoint("offline", "http://127.0.0.1:1"))));

    let result = dispatcher(resolver)
        .dispatch(DispatchRequest::get("/missing/path"))
        .await;

    match result {
        Err(DispatchError::Connection { endpoint, message }) => {
            assert_eq!(endpoint, "offline");
            assert!(!message.is_empty());
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_connection_swallows_every_failure(mut resolver: MockEndpointResolver) {
    resolver.expect_active_endpoint().returning(|| Ok(None));
    resolver
        .expect_endpoint()
        .returning(|_| Ok(endpoint("offline", "http://127.0.0.1:1")));
    let subject = dispatcher(resolver);

    assert!(!subject.test_connection(None).await);
    assert!(!subject.test_connection(Some("offline")).await);
}

#[rstest]
fn credential_that_is_not_a_header_value_is_rejected_before_sending() {
    let config = EndpointConfig::new(
        EndpointName::new("broken").expect("valid name"),
        Credential::new("line\nbreak").expect("non-empty credential"),
        BaseUrl::default(),
        None,
    );
    let request = DispatchRequest::get("/");

    let result = super::dispatcher::build_headers(&config, &request);

    assert!(matches!(result, Err(DispatchError::InvalidRequest { .. })));
}

#[rstest]
#[case::declared_json(r#"{"ok":true}"#, true, DispatchPayload::Json(serde_json::json!({"ok": true})))]
#[case::plain_text("# Note", false, DispatchPayload::Text("# Note".to_owned()))]
#[case::json_looking_text(r#"{"ok":true}"#, false, DispatchPayload::Text(r#"{"ok":true}"#.to_owned()))]
#[case::unparseable_json("not json", true, DispatchPayload::Text("not json".to_owned()))]
fn payload_shape_follows_declared_content_type(
    #[case] body: &str,
    #[case] declared_json: bool,
    #[case] expected: DispatchPayload,
) {
    assert_eq!(
        DispatchPayload::from_body(body.to_owned(), declared_json),
        expected
    );
}

#[rstest]
fn only_body_carrying_methods_send_a_body() {
    assert!(DispatchRequest::post("/").carries_body());
    assert!(DispatchRequest::put("/").carries_body());
    assert!(DispatchRequest::patch("/").carries_body());
    assert!(!DispatchRequest::get("/").carries_body());
    assert!(!DispatchRequest::delete("/").carries_body());
}
