//! HTTP dispatcher.

use super::{DispatchError, DispatchPayload, DispatchRequest, DispatchResult, join_url};
use super::ports::EndpointResolver;
use crate::endpoint::domain::EndpointConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Content type sent unless a request overrides it.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP client settings for a [`Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Resolves endpoints and performs one HTTP round trip per request.
pub struct Dispatcher<E>
where
    E: EndpointResolver,
{
    resolver: Arc<E>,
    client: reqwest::Client,
}

impl<E> Dispatcher<E>
where
    E: EndpointResolver,
{
    /// Creates a dispatcher with an HTTP client built from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] when the HTTP client cannot be built.
    pub fn new(resolver: Arc<E>, settings: &DispatcherSettings) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(resolver, builder.build()?))
    }

    /// Creates a dispatcher around an existing HTTP client.
    #[must_use]
    pub const fn with_client(resolver: Arc<E>, client: reqwest::Client) -> Self {
        Self { resolver, client }
    }

    /// Sends `request` to its endpoint and returns the parsed body.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::EndpointNotFound`] or
    /// [`DispatchError::NoActiveEndpoint`] when no endpoint can be resolved,
    /// [`DispatchError::Connection`] when the remote cannot be reached, and
    /// [`DispatchError::RemoteApi`] when it answers with a non-2xx status,
    /// even if the rejected body cannot be read.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResult<DispatchPayload> {
        let endpoint = self.resolve(request.endpoint()).await?;
        let endpoint_name = endpoint.name().as_str();

        let target = join_url(endpoint.base_url().as_str(), request.path());
        let url = Url::parse(&target)
            .map_err(|err| DispatchError::invalid_request(endpoint_name, err.to_string()))?;
        let headers = build_headers(&endpoint, &request)?;
        let method = request.method().clone();

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if request.carries_body()
            && let Some(body) = request.into_body()
        {
            let wire = body
                .to_wire()
                .map_err(|err| DispatchError::invalid_request(endpoint_name, err.to_string()))?;
            builder = builder.body(wire);
        }

        tracing::debug!(
            method = %method,
            endpoint = endpoint_name,
            url = %target,
            "dispatching request"
        );
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(endpoint = endpoint_name, url = %target, error = %err, "request failed");
            DispatchError::connection(endpoint_name, &err)
        })?;

        let status = response.status();
        let declared_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"));
        let body = response.text().await;

        if !status.is_success() {
            let payload = body.map_or_else(
                |err| {
                    tracing::debug!(endpoint = endpoint_name, error = %err, "rejected response body unreadable");
                    DispatchPayload::Text(String::new())
                },
                |text| DispatchPayload::from_body(text, declared_json),
            );
            tracing::debug!(
                endpoint = endpoint_name,
                status = status.as_u16(),
                "remote rejected request"
            );
            return Err(DispatchError::RemoteApi {
                endpoint: endpoint_name.to_owned(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body: Box::new(payload),
            });
        }

        let text = body.map_err(|err| DispatchError::connection(endpoint_name, &err))?;
        Ok(DispatchPayload::from_body(text, declared_json))
    }

    /// Probes an endpoint with `GET /`.
    ///
    /// Any failure, whether resolution, transport, or a rejected status,
    /// yields `false`.
    pub async fn test_connection(&self, endpoint: Option<&str>) -> bool {
        let probe = DispatchRequest::get("/").on_endpoint(endpoint.map(str::to_owned));
        match self.dispatch(probe).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(endpoint = ?endpoint, error = %err, "connection test failed");
                false
            }
        }
    }

    async fn resolve(&self, endpoint: Option<&str>) -> DispatchResult<EndpointConfig> {
        match endpoint {
            Some(target) => Ok(self.resolver.endpoint(target).await?),
            None => self
                .resolver
                .active_endpoint()
                .await?
                .ok_or(DispatchError::NoActiveEndpoint),
        }
    }
}

pub(super) fn build_headers(
    endpoint: &EndpointConfig,
    request: &DispatchRequest,
) -> DispatchResult<HeaderMap> {
    let endpoint_name = endpoint.name().as_str();
    let invalid = |message: String| DispatchError::invalid_request(endpoint_name, message);

    let mut headers = HeaderMap::new();
    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {}", endpoint.credential().expose()))
            .map_err(|_| invalid("credential is not a valid header value".to_owned()))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    for (name, value) in request.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| invalid(format!("header name '{name}': {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| invalid(format!("header '{name}': {err}")))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
