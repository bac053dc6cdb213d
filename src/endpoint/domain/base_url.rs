//! Validated base URL of a remote endpoint.

use super::EndpointDomainError;
use std::fmt;
use url::Url;

/// Base URL used when an endpoint is added without one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:27123";

/// Port recorded when the base URL does not carry an explicit port.
pub const DEFAULT_PORT: u16 = 27123;

/// Absolute `http`/`https` URL of a remote note API.
///
/// The original text is kept verbatim because request routing concatenates
/// it with the request path; the parsed form is only used for validation
/// and for deriving the informational port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    raw: String,
    port: u16,
}

impl BaseUrl {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::InvalidBaseUrl`] when the input does
    /// not parse, has a scheme other than `http`/`https`, or has no host.
    pub fn parse(value: impl Into<String>) -> Result<Self, EndpointDomainError> {
        let raw = value.into().trim().to_owned();
        let invalid = |reason: String| EndpointDomainError::InvalidBaseUrl {
            url: raw.clone(),
            reason,
        };

        let parsed = Url::parse(&raw).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_owned()));
        }

        let port = parsed.port().unwrap_or(DEFAULT_PORT);
        Ok(Self { raw, port })
    }

    /// Returns the URL exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the explicit port, or [`DEFAULT_PORT`] when none was given.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            raw: DEFAULT_BASE_URL.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:27123", 27123)]
    #[case("https://notes.example.com:8443/", 8443)]
    #[case("http://127.0.0.1", DEFAULT_PORT)]
    #[case("https://vault.example.com", DEFAULT_PORT)]
    fn derives_port(#[case] input: &str, #[case] expected: u16) {
        let url = BaseUrl::parse(input).expect("valid base URL");
        assert_eq!(url.port(), expected);
        assert_eq!(url.as_str(), input);
    }

    #[rstest]
    #[case("")]
    #[case("localhost:27123")]
    #[case("ftp://localhost")]
    #[case("not a url")]
    fn rejects_invalid_urls(#[case] input: &str) {
        assert!(matches!(
            BaseUrl::parse(input),
            Err(EndpointDomainError::InvalidBaseUrl { .. })
        ));
    }
}
