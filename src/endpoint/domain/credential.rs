//! Bearer credential for a remote endpoint.

use super::EndpointDomainError;
use std::fmt;

/// Number of trailing characters revealed by the redacted form.
const VISIBLE_SUFFIX: usize = 4;

/// Opaque bearer token sent as `Authorization: Bearer <token>`.
///
/// `Debug` and `Display` never print the full token; use
/// [`Credential::expose`] when building the request header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::EmptyCredential`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EndpointDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EndpointDomainError::EmptyCredential);
        }
        Ok(Self(raw))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the token with everything but the last few characters masked.
    #[must_use]
    pub fn redacted(&self) -> String {
        let count = self.0.chars().count();
        if count <= VISIBLE_SUFFIX {
            return "*".repeat(count);
        }
        let suffix: String = self.0.chars().skip(count - VISIBLE_SUFFIX).collect();
        format!("{}{suffix}", "*".repeat(count - VISIBLE_SUFFIX))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
