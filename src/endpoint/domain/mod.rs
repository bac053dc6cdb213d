//! Domain model for endpoint configuration.
//!
//! The endpoint domain models validated connection settings for remote note
//! APIs and the store aggregate that keeps the active and default pointers
//! consistent. Persistence and networking remain outside this boundary.

mod base_url;
mod config;
mod credential;
mod error;
mod name;
mod store;
mod summary;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL, DEFAULT_PORT};
pub use config::{EndpointConfig, PersistedEndpointData};
pub use credential::Credential;
pub use error::EndpointDomainError;
pub use name::EndpointName;
pub use store::{EndpointRemoval, EndpointStore};
pub use summary::EndpointSummary;
