//! Port contracts for endpoint store persistence.

mod repository;

pub use repository::{EndpointStoreError, EndpointStoreRepository, EndpointStoreResult, LoadOutcome};
