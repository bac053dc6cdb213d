//! Application services for endpoint registration and selection.

mod registry;

pub use registry::{
    AddEndpointRequest, EndpointRegistry, EndpointRegistryError, EndpointRegistryResult,
};
