//! Repository adapters for the endpoint store.

mod blocking;
pub mod json_file;
pub mod memory;
mod persisted;

pub use json_file::{JsonFileEndpointStore, STORE_FILE_NAME};
pub use memory::InMemoryEndpointStore;
pub use persisted::{PersistedStoreError, decode_store, encode_store};
