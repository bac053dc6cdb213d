//! Offloads synchronous filesystem work from the async executor.

use crate::endpoint::ports::{EndpointStoreError, EndpointStoreResult};

/// Runs a blocking filesystem operation on the blocking thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> EndpointStoreResult<T>
where
    F: FnOnce() -> EndpointStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|err| {
        EndpointStoreError::io(std::io::Error::other(format!("task join error: {err}")))
    })?
}
