//! Request dispatch against remote note APIs.
//!
//! A [`Dispatcher`] resolves the target endpoint through an
//! [`ports::EndpointResolver`], performs exactly one HTTP round trip, and
//! classifies the outcome. Transport failures and remote rejections are
//! reported as distinct [`DispatchError`] variants; no request is retried.

mod address;
mod dispatcher;
mod error;
mod payload;
pub mod ports;
mod request;

pub use address::join_url;
pub use dispatcher::{Dispatcher, DispatcherSettings};
pub use error::{DispatchError, DispatchResult};
pub use payload::DispatchPayload;
pub use request::{DispatchRequest, RequestBody};

#[cfg(test)]
mod tests;
