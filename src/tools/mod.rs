//! Tool adapters over the endpoint registry and dispatcher.
//!
//! Each tool decodes its JSON arguments, performs one or more dispatches
//! (or registry calls), and renders the outcome as a [`ToolResponse`].
//! Every failure is converted to response text at this boundary; nothing
//! escapes [`ToolRouter::call`]. Transport framing of tool calls is left
//! to the embedding server.

mod args;
mod catalog;
mod commands;
mod encoding;
mod notes;
pub mod patch;
mod periodic;
mod response;
mod router;
mod search;
mod vault_management;

pub use catalog::{ToolDefinition, definitions};
pub use encoding::encode_component;
pub use response::ToolResponse;
pub use router::ToolRouter;
