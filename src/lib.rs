//! Vault relay: multi-endpoint registry and request dispatch for Obsidian
//! Local REST API servers.
//!
//! This crate keeps a persisted registry of named remote endpoints, tracks
//! which one is active, and routes authenticated HTTP requests to a chosen
//! endpoint (or the active one). A tool layer maps named operations onto
//! those requests.
//!
//! # Architecture
//!
//! The endpoint registry follows hexagonal architecture principles:
//!
//! - **Domain**: Endpoint configuration and store invariants
//! - **Ports**: The persistence trait the registry depends on
//! - **Adapters**: JSON file and in-memory store implementations
//! - **Services**: The registry that loads, mutates, and persists the store
//!
//! # Modules
//!
//! - [`endpoint`]: Endpoint registry and persistence
//! - [`dispatch`]: Authenticated HTTP dispatch to a resolved endpoint
//! - [`tools`]: Named tool operations over the registry and dispatcher
//! - [`resources`]: Bundled reference documents
//! - [`config`]: Configuration directory resolution
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod resources;
pub mod telemetry;
pub mod tools;
