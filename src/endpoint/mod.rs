//! Named remote endpoint ("vault") registry for the relay.
//!
//! This module owns the persisted collection of endpoint configurations and
//! the invariants around it: unique names, at most one active endpoint, and
//! the default endpoint kept for reassignment after removals. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
