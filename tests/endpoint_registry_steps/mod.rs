//! Step definitions for endpoint registry BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
