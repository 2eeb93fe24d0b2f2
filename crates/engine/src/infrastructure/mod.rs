//! Infrastructure - external dependency implementations.
//!
//! Port traits live in `ports`; the JSON-file repository and the system
//! clock are the production adapters.

pub mod clock;
pub mod config;
pub mod json_store;
pub mod ports;
