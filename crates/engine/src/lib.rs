//! Warband Engine library.
//!
//! This crate contains all server-side code for the warband roster builder.
//!
//! ## Structure
//!
//! - `use_cases/` - Warband management, pricing, validation, import/export
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
