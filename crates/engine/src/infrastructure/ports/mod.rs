//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Roster storage (could swap the JSON file for a database)
//! - Clock (for testing)

mod clock;
mod error;
mod repos;

pub use clock::ClockPort;
pub use error::RepoError;
pub use repos::WarbandRepo;

#[cfg(test)]
pub use repos::MockWarbandRepo;
#[cfg(test)]
pub use clock::MockClockPort;
