//! Use cases - user story orchestration.
//!
//! Each module covers one area of the REST surface. Use cases hold the
//! domain engines and the ports they need; handlers stay thin.

mod error;

pub mod cost;
pub mod management;
pub mod transfer;
pub mod validation;

pub use cost::CostCalculation;
pub use error::WarbandError;
pub use management::WarbandManagement;
pub use transfer::WarbandTransfer;
pub use validation::RosterValidation;
