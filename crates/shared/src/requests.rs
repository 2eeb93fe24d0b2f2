//! Request bodies for the REST API.

mod cost;
mod warband;

pub use cost::{
    BatchCostItem, BatchCostRequest, BatchItemType, CostCalculateRequest, WeaponSelection,
};
pub use warband::{CreateWarbandRequest, UpdateWarbandRequest, ValidateWeirdoRequest};
