//! Game rules: pricing, limits and validation.

pub mod cost;
pub mod limits;
pub mod modifiers;
pub mod validation;

pub use cost::{CostBreakdown, CostEngine, ItemCost};
pub use limits::{EXCEPTION_POINT_LIMIT, TROOPER_POINT_LIMIT};
pub use modifiers::{CostCategory, CostModifier, ItemKey, ModifiedCost, ModifierTable};
pub use validation::{ValidationCode, ValidationEngine, ValidationError, ValidationResult};
