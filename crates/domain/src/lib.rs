//! Warband domain: roster types, the game-data catalog and the cost and
//! validation engines.
//!
//! Everything here is synchronous and free of I/O apart from
//! `GameData::load_dir`.

pub mod entities;
pub mod error;
pub mod game_data;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use entities::{
    Equipment, EquipmentType, LeaderTrait, PsychicPower, PsychicPowerType, Warband, Weapon,
    WeaponType, Weirdo, WeirdoType, MAX_WEIRDOS, POINT_LIMITS,
};
pub use error::{CatalogError, DomainError};
pub use game_data::{AbilityDefinition, CatalogSources, GameData, LeaderTraitInfo, TierCost};
pub use ids::{WarbandId, WeirdoId};
pub use rules::{
    CostBreakdown, CostCategory, CostEngine, CostModifier, ItemCost, ModifiedCost,
    ValidationCode, ValidationEngine, ValidationError, ValidationResult,
};
pub use value_objects::{AttributeKind, Attributes, DiceTier, Firepower, WarbandAbility};
