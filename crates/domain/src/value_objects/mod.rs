//! Value objects - Immutable objects defined by their attributes

mod ability;
mod attributes;

pub use ability::WarbandAbility;
pub use attributes::{AttributeKind, Attributes, DiceTier, Firepower};
