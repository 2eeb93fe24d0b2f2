//! Roster entities.

mod items;
mod warband;
mod weirdo;

pub use items::{
    Equipment, EquipmentType, LeaderTrait, PsychicPower, PsychicPowerType, Weapon, WeaponType,
};
pub use warband::{Warband, MAX_WEIRDOS, POINT_LIMITS};
pub use weirdo::{Weirdo, WeirdoType};
