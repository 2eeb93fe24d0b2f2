//! Warband ability - the single warband-wide modifier tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarbandAbility {
    Cyborgs,
    Fanatics,
    #[serde(rename = "Heavily Armed")]
    HeavilyArmed,
    #[serde(rename = "Living Weapons")]
    LivingWeapons,
    Mutants,
    Soldiers,
    Undead,
}

impl WarbandAbility {
    pub const ALL: [WarbandAbility; 7] = [
        Self::Cyborgs,
        Self::Fanatics,
        Self::HeavilyArmed,
        Self::LivingWeapons,
        Self::Mutants,
        Self::Soldiers,
        Self::Undead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cyborgs => "Cyborgs",
            Self::Fanatics => "Fanatics",
            Self::HeavilyArmed => "Heavily Armed",
            Self::LivingWeapons => "Living Weapons",
            Self::Mutants => "Mutants",
            Self::Soldiers => "Soldiers",
            Self::Undead => "Undead",
        }
    }

    /// Stable slug used as the catalog id ("heavily-armed").
    pub fn slug(&self) -> String {
        self.as_str().to_ascii_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for WarbandAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarbandAbility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|ability| ability.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| DomainError::validation(format!("Unknown warband ability: {s}")))
    }
}
