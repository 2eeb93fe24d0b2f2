//! Attribute record and tier ladders.
//!
//! Dice tiers are ordered (`2d6 < 2d8 < 2d10`). Firepower uses its own ladder
//! with a `None` sentinel meaning the weirdo cannot make ranged attacks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dice tier used by defense, prowess and willpower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiceTier {
    #[serde(rename = "2d6")]
    D6,
    #[serde(rename = "2d8")]
    D8,
    #[serde(rename = "2d10")]
    D10,
}

impl DiceTier {
    pub const ALL: [DiceTier; 3] = [Self::D6, Self::D8, Self::D10];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D6 => "2d6",
            Self::D8 => "2d8",
            Self::D10 => "2d10",
        }
    }
}

impl fmt::Display for DiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiceTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Firepower ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Firepower {
    None,
    #[serde(rename = "2d8")]
    D8,
    #[serde(rename = "2d10")]
    D10,
}

impl Firepower {
    pub const ALL: [Firepower; 3] = [Self::None, Self::D8, Self::D10];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::D8 => "2d8",
            Self::D10 => "2d10",
        }
    }

    /// Whether the weirdo can carry ranged weapons at all.
    pub fn allows_ranged(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Firepower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five attributes every weirdo carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Speed,
    Defense,
    Firepower,
    Prowess,
    Willpower,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 5] = [
        Self::Speed,
        Self::Defense,
        Self::Firepower,
        Self::Prowess,
        Self::Willpower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Defense => "defense",
            Self::Firepower => "firepower",
            Self::Prowess => "prowess",
            Self::Willpower => "willpower",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weirdo's attribute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Speed level, 1-3 in the built-in tables
    pub speed: u8,
    pub defense: DiceTier,
    pub firepower: Firepower,
    pub prowess: DiceTier,
    pub willpower: DiceTier,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            speed: 1,
            defense: DiceTier::D6,
            firepower: Firepower::None,
            prowess: DiceTier::D6,
            willpower: DiceTier::D6,
        }
    }
}

impl Attributes {
    /// Table label for one attribute ("1", "2d8", "None", ...).
    pub fn tier_label(&self, kind: AttributeKind) -> String {
        match kind {
            AttributeKind::Speed => self.speed.to_string(),
            AttributeKind::Defense => self.defense.as_str().to_string(),
            AttributeKind::Firepower => self.firepower.as_str().to_string(),
            AttributeKind::Prowess => self.prowess.as_str().to_string(),
            AttributeKind::Willpower => self.willpower.as_str().to_string(),
        }
    }
}
