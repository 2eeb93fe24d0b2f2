//! Catalog items a weirdo can carry.
//!
//! Items are embedded in full on the weirdo (no foreign keys). The catalog
//! entry with the same name is authoritative for cost.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Close,
    Ranged,
}

impl WeaponType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Ranged => "ranged",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    pub base_cost: u32,
    pub max_actions: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    Passive,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub base_cost: u32,
    #[serde(default)]
    pub effect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PsychicPowerType {
    Attack,
    Effect,
    Either,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychicPower {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub power_type: PsychicPowerType,
    pub cost: u32,
    #[serde(default)]
    pub effect: String,
}

/// Optional perk exclusive to the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaderTrait {
    #[serde(rename = "Bounty Hunter")]
    BountyHunter,
    Healer,
    Majestic,
    Monstrous,
    #[serde(rename = "Political Officer")]
    PoliticalOfficer,
    Sorcerer,
    Tactician,
}

impl LeaderTrait {
    pub const ALL: [LeaderTrait; 7] = [
        Self::BountyHunter,
        Self::Healer,
        Self::Majestic,
        Self::Monstrous,
        Self::PoliticalOfficer,
        Self::Sorcerer,
        Self::Tactician,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BountyHunter => "Bounty Hunter",
            Self::Healer => "Healer",
            Self::Majestic => "Majestic",
            Self::Monstrous => "Monstrous",
            Self::PoliticalOfficer => "Political Officer",
            Self::Sorcerer => "Sorcerer",
            Self::Tactician => "Tactician",
        }
    }
}

impl fmt::Display for LeaderTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_uses_type_key_on_the_wire() {
        let json = serde_json::json!({
            "id": "rifle",
            "name": "Rifle",
            "type": "ranged",
            "baseCost": 1,
            "maxActions": 1
        });
        let weapon: Weapon = serde_json::from_value(json).expect("deserialize");
        assert_eq!(weapon.weapon_type, WeaponType::Ranged);
        assert_eq!(weapon.base_cost, 1);
        assert!(weapon.notes.is_empty());
    }

    #[test]
    fn leader_traits_serialize_with_spaces() {
        let json = serde_json::to_string(&LeaderTrait::PoliticalOfficer).expect("serialize");
        assert_eq!(json, "\"Political Officer\"");
    }
}
