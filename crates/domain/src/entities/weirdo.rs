//! Weirdo entity - a single character in a warband

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Equipment, LeaderTrait, PsychicPower, Weapon};
use crate::ids::WeirdoId;
use crate::value_objects::Attributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeirdoType {
    Leader,
    Trooper,
}

impl WeirdoType {
    pub const ALL: [WeirdoType; 2] = [Self::Leader, Self::Trooper];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Trooper => "trooper",
        }
    }
}

impl fmt::Display for WeirdoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character sheet.
///
/// `total_cost` is a cache: it is recomputed by the cost engine on every
/// mutation and never trusted as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weirdo {
    #[serde(default)]
    pub id: WeirdoId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub weirdo_type: WeirdoType,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub close_combat_weapons: Vec<Weapon>,
    #[serde(default)]
    pub ranged_weapons: Vec<Weapon>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub psychic_powers: Vec<PsychicPower>,
    #[serde(default)]
    pub leader_trait: Option<LeaderTrait>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub total_cost: u32,
}

impl Weirdo {
    pub fn new(name: impl Into<String>, weirdo_type: WeirdoType) -> Self {
        Self {
            id: WeirdoId::new(),
            name: name.into(),
            weirdo_type,
            attributes: Attributes::default(),
            close_combat_weapons: Vec::new(),
            ranged_weapons: Vec::new(),
            equipment: Vec::new(),
            psychic_powers: Vec::new(),
            leader_trait: None,
            notes: String::new(),
            total_cost: 0,
        }
    }

    pub fn leader(name: impl Into<String>) -> Self {
        Self::new(name, WeirdoType::Leader)
    }

    pub fn trooper(name: impl Into<String>) -> Self {
        Self::new(name, WeirdoType::Trooper)
    }

    pub fn is_leader(&self) -> bool {
        self.weirdo_type == WeirdoType::Leader
    }

    pub fn with_id(mut self, id: WeirdoId) -> Self {
        self.id = id;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_close_combat_weapon(mut self, weapon: Weapon) -> Self {
        self.close_combat_weapons.push(weapon);
        self
    }

    pub fn with_ranged_weapon(mut self, weapon: Weapon) -> Self {
        self.ranged_weapons.push(weapon);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.push(equipment);
        self
    }

    pub fn with_psychic_power(mut self, power: PsychicPower) -> Self {
        self.psychic_powers.push(power);
        self
    }

    pub fn with_leader_trait(mut self, leader_trait: LeaderTrait) -> Self {
        self.leader_trait = Some(leader_trait);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_weirdo_has_empty_defaults() {
        let weirdo = Weirdo::trooper("Grunt");
        assert_eq!(weirdo.weirdo_type, WeirdoType::Trooper);
        assert!(weirdo.close_combat_weapons.is_empty());
        assert!(weirdo.equipment.is_empty());
        assert_eq!(weirdo.leader_trait, None);
        assert_eq!(weirdo.total_cost, 0);
    }

    #[test]
    fn minimal_json_fills_defaults_and_fresh_id() {
        let json = serde_json::json!({ "name": "Scout", "type": "trooper" });
        let weirdo: Weirdo = serde_json::from_value(json).expect("deserialize");
        assert_eq!(weirdo.name, "Scout");
        assert_eq!(weirdo.attributes, Attributes::default());
        assert!(weirdo.ranged_weapons.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let weirdo = Weirdo::leader("Boss");
        let json = serde_json::to_value(&weirdo).expect("serialize");
        assert_eq!(json["type"], "leader");
        assert!(json.get("closeCombatWeapons").is_some());
        assert!(json.get("leaderTrait").is_some());
        assert_eq!(json["totalCost"], 0);
    }
}
