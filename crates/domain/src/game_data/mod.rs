//! Static game-data catalog.
//!
//! Attribute tiers, weapons, equipment, psychic powers, leader traits and
//! warband abilities. Loaded once at startup (embedded tables or a directory
//! of JSON files) and shared read-only behind an `Arc`.

mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::entities::{Equipment, LeaderTrait, PsychicPower, Weapon, WeaponType};
use crate::error::CatalogError;
use crate::rules::{CostCategory, CostModifier, ModifierTable};
use crate::value_objects::{AttributeKind, WarbandAbility};

pub use loader::CatalogSources;

/// One row of an attribute table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCost {
    pub tier: String,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderTraitInfo {
    #[serde(rename = "trait")]
    pub leader_trait: LeaderTrait,
    pub cost: u32,
    #[serde(default)]
    pub description: String,
}

/// Cost modifier as declared in `warband_abilities.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierEntry {
    pub category: CostCategory,
    /// Item name or tier label; absent means the whole category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub modifier: CostModifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDefinition {
    pub ability: WarbandAbility,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub equipment_limit_bonus: u32,
    #[serde(default)]
    pub cost_modifiers: Vec<ModifierEntry>,
}

#[derive(Debug, Clone)]
pub struct GameData {
    attributes: HashMap<AttributeKind, Vec<TierCost>>,
    close_weapons: Vec<Weapon>,
    ranged_weapons: Vec<Weapon>,
    equipment: Vec<Equipment>,
    psychic_powers: Vec<PsychicPower>,
    leader_traits: Vec<LeaderTraitInfo>,
    abilities: Vec<AbilityDefinition>,
    modifiers: ModifierTable,
}

impl GameData {
    /// The tables compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        loader::parse(&CatalogSources::builtin())
    }

    /// Load every catalog file from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let sources = CatalogSources::read_dir(dir.as_ref())?;
        loader::parse(&sources)
    }

    /// Parse catalog file contents.
    pub fn from_sources(sources: &CatalogSources) -> Result<Self, CatalogError> {
        loader::parse(sources)
    }

    // =========================================================================
    // Catalog listings
    // =========================================================================

    pub fn attribute_tiers(&self, kind: AttributeKind) -> &[TierCost] {
        self.attributes
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn close_weapons(&self) -> &[Weapon] {
        &self.close_weapons
    }

    pub fn ranged_weapons(&self) -> &[Weapon] {
        &self.ranged_weapons
    }

    pub fn weapons(&self, weapon_type: WeaponType) -> &[Weapon] {
        match weapon_type {
            WeaponType::Close => &self.close_weapons,
            WeaponType::Ranged => &self.ranged_weapons,
        }
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn psychic_powers(&self) -> &[PsychicPower] {
        &self.psychic_powers
    }

    pub fn leader_traits(&self) -> &[LeaderTraitInfo] {
        &self.leader_traits
    }

    pub fn abilities(&self) -> &[AbilityDefinition] {
        &self.abilities
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn ability(&self, ability: WarbandAbility) -> Option<&AbilityDefinition> {
        self.abilities.iter().find(|a| a.ability == ability)
    }

    pub fn attribute_cost(&self, kind: AttributeKind, tier: &str) -> Result<u32, CatalogError> {
        self.attribute_tiers(kind)
            .iter()
            .find(|row| row.tier.eq_ignore_ascii_case(tier))
            .map(|row| row.cost)
            .ok_or_else(|| CatalogError::unknown_tier(kind, tier))
    }

    pub fn find_weapon(
        &self,
        weapon_type: WeaponType,
        name: &str,
    ) -> Result<&Weapon, CatalogError> {
        self.weapons(weapon_type)
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| CatalogError::unknown_item(format!("{weapon_type} weapon"), name))
    }

    pub fn find_equipment(&self, name: &str) -> Result<&Equipment, CatalogError> {
        self.equipment
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| CatalogError::unknown_item("equipment", name))
    }

    pub fn find_psychic_power(&self, name: &str) -> Result<&PsychicPower, CatalogError> {
        self.psychic_powers
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CatalogError::unknown_item("psychic power", name))
    }

    pub fn leader_trait(
        &self,
        leader_trait: LeaderTrait,
    ) -> Result<&LeaderTraitInfo, CatalogError> {
        self.leader_traits
            .iter()
            .find(|t| t.leader_trait == leader_trait)
            .ok_or_else(|| CatalogError::unknown_item("leader trait", leader_trait.as_str()))
    }

    /// Unmodified catalog cost of an item or attribute tier.
    pub fn base_cost(&self, category: CostCategory, key: &str) -> Result<u32, CatalogError> {
        let weapon_cost = |weapon_type| self.find_weapon(weapon_type, key).map(|w| w.base_cost);
        match category {
            CostCategory::Speed => self.attribute_cost(AttributeKind::Speed, key),
            CostCategory::Defense => self.attribute_cost(AttributeKind::Defense, key),
            CostCategory::Firepower => self.attribute_cost(AttributeKind::Firepower, key),
            CostCategory::Prowess => self.attribute_cost(AttributeKind::Prowess, key),
            CostCategory::Willpower => self.attribute_cost(AttributeKind::Willpower, key),
            CostCategory::CloseWeapon => weapon_cost(WeaponType::Close),
            CostCategory::RangedWeapon => weapon_cost(WeaponType::Ranged),
            CostCategory::Equipment => self.find_equipment(key).map(|e| e.base_cost),
            CostCategory::PsychicPower => self.find_psychic_power(key).map(|p| p.cost),
        }
    }
}
