//! Warband-ability cost modifiers and the shared limit lookups.
//!
//! Modifiers are data: each ability declares entries keyed by cost category
//! and either a named item/tier or the whole category. The table is built by
//! the catalog loader and consulted by the cost engine, the validation engine
//! and API callers alike, so `equipment_limit` and `modified_cost` exist in
//! exactly one place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::entities::WeirdoType;
use crate::error::CatalogError;
use crate::game_data::GameData;
use crate::rules::limits::base_equipment_limit;
use crate::value_objects::{AttributeKind, WarbandAbility};

/// What a priced thing is, for modifier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostCategory {
    Speed,
    Defense,
    Firepower,
    Prowess,
    Willpower,
    CloseWeapon,
    RangedWeapon,
    Equipment,
    PsychicPower,
}

impl CostCategory {
    pub const ALL: [CostCategory; 9] = [
        Self::Speed,
        Self::Defense,
        Self::Firepower,
        Self::Prowess,
        Self::Willpower,
        Self::CloseWeapon,
        Self::RangedWeapon,
        Self::Equipment,
        Self::PsychicPower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Defense => "defense",
            Self::Firepower => "firepower",
            Self::Prowess => "prowess",
            Self::Willpower => "willpower",
            Self::CloseWeapon => "closeWeapon",
            Self::RangedWeapon => "rangedWeapon",
            Self::Equipment => "equipment",
            Self::PsychicPower => "psychicPower",
        }
    }

    /// The attribute this category prices, if it is an attribute category.
    pub fn attribute(&self) -> Option<AttributeKind> {
        match self {
            Self::Speed => Some(AttributeKind::Speed),
            Self::Defense => Some(AttributeKind::Defense),
            Self::Firepower => Some(AttributeKind::Firepower),
            Self::Prowess => Some(AttributeKind::Prowess),
            Self::Willpower => Some(AttributeKind::Willpower),
            _ => None,
        }
    }
}

impl From<AttributeKind> for CostCategory {
    fn from(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Speed => Self::Speed,
            AttributeKind::Defense => Self::Defense,
            AttributeKind::Firepower => Self::Firepower,
            AttributeKind::Prowess => Self::Prowess,
            AttributeKind::Willpower => Self::Willpower,
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier target within a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// Every item or tier of the category
    Any,
    /// One item name or tier label
    Named(String),
}

impl ItemKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<Option<String>> for ItemKey {
    fn from(key: Option<String>) -> Self {
        key.map_or(Self::Any, Self::Named)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CostModifier {
    /// Subtract from the base cost, never below zero
    Discount { amount: u32 },
    /// Replace the base cost
    Fixed { cost: u32 },
}

impl CostModifier {
    pub fn apply(&self, base: u32) -> u32 {
        match *self {
            Self::Discount { amount } => base.saturating_sub(amount),
            Self::Fixed { cost } => cost,
        }
    }
}

/// Base and effective cost of one item or tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedCost {
    pub base: u32,
    pub modified: u32,
}

impl ModifiedCost {
    pub fn unmodified(base: u32) -> Self {
        Self {
            base,
            modified: base,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.base != self.modified
    }
}

impl fmt::Display for ModifiedCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_modified() {
            write!(f, "{} pts (was {} pts)", self.modified, self.base)
        } else {
            write!(f, "{} pts", self.modified)
        }
    }
}

/// `(ability, category, key) -> modifier`. A named entry shadows an `Any`
/// entry of the same ability and category.
#[derive(Debug, Clone, Default)]
pub struct ModifierTable {
    entries: HashMap<(WarbandAbility, CostCategory, ItemKey), CostModifier>,
}

impl ModifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(
        &mut self,
        ability: WarbandAbility,
        category: CostCategory,
        key: ItemKey,
        modifier: CostModifier,
    ) -> Option<CostModifier> {
        self.entries.insert((ability, category, key), modifier)
    }

    pub fn lookup(
        &self,
        ability: WarbandAbility,
        category: CostCategory,
        key: &str,
    ) -> Option<CostModifier> {
        self.entries
            .get(&(ability, category, ItemKey::named(key)))
            .or_else(|| self.entries.get(&(ability, category, ItemKey::Any)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GameData {
    /// Equipment slots for a weirdo type under a warband ability.
    pub fn equipment_limit(&self, weirdo_type: WeirdoType, ability: Option<WarbandAbility>) -> u32 {
        let bonus = ability
            .and_then(|a| self.ability(a))
            .map_or(0, |definition| definition.equipment_limit_bonus);
        base_equipment_limit(weirdo_type) + bonus
    }

    /// Base and effective cost of a named item or attribute tier.
    ///
    /// Fails when the name or tier is not in the catalog.
    pub fn modified_cost(
        &self,
        category: CostCategory,
        key: &str,
        ability: Option<WarbandAbility>,
    ) -> Result<ModifiedCost, CatalogError> {
        let base = self.base_cost(category, key)?;
        let modified = ability
            .and_then(|a| self.modifiers().lookup(a, category, key))
            .map_or(base, |modifier| modifier.apply(base));
        Ok(ModifiedCost { base, modified })
    }
}
