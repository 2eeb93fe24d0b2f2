//! Cost engine - point cost of a weirdo and of a warband
//!
//! Pure function of the weirdo, the warband ability and the catalog. Every
//! item is priced by catalog name through `GameData::modified_cost`; the
//! embedded `baseCost` on the weirdo is informational only. Unknown names
//! and tiers fail the calculation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::entities::{Warband, Weirdo};
use crate::error::CatalogError;
use crate::game_data::GameData;
use crate::rules::modifiers::{CostCategory, ModifiedCost};
use crate::value_objects::{AttributeKind, WarbandAbility};

/// Price of one weapon, equipment item or psychic power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCost {
    pub category: CostCategory,
    pub name: String,
    pub base_cost: u32,
    pub modified_cost: u32,
}

impl ItemCost {
    fn new(category: CostCategory, name: &str, cost: ModifiedCost) -> Self {
        Self {
            category,
            name: name.to_string(),
            base_cost: cost.base,
            modified_cost: cost.modified,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.base_cost != self.modified_cost
    }
}

impl fmt::Display for ItemCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ModifiedCost {
            base: self.base_cost,
            modified: self.modified_cost,
        }
        .fmt(f)
    }
}

/// Per-category cost split. `total` is the sum of the category fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub attributes: u32,
    pub weapons: u32,
    pub equipment: u32,
    pub psychic_powers: u32,
    pub leader_trait: u32,
    pub total: u32,
    pub items: Vec<ItemCost>,
}

#[derive(Debug, Clone)]
pub struct CostEngine {
    game_data: Arc<GameData>,
}

impl CostEngine {
    pub fn new(game_data: Arc<GameData>) -> Self {
        Self { game_data }
    }

    pub fn game_data(&self) -> &GameData {
        &self.game_data
    }

    pub fn calculate_weirdo_cost(
        &self,
        weirdo: &Weirdo,
        ability: Option<WarbandAbility>,
    ) -> Result<CostBreakdown, CatalogError> {
        let data = &self.game_data;
        let mut breakdown = CostBreakdown::default();

        for kind in AttributeKind::ALL {
            let tier = weirdo.attributes.tier_label(kind);
            breakdown.attributes += data.modified_cost(kind.into(), &tier, ability)?.modified;
        }

        let weapons = weirdo
            .close_combat_weapons
            .iter()
            .map(|w| (CostCategory::CloseWeapon, w.name.as_str()))
            .chain(
                weirdo
                    .ranged_weapons
                    .iter()
                    .map(|w| (CostCategory::RangedWeapon, w.name.as_str())),
            );
        for (category, name) in weapons {
            let cost = data.modified_cost(category, name, ability)?;
            breakdown.weapons += cost.modified;
            breakdown.items.push(ItemCost::new(category, name, cost));
        }

        for item in &weirdo.equipment {
            let cost = data.modified_cost(CostCategory::Equipment, &item.name, ability)?;
            breakdown.equipment += cost.modified;
            breakdown
                .items
                .push(ItemCost::new(CostCategory::Equipment, &item.name, cost));
        }

        for power in &weirdo.psychic_powers {
            let cost = data.modified_cost(CostCategory::PsychicPower, &power.name, ability)?;
            breakdown.psychic_powers += cost.modified;
            breakdown
                .items
                .push(ItemCost::new(CostCategory::PsychicPower, &power.name, cost));
        }

        if let Some(leader_trait) = weirdo.leader_trait {
            breakdown.leader_trait = data.leader_trait(leader_trait)?.cost;
        }

        breakdown.total = breakdown.attributes
            + breakdown.weapons
            + breakdown.equipment
            + breakdown.psychic_powers
            + breakdown.leader_trait;
        Ok(breakdown)
    }

    /// Sum of member costs under the warband's own ability.
    pub fn calculate_warband_cost(&self, warband: &Warband) -> Result<u32, CatalogError> {
        warband.weirdos().iter().try_fold(0, |sum, weirdo| {
            Ok(sum + self.calculate_weirdo_cost(weirdo, warband.ability())?.total)
        })
    }

    /// Refresh every cached `totalCost` on the warband and its members.
    pub fn apply_costs(&self, warband: &mut Warband) -> Result<(), CatalogError> {
        let ability = warband.ability();
        let mut total = 0;
        for weirdo in warband.weirdos_mut() {
            weirdo.total_cost = self.calculate_weirdo_cost(weirdo, ability)?.total;
            total += weirdo.total_cost;
        }
        warband.set_total_cost(total);
        Ok(())
    }
}
