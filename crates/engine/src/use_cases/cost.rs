//! Cost use cases: live pricing of a draft weirdo and batch item lookups.
//!
//! Drafts arrive as catalog names, so every name is resolved against the
//! catalog before pricing. Trooper warnings come from the fixed ceilings;
//! the sibling-aware exception check belongs to validation.

use std::collections::BTreeMap;
use std::time::Instant;

use warband_domain::rules::limits::{
    is_approaching, qualifies_for_exception, trooper_ceiling, EXCEPTION_POINT_LIMIT,
};
use warband_domain::{CostCategory, CostEngine, WeaponType, Weirdo, WeirdoType};
use warband_shared::{
    BatchCostData, BatchCostRequest, BatchItemType, CostBreakdownData, CostCalculateRequest,
    CostCalculationData,
};

use crate::use_cases::WarbandError;

pub struct CostCalculation {
    cost_engine: CostEngine,
}

impl CostCalculation {
    pub fn new(cost_engine: CostEngine) -> Self {
        Self { cost_engine }
    }

    pub fn calculate(
        &self,
        request: CostCalculateRequest,
    ) -> Result<CostCalculationData, WarbandError> {
        let started = Instant::now();
        let weirdo = self.draft(&request)?;
        let breakdown = self
            .cost_engine
            .calculate_weirdo_cost(&weirdo, request.warband_ability)?;
        let calculation_time = started.elapsed().as_secs_f64() * 1000.0;

        let limits = LimitStatus::for_cost(request.weirdo_type, breakdown.total);
        tracing::debug!(
            weirdo_type = %request.weirdo_type,
            total_cost = breakdown.total,
            calculation_time,
            "Calculated draft cost"
        );

        Ok(CostCalculationData {
            total_cost: breakdown.total,
            breakdown: CostBreakdownData::from(&breakdown),
            item_costs: breakdown.items,
            warnings: limits.warnings,
            is_approaching_limit: limits.approaching,
            is_over_limit: limits.over,
            calculation_time,
        })
    }

    /// Price each item independently, keyed by the caller's id.
    pub fn batch(&self, request: BatchCostRequest) -> Result<BatchCostData, WarbandError> {
        let data = self.cost_engine.game_data();
        let mut costs = BTreeMap::new();

        for item in request.items {
            let category = match item.item_type {
                BatchItemType::Weapon => match item.weapon_type {
                    Some(WeaponType::Close) => CostCategory::CloseWeapon,
                    Some(WeaponType::Ranged) => CostCategory::RangedWeapon,
                    None => {
                        return Err(WarbandError::InvalidInput(format!(
                            "Item {} is a weapon but has no weaponType",
                            item.id
                        )))
                    }
                },
                BatchItemType::Equipment => CostCategory::Equipment,
                BatchItemType::PsychicPower => CostCategory::PsychicPower,
            };
            let cost = data.modified_cost(category, &item.name, request.warband_ability)?;
            costs.insert(item.id, cost.modified);
        }

        Ok(BatchCostData { costs })
    }

    fn draft(&self, request: &CostCalculateRequest) -> Result<Weirdo, WarbandError> {
        let data = self.cost_engine.game_data();
        let mut weirdo =
            Weirdo::new(String::new(), request.weirdo_type).with_attributes(request.attributes);

        for name in &request.weapons.close {
            let weapon = data.find_weapon(WeaponType::Close, name)?.clone();
            weirdo = weirdo.with_close_combat_weapon(weapon);
        }
        for name in &request.weapons.ranged {
            let weapon = data.find_weapon(WeaponType::Ranged, name)?.clone();
            weirdo = weirdo.with_ranged_weapon(weapon);
        }
        for name in &request.equipment {
            weirdo = weirdo.with_equipment(data.find_equipment(name)?.clone());
        }
        for name in &request.psychic_powers {
            weirdo = weirdo.with_psychic_power(data.find_psychic_power(name)?.clone());
        }
        weirdo.leader_trait = request.leader_trait;
        Ok(weirdo)
    }
}

#[derive(Debug, Default, PartialEq)]
struct LimitStatus {
    warnings: Vec<String>,
    approaching: bool,
    over: bool,
}

impl LimitStatus {
    /// A draft is priced on its own, so a trooper that fits the exception
    /// slot is measured against it.
    fn for_cost(weirdo_type: WeirdoType, total: u32) -> Self {
        let mut status = Self::default();
        if weirdo_type == WeirdoType::Leader {
            return status;
        }

        let holds_exception = qualifies_for_exception(total);
        let ceiling = trooper_ceiling(holds_exception);

        if total > ceiling {
            status.over = true;
            status.warnings.push(format!(
                "Cost {total} exceeds the {EXCEPTION_POINT_LIMIT}-point trooper limit"
            ));
            return status;
        }

        if holds_exception {
            status.warnings.push(format!(
                "Cost {total} uses the warband's single {EXCEPTION_POINT_LIMIT}-point exception"
            ));
        }
        if is_approaching(total, ceiling) {
            status.approaching = true;
            status
                .warnings
                .push(format!("Cost {total} is approaching the {ceiling}-point limit"));
        }
        status
    }
}
