//! Validation engine - structural rules for weirdos and warbands
//!
//! Every rule is evaluated and errors accumulate; a rule violation is never
//! an `Err`. The only failure is a catalog lookup miss while pricing.
//!
//! # Trooper point ceilings
//!
//! Troopers are held to 20 points, except for one trooper per warband that
//! may reach 25. That exception slot belongs to the first trooper in roster
//! order costing 21 to 25; a trooper over 25 is out of bounds outright and
//! leaves the slot to the next one. A weirdo validated on its own may take the
//! slot; a weirdo validated against a warband it is not yet part of is
//! treated as the last member.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Warband, Weirdo, WeirdoType, MAX_WEIRDOS, POINT_LIMITS};
use crate::error::CatalogError;
use crate::rules::cost::CostEngine;
use crate::rules::limits::{
    exception_holder, is_approaching, trooper_ceiling, EXCEPTION_POINT_LIMIT, TROOPER_POINT_LIMIT,
};
use crate::value_objects::WarbandAbility;

/// Stable machine-readable rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    WarbandNameRequired,
    InvalidPointLimit,
    MultipleLeaders,
    WarbandSizeExceeded,
    WarbandPointLimitExceeded,
    WeirdoNameRequired,
    CloseCombatWeaponRequired,
    RangedWeaponRequiresFirepower,
    FirepowerRequiresRangedWeapon,
    EquipmentLimitExceeded,
    LeaderTraitRequiresLeader,
    LeaderAlreadyExists,
    WeirdoPointLimitExceeded,
    #[serde(rename = "APPROACHING_20_POINT_LIMIT")]
    Approaching20PointLimit,
    #[serde(rename = "APPROACHING_25_POINT_LIMIT")]
    Approaching25PointLimit,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WarbandNameRequired => "WARBAND_NAME_REQUIRED",
            Self::InvalidPointLimit => "INVALID_POINT_LIMIT",
            Self::MultipleLeaders => "MULTIPLE_LEADERS",
            Self::WarbandSizeExceeded => "WARBAND_SIZE_EXCEEDED",
            Self::WarbandPointLimitExceeded => "WARBAND_POINT_LIMIT_EXCEEDED",
            Self::WeirdoNameRequired => "WEIRDO_NAME_REQUIRED",
            Self::CloseCombatWeaponRequired => "CLOSE_COMBAT_WEAPON_REQUIRED",
            Self::RangedWeaponRequiresFirepower => "RANGED_WEAPON_REQUIRES_FIREPOWER",
            Self::FirepowerRequiresRangedWeapon => "FIREPOWER_REQUIRES_RANGED_WEAPON",
            Self::EquipmentLimitExceeded => "EQUIPMENT_LIMIT_EXCEEDED",
            Self::LeaderTraitRequiresLeader => "LEADER_TRAIT_REQUIRES_LEADER",
            Self::LeaderAlreadyExists => "LEADER_ALREADY_EXISTS",
            Self::WeirdoPointLimitExceeded => "WEIRDO_POINT_LIMIT_EXCEEDED",
            Self::Approaching20PointLimit => "APPROACHING_20_POINT_LIMIT",
            Self::Approaching25PointLimit => "APPROACHING_25_POINT_LIMIT",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path of the offending property
    pub field: String,
    pub message: String,
    pub code: ValidationCode,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// Re-root the field under `prefix` (`equipment` -> `weirdos[2].equipment`).
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    #[serde(default)]
    pub warnings: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &str, code: ValidationCode, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, code, message));
        self.valid = false;
    }

    pub fn warn(&mut self, field: &str, code: ValidationCode, message: impl Into<String>) {
        self.warnings.push(ValidationError::new(field, code, message));
    }

    /// Fold a nested result in, re-rooting its fields under `prefix`.
    pub fn absorb(&mut self, nested: ValidationResult, prefix: &str) {
        self.valid &= nested.valid;
        self.errors
            .extend(nested.errors.into_iter().map(|e| e.prefixed(prefix)));
        self.warnings
            .extend(nested.warnings.into_iter().map(|e| e.prefixed(prefix)));
    }

    pub fn has_code(&self, code: ValidationCode) -> bool {
        self.errors.iter().chain(&self.warnings).any(|e| e.code == code)
    }
}

/// Who holds the 25-point exception, relative to the weirdo being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExceptionSlot<'a> {
    Free,
    Held,
    HeldBy(&'a str),
}

impl<'a> ExceptionSlot<'a> {
    fn resolve(roster: &[&'a Weirdo], costs: &[u32], index: usize) -> Self {
        let troopers = roster
            .iter()
            .zip(costs)
            .enumerate()
            .filter(|(_, (w, _))| w.weirdo_type == WeirdoType::Trooper)
            .map(|(i, (_, cost))| (i, *cost));
        match exception_holder(troopers) {
            None => Self::Free,
            Some(holder) if holder == index => Self::Held,
            Some(holder) => Self::HeldBy(roster[holder].name.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationEngine {
    cost_engine: CostEngine,
}

impl ValidationEngine {
    pub fn new(cost_engine: CostEngine) -> Self {
        Self { cost_engine }
    }

    pub fn cost_engine(&self) -> &CostEngine {
        &self.cost_engine
    }

    /// Validate one weirdo, optionally in the context of its warband.
    ///
    /// The warband supplies the ability, the sibling costs for the exception
    /// slot and the current leader. It may or may not already contain the
    /// weirdo (matched by id).
    pub fn validate_weirdo(
        &self,
        weirdo: &Weirdo,
        warband: Option<&Warband>,
    ) -> Result<ValidationResult, CatalogError> {
        let ability = warband.and_then(Warband::ability);

        let mut roster: Vec<&Weirdo> = match warband {
            Some(wb) => wb
                .weirdos()
                .iter()
                .map(|w| if w.id == weirdo.id { weirdo } else { w })
                .collect(),
            None => Vec::new(),
        };
        let index = match roster.iter().position(|w| w.id == weirdo.id) {
            Some(index) => index,
            None => {
                roster.push(weirdo);
                roster.len() - 1
            }
        };

        let costs = self.roster_costs(&roster, ability)?;
        let slot = ExceptionSlot::resolve(&roster, &costs, index);

        let mut result = ValidationResult::new();
        self.check_weirdo(weirdo, ability, costs[index], slot, &mut result);

        if weirdo.is_leader() {
            let other_leader = warband
                .and_then(|wb| wb.weirdos().iter().find(|w| w.is_leader() && w.id != weirdo.id));
            if let Some(existing) = other_leader {
                result.error(
                    "type",
                    ValidationCode::LeaderAlreadyExists,
                    format!("Warband already has a leader: {}", existing.name),
                );
            }
        }

        Ok(result)
    }

    pub fn validate_warband(&self, warband: &Warband) -> Result<ValidationResult, CatalogError> {
        let mut result = ValidationResult::new();

        if warband.name().trim().is_empty() {
            result.error(
                "name",
                ValidationCode::WarbandNameRequired,
                "Warband name is required",
            );
        }

        let limit_is_valid = POINT_LIMITS.contains(&warband.point_limit());
        if !limit_is_valid {
            result.error(
                "pointLimit",
                ValidationCode::InvalidPointLimit,
                format!(
                    "Point limit must be {} or {}",
                    POINT_LIMITS[0], POINT_LIMITS[1]
                ),
            );
        }

        let leaders = warband.leader_count();
        if leaders > 1 {
            result.error(
                "weirdos",
                ValidationCode::MultipleLeaders,
                format!("A warband may have only one leader, found {leaders}"),
            );
        }

        if warband.weirdos().len() > MAX_WEIRDOS {
            result.error(
                "weirdos",
                ValidationCode::WarbandSizeExceeded,
                format!(
                    "A warband may have at most {MAX_WEIRDOS} weirdos, found {}",
                    warband.weirdos().len()
                ),
            );
        }

        let ability = warband.ability();
        let roster: Vec<&Weirdo> = warband.weirdos().iter().collect();
        let costs = self.roster_costs(&roster, ability)?;

        for (index, weirdo) in roster.iter().enumerate() {
            let slot = ExceptionSlot::resolve(&roster, &costs, index);
            let mut nested = ValidationResult::new();
            self.check_weirdo(weirdo, ability, costs[index], slot, &mut nested);
            result.absorb(nested, &format!("weirdos[{index}]"));
        }

        let total: u32 = costs.iter().sum();
        if limit_is_valid && total > warband.point_limit() {
            result.error(
                "totalCost",
                ValidationCode::WarbandPointLimitExceeded,
                format!(
                    "Warband costs {total} points, over the {}-point limit",
                    warband.point_limit()
                ),
            );
        }

        Ok(result)
    }

    fn roster_costs(
        &self,
        roster: &[&Weirdo],
        ability: Option<WarbandAbility>,
    ) -> Result<Vec<u32>, CatalogError> {
        roster
            .iter()
            .map(|w| {
                self.cost_engine
                    .calculate_weirdo_cost(w, ability)
                    .map(|breakdown| breakdown.total)
            })
            .collect()
    }

    /// Rules that concern the weirdo alone, given its cost and slot.
    fn check_weirdo(
        &self,
        weirdo: &Weirdo,
        ability: Option<WarbandAbility>,
        cost: u32,
        slot: ExceptionSlot<'_>,
        result: &mut ValidationResult,
    ) {
        if weirdo.name.trim().is_empty() {
            result.error("name", ValidationCode::WeirdoNameRequired, "Weirdo name is required");
        }

        if weirdo.close_combat_weapons.is_empty() {
            result.error(
                "closeCombatWeapons",
                ValidationCode::CloseCombatWeaponRequired,
                "At least one close combat weapon is required",
            );
        }

        let has_ranged = !weirdo.ranged_weapons.is_empty();
        let can_shoot = weirdo.attributes.firepower.allows_ranged();
        if has_ranged && !can_shoot {
            result.error(
                "attributes.firepower",
                ValidationCode::RangedWeaponRequiresFirepower,
                "Ranged weapons require a Firepower of 2d8 or higher",
            );
        }
        if can_shoot && !has_ranged {
            result.error(
                "rangedWeapons",
                ValidationCode::FirepowerRequiresRangedWeapon,
                format!(
                    "Firepower {} requires at least one ranged weapon",
                    weirdo.attributes.firepower
                ),
            );
        }

        let limit = self
            .cost_engine
            .game_data()
            .equipment_limit(weirdo.weirdo_type, ability);
        if weirdo.equipment.len() > limit as usize {
            result.error(
                "equipment",
                ValidationCode::EquipmentLimitExceeded,
                format!(
                    "A {} may carry at most {limit} equipment, found {}",
                    weirdo.weirdo_type,
                    weirdo.equipment.len()
                ),
            );
        }

        if weirdo.leader_trait.is_some() && !weirdo.is_leader() {
            result.error(
                "leaderTrait",
                ValidationCode::LeaderTraitRequiresLeader,
                "Only a leader may have a leader trait",
            );
        }

        if weirdo.weirdo_type == WeirdoType::Trooper {
            check_trooper_points(cost, slot, result);
        }
    }
}

fn check_trooper_points(cost: u32, slot: ExceptionSlot<'_>, result: &mut ValidationResult) {
    let holds_exception = slot == ExceptionSlot::Held;
    let ceiling = trooper_ceiling(holds_exception);

    if cost > EXCEPTION_POINT_LIMIT {
        result.error(
            "totalCost",
            ValidationCode::WeirdoPointLimitExceeded,
            format!("Trooper costs {cost} points, over the {EXCEPTION_POINT_LIMIT}-point limit"),
        );
        return;
    }

    if cost > ceiling {
        let message = match slot {
            ExceptionSlot::HeldBy(holder) => format!(
                "Trooper costs {cost} points, over the {TROOPER_POINT_LIMIT}-point limit; \
                 {holder} already holds the {EXCEPTION_POINT_LIMIT}-point exception"
            ),
            _ => format!("Trooper costs {cost} points, over the {ceiling}-point limit"),
        };
        result.error("totalCost", ValidationCode::WeirdoPointLimitExceeded, message);
        return;
    }

    let (normal, exception) = (TROOPER_POINT_LIMIT, EXCEPTION_POINT_LIMIT);
    if is_approaching(cost, normal) {
        let mut message =
            format!("Trooper is approaching the {normal}-point limit ({cost}/{normal})");
        if let ExceptionSlot::HeldBy(holder) = slot {
            message.push_str(&format!("; {holder} holds the {exception}-point exception"));
        }
        result.warn("totalCost", ValidationCode::Approaching20PointLimit, message);
    } else if holds_exception && is_approaching(cost, exception) {
        result.warn(
            "totalCost",
            ValidationCode::Approaching25PointLimit,
            format!("Trooper is approaching the {exception}-point limit ({cost}/{exception})"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LeaderTrait, WeaponType};
    use crate::game_data::GameData;
    use crate::value_objects::{Attributes, DiceTier, Firepower};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    fn engine() -> ValidationEngine {
        let data = Arc::new(GameData::builtin().expect("built-in catalog"));
        ValidationEngine::new(CostEngine::new(data))
    }

    fn data(engine: &ValidationEngine) -> &GameData {
        engine.cost_engine().game_data()
    }

    fn armed(engine: &ValidationEngine, weirdo: Weirdo, close: &str) -> Weirdo {
        let weapon = data(engine)
            .find_weapon(WeaponType::Close, close)
            .cloned()
            .expect("catalog");
        weirdo.with_close_combat_weapon(weapon)
    }

    fn unarmed(engine: &ValidationEngine, weirdo: Weirdo) -> Weirdo {
        armed(engine, weirdo, "Unarmed")
    }

    /// speed 3 (3) + defense 2d10 (8) + prowess 2d10 (6) + willpower 2d6 (2)
    /// + Melee Weapon (1) = 20
    fn trooper_at_20(engine: &ValidationEngine, name: &str) -> Weirdo {
        armed(engine, Weirdo::trooper(name), "Melee Weapon").with_attributes(Attributes {
            speed: 3,
            defense: DiceTier::D10,
            firepower: Firepower::None,
            prowess: DiceTier::D10,
            willpower: DiceTier::D6,
        })
    }

    /// As `trooper_at_20` plus firepower 2d8 (2) and a Rifle (1) = 23
    fn trooper_at_23(engine: &ValidationEngine, name: &str) -> Weirdo {
        let rifle = data(engine)
            .find_weapon(WeaponType::Ranged, "Rifle")
            .cloned()
            .expect("catalog");
        let mut weirdo = trooper_at_20(engine, name).with_ranged_weapon(rifle);
        weirdo.attributes.firepower = Firepower::D8;
        weirdo
    }

    fn codes(errors: &[ValidationError]) -> Vec<ValidationCode> {
        errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn baseline_warband_is_valid() {
        let engine = engine();
        let mut warband = Warband::new("Test", 75, None, now());
        warband
            .add_weirdo(unarmed(&engine, Weirdo::leader("Boss")), now())
            .expect("leader");

        let result = engine.validate_warband(&warband).expect("validate");
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
        assert_eq!(engine.cost_engine().calculate_warband_cost(&warband), Ok(6));
    }

    #[test]
    fn warband_level_rules_accumulate() {
        let engine = engine();
        let warband = Warband::new("  ", 100, None, now());
        // Two leaders can only arrive through deserialization.
        let mut json = serde_json::to_value(&warband).expect("serialize");
        json["weirdos"] = serde_json::json!([
            unarmed(&engine, Weirdo::leader("A")),
            unarmed(&engine, Weirdo::leader("B")),
        ]);
        let warband: Warband = serde_json::from_value(json).expect("deserialize");

        let result = engine.validate_warband(&warband).expect("validate");
        assert!(!result.valid);
        assert_eq!(
            codes(&result.errors),
            vec![
                ValidationCode::WarbandNameRequired,
                ValidationCode::InvalidPointLimit,
                ValidationCode::MultipleLeaders,
            ]
        );
        assert_eq!(result.errors[1].field, "pointLimit");
    }

    #[test]
    fn nested_errors_carry_weirdo_path() {
        let engine = engine();
        let mut warband = Warband::new("Paths", 75, None, now());
        warband
            .add_weirdo(unarmed(&engine, Weirdo::leader("Boss")), now())
            .expect("leader");
        let mut sloppy = Weirdo::trooper("");
        sloppy.leader_trait = Some(LeaderTrait::Healer);
        warband.add_weirdo(sloppy, now()).expect("trooper");

        let result = engine.validate_warband(&warband).expect("validate");
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "weirdos[1].name",
                "weirdos[1].closeCombatWeapons",
                "weirdos[1].leaderTrait"
            ]
        );
    }

    #[test]
    fn ranged_weapon_requires_firepower() {
        let engine = engine();
        let rifle = data(&engine)
            .find_weapon(WeaponType::Ranged, "Rifle")
            .cloned()
            .expect("catalog");
        let weirdo = unarmed(&engine, Weirdo::trooper("Gunner")).with_ranged_weapon(rifle);

        let result = engine.validate_weirdo(&weirdo, None).expect("validate");
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, ValidationCode::RangedWeaponRequiresFirepower);
        assert_eq!(result.errors[0].field, "attributes.firepower");
    }

    #[test]
    fn firepower_without_ranged_weapon_is_flagged() {
        let engine = engine();
        let weirdo = unarmed(&engine, Weirdo::trooper("Empty Hands")).with_attributes(Attributes {
            firepower: Firepower::D10,
            ..Attributes::default()
        });

        let result = engine.validate_weirdo(&weirdo, None).expect("validate");
        assert_eq!(codes(&result.errors), vec![ValidationCode::FirepowerRequiresRangedWeapon]);
        assert_eq!(result.errors[0].field, "rangedWeapons");
    }

    #[test]
    fn equipment_limit_depends_on_type_and_ability() {
        let engine = engine();
        let grenade = data(&engine).find_equipment("Grenade").cloned().expect("catalog");
        let medkit = data(&engine).find_equipment("Medkit").cloned().expect("catalog");
        let trooper = unarmed(&engine, Weirdo::trooper("Packer"))
            .with_equipment(grenade)
            .with_equipment(medkit);

        let plain = engine.validate_weirdo(&trooper, None).expect("validate");
        assert_eq!(codes(&plain.errors), vec![ValidationCode::EquipmentLimitExceeded]);

        let cyborgs = Warband::new("Chrome", 75, Some(WarbandAbility::Cyborgs), now());
        let boosted = engine.validate_weirdo(&trooper, Some(&cyborgs)).expect("validate");
        assert!(boosted.valid, "{:?}", boosted.errors);
    }

    #[test]
    fn leader_trait_requires_leader() {
        let engine = engine();
        let trooper =
            unarmed(&engine, Weirdo::trooper("Wannabe")).with_leader_trait(LeaderTrait::Majestic);
        let result = engine.validate_weirdo(&trooper, None).expect("validate");
        assert_eq!(codes(&result.errors), vec![ValidationCode::LeaderTraitRequiresLeader]);

        let leader =
            unarmed(&engine, Weirdo::leader("Real")).with_leader_trait(LeaderTrait::Majestic);
        assert!(engine.validate_weirdo(&leader, None).expect("validate").valid);
    }

    #[test]
    fn second_leader_against_warband_is_rejected() {
        let engine = engine();
        let mut warband = Warband::new("Crowned", 75, None, now());
        let boss = unarmed(&engine, Weirdo::leader("Boss"));
        warband.add_weirdo(boss.clone(), now()).expect("leader");

        let usurper = unarmed(&engine, Weirdo::leader("Usurper"));
        let result = engine.validate_weirdo(&usurper, Some(&warband)).expect("validate");
        assert_eq!(codes(&result.errors), vec![ValidationCode::LeaderAlreadyExists]);
        assert_eq!(result.errors[0].field, "type");

        // The sitting leader validates cleanly against its own warband.
        let result = engine.validate_weirdo(&boss, Some(&warband)).expect("validate");
        assert!(result.valid);
    }

    #[test]
    fn trooper_at_twenty_warns_about_twenty_point_limit() {
        let engine = engine();
        let trooper = trooper_at_20(&engine, "Bruiser");
        assert_eq!(
            engine
                .cost_engine()
                .calculate_weirdo_cost(&trooper, None)
                .expect("cost")
                .total,
            20
        );

        let mut warband = Warband::new("Warned", 75, None, now());
        warband.add_weirdo(trooper.clone(), now()).expect("trooper");
        let result = engine.validate_weirdo(&trooper, Some(&warband)).expect("validate");
        assert!(result.valid);
        assert_eq!(codes(&result.warnings), vec![ValidationCode::Approaching20PointLimit]);
        assert!(result.warnings[0].message.contains("20-point limit"));
    }

    #[test]
    fn exception_slot_shifts_sibling_warning() {
        let engine = engine();
        let first = trooper_at_20(&engine, "Bruiser");
        let second = trooper_at_23(&engine, "Gunner");
        let mut warband = Warband::new("Shifted", 75, None, now());
        warband.add_weirdo(first.clone(), now()).expect("first");
        warband.add_weirdo(second.clone(), now()).expect("second");

        let gunner = engine.validate_weirdo(&second, Some(&warband)).expect("validate");
        assert!(gunner.valid);
        assert_eq!(codes(&gunner.warnings), vec![ValidationCode::Approaching25PointLimit]);
        assert!(gunner.warnings[0].message.contains("25-point limit"));

        let bruiser = engine.validate_weirdo(&first, Some(&warband)).expect("validate");
        assert_eq!(codes(&bruiser.warnings), vec![ValidationCode::Approaching20PointLimit]);
        assert!(bruiser.warnings[0].message.contains("Gunner holds the 25-point exception"));

        let whole = engine.validate_warband(&warband).expect("validate");
        assert!(whole.valid);
        assert_eq!(whole.warnings.len(), 2);
        assert_eq!(whole.warnings[0].field, "weirdos[0].totalCost");
        assert_eq!(whole.warnings[1].field, "weirdos[1].totalCost");
    }

    #[test]
    fn only_first_trooper_over_twenty_gets_the_exception() {
        let engine = engine();
        let mut warband = Warband::new("Crowded", 125, None, now());
        warband
            .add_weirdo(trooper_at_23(&engine, "First"), now())
            .expect("first");
        warband
            .add_weirdo(trooper_at_23(&engine, "Second"), now())
            .expect("second");

        let result = engine.validate_warband(&warband).expect("validate");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ValidationCode::WeirdoPointLimitExceeded);
        assert_eq!(result.errors[0].field, "weirdos[1].totalCost");
        assert!(result.errors[0].message.contains("First already holds"));
    }

    /// `trooper_at_23` with willpower 2d10 (6 instead of 2) = 27
    fn trooper_at_27(engine: &ValidationEngine, name: &str) -> Weirdo {
        let mut weirdo = trooper_at_23(engine, name);
        weirdo.attributes.willpower = DiceTier::D10;
        weirdo
    }

    #[test]
    fn trooper_over_twenty_five_leaves_the_slot_to_the_next() {
        let engine = engine();
        let mut warband = Warband::new("Overbuilt", 125, None, now());
        warband.add_weirdo(trooper_at_27(&engine, "Big"), now()).expect("big");
        warband.add_weirdo(trooper_at_23(&engine, "Gunner"), now()).expect("gunner");

        let result = engine.validate_warband(&warband).expect("validate");
        assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
        assert_eq!(result.errors[0].field, "weirdos[0].totalCost");
        assert!(result.errors[0].message.contains("25-point limit"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "weirdos[1].totalCost");
        assert_eq!(result.warnings[0].code, ValidationCode::Approaching25PointLimit);
    }

    #[test]
    fn slot_holder_follows_list_order() {
        let engine = engine();
        let alpha = trooper_at_23(&engine, "Alpha");
        let omega = trooper_at_23(&engine, "Omega");

        for (order, holder, loser) in [
            (vec![alpha.clone(), omega.clone()], "Alpha", "Omega"),
            (vec![omega.clone(), alpha.clone()], "Omega", "Alpha"),
        ] {
            let mut warband = Warband::new("Ordered", 125, None, now());
            warband.replace_weirdos(order, now()).expect("roster");

            let result = engine.validate_warband(&warband).expect("validate");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].field, "weirdos[1].totalCost");
            assert!(result.errors[0]
                .message
                .contains(&format!("{holder} already holds")));
            assert_eq!(warband.weirdos()[1].name, loser);
        }
    }

    #[test]
    fn editing_a_member_below_twenty_frees_the_slot_for_a_sibling() {
        let engine = engine();
        let early = trooper_at_23(&engine, "Early");
        let late = trooper_at_23(&engine, "Late");
        let mut warband = Warband::new("Edited", 125, None, now());
        warband.add_weirdo(early.clone(), now()).expect("early");
        warband.add_weirdo(late.clone(), now()).expect("late");

        let before = engine.validate_weirdo(&early, Some(&warband)).expect("validate");
        assert!(before.valid);
        assert_eq!(codes(&before.warnings), vec![ValidationCode::Approaching25PointLimit]);

        // Same id, now at 20: validated in place, the slot passes to Late.
        let edited = trooper_at_20(&engine, "Early").with_id(early.id);
        let after = engine.validate_weirdo(&edited, Some(&warband)).expect("validate");
        assert!(after.valid);
        assert_eq!(codes(&after.warnings), vec![ValidationCode::Approaching20PointLimit]);
        assert!(after.warnings[0].message.contains("Late holds the 25-point exception"));
    }

    #[test]
    fn editing_a_member_above_twenty_takes_the_slot_from_a_later_sibling() {
        let engine = engine();
        let early = trooper_at_20(&engine, "Early");
        let late = trooper_at_23(&engine, "Late");
        let mut warband = Warband::new("Edited", 125, None, now());
        warband.add_weirdo(early.clone(), now()).expect("early");
        warband.add_weirdo(late, now()).expect("late");
        assert!(engine.validate_warband(&warband).expect("validate").valid);

        let edited = trooper_at_23(&engine, "Early").with_id(early.id);
        let result = engine.validate_weirdo(&edited, Some(&warband)).expect("validate");
        assert!(result.valid);
        assert_eq!(codes(&result.warnings), vec![ValidationCode::Approaching25PointLimit]);

        warband.replace_weirdo(edited, now()).expect("replace");
        let whole = engine.validate_warband(&warband).expect("validate");
        assert_eq!(whole.errors.len(), 1);
        assert_eq!(whole.errors[0].field, "weirdos[1].totalCost");
        assert!(whole.errors[0].message.contains("Early already holds"));
    }

    #[test]
    fn new_weirdo_is_checked_as_if_appended() {
        let engine = engine();
        let mut warband = Warband::new("Pending", 75, None, now());
        warband
            .add_weirdo(trooper_at_23(&engine, "Holder"), now())
            .expect("holder");

        let candidate = trooper_at_23(&engine, "Candidate");
        let result = engine.validate_weirdo(&candidate, Some(&warband)).expect("validate");
        assert_eq!(codes(&result.errors), vec![ValidationCode::WeirdoPointLimitExceeded]);
    }

    #[test]
    fn standalone_trooper_may_take_the_slot() {
        let engine = engine();
        let result = engine
            .validate_weirdo(&trooper_at_23(&engine, "Solo"), None)
            .expect("validate");
        assert!(result.valid);
        assert_eq!(codes(&result.warnings), vec![ValidationCode::Approaching25PointLimit]);
    }

    #[test]
    fn leaders_have_no_point_ceiling() {
        let engine = engine();
        let mut big = trooper_at_23(&engine, "Big Boss");
        big.weirdo_type = WeirdoType::Leader;
        big.attributes.willpower = DiceTier::D10;
        let result = engine.validate_weirdo(&big, None).expect("validate");
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn warband_total_over_limit_is_an_error() {
        let engine = engine();
        let mut warband = Warband::new("Pricey", 75, None, now());
        warband
            .add_weirdo(trooper_at_23(&engine, "T0"), now())
            .expect("room");
        for i in 1..4 {
            warband
                .add_weirdo(trooper_at_20(&engine, &format!("T{i}")), now())
                .expect("room");
        }
        // 23 + 3 * 20 = 83
        let result = engine.validate_warband(&warband).expect("validate");
        assert!(result.has_code(ValidationCode::WarbandPointLimitExceeded));
        let error = result
            .errors
            .iter()
            .find(|e| e.code == ValidationCode::WarbandPointLimitExceeded)
            .expect("limit error");
        assert_eq!(error.field, "totalCost");
        assert!(error.message.contains("83"));
    }

    #[test]
    fn catalog_miss_is_an_err() {
        let engine = engine();
        let mut weirdo = unarmed(&engine, Weirdo::trooper("Odd"));
        weirdo.close_combat_weapons[0].name = "Spork".to_string();
        assert!(engine.validate_weirdo(&weirdo, None).is_err());
    }

    #[test]
    fn codes_serialize_as_screaming_snake_case() {
        for code in [
            ValidationCode::Approaching20PointLimit,
            ValidationCode::Approaching25PointLimit,
            ValidationCode::RangedWeaponRequiresFirepower,
        ] {
            let json = serde_json::to_string(&code).expect("serialize");
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }
}
