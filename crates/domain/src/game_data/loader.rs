//! Catalog parsing and structural checks.
//!
//! A catalog is rejected as a whole when any table is malformed: missing
//! attribute ladders, costs that decrease with tier, duplicate names, weapons
//! filed under the wrong type, abilities or leader traits without an entry,
//! and modifiers that point at items or tiers that do not exist.

use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{AbilityDefinition, GameData, LeaderTraitInfo, TierCost};
use crate::entities::{Equipment, LeaderTrait, PsychicPower, Weapon, WeaponType};
use crate::error::CatalogError;
use crate::rules::{CostCategory, ItemKey, ModifierTable};
use crate::value_objects::{AttributeKind, DiceTier, Firepower, WarbandAbility};

const ATTRIBUTES_FILE: &str = "attributes.json";
const CLOSE_WEAPONS_FILE: &str = "close_weapons.json";
const RANGED_WEAPONS_FILE: &str = "ranged_weapons.json";
const EQUIPMENT_FILE: &str = "equipment.json";
const PSYCHIC_POWERS_FILE: &str = "psychic_powers.json";
const LEADER_TRAITS_FILE: &str = "leader_traits.json";
const WARBAND_ABILITIES_FILE: &str = "warband_abilities.json";

/// Raw contents of the seven catalog files.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub attributes: String,
    pub close_weapons: String,
    pub ranged_weapons: String,
    pub equipment: String,
    pub psychic_powers: String,
    pub leader_traits: String,
    pub warband_abilities: String,
}

impl CatalogSources {
    pub fn builtin() -> Self {
        Self {
            attributes: include_str!("../../data/attributes.json").to_string(),
            close_weapons: include_str!("../../data/close_weapons.json").to_string(),
            ranged_weapons: include_str!("../../data/ranged_weapons.json").to_string(),
            equipment: include_str!("../../data/equipment.json").to_string(),
            psychic_powers: include_str!("../../data/psychic_powers.json").to_string(),
            leader_traits: include_str!("../../data/leader_traits.json").to_string(),
            warband_abilities: include_str!("../../data/warband_abilities.json").to_string(),
        }
    }

    pub fn read_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| CatalogError::load(path.display().to_string(), e))
        };
        Ok(Self {
            attributes: read(ATTRIBUTES_FILE)?,
            close_weapons: read(CLOSE_WEAPONS_FILE)?,
            ranged_weapons: read(RANGED_WEAPONS_FILE)?,
            equipment: read(EQUIPMENT_FILE)?,
            psychic_powers: read(PSYCHIC_POWERS_FILE)?,
            leader_traits: read(LEADER_TRAITS_FILE)?,
            warband_abilities: read(WARBAND_ABILITIES_FILE)?,
        })
    }
}

fn parse_file<T: DeserializeOwned>(file: &str, contents: &str) -> Result<T, CatalogError> {
    serde_json::from_str(contents).map_err(|e| CatalogError::load(file, e))
}

pub(super) fn parse(sources: &CatalogSources) -> Result<GameData, CatalogError> {
    let attributes: HashMap<AttributeKind, Vec<TierCost>> =
        parse_file(ATTRIBUTES_FILE, &sources.attributes)?;
    let close_weapons: Vec<Weapon> = parse_file(CLOSE_WEAPONS_FILE, &sources.close_weapons)?;
    let ranged_weapons: Vec<Weapon> = parse_file(RANGED_WEAPONS_FILE, &sources.ranged_weapons)?;
    let equipment: Vec<Equipment> = parse_file(EQUIPMENT_FILE, &sources.equipment)?;
    let psychic_powers: Vec<PsychicPower> =
        parse_file(PSYCHIC_POWERS_FILE, &sources.psychic_powers)?;
    let leader_traits: Vec<LeaderTraitInfo> =
        parse_file(LEADER_TRAITS_FILE, &sources.leader_traits)?;
    let abilities: Vec<AbilityDefinition> =
        parse_file(WARBAND_ABILITIES_FILE, &sources.warband_abilities)?;

    for kind in AttributeKind::ALL {
        let tiers = attributes
            .get(&kind)
            .ok_or_else(|| CatalogError::invalid(format!("missing {kind} table")))?;
        check_tiers(kind, tiers)?;
    }
    check_weapons(WeaponType::Close, &close_weapons)?;
    check_weapons(WeaponType::Ranged, &ranged_weapons)?;
    check_unique("equipment", equipment.iter().map(|e| e.name.as_str()))?;
    check_unique("psychic power", psychic_powers.iter().map(|p| p.name.as_str()))?;
    check_covered(
        "leader trait",
        LeaderTrait::ALL.iter().map(LeaderTrait::as_str),
        leader_traits.iter().map(|t| t.leader_trait.as_str()),
    )?;
    check_covered(
        "warband ability",
        WarbandAbility::ALL.iter().map(WarbandAbility::as_str),
        abilities.iter().map(|a| a.ability.as_str()),
    )?;

    let mut data = GameData {
        attributes,
        close_weapons,
        ranged_weapons,
        equipment,
        psychic_powers,
        leader_traits,
        abilities,
        modifiers: ModifierTable::new(),
    };
    data.modifiers = build_modifiers(&data)?;

    tracing::debug!(
        modifiers = data.modifiers.len(),
        close_weapons = data.close_weapons.len(),
        ranged_weapons = data.ranged_weapons.len(),
        equipment = data.equipment.len(),
        psychic_powers = data.psychic_powers.len(),
        "Game data catalog loaded"
    );
    Ok(data)
}

/// Position of a tier label on its attribute's ladder.
fn tier_rank(kind: AttributeKind, label: &str) -> Option<u32> {
    match kind {
        AttributeKind::Speed => label.trim().parse::<u8>().ok().map(u32::from),
        AttributeKind::Firepower => Firepower::ALL
            .iter()
            .position(|f| f.as_str().eq_ignore_ascii_case(label.trim()))
            .and_then(|i| u32::try_from(i).ok()),
        AttributeKind::Defense | AttributeKind::Prowess | AttributeKind::Willpower => label
            .parse::<DiceTier>()
            .ok()
            .and_then(|tier| DiceTier::ALL.iter().position(|t| *t == tier))
            .and_then(|i| u32::try_from(i).ok()),
    }
}

fn check_tiers(kind: AttributeKind, tiers: &[TierCost]) -> Result<(), CatalogError> {
    let mut ranked = Vec::with_capacity(tiers.len());
    for row in tiers {
        let rank = tier_rank(kind, &row.tier).ok_or_else(|| {
            CatalogError::invalid(format!("{kind} table has unknown tier {}", row.tier))
        })?;
        ranked.push((rank, row));
    }
    ranked.sort_by_key(|(rank, _)| *rank);

    for pair in ranked.windows(2) {
        let (low_rank, low) = pair[0];
        let (high_rank, high) = pair[1];
        if low_rank == high_rank {
            return Err(CatalogError::invalid(format!(
                "{kind} table lists tier {} twice",
                high.tier
            )));
        }
        if high.cost < low.cost {
            return Err(CatalogError::invalid(format!(
                "{kind} costs decrease from {} ({}) to {} ({})",
                low.tier, low.cost, high.tier, high.cost
            )));
        }
    }

    let required: Vec<&str> = match kind {
        AttributeKind::Speed => vec!["1"],
        AttributeKind::Firepower => Firepower::ALL.iter().map(Firepower::as_str).collect(),
        _ => DiceTier::ALL.iter().map(DiceTier::as_str).collect(),
    };
    for label in required {
        if !tiers.iter().any(|row| row.tier.eq_ignore_ascii_case(label)) {
            return Err(CatalogError::invalid(format!("{kind} table is missing tier {label}")));
        }
    }
    Ok(())
}

fn check_weapons(weapon_type: WeaponType, weapons: &[Weapon]) -> Result<(), CatalogError> {
    if let Some(misfiled) = weapons.iter().find(|w| w.weapon_type != weapon_type) {
        return Err(CatalogError::invalid(format!(
            "{} is listed as a {weapon_type} weapon but has type {}",
            misfiled.name, misfiled.weapon_type
        )));
    }
    check_unique(
        &format!("{weapon_type} weapon"),
        weapons.iter().map(|w| w.name.as_str()),
    )
}

fn check_unique<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CatalogError::invalid(format!("duplicate {what}: {name}")));
        }
    }
    Ok(())
}

fn check_covered<'a>(
    what: &str,
    expected: impl Iterator<Item = &'a str>,
    present: impl Iterator<Item = &'a str> + Clone,
) -> Result<(), CatalogError> {
    check_unique(what, present.clone())?;
    for name in expected {
        if !present.clone().any(|p| p == name) {
            return Err(CatalogError::invalid(format!("no {what} entry for {name}")));
        }
    }
    Ok(())
}

fn build_modifiers(data: &GameData) -> Result<ModifierTable, CatalogError> {
    let mut table = ModifierTable::new();
    for definition in data.abilities() {
        for entry in &definition.cost_modifiers {
            if let Some(key) = &entry.key {
                // The key must price something that exists.
                data.base_cost(entry.category, key).map_err(|_| {
                    CatalogError::invalid(format!(
                        "{} modifier targets unknown {} {key}",
                        definition.ability, entry.category
                    ))
                })?;
            }
            let key_label = entry.key.clone().unwrap_or_else(|| "*".to_string());
            let replaced = table.insert(
                definition.ability,
                entry.category,
                ItemKey::from(entry.key.clone()),
                entry.modifier,
            );
            if replaced.is_some() {
                return Err(CatalogError::invalid(format!(
                    "{} declares two modifiers for {} {key_label}",
                    definition.ability, entry.category
                )));
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> CatalogSources {
        CatalogSources::builtin()
    }

    #[test]
    fn builtin_sources_parse() {
        assert!(parse(&sources()).is_ok());
    }

    #[test]
    fn rejects_decreasing_tier_costs() {
        let mut s = sources();
        s.attributes = s.attributes.replace(
            r#"{ "tier": "2d10", "cost": 8 }"#,
            r#"{ "tier": "2d10", "cost": 1 }"#,
        );
        let err = parse(&s).expect_err("non-monotonic defense");
        assert!(matches!(err, CatalogError::Invalid(msg) if msg.contains("defense")));
    }

    #[test]
    fn rejects_missing_tier() {
        let mut s = sources();
        s.attributes = s.attributes.replace(r#"{ "tier": "None", "cost": 0 },"#, "");
        assert!(matches!(parse(&s), Err(CatalogError::Invalid(msg)) if msg.contains("None")));
    }

    #[test]
    fn rejects_dangling_modifier_key() {
        let mut s = sources();
        s.warband_abilities = s
            .warband_abilities
            .replace(r#""key": "Medkit""#, r#""key": "Medpack""#);
        let err = parse(&s).expect_err("dangling key");
        assert!(matches!(err, CatalogError::Invalid(msg) if msg.contains("Medpack")));
    }

    #[test]
    fn rejects_duplicate_modifier() {
        let mut s = sources();
        s.warband_abilities = s.warband_abilities.replace(
            r#""key": "Heavy Armor""#,
            r#""key": "Grenade""#,
        );
        assert!(matches!(
            parse(&s),
            Err(CatalogError::Invalid(msg)) if msg.contains("two modifiers")
        ));
    }

    #[test]
    fn rejects_misfiled_weapon() {
        let mut s = sources();
        s.close_weapons = s
            .close_weapons
            .replacen(r#""type": "close""#, r#""type": "ranged""#, 1);
        assert!(matches!(parse(&s), Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn rejects_missing_ability() {
        let mut s = sources();
        s.warband_abilities = s
            .warband_abilities
            .replace(r#""ability": "Undead""#, r#""ability": "Fanatics""#);
        assert!(parse(&s).is_err());
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let mut s = sources();
        s.equipment = "[{".to_string();
        assert!(matches!(
            parse(&s),
            Err(CatalogError::Load { file, .. }) if file == EQUIPMENT_FILE
        ));
    }

    #[test]
    fn load_dir_reads_every_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = sources();
        for (file, contents) in [
            (ATTRIBUTES_FILE, &s.attributes),
            (CLOSE_WEAPONS_FILE, &s.close_weapons),
            (RANGED_WEAPONS_FILE, &s.ranged_weapons),
            (EQUIPMENT_FILE, &s.equipment),
            (PSYCHIC_POWERS_FILE, &s.psychic_powers),
            (LEADER_TRAITS_FILE, &s.leader_traits),
            (WARBAND_ABILITIES_FILE, &s.warband_abilities),
        ] {
            std::fs::write(dir.path().join(file), contents).expect("write catalog file");
        }

        let data = GameData::load_dir(dir.path()).expect("load");
        assert_eq!(data.equipment().len(), 6);
    }

    #[test]
    fn load_dir_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GameData::load_dir(dir.path()).expect_err("empty dir");
        assert!(matches!(err, CatalogError::Load { file, .. } if file.ends_with(ATTRIBUTES_FILE)));
    }
}
