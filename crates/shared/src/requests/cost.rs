use serde::{Deserialize, Serialize};

use warband_domain::{Attributes, LeaderTrait, WarbandAbility, WeaponType, WeirdoType};

/// Weapon names by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSelection {
    #[serde(default)]
    pub close: Vec<String>,
    #[serde(default)]
    pub ranged: Vec<String>,
}

/// Body of `POST /api/cost/calculate`. Items are catalog names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCalculateRequest {
    pub weirdo_type: WeirdoType,
    pub attributes: Attributes,
    #[serde(default)]
    pub weapons: WeaponSelection,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub psychic_powers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_trait: Option<LeaderTrait>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warband_ability: Option<WarbandAbility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchItemType {
    Weapon,
    Equipment,
    PsychicPower,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCostItem {
    /// Caller-chosen key echoed in the response
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: BatchItemType,
    pub name: String,
    /// Required when `type` is `weapon`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<WeaponType>,
}

/// Body of `POST /api/cost/batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCostRequest {
    pub items: Vec<BatchCostItem>,
    #[serde(default)]
    pub warband_ability: Option<WarbandAbility>,
}
