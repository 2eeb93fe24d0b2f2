use serde::{Deserialize, Deserializer, Serialize};

use warband_domain::{Warband, WarbandAbility, Weirdo};

/// Body of `POST /api/warbands`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarbandRequest {
    #[serde(default)]
    pub name: String,
    pub point_limit: u32,
    #[serde(default)]
    pub ability: Option<WarbandAbility>,
    #[serde(default)]
    pub weirdos: Vec<Weirdo>,
}

/// Body of `PUT /api/warbands/{id}`. Absent fields are left unchanged.
///
/// `ability` distinguishes absent (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarbandRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_limit: Option<u32>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ability: Option<Option<WarbandAbility>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weirdos: Option<Vec<Weirdo>>,
}

/// Body of `POST /api/validation/weirdo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateWeirdoRequest {
    pub weirdo: Weirdo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warband: Option<Warband>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
