//! Response bodies for the REST API.
//!
//! Computation endpoints wrap their payload in `{success, data}`; CRUD
//! endpoints return the resource itself. Failures use `ErrorResponse`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use warband_domain::{AbilityDefinition, CostBreakdown, ItemCost, ValidationError};

// =============================================================================
// Envelope
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error body: `{error, details?, errors?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationError>) -> Self {
        self.errors = errors;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Cost
// =============================================================================

/// Category split of a weirdo's cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdownData {
    pub attributes: u32,
    pub weapons: u32,
    pub equipment: u32,
    pub psychic_powers: u32,
    pub leader_trait: u32,
}

impl From<&CostBreakdown> for CostBreakdownData {
    fn from(breakdown: &CostBreakdown) -> Self {
        Self {
            attributes: breakdown.attributes,
            weapons: breakdown.weapons,
            equipment: breakdown.equipment,
            psychic_powers: breakdown.psychic_powers,
            leader_trait: breakdown.leader_trait,
        }
    }
}

/// Payload of `POST /api/cost/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCalculationData {
    pub total_cost: u32,
    pub breakdown: CostBreakdownData,
    /// Per-item base and modified cost ("0 pts (was 1 pts)")
    pub item_costs: Vec<ItemCost>,
    pub warnings: Vec<String>,
    pub is_approaching_limit: bool,
    pub is_over_limit: bool,
    /// Milliseconds spent pricing
    pub calculation_time: f64,
}

/// Payload of `POST /api/cost/batch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCostData {
    pub costs: BTreeMap<String, u32>,
}

// =============================================================================
// Game data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarbandAbilityInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rule: String,
}

impl From<&AbilityDefinition> for WarbandAbilityInfo {
    fn from(definition: &AbilityDefinition) -> Self {
        Self {
            id: definition.ability.slug(),
            name: definition.ability.as_str().to_string(),
            description: definition.description.clone(),
            rule: definition.rule.clone(),
        }
    }
}
