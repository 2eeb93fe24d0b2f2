//! Unified error types for the domain layer
//!
//! `DomainError` covers aggregate invariant refusals. `CatalogError` covers
//! game-data lookups and loading; a lookup miss is a data defect and is never
//! priced as zero.

use thiserror::Error;

use crate::ids::WeirdoId;

/// Unified error type for roster operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A warband may hold a single leader
    #[error("Warband already has a leader: {existing}")]
    LeaderAlreadyExists { existing: String },

    /// Weirdo is not a member of the warband
    #[error("Weirdo not found: {0}")]
    WeirdoNotFound(WeirdoId),

    /// Roster is at capacity
    #[error("Warband full: {current}/{max} weirdos")]
    WarbandFull { current: usize, max: usize },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a leader-already-exists error naming the current leader
    pub fn leader_already_exists(existing: impl Into<String>) -> Self {
        Self::LeaderAlreadyExists {
            existing: existing.into(),
        }
    }
}

/// Game-data catalog errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// An item name is not present in its catalog
    #[error("Unknown {category}: {name}")]
    UnknownItem { category: String, name: String },

    /// An attribute level is not present in the attribute table
    #[error("Unknown {attribute} tier: {tier}")]
    UnknownTier { attribute: String, tier: String },

    /// A catalog file could not be read or parsed
    #[error("Failed to load catalog file {file}: {message}")]
    Load { file: String, message: String },

    /// A catalog parsed but breaks a structural rule
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    pub fn unknown_item(category: impl ToString, name: impl Into<String>) -> Self {
        Self::UnknownItem {
            category: category.to_string(),
            name: name.into(),
        }
    }

    pub fn unknown_tier(attribute: impl ToString, tier: impl Into<String>) -> Self {
        Self::UnknownTier {
            attribute: attribute.to_string(),
            tier: tier.into(),
        }
    }

    pub fn load(file: impl Into<String>, message: impl ToString) -> Self {
        Self::Load {
            file: file.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// True for lookup misses (as opposed to load failures).
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownItem { .. } | Self::UnknownTier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_leader_already_exists_error() {
        let err = DomainError::leader_already_exists("Boss");
        assert_eq!(err.to_string(), "Warband already has a leader: Boss");
    }

    #[test]
    fn test_warband_full_error() {
        let err = DomainError::WarbandFull { current: 10, max: 10 };
        assert_eq!(err.to_string(), "Warband full: 10/10 weirdos");
    }

    #[test]
    fn test_unknown_item_error() {
        let err = CatalogError::unknown_item("equipment", "Laser Sword");
        assert!(err.is_lookup());
        assert_eq!(err.to_string(), "Unknown equipment: Laser Sword");
    }

    #[test]
    fn test_load_error_is_not_lookup() {
        let err = CatalogError::load("equipment.json", "expected value");
        assert!(!err.is_lookup());
        assert!(err.to_string().contains("equipment.json"));
    }
}
