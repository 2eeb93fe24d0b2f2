//! Warband aggregate - a roster of weirdos under a shared point limit
//!
//! # Invariants
//!
//! - At most one weirdo of type `leader` (enforced by `add_weirdo`,
//!   `replace_weirdo` and `replace_weirdos`)
//! - At most `MAX_WEIRDOS` members
//!
//! Point totals are caches maintained by `CostEngine::apply_costs`. Rules
//! that depend on the catalog (limits, ceilings) belong to the validation
//! engine, not to this type. Deserialization does not re-check invariants so
//! that a malformed roster can still reach validation and be reported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Weirdo;
use crate::error::DomainError;
use crate::ids::{WarbandId, WeirdoId};
use crate::value_objects::WarbandAbility;

/// The two legal point limits.
pub const POINT_LIMITS: [u32; 2] = [75, 125];

/// Maximum roster size.
pub const MAX_WEIRDOS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warband {
    #[serde(default)]
    id: WarbandId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    ability: Option<WarbandAbility>,
    #[serde(default)]
    point_limit: u32,
    #[serde(default)]
    weirdos: Vec<Weirdo>,
    #[serde(default)]
    total_cost: u32,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl Warband {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(
        name: impl Into<String>,
        point_limit: u32,
        ability: Option<WarbandAbility>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WarbandId::new(),
            name: name.into(),
            ability,
            point_limit,
            weirdos: Vec::new(),
            total_cost: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> WarbandId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ability(&self) -> Option<WarbandAbility> {
        self.ability
    }

    #[inline]
    pub fn point_limit(&self) -> u32 {
        self.point_limit
    }

    #[inline]
    pub fn weirdos(&self) -> &[Weirdo] {
        &self.weirdos
    }

    #[inline]
    pub fn total_cost(&self) -> u32 {
        self.total_cost
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn weirdo(&self, id: WeirdoId) -> Option<&Weirdo> {
        self.weirdos.iter().find(|w| w.id == id)
    }

    pub fn leader(&self) -> Option<&Weirdo> {
        self.weirdos.iter().find(|w| w.is_leader())
    }

    pub fn leader_count(&self) -> usize {
        self.weirdos.iter().filter(|w| w.is_leader()).count()
    }

    // =========================================================================
    // Builder Methods (for construction from storage or import)
    // =========================================================================

    pub fn with_id(mut self, id: WarbandId) -> Self {
        self.id = id;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.name = name.into();
        self.updated_at = now;
    }

    pub fn set_point_limit(&mut self, point_limit: u32, now: DateTime<Utc>) {
        self.point_limit = point_limit;
        self.updated_at = now;
    }

    pub fn set_ability(&mut self, ability: Option<WarbandAbility>, now: DateTime<Utc>) {
        self.ability = ability;
        self.updated_at = now;
    }

    /// Append a weirdo. Refuses a second leader and a full roster.
    pub fn add_weirdo(&mut self, weirdo: Weirdo, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.weirdos.len() >= MAX_WEIRDOS {
            return Err(DomainError::WarbandFull {
                current: self.weirdos.len(),
                max: MAX_WEIRDOS,
            });
        }
        if weirdo.is_leader() {
            if let Some(existing) = self.leader() {
                return Err(DomainError::leader_already_exists(existing.name.clone()));
            }
        }
        if self.weirdo(weirdo.id).is_some() {
            return Err(DomainError::validation(format!(
                "Weirdo {} is already in the warband",
                weirdo.id
            )));
        }

        self.weirdos.push(weirdo);
        self.updated_at = now;
        Ok(())
    }

    /// Replace a member in place (same position). Refuses to promote a
    /// trooper while another weirdo leads.
    pub fn replace_weirdo(
        &mut self,
        weirdo: Weirdo,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let index = self
            .weirdos
            .iter()
            .position(|w| w.id == weirdo.id)
            .ok_or(DomainError::WeirdoNotFound(weirdo.id))?;

        if weirdo.is_leader() {
            if let Some(other) = self.weirdos.iter().find(|w| w.is_leader() && w.id != weirdo.id) {
                return Err(DomainError::leader_already_exists(other.name.clone()));
            }
        }

        self.weirdos[index] = weirdo;
        self.updated_at = now;
        Ok(())
    }

    /// Replace the whole roster.
    pub fn replace_weirdos(
        &mut self,
        weirdos: Vec<Weirdo>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if weirdos.len() > MAX_WEIRDOS {
            return Err(DomainError::WarbandFull {
                current: weirdos.len(),
                max: MAX_WEIRDOS,
            });
        }
        let mut leaders = weirdos.iter().filter(|w| w.is_leader());
        if let (Some(first), Some(_)) = (leaders.next(), leaders.next()) {
            return Err(DomainError::leader_already_exists(first.name.clone()));
        }

        self.weirdos = weirdos;
        self.updated_at = now;
        Ok(())
    }

    pub fn remove_weirdo(
        &mut self,
        id: WeirdoId,
        now: DateTime<Utc>,
    ) -> Result<Weirdo, DomainError> {
        let index = self
            .weirdos
            .iter()
            .position(|w| w.id == id)
            .ok_or(DomainError::WeirdoNotFound(id))?;
        let removed = self.weirdos.remove(index);
        self.updated_at = now;
        Ok(removed)
    }

    // Cost caches, written only by the cost engine.

    pub(crate) fn weirdos_mut(&mut self) -> &mut [Weirdo] {
        &mut self.weirdos
    }

    pub(crate) fn set_total_cost(&mut self, total_cost: u32) {
        self.total_cost = total_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    fn warband() -> Warband {
        Warband::new("Test", 75, None, now())
    }

    #[test]
    fn new_warband_is_empty() {
        let wb = warband();
        assert!(wb.weirdos().is_empty());
        assert_eq!(wb.total_cost(), 0);
        assert_eq!(wb.ability(), None);
        assert_eq!(wb.created_at(), wb.updated_at());
    }

    #[test]
    fn second_leader_is_refused_and_roster_unchanged() {
        let mut wb = warband();
        wb.add_weirdo(Weirdo::leader("Boss"), now()).expect("first leader");
        wb.add_weirdo(Weirdo::trooper("Grunt"), now()).expect("trooper");

        let err = wb
            .add_weirdo(Weirdo::leader("Usurper"), now())
            .expect_err("second leader");
        assert_eq!(err, DomainError::leader_already_exists("Boss"));
        assert_eq!(wb.weirdos().len(), 2);
        assert_eq!(wb.leader_count(), 1);
    }

    #[test]
    fn promoting_a_trooper_while_a_leader_exists_is_refused() {
        let mut wb = warband();
        wb.add_weirdo(Weirdo::leader("Boss"), now()).expect("leader");
        let trooper = Weirdo::trooper("Grunt");
        let trooper_id = trooper.id;
        wb.add_weirdo(trooper, now()).expect("trooper");

        let mut promoted = wb.weirdo(trooper_id).cloned().expect("member");
        promoted.weirdo_type = crate::entities::WeirdoType::Leader;
        assert!(matches!(
            wb.replace_weirdo(promoted, now()),
            Err(DomainError::LeaderAlreadyExists { .. })
        ));
        assert_eq!(wb.leader_count(), 1);
    }

    #[test]
    fn leader_can_be_replaced_by_itself() {
        let mut wb = warband();
        let leader = Weirdo::leader("Boss");
        let id = leader.id;
        wb.add_weirdo(leader, now()).expect("leader");

        let mut edited = wb.weirdo(id).cloned().expect("member");
        edited.name = "Big Boss".to_string();
        wb.replace_weirdo(edited, now()).expect("replace");
        assert_eq!(wb.weirdo(id).map(|w| w.name.as_str()), Some("Big Boss"));
    }

    #[test]
    fn roster_is_capped() {
        let mut wb = warband();
        for i in 0..MAX_WEIRDOS {
            wb.add_weirdo(Weirdo::trooper(format!("T{i}")), now()).expect("room");
        }
        assert!(matches!(
            wb.add_weirdo(Weirdo::trooper("Extra"), now()),
            Err(DomainError::WarbandFull { .. })
        ));
    }

    #[test]
    fn replace_weirdos_rejects_two_leaders() {
        let mut wb = warband();
        let result = wb.replace_weirdos(vec![Weirdo::leader("A"), Weirdo::leader("B")], now());
        assert!(result.is_err());
        assert!(wb.weirdos().is_empty());
    }

    #[test]
    fn remove_missing_weirdo_reports_not_found() {
        let mut wb = warband();
        let id = WeirdoId::new();
        assert_eq!(wb.remove_weirdo(id, now()), Err(DomainError::WeirdoNotFound(id)));
    }

    #[test]
    fn add_remove_sequence_keeps_single_leader() {
        let mut wb = warband();
        let leader = Weirdo::leader("A");
        let leader_id = leader.id;
        wb.add_weirdo(leader, now()).expect("leader");
        let _ = wb.add_weirdo(Weirdo::leader("B"), now());
        wb.remove_weirdo(leader_id, now()).expect("remove");
        wb.add_weirdo(Weirdo::leader("C"), now()).expect("slot freed");
        let _ = wb.add_weirdo(Weirdo::leader("D"), now());
        assert_eq!(wb.leader_count(), 1);
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let mut wb = warband();
        wb.add_weirdo(Weirdo::leader("Boss").with_notes("loud"), now()).expect("leader");
        let json = serde_json::to_string(&wb).expect("serialize");
        let back: Warband = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, wb);
        assert!(json.contains("\"pointLimit\":75"));
        assert!(json.contains("\"createdAt\":\"2024-05-01T12:00:00Z\""));
    }
}
