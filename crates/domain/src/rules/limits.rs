//! Per-type limits: equipment slots and trooper point ceilings.
//!
//! A trooper normally costs at most `TROOPER_POINT_LIMIT`. One trooper per
//! warband may instead go up to `EXCEPTION_POINT_LIMIT`; the slot belongs to
//! the first trooper in roster order whose cost falls between the two
//! ceilings. A trooper over `EXCEPTION_POINT_LIMIT` never holds it.

use crate::entities::WeirdoType;

pub const TROOPER_POINT_LIMIT: u32 = 20;
pub const EXCEPTION_POINT_LIMIT: u32 = 25;

/// Points below a ceiling at which a proximity warning starts.
pub const APPROACHING_MARGIN: u32 = 2;

/// Equipment slots before any ability bonus.
pub fn base_equipment_limit(weirdo_type: WeirdoType) -> u32 {
    match weirdo_type {
        WeirdoType::Leader => 2,
        WeirdoType::Trooper => 1,
    }
}

/// Whether a trooper at `cost` needs the exception slot and fits inside it.
pub fn qualifies_for_exception(cost: u32) -> bool {
    cost > TROOPER_POINT_LIMIT && cost <= EXCEPTION_POINT_LIMIT
}

/// Index of the trooper holding the exception slot.
///
/// `troopers` yields `(index, cost)` in roster order, troopers only.
pub fn exception_holder(troopers: impl IntoIterator<Item = (usize, u32)>) -> Option<usize> {
    troopers
        .into_iter()
        .find(|&(_, cost)| qualifies_for_exception(cost))
        .map(|(index, _)| index)
}

/// Ceiling for a trooper given whether it holds the exception slot.
pub fn trooper_ceiling(holds_exception: bool) -> u32 {
    if holds_exception {
        EXCEPTION_POINT_LIMIT
    } else {
        TROOPER_POINT_LIMIT
    }
}

/// Whether `cost` sits inside the warning band just below `ceiling`.
pub fn is_approaching(cost: u32, ceiling: u32) -> bool {
    cost <= ceiling && cost + APPROACHING_MARGIN >= ceiling
}
