//! Time-based energy regeneration.
//!
//! Observe-and-reset: when at least one unit regenerates, the timestamp jumps
//! to `now`, discarding fractional progress towards the next unit.

use super::constants::*;
use crate::character::Character;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenResult {
    pub energy: u32,
    pub last_refill: i64,
    /// Units actually added after capping.
    pub gained: u32,
}

/// Minutes per regenerated unit.
pub fn regen_interval_minutes(tier_active: bool) -> i64 {
    if tier_active {
        VIP_ENERGY_REGEN_MINUTES
    } else {
        ENERGY_REGEN_MINUTES
    }
}

/// Computes regenerated energy without touching the character.
pub fn regenerate(character: &Character, now: DateTime<Utc>) -> RegenResult {
    let tier = character.tier_active(now);
    let interval_secs = regen_interval_minutes(tier) * 60;
    let elapsed = now.timestamp() - character.energy.last_refill;
    let units = (elapsed.max(0) / interval_secs).min(u32::MAX as i64) as u32;

    let current = character.energy.current;
    if units == 0 {
        return RegenResult {
            energy: current,
            last_refill: character.energy.last_refill,
            gained: 0,
        };
    }

    let cap = character.max_energy(now);
    let energy = current.max(current.saturating_add(units).min(cap));
    RegenResult {
        energy,
        last_refill: now.timestamp(),
        gained: energy - current,
    }
}

/// Applies [`regenerate`] to the character. Returns units gained.
pub fn apply_regeneration(character: &mut Character, now: DateTime<Utc>) -> u32 {
    let result = regenerate(character, now);
    character.energy.current = result.energy;
    character.energy.last_refill = result.last_refill;
    result.gained
}
