//! Experience curve, level-ups and titles.

use super::constants::*;
use crate::character::{Character, StatGrowth};
use tracing::info;

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// Outcome of an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub new_level: u32,
    pub new_xp: u64,
    /// Summed growth of every level gained in this grant.
    pub growth: StatGrowth,
    pub leveled_up: bool,
}

/// Adds XP and resolves every level-up it pays for in one pass.
///
/// Current HP rises by the HP growth (capped at the new max), so missing
/// HP is preserved rather than refilled.
pub fn grant_experience(character: &mut Character, amount: u64) -> LevelUpReport {
    character.xp += amount;

    let per_level = StatGrowth::per_level(character.class);
    let mut growth = StatGrowth::default();
    let mut levels_gained = 0;

    while character.xp >= character.xp_to_next {
        character.xp -= character.xp_to_next;
        character.level += 1;
        character.xp_to_next = xp_for_next_level(character.level);
        growth.add(per_level);
        levels_gained += 1;
    }

    if levels_gained > 0 {
        character.max_hp += growth.hp;
        character.hp = (character.hp + growth.hp).min(character.max_hp);
        character.attack += growth.attack;
        character.defense += growth.defense;
        info!(
            character = character.id,
            level = character.level,
            levels_gained,
            "level up"
        );
    }

    LevelUpReport {
        levels_gained,
        new_level: character.level,
        new_xp: character.xp,
        growth,
        leveled_up: levels_gained > 0,
    }
}

/// Level thresholds and the title each one grants, ascending.
pub const TITLES: &[(u32, &str)] = &[
    (0, "Novice"),
    (5, "Warrior"),
    (10, "Defender"),
    (15, "Destroyer"),
    (20, "Punisher"),
    (25, "Legend"),
    (30, "Dragonslayer"),
    (40, "Mythic Hero"),
    (50, "God of War"),
];

/// Highest title whose threshold is at or below `level`.
pub fn title_for_level(level: u32) -> &'static str {
    TITLES
        .iter()
        .rev()
        .find(|(threshold, _)| level >= *threshold)
        .map_or(TITLES[0].1, |(_, title)| title)
}
