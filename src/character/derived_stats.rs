use super::types::Character;
use crate::core::constants::*;
use crate::items::Effect;
use chrono::{DateTime, Utc};

/// Combat stats after equipment and buffs.
///
/// Values are not clamped: stacked items may push crit past 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveStats {
    pub attack: i32,
    pub defense: i32,
    pub crit: i32,
    pub max_hp: u32,
    pub hp: u32,
}

impl EffectiveStats {
    pub fn from_character(character: &Character) -> Self {
        let mut stats = Self {
            attack: character.attack,
            defense: character.defense,
            crit: character.crit,
            max_hp: character.max_hp,
            hp: character.hp,
        };

        for item in character.equipment.iter_equipped() {
            for effect in item.equipment_effects() {
                stats.add_effect(effect);
            }
        }

        // Meta effects are folded into Multipliers instead
        for buff in &character.buffs {
            for effect in buff.effects.iter().filter(|e| !e.is_meta()) {
                stats.add_effect(effect);
            }
        }

        stats
    }

    fn add_effect(&mut self, effect: &Effect) {
        match *effect {
            Effect::Attack(v) => self.attack += v,
            Effect::Defense(v) => self.defense += v,
            Effect::Crit(v) => self.crit += v,
            Effect::MaxHp(v) => self.max_hp = self.max_hp.saturating_add_signed(v),
            Effect::XpMultiplier(_) | Effect::GoldMultiplier(_) | Effect::GemLuck(_) => {}
        }
    }
}

/// Reward multipliers from buffs and the subscription tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub xp: f64,
    pub gold: f64,
    /// Extra percentage points of gem drop chance.
    pub gem_luck: u32,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            xp: 1.0,
            gold: 1.0,
            gem_luck: 0,
        }
    }
}

impl Multipliers {
    /// XP and gold take the strongest buff; gem luck stacks.
    pub fn for_character(character: &Character, now: DateTime<Utc>) -> Self {
        let mut mults = Self::default();
        for effect in character.buffs.iter().flat_map(|b| b.effects.iter()) {
            match *effect {
                Effect::XpMultiplier(m) => mults.xp = mults.xp.max(m),
                Effect::GoldMultiplier(m) => mults.gold = mults.gold.max(m),
                Effect::GemLuck(luck) => mults.gem_luck += luck,
                _ => {}
            }
        }
        if character.tier_active(now) {
            mults.xp *= VIP_XP_MULTIPLIER;
            mults.gold *= VIP_GOLD_MULTIPLIER;
            mults.gem_luck += VIP_GEM_LUCK_BONUS;
        }
        mults
    }

    pub fn scale_gold(&self, gold: u64) -> u64 {
        (gold as f64 * self.gold) as u64
    }

    pub fn scale_xp(&self, xp: u64) -> u64 {
        (xp as f64 * self.xp) as u64
    }
}
