use super::class::CharacterClass;
use crate::achievements::AchievementId;
use crate::core::constants::*;
use crate::error::{GameError, Result};
use crate::items::{Effect, Equipment, Inventory};
use crate::payments::Order;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Monotonic activity counters watched by achievements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub dungeon_wins: u64,
    pub boss_kills: u64,
    pub elite_kills: u64,
    pub pvp_wins: u64,
    pub pvp_losses: u64,
    pub crafts_done: u64,
    pub chests_opened: u64,
    pub total_gold_earned: u64,
    pub total_gems_earned: u64,
}

/// Energy spent by encounters, refilled over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyPool {
    pub current: u32,
    /// Permanent cap, before any tier bonus.
    pub max: u32,
    /// Unix seconds of the last regeneration observation or spend.
    pub last_refill: i64,
}

/// A timed buff counted in fights won, not wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub item_id: String,
    pub effects: Vec<Effect>,
    pub uses_left: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyState {
    pub last_claim: Option<NaiveDate>,
    pub streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelState {
    pub tokens: u32,
    pub last_free_spin: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveExpedition {
    pub expedition_id: String,
    pub started_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    pub referrer: Option<u64>,
    pub count: u64,
}

/// Full persisted state of one player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub class: Option<CharacterClass>,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub crit: i32,
    pub gold: u64,
    pub gems: u64,
    pub counters: Counters,
    pub energy: EnergyPool,
    /// Unix seconds when the subscription tier expires.
    pub tier_until: Option<i64>,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub buffs: Vec<ActiveBuff>,
    pub achievements: BTreeSet<AchievementId>,
    pub daily: DailyState,
    pub wheel: WheelState,
    pub expedition: Option<ActiveExpedition>,
    pub referral: Referral,
    /// Donation invoices issued to this character, oldest first.
    pub orders: Vec<Order>,
    /// Promo codes already redeemed, upper-cased.
    pub promo_codes: BTreeSet<String>,
    pub total_spent_usd: f64,
    pub created_at: i64,
}

impl Character {
    pub fn new(id: u64, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            class: None,
            level: STARTING_LEVEL,
            xp: 0,
            xp_to_next: crate::core::progression::xp_for_next_level(STARTING_LEVEL),
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            attack: STARTING_ATTACK,
            defense: STARTING_DEFENSE,
            crit: STARTING_CRIT,
            gold: STARTING_GOLD,
            gems: 0,
            counters: Counters::default(),
            energy: EnergyPool {
                current: STARTING_ENERGY,
                max: STARTING_ENERGY,
                last_refill: now.timestamp(),
            },
            tier_until: None,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            buffs: Vec::new(),
            achievements: BTreeSet::new(),
            daily: DailyState::default(),
            wheel: WheelState::default(),
            expedition: None,
            referral: Referral::default(),
            orders: Vec::new(),
            promo_codes: BTreeSet::new(),
            total_spent_usd: 0.0,
            created_at: now.timestamp(),
        }
    }

    /// Tier is active iff its expiry lies strictly in the future.
    pub fn tier_active(&self, now: DateTime<Utc>) -> bool {
        self.tier_until.is_some_and(|until| until > now.timestamp())
    }

    /// Extends the tier by `days`, counting from now if it already lapsed.
    pub fn extend_tier(&mut self, days: u32, now: DateTime<Utc>) {
        let start = self
            .tier_until
            .map_or(now.timestamp(), |until| until.max(now.timestamp()));
        self.tier_until = Some(start + i64::from(days) * 86_400);
    }

    /// Energy cap including the tier bonus.
    pub fn max_energy(&self, now: DateTime<Utc>) -> u32 {
        if self.tier_active(now) {
            self.energy.max + VIP_MAX_ENERGY_BONUS
        } else {
            self.energy.max
        }
    }

    pub fn require_class(&self) -> Result<CharacterClass> {
        self.class.ok_or(GameError::NoClassChosen)
    }

    pub fn spend_gold(&mut self, amount: u64) -> Result<()> {
        if self.gold < amount {
            return Err(GameError::NotEnoughGold {
                need: amount,
                have: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    pub fn spend_gems(&mut self, amount: u64) -> Result<()> {
        if self.gems < amount {
            return Err(GameError::NotEnoughGems {
                need: amount,
                have: self.gems,
            });
        }
        self.gems -= amount;
        Ok(())
    }

    /// Spends energy and stamps the regeneration timestamp.
    pub fn spend_energy(&mut self, amount: u32, now: DateTime<Utc>) -> Result<()> {
        if self.energy.current < amount {
            return Err(GameError::NotEnoughEnergy {
                need: amount,
                have: self.energy.current,
            });
        }
        self.energy.current -= amount;
        self.energy.last_refill = now.timestamp();
        Ok(())
    }

    /// Adds gold that counts towards lifetime earnings.
    pub fn earn_gold(&mut self, amount: u64) {
        self.gold += amount;
        self.counters.total_gold_earned += amount;
    }

    /// Adds gems that count towards lifetime earnings.
    pub fn earn_gems(&mut self, amount: u64) {
        self.gems += amount;
        self.counters.total_gems_earned += amount;
    }

    /// Adds energy up to the current cap. Never lowers energy already above it.
    pub fn restore_energy(&mut self, amount: u32, now: DateTime<Utc>) -> u32 {
        let cap = self.max_energy(now);
        let before = self.energy.current;
        if before < cap {
            self.energy.current = (before + amount).min(cap);
        }
        self.energy.current - before
    }

    /// Heals up to base max HP and returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp.saturating_sub(before)
    }
}
