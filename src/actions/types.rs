//! Results returned by player actions.

use crate::achievements::AchievementReport;
use crate::character::Character;
use crate::combat::CombatReport;
use crate::core::LevelUpReport;
use crate::items::{EquipmentSlot, ItemDef};
use crate::rewards::RolledReward;

#[derive(Debug, Clone)]
pub struct Registration {
    pub character: Character,
    /// False when the id was already registered.
    pub created: bool,
    /// Referrer credited for this registration.
    pub referrer: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct FightOutcome {
    pub combat: CombatReport,
    pub level_up: Option<LevelUpReport>,
    /// Extra gems from the boss bonus roll.
    pub bonus_gems: u64,
    pub achievements: AchievementReport,
    pub energy_left: u32,
    pub hp_left: u32,
}

impl FightOutcome {
    pub fn won(&self) -> bool {
        self.combat.won()
    }
}

/// What happened to an item handed to a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemGrant {
    /// Consumable applied on the spot.
    Used { healed: u32, energy: u32 },
    /// Kept in the inventory for later.
    Stored,
    BuffActivated { uses: u32 },
    Equipped {
        slot: EquipmentSlot,
        displaced: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub item: &'static ItemDef,
    pub grant: ItemGrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyOutcome {
    pub streak: u32,
    pub gold: u64,
    pub gems: u64,
    pub energy: u32,
    pub spin_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct DailyClaim {
    pub reward: DailyOutcome,
    pub achievements: AchievementReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpeditionStarted {
    pub expedition_id: &'static str,
    /// Unix seconds when the expedition can be collected.
    pub finishes_at: i64,
}

#[derive(Debug, Clone)]
pub struct ExpeditionOutcome {
    pub expedition_id: &'static str,
    pub gold: u64,
    pub xp: u64,
    pub gems: u64,
    pub level_up: LevelUpReport,
    pub achievements: AchievementReport,
}

/// A chest opening or wheel spin.
#[derive(Debug, Clone)]
pub struct FortuneOutcome {
    pub reward: RolledReward,
    pub level_up: Option<LevelUpReport>,
    pub achievements: AchievementReport,
}

/// A gambling round: the game's own result plus the balance afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GambleOutcome<T> {
    pub round: T,
    pub stake: u64,
    pub payout: u64,
    pub gold: u64,
}

impl<T> GambleOutcome<T> {
    /// Gold won or lost by this round.
    pub fn net(&self) -> i64 {
        self.payout as i64 - self.stake as i64
    }
}

#[derive(Debug, Clone)]
pub struct PromoRedemption {
    pub code: String,
    pub gold: u64,
    pub gems: u64,
    pub achievements: AchievementReport,
}
