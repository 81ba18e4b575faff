//! Achievement identifiers and definitions.

use crate::character::Character;
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    // Dungeon wins
    FirstBlood,
    Hunter10,
    Hunter100,
    Hunter500,
    // Boss kills
    Boss1,
    Boss10,
    Boss50,
    // Arena wins
    Pvp1,
    Pvp10,
    Pvp50,
    // Level
    Level5,
    Level10,
    Level20,
    Level30,
    // Lifetime gold
    Gold1000,
    Gold10000,
    // Daily streak
    Streak7,
    Streak30,
    // Referrals
    Referrals5,
}

/// Character field an achievement watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCounter {
    DungeonWins,
    BossKills,
    PvpWins,
    Level,
    TotalGoldEarned,
    DailyStreak,
    Referrals,
}

impl AchievementCounter {
    /// Current value of the watched field.
    pub fn value(&self, character: &Character) -> u64 {
        match self {
            AchievementCounter::DungeonWins => character.counters.dungeon_wins,
            AchievementCounter::BossKills => character.counters.boss_kills,
            AchievementCounter::PvpWins => character.counters.pvp_wins,
            AchievementCounter::Level => u64::from(character.level),
            AchievementCounter::TotalGoldEarned => character.counters.total_gold_earned,
            AchievementCounter::DailyStreak => u64::from(character.daily.streak),
            AchievementCounter::Referrals => character.referral.count,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub counter: AchievementCounter,
    pub threshold: u64,
    pub reward_gold: u64,
    pub reward_gems: u64,
}

impl AchievementDef {
    pub fn is_met(&self, character: &Character) -> bool {
        self.counter.value(character) >= self.threshold
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementReport {
    pub unlocked: Vec<AchievementId>,
    pub reward_gold: u64,
    pub reward_gems: u64,
}

impl AchievementReport {
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}
