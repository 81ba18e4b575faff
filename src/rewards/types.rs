use serde::{Deserialize, Serialize};

/// Inclusive integer range rolled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u64,
    pub max: u64,
}

impl ValueRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: u64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// What a table entry pays out, before the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    Gold(ValueRange),
    Gems(ValueRange),
    Xp(ValueRange),
    Energy(u32),
    FullHeal,
    /// One item from the pool, placed in the inventory.
    Item(&'static [&'static str]),
    /// One equipment item from the pool, equipped on the spot.
    Equipment(&'static [&'static str]),
    TierDays(ValueRange),
    Jackpot { gold: ValueRange, gems: ValueRange },
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardEntry {
    pub label: &'static str,
    /// Relative weight; weights need not sum to 100.
    pub weight: u32,
    pub reward: Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTable {
    pub id: &'static str,
    pub name: &'static str,
    pub entries: &'static [RewardEntry],
}

impl RewardTable {
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }
}

/// Concrete result of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardOutcome {
    Gold(u64),
    Gems(u64),
    Xp(u64),
    Energy(u32),
    FullHeal,
    Item(String),
    Equipment(String),
    TierDays(u32),
    Jackpot { gold: u64, gems: u64 },
    Nothing,
}

impl RewardOutcome {
    /// Stable name of the outcome kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            RewardOutcome::Gold(_) => "gold",
            RewardOutcome::Gems(_) => "gems",
            RewardOutcome::Xp(_) => "xp",
            RewardOutcome::Energy(_) => "energy",
            RewardOutcome::FullHeal => "heal",
            RewardOutcome::Item(_) => "item",
            RewardOutcome::Equipment(_) => "equipment",
            RewardOutcome::TierDays(_) => "tier_days",
            RewardOutcome::Jackpot { .. } => "jackpot",
            RewardOutcome::Nothing => "nothing",
        }
    }
}

/// Roll plus the label of the entry it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledReward {
    pub label: String,
    pub outcome: RewardOutcome,
}
