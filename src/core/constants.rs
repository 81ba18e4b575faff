// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Per-level growth (class bonuses are added on top)
pub const LEVEL_HP_GROWTH: u32 = 10;
pub const LEVEL_ATTACK_GROWTH: i32 = 2;
pub const LEVEL_DEFENSE_GROWTH: i32 = 1;
pub const WARRIOR_EXTRA_HP_GROWTH: u32 = 5;
pub const WARRIOR_EXTRA_DEFENSE_GROWTH: i32 = 1;
pub const STRIKER_EXTRA_ATTACK_GROWTH: i32 = 1;

// New character defaults (before a class is chosen)
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_HP: u32 = 100;
pub const STARTING_ATTACK: i32 = 10;
pub const STARTING_DEFENSE: i32 = 5;
pub const STARTING_CRIT: i32 = 5;
pub const STARTING_GOLD: u64 = 50;
pub const STARTING_ENERGY: u32 = 10;

// Energy regeneration
pub const ENERGY_REGEN_MINUTES: i64 = 10;
pub const VIP_ENERGY_REGEN_MINUTES: i64 = 5;
pub const VIP_MAX_ENERGY_BONUS: u32 = 5;

// Subscription tier bonuses
pub const VIP_XP_MULTIPLIER: f64 = 1.5;
pub const VIP_GOLD_MULTIPLIER: f64 = 1.5;
pub const VIP_GEM_LUCK_BONUS: u32 = 10;
pub const VIP_DAILY_GEMS: u64 = 2;
pub const VIP_EXPEDITION_SPEED: f64 = 0.75;

// Combat
pub const MAX_COMBAT_TURNS: u32 = 30;
pub const CRIT_DAMAGE_MULTIPLIER: i64 = 2;
/// Attacker damage is reduced by a roll in `0..=ATTACK_VARIANCE`.
pub const ATTACK_VARIANCE: i64 = 3;
/// Opponent damage is shifted by a roll in `-RETALIATION_VARIANCE..=RETALIATION_VARIANCE`.
pub const RETALIATION_VARIANCE: i64 = 2;
pub const GOLD_REWARD_MIN_OFFSET: i64 = -5;
pub const GOLD_REWARD_MAX_OFFSET: i64 = 10;
pub const BASE_GEM_DROP_PERCENT: u32 = 5;
pub const BOSS_BONUS_GEM_PERCENT: u32 = 30;
pub const BOSS_BONUS_GEMS: u64 = 2;
pub const REVIVE_ITEM: &str = "revive_stone";
pub const RESPEC_ITEM: &str = "respec_token";

// Energy costs and HP gates per encounter
pub const MONSTER_ENERGY_COST: u32 = 1;
pub const BOSS_ENERGY_COST: u32 = 2;
pub const ELITE_ENERGY_COST: u32 = 3;
pub const PVP_ENERGY_COST: u32 = 2;
pub const MONSTER_MIN_HP: u32 = 1;
pub const BOSS_MIN_HP: u32 = 5;

// PvP
pub const PVP_LEVEL_WINDOW: u32 = 3;
pub const PVP_ATTACK_VARIANCE: i32 = 3;
pub const PVP_RIVAL_GOLD_MIN: u64 = 30;
pub const PVP_RIVAL_GOLD_MAX: u64 = 50;
pub const PVP_RIVAL_XP: u64 = 25;
pub const PVP_STRANGER_GOLD: u64 = 30;
pub const PVP_STRANGER_XP: u64 = 20;

// Services
pub const HEAL_COST_GOLD: u64 = 10;
pub const HEAL_AMOUNT: u32 = 50;
pub const ENERGY_REFILL_COST_GEMS: u64 = 3;
pub const ENERGY_REFILL_AMOUNT: u32 = 10;
pub const GEM_EXCHANGE_GOLD: u64 = 50;
pub const WHEEL_SPIN_COST_GEMS: u64 = 5;

// Referrals
pub const REFERRAL_GOLD: u64 = 50;
pub const REFERRAL_GEMS: u64 = 2;

pub const LEADERBOARD_SIZE: usize = 10;

// Daily reward
pub const DAILY_BASE_GOLD: u64 = 20;
pub const DAILY_GOLD_PER_STREAK: u64 = 10;
pub const DAILY_GEM_STREAK: u32 = 3;
pub const DAILY_ENERGY_STREAK: u32 = 5;
pub const DAILY_ENERGY_BONUS: u32 = 3;
pub const DAILY_SPIN_STREAK: u32 = 2;

// Gambling stakes
pub const DICE_STAKE: u64 = 10;
pub const SLOTS_STAKE: u64 = 20;
pub const SLOTS_PAIR_PAYOUT: u64 = 10;
pub const ROULETTE_STAKE: u64 = 15;

// Snapshot file format
pub const SNAPSHOT_VERSION_MAGIC: u64 = 0x444D_5348_5031_0002;
