//! Timed expeditions: start now, collect the loot once the timer runs out.

use super::{ExpeditionOutcome, ExpeditionStarted, GameService};
use crate::achievements::evaluate_achievements;
use crate::character::{ActiveExpedition, Character, Multipliers};
use crate::core::combat_math::roll_percent;
use crate::core::constants::*;
use crate::core::{grant_experience, Clock};
use crate::error::{GameError, Result};
use crate::ledger::Ledger;
use crate::rewards::{roll_range, ValueRange};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpeditionDef {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_minutes: i64,
    pub gold: ValueRange,
    pub xp: ValueRange,
    /// Percent chance of one gem on collection.
    pub gem_chance: u32,
    pub min_level: u32,
}

pub const EXPEDITIONS: &[ExpeditionDef] = &[
    ExpeditionDef {
        id: "forest_patrol",
        name: "Forest Patrol",
        duration_minutes: 30,
        gold: ValueRange::new(20, 60),
        xp: ValueRange::new(10, 30),
        gem_chance: 5,
        min_level: 1,
    },
    ExpeditionDef {
        id: "mine_expedition",
        name: "Mine Expedition",
        duration_minutes: 60,
        gold: ValueRange::new(50, 150),
        xp: ValueRange::new(30, 80),
        gem_chance: 10,
        min_level: 1,
    },
    ExpeditionDef {
        id: "treasure_hunt",
        name: "Treasure Hunt",
        duration_minutes: 120,
        gold: ValueRange::new(100, 400),
        xp: ValueRange::new(60, 200),
        gem_chance: 20,
        min_level: 1,
    },
    ExpeditionDef {
        id: "dragon_lair",
        name: "Dragon's Lair",
        duration_minutes: 240,
        gold: ValueRange::new(300, 1000),
        xp: ValueRange::new(150, 500),
        gem_chance: 35,
        min_level: 1,
    },
    ExpeditionDef {
        id: "void_rift",
        name: "Void Rift",
        duration_minutes: 480,
        gold: ValueRange::new(500, 2000),
        xp: ValueRange::new(300, 1000),
        gem_chance: 50,
        min_level: 15,
    },
];

pub fn find_expedition(id: &str) -> Option<&'static ExpeditionDef> {
    EXPEDITIONS.iter().find(|e| e.id == id)
}

impl ExpeditionDef {
    /// Duration in seconds, shortened while the tier is active.
    pub fn duration_secs(&self, tier_active: bool) -> i64 {
        let secs = self.duration_minutes * 60;
        if tier_active {
            (secs as f64 * VIP_EXPEDITION_SPEED) as i64
        } else {
            secs
        }
    }
}

/// Unix seconds when the running expedition may be collected. The tier is
/// judged at `now`.
fn finishes_at(character: &Character, def: &ExpeditionDef, started_at: i64, now: DateTime<Utc>) -> i64 {
    started_at + def.duration_secs(character.tier_active(now))
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    pub fn start_expedition(&self, id: u64, expedition_id: &str) -> Result<ExpeditionStarted> {
        let def = find_expedition(expedition_id)
            .ok_or_else(|| GameError::not_found("expedition", expedition_id))?;
        let now = self.now();
        self.ledger.apply(id, |c| {
            if c
                .expedition
                .as_ref()
                .is_some_and(|running| find_expedition(&running.expedition_id).is_some())
            {
                return Err(GameError::ExpeditionInProgress);
            }
            if c.level < def.min_level {
                return Err(GameError::LevelTooLow {
                    required: def.min_level,
                    level: c.level,
                });
            }
            let started_at = now.timestamp();
            c.expedition = Some(ActiveExpedition {
                expedition_id: def.id.to_string(),
                started_at,
            });
            info!(character = id, expedition = def.id, "expedition started");
            Ok(ExpeditionStarted {
                expedition_id: def.id,
                finishes_at: finishes_at(c, def, started_at, now),
            })
        })
    }

    /// Collects a finished expedition. Gold and XP are scaled by the
    /// character's multipliers at collection time.
    pub fn collect_expedition(&self, id: u64, rng: &mut impl Rng) -> Result<ExpeditionOutcome> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            let running = c.expedition.as_ref().ok_or(GameError::NoExpedition)?;
            let def = find_expedition(&running.expedition_id).ok_or(GameError::NoExpedition)?;
            let ready_at = finishes_at(c, def, running.started_at, now);
            let remaining = ready_at - now.timestamp();
            if remaining > 0 {
                return Err(GameError::ExpeditionNotFinished {
                    minutes_left: (remaining + 59) / 60,
                });
            }

            let mults = Multipliers::for_character(c, now);
            let gold = mults.scale_gold(roll_range(def.gold, rng));
            let xp = mults.scale_xp(roll_range(def.xp, rng));
            let gems = u64::from(roll_percent(def.gem_chance, rng));

            c.earn_gold(gold);
            if gems > 0 {
                c.earn_gems(gems);
            }
            let level_up = grant_experience(c, xp);
            c.expedition = None;
            info!(character = id, expedition = def.id, gold, xp, gems, "expedition collected");

            let achievements = evaluate_achievements(c);
            Ok(ExpeditionOutcome {
                expedition_id: def.id,
                gold,
                xp,
                gems,
                level_up,
                achievements,
            })
        })
    }
}
