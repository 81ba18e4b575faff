use super::{FightOutcome, GameService};
use crate::achievements::evaluate_achievements;
use crate::character::Character;
use crate::combat::{
    apply_combat, find_dungeon, pvp_level_range, random_elite, random_monster, resolve_combat,
    rival_opponent, stranger_opponent, CombatReport, DungeonDef, Opponent,
};
use crate::core::combat_math::roll_percent;
use crate::core::constants::*;
use crate::core::{apply_regeneration, Clock, LevelUpReport};
use crate::error::{GameError, Result};
use crate::ledger::Ledger;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Shared gate for every encounter: class, energy, then HP. Dungeon
/// fights resolve the dungeon before this.
fn check_ready(character: &mut Character, cost: u32, min_hp: u32, now: DateTime<Utc>) -> Result<()> {
    character.require_class()?;
    apply_regeneration(character, now);
    if character.energy.current < cost {
        return Err(GameError::NotEnoughEnergy {
            need: cost,
            have: character.energy.current,
        });
    }
    if character.hp <= min_hp {
        return Err(GameError::HpTooLow {
            min: min_hp,
            have: character.hp,
        });
    }
    Ok(())
}

fn engage(
    character: &mut Character,
    opponent: &Opponent,
    cost: u32,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<(CombatReport, Option<LevelUpReport>)> {
    character.spend_energy(cost, now)?;
    let report = resolve_combat(character, opponent, now, rng);
    let level_up = apply_combat(character, &report);
    Ok((report, level_up))
}

fn outcome(
    character: &mut Character,
    combat: CombatReport,
    level_up: Option<LevelUpReport>,
    bonus_gems: u64,
) -> FightOutcome {
    let achievements = evaluate_achievements(character);
    FightOutcome {
        combat,
        level_up,
        bonus_gems,
        achievements,
        energy_left: character.energy.current,
        hp_left: character.hp,
    }
}

fn open_dungeon(dungeon_id: u32, level: u32) -> Result<&'static DungeonDef> {
    let dungeon =
        find_dungeon(dungeon_id).ok_or_else(|| GameError::not_found("dungeon", dungeon_id.to_string()))?;
    if level < dungeon.min_level {
        return Err(GameError::LevelTooLow {
            required: dungeon.min_level,
            level,
        });
    }
    Ok(dungeon)
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Fights a random regular monster of the dungeon.
    pub fn fight_monster(&self, id: u64, dungeon_id: u32, rng: &mut impl Rng) -> Result<FightOutcome> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            let dungeon = open_dungeon(dungeon_id, c.level)?;
            check_ready(c, MONSTER_ENERGY_COST, MONSTER_MIN_HP, now)?;
            let opponent = random_monster(dungeon, rng);
            let (report, level_up) = engage(c, &opponent, MONSTER_ENERGY_COST, now, rng)?;
            if report.won() {
                c.counters.dungeon_wins += 1;
            }
            Ok(outcome(c, report, level_up, 0))
        })
    }

    /// Fights the dungeon boss. A win may drop bonus gems on top of the
    /// regular rewards.
    pub fn fight_boss(&self, id: u64, dungeon_id: u32, rng: &mut impl Rng) -> Result<FightOutcome> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            let dungeon = open_dungeon(dungeon_id, c.level)?;
            check_ready(c, BOSS_ENERGY_COST, BOSS_MIN_HP, now)?;
            let opponent = Opponent::from(&dungeon.boss);
            let (report, level_up) = engage(c, &opponent, BOSS_ENERGY_COST, now, rng)?;
            let mut bonus_gems = 0;
            if report.won() {
                c.counters.boss_kills += 1;
                if roll_percent(BOSS_BONUS_GEM_PERCENT, rng) {
                    bonus_gems = BOSS_BONUS_GEMS;
                    c.earn_gems(bonus_gems);
                }
            }
            Ok(outcome(c, report, level_up, bonus_gems))
        })
    }

    /// Fights a random elite unlocked at the character's level.
    pub fn fight_elite(&self, id: u64, rng: &mut impl Rng) -> Result<FightOutcome> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            check_ready(c, ELITE_ENERGY_COST, BOSS_MIN_HP, now)?;
            let opponent =
                random_elite(c.level, rng).ok_or(GameError::NoEliteAvailable { level: c.level })?;
            let (report, level_up) = engage(c, &opponent, ELITE_ENERGY_COST, now, rng)?;
            if report.won() {
                c.counters.elite_kills += 1;
            }
            Ok(outcome(c, report, level_up, 0))
        })
    }

    /// Arena fight against a random character within the level window, or
    /// a stranger mirroring the attacker when nobody qualifies. Rivals are
    /// read as snapshots and never modified.
    pub fn fight_pvp(&self, id: u64, rng: &mut impl Rng) -> Result<FightOutcome> {
        let now = self.now();
        let level = self.character(id)?.level;
        let rivals: Vec<Character> = self
            .ledger
            .rivals(id, pvp_level_range(level))?
            .into_iter()
            .filter(|r| r.class.is_some())
            .collect();
        debug!(character = id, candidates = rivals.len(), "arena matchmaking");

        self.ledger.apply(id, |c| {
            check_ready(c, PVP_ENERGY_COST, BOSS_MIN_HP, now)?;
            let opponent = match rivals.choose(rng) {
                Some(rival) => rival_opponent(rival, rng),
                None => stranger_opponent(c, rng),
            };
            let (report, level_up) = engage(c, &opponent, PVP_ENERGY_COST, now, rng)?;
            if report.won() {
                c.counters.pvp_wins += 1;
            } else {
                c.counters.pvp_losses += 1;
            }
            Ok(outcome(c, report, level_up, 0))
        })
    }
}
