//! Simulation runner built on the real combat resolver and reward roller.

use super::config::SimConfig;
use super::report::{EntryFrequency, FightStats, MatchupStats, SimReport, TableStats};
use crate::actions::account::apply_class;
use crate::character::{Character, CharacterClass};
use crate::combat::{random_monster, resolve_combat, DungeonDef, Opponent, DUNGEONS};
use crate::rewards::{pick_entry, RewardTable, CHESTS, WHEEL};
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let now = Utc::now();
    let mut stream = 0u64;
    let mut next_rng = || {
        stream += 1;
        match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream)),
            None => ChaCha8Rng::from_entropy(),
        }
    };

    let mut matchups = Vec::with_capacity(DUNGEONS.len() * CharacterClass::ALL.len());
    for dungeon in DUNGEONS {
        for class in CharacterClass::ALL {
            let stats = simulate_matchup(class, dungeon, config.fights_per_matchup, now, &mut next_rng());
            debug!(
                class = class.key(),
                dungeon = dungeon.id,
                win_rate = stats.monsters.win_rate(),
                "matchup simulated"
            );
            matchups.push(stats);
        }
    }

    let mut tables = Vec::with_capacity(CHESTS.len() + 1);
    for table in CHESTS.iter().map(|c| &c.table).chain(std::iter::once(&WHEEL)) {
        tables.push(sample_table(table, config.rolls_per_table, &mut next_rng()));
    }

    SimReport {
        seed: config.seed,
        fights_per_matchup: config.fights_per_matchup,
        rolls_per_table: config.rolls_per_table,
        matchups,
        tables,
    }
}

/// A fresh character of `class` at `level` with no gear or buffs.
fn specimen(class: CharacterClass, level: u32, now: DateTime<Utc>) -> Character {
    let mut character = Character::new(0, "Simulated", now);
    character.level = level;
    apply_class(&mut character, class);
    character.hp = character.max_hp;
    character
}

fn simulate_matchup(
    class: CharacterClass,
    dungeon: &'static DungeonDef,
    fights: u32,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> MatchupStats {
    let character = specimen(class, dungeon.min_level, now);
    let boss = Opponent::from(&dungeon.boss);

    let mut monsters = FightStats::default();
    let mut boss_stats = FightStats::default();
    for _ in 0..fights {
        let opponent = random_monster(dungeon, rng);
        monsters.record(&resolve_combat(&character, &opponent, now, rng));
        boss_stats.record(&resolve_combat(&character, &boss, now, rng));
    }

    MatchupStats {
        class,
        dungeon_id: dungeon.id,
        dungeon: dungeon.name,
        level: dungeon.min_level,
        monsters,
        boss: boss_stats,
    }
}

fn sample_table(table: &RewardTable, rolls: u32, rng: &mut impl Rng) -> TableStats {
    let mut counts = vec![0u32; table.entries.len()];
    for _ in 0..rolls {
        match pick_entry(table.entries, rng) {
            Ok(entry) => {
                if let Some(index) = table.entries.iter().position(|e| std::ptr::eq(e, entry)) {
                    counts[index] += 1;
                }
            }
            Err(e) => {
                warn!(table = table.id, error = %e, "table cannot be rolled");
                break;
            }
        }
    }

    let total_weight = table.total_weight().max(1) as f64;
    let entries = table
        .entries
        .iter()
        .zip(counts)
        .map(|(entry, count)| EntryFrequency {
            label: entry.label,
            expected: f64::from(entry.weight) / total_weight,
            observed: if rolls == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(rolls)
            },
        })
        .collect();

    TableStats {
        table: table.id,
        rolls,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig {
            fights_per_matchup: 50,
            rolls_per_table: 5_000,
            seed: Some(12345),
        }
    }

    #[test]
    fn test_covers_every_class_and_dungeon() {
        let report = run_simulation(&config());
        assert_eq!(report.matchups.len(), 28);
        assert_eq!(report.tables.len(), 4);
        for m in &report.matchups {
            assert_eq!(m.monsters.fights, 50);
            assert_eq!(m.boss.fights, 50);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = run_simulation(&config());
        let b = run_simulation(&config());
        for (x, y) in a.matchups.iter().zip(&b.matchups) {
            assert_eq!(x.monsters, y.monsters);
            assert_eq!(x.boss, y.boss);
        }
    }

    #[test]
    fn test_warrior_clears_first_dungeon() {
        let report = run_simulation(&config());
        let warrior = report
            .matchups
            .iter()
            .find(|m| m.class == CharacterClass::Warrior && m.dungeon_id == 1)
            .unwrap();
        assert_eq!(warrior.monsters.wins, 50);
        assert_eq!(warrior.level, 1);
    }

    #[test]
    fn test_table_frequencies_track_weights() {
        let report = run_simulation(&config());
        for table in &report.tables {
            let observed: f64 = table.entries.iter().map(|e| e.observed).sum();
            assert!((observed - 1.0).abs() < 1e-9, "{}", table.table);
            assert!(table.max_deviation() < 0.03, "{}", table.table);
        }
    }

    #[test]
    fn test_specimen_gets_level_growth() {
        let c = specimen(CharacterClass::Mage, 10, Utc::now());
        assert_eq!(c.level, 10);
        assert_eq!(c.max_hp, 90 + 9 * 10);
        assert_eq!(c.attack, 20 + 9 * 3);
        assert_eq!(c.hp, c.max_hp);
    }
}
