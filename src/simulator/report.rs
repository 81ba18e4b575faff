//! Simulation report generation.

use crate::character::CharacterClass;
use crate::combat::CombatReport;
use serde::Serialize;

/// Monster win rate below which a dungeon is flagged as too hard on entry.
const MONSTER_WIN_RATE_FLOOR: f64 = 0.6;
/// Boss win rate below which a boss is flagged.
const BOSS_WIN_RATE_FLOOR: f64 = 0.2;
/// Absolute frequency drift tolerated before a table is flagged.
const FREQUENCY_TOLERANCE: f64 = 0.02;

/// Running totals over many fights of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FightStats {
    pub fights: u32,
    pub wins: u32,
    pub turn_limit_losses: u32,
    pub total_turns: u64,
    pub total_gold: u64,
    pub total_xp: u64,
    pub total_hp_left: u64,
}

impl FightStats {
    pub fn record(&mut self, report: &CombatReport) {
        self.fights += 1;
        self.total_turns += u64::from(report.turns);
        if report.turn_limit_reached {
            self.turn_limit_losses += 1;
        }
        if let Some(rewards) = report.rewards {
            self.wins += 1;
            self.total_gold += rewards.gold;
            self.total_xp += rewards.xp;
            self.total_hp_left += u64::from(report.final_hp);
        }
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins as f64, self.fights)
    }

    pub fn avg_turns(&self) -> f64 {
        ratio(self.total_turns as f64, self.fights)
    }

    pub fn avg_gold_per_win(&self) -> f64 {
        ratio(self.total_gold as f64, self.wins)
    }

    pub fn avg_xp_per_win(&self) -> f64 {
        ratio(self.total_xp as f64, self.wins)
    }

    /// Mean HP left after a win.
    pub fn avg_hp_left(&self) -> f64 {
        ratio(self.total_hp_left as f64, self.wins)
    }
}

fn ratio(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

// Serialize averages alongside the raw totals
impl Serialize for FightStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FightStats", 8)?;
        state.serialize_field("fights", &self.fights)?;
        state.serialize_field("wins", &self.wins)?;
        state.serialize_field("turn_limit_losses", &self.turn_limit_losses)?;
        state.serialize_field("win_rate", &self.win_rate())?;
        state.serialize_field("avg_turns", &self.avg_turns())?;
        state.serialize_field("avg_gold_per_win", &self.avg_gold_per_win())?;
        state.serialize_field("avg_xp_per_win", &self.avg_xp_per_win())?;
        state.serialize_field("avg_hp_left", &self.avg_hp_left())?;
        state.end()
    }
}

/// One class against one dungeon at the dungeon's entry level.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupStats {
    pub class: CharacterClass,
    pub dungeon_id: u32,
    pub dungeon: &'static str,
    pub level: u32,
    pub monsters: FightStats,
    pub boss: FightStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryFrequency {
    pub label: &'static str,
    pub expected: f64,
    pub observed: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    pub table: &'static str,
    pub rolls: u32,
    pub entries: Vec<EntryFrequency>,
}

impl TableStats {
    /// Largest absolute gap between observed and expected frequency.
    pub fn max_deviation(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| (e.observed - e.expected).abs())
            .fold(0.0, f64::max)
    }
}

/// Aggregated results of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub seed: Option<u64>,
    pub fights_per_matchup: u32,
    pub rolls_per_table: u32,
    pub matchups: Vec<MatchupStats>,
    pub tables: Vec<TableStats>,
}

impl SimReport {
    /// Balance problems worth a look.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for m in &self.matchups {
            if m.monsters.win_rate() < MONSTER_WIN_RATE_FLOOR {
                warnings.push(format!(
                    "{} wins only {:.0}% of {} fights at level {}",
                    m.class.name(),
                    m.monsters.win_rate() * 100.0,
                    m.dungeon,
                    m.level
                ));
            }
            if m.boss.win_rate() < BOSS_WIN_RATE_FLOOR {
                warnings.push(format!(
                    "{} beats the {} boss in only {:.0}% of fights",
                    m.class.name(),
                    m.dungeon,
                    m.boss.win_rate() * 100.0
                ));
            }
        }
        for table in &self.tables {
            if table.max_deviation() > FREQUENCY_TOLERANCE {
                warnings.push(format!(
                    "{} frequencies drift {:.1}% from their weights",
                    table.table,
                    table.max_deviation() * 100.0
                ));
            }
        }
        warnings
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Fights per matchup: {}, rolls per table: {}\n",
            self.fights_per_matchup, self.rolls_per_table
        ));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push('\n');

        report.push_str("── DUNGEONS AT ENTRY LEVEL ──────────────────────────────────────\n");
        report.push_str("  Dungeon            Class     Lvl  Win%   Turns  Gold   XP    Boss%\n");
        report.push_str("  ─────────────────  ────────  ───  ─────  ─────  ─────  ────  ─────\n");
        for m in &self.matchups {
            report.push_str(&format!(
                "  {:<17}  {:<8}  {:>3}  {:>5.1}  {:>5.1}  {:>5.0}  {:>4.0}  {:>5.1}\n",
                m.dungeon,
                m.class.name(),
                m.level,
                m.monsters.win_rate() * 100.0,
                m.monsters.avg_turns(),
                m.monsters.avg_gold_per_win(),
                m.monsters.avg_xp_per_win(),
                m.boss.win_rate() * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── REWARD TABLES ────────────────────────────────────────────────\n");
        for table in &self.tables {
            report.push_str(&format!("  {} ({} rolls)\n", table.table, table.rolls));
            for entry in &table.entries {
                report.push_str(&format!(
                    "    {:<12} expected {:>5.1}%  observed {:>5.1}%\n",
                    entry.label,
                    entry.expected * 100.0,
                    entry.observed * 100.0
                ));
            }
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let warnings = self.warnings();
        if warnings.is_empty() {
            report.push_str("  No problems found\n");
        }
        for warning in warnings {
            report.push_str(&format!("  ⚠️  {}\n", warning));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
