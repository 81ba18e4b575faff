//! Balance simulator for Monte Carlo analysis.
//!
//! Runs the real combat resolver and reward roller many times to check:
//! - Win rates of every class at each dungeon's entry level
//! - Fight length and reward pacing
//! - Observed reward-table frequencies against their weights

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{EntryFrequency, FightStats, MatchupStats, SimReport, TableStats};
pub use runner::run_simulation;
