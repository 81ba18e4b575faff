//! Achievement system module.
//!
//! Achievements watch monotonic character counters and pay a one-time
//! gold and gem reward when a threshold is first reached.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{achievements_for_counter, get_achievement_def, ALL_ACHIEVEMENTS};
pub use logic::evaluate_achievements;
pub use types::{AchievementCounter, AchievementDef, AchievementId, AchievementReport};
