//! Balance constants, clock and the pure game formulas.

pub mod clock;
pub mod combat_math;
pub mod constants;
pub mod progression;
pub mod regen;

pub use clock::{Clock, FixedClock, SystemClock};
pub use progression::{grant_experience, title_for_level, xp_for_next_level, LevelUpReport};
pub use regen::{apply_regeneration, regenerate, RegenResult};
