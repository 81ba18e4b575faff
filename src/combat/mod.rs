//! Turn-based combat: resolver, opponent tables and arena matchmaking.

pub mod logic;
pub mod opponents;
pub mod types;

pub use logic::*;
pub use opponents::*;
pub use types::*;
