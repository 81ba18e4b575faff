//! Player characters: classes, persisted state and effective stats.

pub mod class;
pub mod derived_stats;
pub mod types;

pub use class::*;
pub use derived_stats::*;
pub use types::*;
