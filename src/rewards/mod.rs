//! Weighted reward tables, chests, the fortune wheel and gambling games.

pub mod games;
pub mod roller;
pub mod tables;
pub mod types;

pub use games::*;
pub use roller::*;
pub use tables::*;
pub use types::*;
