//! Item system: catalog, equipment slots and inventory.

pub mod catalog;
pub mod equipment;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use equipment::*;
pub use inventory::*;
pub use types::*;
