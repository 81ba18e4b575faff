//! Character storage.
//!
//! Every mutation goes through [`Ledger::apply`], which runs the closure on
//! a working copy while holding that character's lock and commits only when
//! the closure returns `Ok`. Writers of one character are serialized;
//! different characters never block each other.

pub mod file;
pub(crate) mod frame;
pub mod memory;

pub use file::FileLedger;
pub use memory::MemoryLedger;

use crate::character::Character;
use crate::error::{LedgerError, Result};

pub trait Ledger: Send + Sync {
    /// Snapshot of one character, `None` if it was never stored.
    fn get(&self, id: u64) -> Result<Option<Character>, LedgerError>;

    /// Stores a new character. Fails if the id is taken.
    fn insert(&self, character: Character) -> Result<(), LedgerError>;

    /// Read-modify-write of one character under its lock.
    fn apply<R, F>(&self, id: u64, f: F) -> Result<R>
    where
        F: FnOnce(&mut Character) -> Result<R>;

    /// Snapshots of every stored character, in no particular order.
    fn all(&self) -> Result<Vec<Character>, LedgerError>;

    /// Snapshots of every character with a level in `lo..=hi`, except
    /// `exclude`.
    fn rivals(&self, exclude: u64, (lo, hi): (u32, u32)) -> Result<Vec<Character>, LedgerError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|c| c.id != exclude && (lo..=hi).contains(&c.level))
            .collect())
    }

    fn contains(&self, id: u64) -> Result<bool, LedgerError> {
        Ok(self.get(id)?.is_some())
    }
}
