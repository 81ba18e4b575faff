use super::Ledger;
use crate::character::Character;
use crate::error::{LedgerError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// In-process ledger with one mutex per character.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    characters: RwLock<HashMap<u64, Arc<Mutex<Character>>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: u64) -> Option<Arc<Mutex<Character>>> {
        self.characters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.characters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, id: u64) -> Result<Option<Character>, LedgerError> {
        Ok(self.entry(id).map(|slot| {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }))
    }

    fn insert(&self, character: Character) -> Result<(), LedgerError> {
        let mut characters = self
            .characters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if characters.contains_key(&character.id) {
            return Err(LedgerError::AlreadyExists(character.id));
        }
        characters.insert(character.id, Arc::new(Mutex::new(character)));
        Ok(())
    }

    fn apply<R, F>(&self, id: u64, f: F) -> Result<R>
    where
        F: FnOnce(&mut Character) -> Result<R>,
    {
        let slot = self.entry(id).ok_or(LedgerError::UnknownCharacter(id))?;
        let mut stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = stored.clone();
        let result = f(&mut working)?;
        *stored = working;
        Ok(result)
    }

    fn all(&self) -> Result<Vec<Character>, LedgerError> {
        let slots: Vec<_> = self
            .characters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        Ok(slots
            .iter()
            .map(|slot| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use chrono::{TimeZone, Utc};
    use std::thread;

    fn character(id: u64, level: u32) -> Character {
        let mut c = Character::new(id, format!("Hero{id}"), Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        c.level = level;
        c
    }

    #[test]
    fn test_insert_and_get() {
        let ledger = MemoryLedger::new();
        assert!(ledger.get(1).unwrap().is_none());
        ledger.insert(character(1, 1)).unwrap();
        assert_eq!(ledger.get(1).unwrap().unwrap().name, "Hero1");
        assert!(matches!(
            ledger.insert(character(1, 1)),
            Err(LedgerError::AlreadyExists(1))
        ));
    }

    #[test]
    fn test_failed_apply_does_not_commit() {
        let ledger = MemoryLedger::new();
        ledger.insert(character(1, 1)).unwrap();
        let result: Result<()> = ledger.apply(1, |c| {
            c.gold = 0;
            c.spend_gems(1)
        });
        assert!(result.is_err());
        assert_eq!(ledger.get(1).unwrap().unwrap().gold, 50);
    }

    #[test]
    fn test_apply_unknown_character() {
        let ledger = MemoryLedger::new();
        let result = ledger.apply(9, |_| Ok(()));
        assert!(matches!(
            result,
            Err(GameError::Ledger(LedgerError::UnknownCharacter(9)))
        ));
    }

    #[test]
    fn test_concurrent_applies_never_lose_updates() {
        let ledger = Arc::new(MemoryLedger::new());
        ledger.insert(character(1, 1)).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for _ in 0..100 {
                        ledger
                            .apply(1, |c| {
                                c.earn_gold(1);
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ledger.get(1).unwrap().unwrap().gold, 850);
    }

    #[test]
    fn test_rivals_filter_by_level_and_exclude_self() {
        let ledger = MemoryLedger::new();
        for (id, level) in [(1, 5), (2, 2), (3, 8), (4, 9)] {
            ledger.insert(character(id, level)).unwrap();
        }
        let mut ids: Vec<_> = ledger
            .rivals(1, (2, 8))
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![2, 3]);
    }
}
