//! Promo codes: a shared use budget per code, one redemption per character.
//!
//! The book holds the codes and their use counts. Which character redeemed
//! which code is recorded on the character itself.

use crate::error::{GameError, LedgerError, Result};
use crate::ledger::frame::{read_frame, write_frame};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// Codes are matched case-insensitively and stored upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub gold: u64,
    pub gems: u64,
    pub max_uses: u32,
    pub used_count: u32,
    pub created_at: i64,
}

impl PromoCode {
    pub fn new(code: &str, gold: u64, gems: u64, max_uses: u32, now: DateTime<Utc>) -> Self {
        Self {
            code: normalize_code(code),
            gold,
            gems,
            max_uses,
            used_count: 0,
            created_at: now.timestamp(),
        }
    }

    pub fn uses_left(&self) -> u32 {
        self.max_uses.saturating_sub(self.used_count)
    }
}

type Codes = BTreeMap<String, PromoCode>;

/// Promo code store, optionally backed by one checksummed snapshot file.
#[derive(Debug, Default)]
pub struct PromoBook {
    codes: Mutex<Codes>,
    path: Option<PathBuf>,
}

impl PromoBook {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the book stored at `path`, starting empty if the file does not
    /// exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let codes = match read_frame::<Codes>(&path)? {
            None => Codes::new(),
            Some(Some(codes)) => codes,
            Some(None) => return Err(LedgerError::CorruptStore(path)),
        };
        Ok(Self {
            codes: Mutex::new(codes),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self, codes: &Codes) -> Result<(), LedgerError> {
        match &self.path {
            Some(path) => write_frame(path, codes),
            None => Ok(()),
        }
    }

    /// Adds a code, replacing any code with the same name.
    pub fn add(&self, promo: PromoCode) -> Result<(), LedgerError> {
        let mut codes = self.codes.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = codes.insert(promo.code.clone(), promo.clone());
        if let Err(e) = self.persist(&codes) {
            match previous {
                Some(previous) => codes.insert(promo.code.clone(), previous),
                None => codes.remove(&promo.code),
            };
            return Err(e);
        }
        info!(code = %promo.code, gold = promo.gold, gems = promo.gems, max_uses = promo.max_uses, "promo code added");
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<PromoCode> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize_code(code))
            .cloned()
    }

    pub fn codes(&self) -> Vec<PromoCode> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Takes one use of `code` from its budget.
    pub(crate) fn reserve(&self, code: &str) -> Result<PromoCode> {
        let mut codes = self.codes.lock().unwrap_or_else(PoisonError::into_inner);
        let promo = codes
            .get_mut(code)
            .ok_or_else(|| GameError::not_found("promo code", code))?;
        if promo.uses_left() == 0 {
            return Err(GameError::PromoExhausted(code.to_string()));
        }
        promo.used_count += 1;
        let reserved = promo.clone();
        if let Err(e) = self.persist(&codes) {
            if let Some(promo) = codes.get_mut(code) {
                promo.used_count -= 1;
            }
            return Err(e.into());
        }
        Ok(reserved)
    }

    /// Returns a use taken by [`PromoBook::reserve`] whose redemption failed.
    pub(crate) fn release(&self, code: &str) {
        let mut codes = self.codes.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(promo) = codes.get_mut(code) else {
            return;
        };
        promo.used_count = promo.used_count.saturating_sub(1);
        if let Err(e) = self.persist(&codes) {
            warn!(code, error = %e, "failed to persist released promo use");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 8, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_codes_are_normalized() {
        let book = PromoBook::in_memory();
        book.add(PromoCode::new(" welcome ", 100, 5, 3, now())).unwrap();
        assert_eq!(book.get("Welcome").map(|p| p.gold), Some(100));
        assert_eq!(book.codes().len(), 1);
        assert_eq!(book.codes()[0].code, "WELCOME");
    }

    #[test]
    fn test_reserve_spends_the_budget() {
        let book = PromoBook::in_memory();
        book.add(PromoCode::new("DUO", 10, 0, 2, now())).unwrap();
        assert_eq!(book.reserve("DUO").unwrap().used_count, 1);
        assert_eq!(book.reserve("DUO").unwrap().used_count, 2);
        assert!(matches!(book.reserve("DUO"), Err(GameError::PromoExhausted(_))));

        book.release("DUO");
        assert_eq!(book.get("DUO").unwrap().uses_left(), 1);
        assert!(matches!(
            book.reserve("NOPE"),
            Err(GameError::NotFound { kind: "promo code", .. })
        ));
    }

    #[test]
    fn test_book_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promo_codes.bin");
        {
            let book = PromoBook::open(&path).unwrap();
            book.add(PromoCode::new("SPRING", 0, 10, 5, now())).unwrap();
            book.reserve("SPRING").unwrap();
        }
        let book = PromoBook::open(&path).unwrap();
        let promo = book.get("spring").unwrap();
        assert_eq!(promo.used_count, 1);
        assert_eq!(promo.gems, 10);
    }

    #[test]
    fn test_corrupt_book_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promo_codes.bin");
        PromoBook::open(&path)
            .unwrap()
            .add(PromoCode::new("X", 1, 0, 1, now()))
            .unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(
            PromoBook::open(&path),
            Err(LedgerError::CorruptStore(_))
        ));
    }
}
