//! Player actions.
//!
//! [`GameService`] ties the pure game rules to a [`Ledger`] and a
//! [`Clock`]. Every action runs as one [`Ledger::apply`] call: refusals are
//! returned as errors before anything is committed, and successful actions
//! evaluate achievements in the same write.

pub mod account;
pub mod daily;
pub mod expedition;
pub mod fight;
pub mod fortune;
pub mod leaderboard;
pub mod promo;
pub mod shop;
pub mod types;

pub use expedition::{find_expedition, ExpeditionDef, EXPEDITIONS};
pub use fortune::SpinSource;
pub use leaderboard::{rank_characters, LeaderboardCategory, LeaderboardEntry};
pub use types::*;

use crate::ads::{AdImpressions, Impression};
use crate::character::Character;
use crate::core::Clock;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::promo::PromoBook;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct GameService<L: Ledger, C: Clock> {
    ledger: L,
    clock: C,
    ads: Option<Arc<dyn AdImpressions>>,
    promos: PromoBook,
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    pub fn new(ledger: L, clock: C) -> Self {
        Self {
            ledger,
            clock,
            ads: None,
            promos: PromoBook::in_memory(),
        }
    }

    /// Reports impressions for player interactions through `ads`.
    pub fn with_ads(mut self, ads: Arc<dyn AdImpressions>) -> Self {
        self.ads = Some(ads);
        self
    }

    /// Redeems promo codes from `promos` instead of an empty in-memory book.
    pub fn with_promos(mut self, promos: PromoBook) -> Self {
        self.promos = promos;
        self
    }

    pub fn promos(&self) -> &PromoBook {
        &self.promos
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current snapshot of a character.
    pub fn character(&self, id: u64) -> Result<Character> {
        Ok(self
            .ledger
            .get(id)?
            .ok_or(LedgerError::UnknownCharacter(id))?)
    }

    /// Forwards an interaction to the ad network, if one is configured.
    pub fn record_impression(&self, impression: Impression) {
        if let Some(ads) = &self.ads {
            ads.record(impression);
        }
    }
}
