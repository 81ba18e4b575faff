use super::{FortuneOutcome, GambleOutcome, GameService};
use crate::achievements::evaluate_achievements;
use crate::character::Character;
use crate::core::constants::*;
use crate::core::{apply_regeneration, Clock};
use crate::error::{GameError, Result};
use crate::ledger::Ledger;
use crate::rewards::{
    apply_reward, find_chest, roll_dice, roll_reward, spin_roulette, spin_slots, DiceBet, DiceRoll,
    RewardTable, RouletteColor, RouletteSpin, SlotSpin, WHEEL,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How a wheel spin is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinSource {
    /// Once per calendar day.
    Free,
    /// Earned from daily streaks.
    Token,
    Gems,
}

fn roll_and_apply(
    character: &mut Character,
    table: &RewardTable,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<FortuneOutcome> {
    let reward = roll_reward(table, rng)?;
    let level_up = apply_reward(character, &reward.outcome, now);
    info!(character = character.id, table = table.id, label = %reward.label, "reward granted");
    let achievements = evaluate_achievements(character);
    Ok(FortuneOutcome {
        reward,
        level_up,
        achievements,
    })
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    pub fn open_chest(&self, id: u64, chest_id: &str, rng: &mut impl Rng) -> Result<FortuneOutcome> {
        let chest = find_chest(chest_id).ok_or_else(|| GameError::not_found("chest", chest_id))?;
        let now = self.now();
        self.ledger.apply(id, |c| {
            c.spend_gems(chest.price_gems)?;
            c.counters.chests_opened += 1;
            roll_and_apply(c, &chest.table, now, rng)
        })
    }

    pub fn spin_wheel(&self, id: u64, source: SpinSource, rng: &mut impl Rng) -> Result<FortuneOutcome> {
        let now = self.now();
        let today = now.date_naive();
        self.ledger.apply(id, |c| {
            match source {
                SpinSource::Free => {
                    if c.wheel.last_free_spin == Some(today) {
                        return Err(GameError::FreeSpinUsed);
                    }
                    c.wheel.last_free_spin = Some(today);
                }
                SpinSource::Token => {
                    if c.wheel.tokens == 0 {
                        return Err(GameError::NoSpins);
                    }
                    c.wheel.tokens -= 1;
                }
                SpinSource::Gems => c.spend_gems(WHEEL_SPIN_COST_GEMS)?,
            }
            apply_regeneration(c, now);
            roll_and_apply(c, &WHEEL, now, rng)
        })
    }

    pub fn play_dice(&self, id: u64, bet: DiceBet, rng: &mut impl Rng) -> Result<GambleOutcome<DiceRoll>> {
        self.gamble(id, DICE_STAKE, rng, |rng| {
            let round = roll_dice(bet, rng);
            (round, round.payout)
        })
    }

    pub fn play_slots(&self, id: u64, rng: &mut impl Rng) -> Result<GambleOutcome<SlotSpin>> {
        self.gamble(id, SLOTS_STAKE, rng, |rng| {
            let round = spin_slots(rng);
            (round, round.payout)
        })
    }

    pub fn play_roulette(
        &self,
        id: u64,
        bet: RouletteColor,
        rng: &mut impl Rng,
    ) -> Result<GambleOutcome<RouletteSpin>> {
        self.gamble(id, ROULETTE_STAKE, rng, |rng| {
            let round = spin_roulette(bet, rng);
            (round, round.payout)
        })
    }

    /// Takes the stake, plays one round and pays out. Winnings are not
    /// lifetime earnings.
    fn gamble<T, R, F>(&self, id: u64, stake: u64, rng: &mut R, play: F) -> Result<GambleOutcome<T>>
    where
        R: Rng,
        F: FnOnce(&mut R) -> (T, u64),
    {
        self.ledger.apply(id, |c| {
            c.spend_gold(stake)?;
            let (round, payout) = play(rng);
            c.gold += payout;
            Ok(GambleOutcome {
                round,
                stake,
                payout,
                gold: c.gold,
            })
        })
    }
}
