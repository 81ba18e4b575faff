use super::{DailyClaim, DailyOutcome, GameService};
use crate::achievements::evaluate_achievements;
use crate::core::constants::*;
use crate::core::{apply_regeneration, Clock};
use crate::error::{GameError, Result};
use crate::ledger::Ledger;
use tracing::info;

/// Reward for a claim on day `streak` of a run.
pub fn daily_reward(streak: u32, tier_active: bool) -> DailyOutcome {
    let mut gems = 0;
    if streak >= DAILY_GEM_STREAK {
        gems += 1;
    }
    if tier_active {
        gems += VIP_DAILY_GEMS;
    }
    DailyOutcome {
        streak,
        gold: DAILY_BASE_GOLD + DAILY_GOLD_PER_STREAK * u64::from(streak),
        gems,
        energy: if streak >= DAILY_ENERGY_STREAK { DAILY_ENERGY_BONUS } else { 0 },
        spin_tokens: u32::from(streak >= DAILY_SPIN_STREAK),
    }
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Claims the once-per-day reward. The streak continues only when the
    /// previous claim was yesterday (UTC).
    pub fn claim_daily(&self, id: u64) -> Result<DailyClaim> {
        let now = self.now();
        let today = now.date_naive();
        self.ledger.apply(id, |c| {
            if c.daily.last_claim == Some(today) {
                return Err(GameError::AlreadyClaimed);
            }
            let continues = today.pred_opt().is_some_and(|yesterday| c.daily.last_claim == Some(yesterday));
            let streak = if continues { c.daily.streak + 1 } else { 1 };

            let mut reward = daily_reward(streak, c.tier_active(now));
            c.gold += reward.gold;
            c.earn_gems(reward.gems);
            if reward.energy > 0 {
                apply_regeneration(c, now);
                reward.energy = c.restore_energy(reward.energy, now);
            }
            c.wheel.tokens += reward.spin_tokens;
            c.daily.last_claim = Some(today);
            c.daily.streak = streak;

            info!(character = id, streak, gold = reward.gold, gems = reward.gems, "daily reward claimed");
            let achievements = evaluate_achievements(c);
            Ok(DailyClaim { reward, achievements })
        })
    }
}
