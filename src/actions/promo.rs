use super::{GameService, PromoRedemption};
use crate::achievements::evaluate_achievements;
use crate::core::Clock;
use crate::error::{GameError, LedgerError, Result};
use crate::ledger::Ledger;
use crate::promo::normalize_code;
use tracing::info;

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Redeems a promo code: unknown, then exhausted, then already used by
    /// this character. Gold is a gift; gems count towards lifetime gems.
    ///
    /// A use is taken from the code's budget before the character is
    /// written and handed back if the write is refused.
    pub fn redeem_promo(&self, id: u64, code: &str) -> Result<PromoRedemption> {
        let code = normalize_code(code);
        if !self.ledger.contains(id)? {
            return Err(LedgerError::UnknownCharacter(id).into());
        }

        let promo = self.promos.reserve(&code)?;
        let redeemed = self.ledger.apply(id, |c| {
            if !c.promo_codes.insert(code.clone()) {
                return Err(GameError::PromoAlreadyUsed(code.clone()));
            }
            c.gold += promo.gold;
            c.earn_gems(promo.gems);
            Ok(PromoRedemption {
                code: code.clone(),
                gold: promo.gold,
                gems: promo.gems,
                achievements: evaluate_achievements(c),
            })
        });

        match &redeemed {
            Ok(_) => info!(character = id, code = %code, gold = promo.gold, gems = promo.gems, "promo code redeemed"),
            Err(_) => self.promos.release(&code),
        }
        redeemed
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::promo::PromoCode;

    fn add(service: &TestService, code: &str, gold: u64, gems: u64, max_uses: u32) {
        service
            .promos()
            .add(PromoCode::new(code, gold, gems, max_uses, service.now()))
            .unwrap();
    }

    #[test]
    fn test_redeem_credits_gold_and_gems() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        add(&service, "WELCOME", 100, 10, 5);

        let redemption = service.redeem_promo(1, "welcome").unwrap();
        assert_eq!((redemption.gold, redemption.gems), (100, 10));
        assert_eq!(redemption.code, "WELCOME");

        let c = service.character(1).unwrap();
        assert_eq!(c.gold, 150);
        assert_eq!(c.gems, 10);
        assert_eq!(c.counters.total_gold_earned, 0);
        assert_eq!(c.counters.total_gems_earned, 10);
        assert!(c.promo_codes.contains("WELCOME"));
        assert_eq!(service.promos().get("WELCOME").unwrap().used_count, 1);
    }

    #[test]
    fn test_each_character_redeems_once() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        add(&service, "ONCE", 10, 0, 5);
        service.redeem_promo(1, "ONCE").unwrap();
        assert!(matches!(
            service.redeem_promo(1, "once"),
            Err(GameError::PromoAlreadyUsed(code)) if code == "ONCE"
        ));
        assert_eq!(service.character(1).unwrap().gold, 60);
        // The refused attempt does not spend the budget
        assert_eq!(service.promos().get("ONCE").unwrap().used_count, 1);
    }

    #[test]
    fn test_budget_is_shared_between_characters() {
        let service = service();
        for id in 1..=3 {
            service.register(id, "Hero", None).unwrap();
        }
        add(&service, "DUO", 0, 3, 2);
        service.redeem_promo(1, "DUO").unwrap();
        service.redeem_promo(2, "DUO").unwrap();
        assert!(matches!(
            service.redeem_promo(3, "DUO"),
            Err(GameError::PromoExhausted(_))
        ));
        assert_eq!(service.character(3).unwrap().gems, 0);
    }

    #[test]
    fn test_unknown_code_and_character() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        assert!(matches!(
            service.redeem_promo(1, "NOPE"),
            Err(GameError::NotFound { kind: "promo code", .. })
        ));
        add(&service, "GHOST", 1, 0, 1);
        assert!(matches!(
            service.redeem_promo(9, "GHOST"),
            Err(GameError::Ledger(LedgerError::UnknownCharacter(9)))
        ));
        assert_eq!(service.promos().get("GHOST").unwrap().uses_left(), 1);
    }
}
