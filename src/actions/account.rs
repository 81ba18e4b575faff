use super::{GameService, Registration};
use crate::achievements::evaluate_achievements;
use crate::character::{Character, CharacterClass, StatGrowth};
use crate::core::constants::*;
use crate::core::Clock;
use crate::error::{GameError, LedgerError, Result};
use crate::ledger::Ledger;
use tracing::{info, warn};

/// Resets base stats to `class` plus the growth of every level already
/// gained.
pub(crate) fn apply_class(character: &mut Character, class: CharacterClass) {
    let base = class.base_stats();
    let growth = StatGrowth::per_level(Some(class)).times(character.level.saturating_sub(1));
    character.class = Some(class);
    character.max_hp = base.max_hp + growth.hp;
    character.attack = base.attack + growth.attack;
    character.defense = base.defense + growth.defense;
    character.crit = base.crit;
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Creates a classless character. Registering an existing id returns
    /// the stored character.
    ///
    /// A referrer that exists and is not the character itself is linked
    /// and rewarded, also for an existing character that has no referrer
    /// yet.
    pub fn register(&self, id: u64, name: &str, referrer: Option<u64>) -> Result<Registration> {
        let referrer = match referrer {
            Some(r) if r != id && self.ledger.contains(r)? => Some(r),
            _ => None,
        };

        if let Some(existing) = self.ledger.get(id)? {
            let linked = match referrer {
                Some(r) if existing.referral.referrer.is_none() => self.link_referrer(id, r)?,
                _ => None,
            };
            return Ok(Registration {
                character: if linked.is_some() { self.character(id)? } else { existing },
                created: false,
                referrer: linked,
            });
        }

        let mut character = Character::new(id, name, self.now());
        character.referral.referrer = referrer;
        match self.ledger.insert(character.clone()) {
            Ok(()) => {}
            Err(LedgerError::AlreadyExists(_)) => {
                return Ok(Registration {
                    character: self.character(id)?,
                    created: false,
                    referrer: None,
                })
            }
            Err(e) => return Err(e.into()),
        }
        info!(character = id, name, ?referrer, "character registered");

        if let Some(r) = referrer {
            self.credit_referrer(id, r);
        }

        Ok(Registration {
            character,
            created: true,
            referrer,
        })
    }

    /// Links `referrer` to a character that has none yet and credits it.
    fn link_referrer(&self, id: u64, referrer: u64) -> Result<Option<u64>> {
        let linked = self.ledger.apply(id, |c| {
            if c.referral.referrer.is_some() {
                return Ok(false);
            }
            c.referral.referrer = Some(referrer);
            Ok(true)
        })?;
        if !linked {
            return Ok(None);
        }
        info!(character = id, referrer, "referrer linked");
        self.credit_referrer(id, referrer);
        Ok(Some(referrer))
    }

    fn credit_referrer(&self, id: u64, referrer: u64) {
        let credited = self.ledger.apply(referrer, |rc| {
            rc.gold += REFERRAL_GOLD;
            rc.earn_gems(REFERRAL_GEMS);
            rc.referral.count += 1;
            evaluate_achievements(rc);
            Ok(())
        });
        if let Err(e) = credited {
            warn!(character = id, referrer, error = %e, "referral credit failed");
        }
    }

    /// Picks the first class. Stats become the class base plus growth for
    /// levels already gained, at full HP.
    pub fn choose_class(&self, id: u64, class: CharacterClass) -> Result<Character> {
        self.ledger.apply(id, |c| {
            if c.class.is_some() {
                return Err(GameError::ClassAlreadyChosen);
            }
            apply_class(c, class);
            c.hp = c.max_hp;
            info!(character = id, class = class.key(), "class chosen");
            Ok(c.clone())
        })
    }

    /// Switches class by consuming a respec token. Current HP is kept,
    /// capped at the new maximum.
    pub fn respec(&self, id: u64, class: CharacterClass) -> Result<Character> {
        self.ledger.apply(id, |c| {
            c.require_class()?;
            if !c.inventory.remove(RESPEC_ITEM, 1) {
                return Err(GameError::MissingIngredients {
                    item: RESPEC_ITEM.to_string(),
                    need: 1,
                    have: 0,
                });
            }
            apply_class(c, class);
            c.hp = c.hp.min(c.max_hp);
            info!(character = id, class = class.key(), "class changed");
            Ok(c.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::grant_experience;

    #[test]
    fn test_register_defaults() {
        let service = service();
        let reg = service.register(1, "Hero", None).unwrap();
        assert!(reg.created);
        let c = reg.character;
        assert_eq!(c.level, 1);
        assert_eq!((c.hp, c.max_hp), (100, 100));
        assert_eq!(c.gold, 50);
        assert_eq!(c.energy.current, 10);
        assert_eq!(c.energy.last_refill, service.now().timestamp());
        assert!(c.class.is_none());
    }

    #[test]
    fn test_register_twice_is_a_no_op() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        service
            .ledger()
            .apply(1, |c| {
                c.gold = 999;
                Ok(())
            })
            .unwrap();
        let again = service.register(1, "Renamed", None).unwrap();
        assert!(!again.created);
        assert_eq!(again.character.gold, 999);
        assert_eq!(again.character.name, "Hero");
    }

    #[test]
    fn test_referral_rewards_the_referrer() {
        let service = service();
        service.register(1, "Patron", None).unwrap();
        let reg = service.register(2, "Friend", Some(1)).unwrap();
        assert_eq!(reg.referrer, Some(1));
        assert_eq!(reg.character.referral.referrer, Some(1));

        let patron = service.character(1).unwrap();
        assert_eq!(patron.gold, 100);
        assert_eq!(patron.gems, 2);
        assert_eq!(patron.referral.count, 1);
    }

    #[test]
    fn test_existing_character_without_referrer_gets_linked() {
        let service = service();
        service.register(1, "Patron", None).unwrap();
        service.register(2, "Friend", None).unwrap();

        let again = service.register(2, "Friend", Some(1)).unwrap();
        assert!(!again.created);
        assert_eq!(again.referrer, Some(1));
        assert_eq!(again.character.referral.referrer, Some(1));
        assert_eq!(service.character(1).unwrap().referral.count, 1);

        // An existing link is never replaced or credited twice
        service.register(3, "Other", None).unwrap();
        let third = service.register(2, "Friend", Some(3)).unwrap();
        assert_eq!(third.referrer, None);
        assert_eq!(third.character.referral.referrer, Some(1));
        assert_eq!(service.character(1).unwrap().referral.count, 1);
        assert_eq!(service.character(3).unwrap().referral.count, 0);
    }

    #[test]
    fn test_invalid_referrers_are_ignored() {
        let service = service();
        let own = service.register(1, "Self", Some(1)).unwrap();
        assert_eq!(own.referrer, None);
        let ghost = service.register(2, "Lonely", Some(77)).unwrap();
        assert_eq!(ghost.referrer, None);
        assert_eq!(service.character(1).unwrap().referral.count, 0);
    }

    #[test]
    fn test_choose_class_sets_base_stats_once() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        let c = service.choose_class(1, CharacterClass::Mage).unwrap();
        assert_eq!((c.max_hp, c.hp, c.attack, c.defense, c.crit), (90, 90, 20, 4, 10));
        assert!(matches!(
            service.choose_class(1, CharacterClass::Warrior),
            Err(GameError::ClassAlreadyChosen)
        ));
    }

    #[test]
    fn test_class_choice_keeps_levels_already_gained() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        service
            .ledger()
            .apply(1, |c| {
                grant_experience(c, 100);
                Ok(())
            })
            .unwrap();
        let c = service.choose_class(1, CharacterClass::Warrior).unwrap();
        assert_eq!(c.level, 2);
        assert_eq!(c.max_hp, 165);
        assert_eq!(c.attack, 14);
        assert_eq!(c.defense, 12);
    }

    #[test]
    fn test_respec_consumes_token() {
        let service = with_warrior();
        assert!(matches!(
            service.respec(1, CharacterClass::Assassin),
            Err(GameError::MissingIngredients { .. })
        ));
        service
            .ledger()
            .apply(1, |c| {
                c.inventory.add(RESPEC_ITEM, 1);
                Ok(())
            })
            .unwrap();
        let c = service.respec(1, CharacterClass::Assassin).unwrap();
        assert_eq!(c.class, Some(CharacterClass::Assassin));
        assert_eq!((c.max_hp, c.hp, c.attack, c.crit), (100, 100, 18, 25));
        assert!(!c.inventory.has(RESPEC_ITEM));
    }

    #[test]
    fn test_respec_requires_a_class() {
        let service = service();
        service.register(1, "Hero", None).unwrap();
        assert!(matches!(
            service.respec(1, CharacterClass::Mage),
            Err(GameError::NoClassChosen)
        ));
    }
}
