//! Integration test: game actions over the file-backed ledger
//!
//! Checks that every committed action survives reopening the ledger, that
//! refused actions leave the snapshot untouched, and that concurrent
//! actions on one character never lose updates.

use chrono::{DateTime, TimeZone, Utc};
use dungeon_master::character::CharacterClass;
use dungeon_master::core::FixedClock;
use dungeon_master::error::PaymentError;
use dungeon_master::ledger::{FileLedger, Ledger};
use dungeon_master::payments::{Invoice, InvoiceStatus, OrderStatus, PaymentCheck, PaymentDesk, PaymentGateway};
use dungeon_master::promo::{PromoBook, PromoCode};
use dungeon_master::{GameError, GameService};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::thread;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(noon())
}

/// Provider that reports one fixed status for every invoice.
struct FixedStatusGateway(InvoiceStatus);

impl PaymentGateway for FixedStatusGateway {
    fn create_invoice(&self, _: f64, _: &str, _: &str) -> Result<Invoice, PaymentError> {
        Ok(Invoice {
            invoice_id: 501,
            pay_url: "https://pay.example/501".to_string(),
        })
    }

    fn invoice_status(&self, _: u64) -> Result<Option<InvoiceStatus>, PaymentError> {
        Ok(Some(self.0))
    }
}

#[test]
fn test_progress_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock());
        service.register(7, "Persistent", None).unwrap();
        service.choose_class(7, CharacterClass::Warrior).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        service.fight_monster(7, 1, &mut rng).unwrap();
        service.claim_daily(7).unwrap();
    }

    let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock());
    let hero = service.character(7).unwrap();
    assert_eq!(hero.class, Some(CharacterClass::Warrior));
    assert_eq!(hero.counters.dungeon_wins, 1);
    assert_eq!(hero.energy.current, 9);
    assert_eq!(hero.daily.streak, 1);
    assert!(matches!(service.claim_daily(7), Err(GameError::AlreadyClaimed)));
}

#[test]
fn test_refusal_leaves_snapshot_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock());
    service.register(1, "Broke", None).unwrap();
    let before = service.character(1).unwrap();

    assert!(service.buy_gem_item(1, "mythic_sword").is_err());
    assert!(service.craft(1, "mega_ring").is_err());
    assert_eq!(service.character(1).unwrap(), before);
}

#[test]
fn test_concurrent_exchanges_on_one_character() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(GameService::new(FileLedger::open(dir.path()).unwrap(), clock()));
    service.register(1, "Trader", None).unwrap();
    service
        .ledger()
        .apply(1, |c| {
            c.gems = 40;
            Ok(())
        })
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..5 {
                    service.exchange_gems(1, 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let trader = service.character(1).unwrap();
    assert_eq!(trader.gems, 0);
    assert_eq!(trader.gold, 50 + 40 * 50);
    assert!(service.exchange_gems(1, 1).is_err());
}

#[test]
fn test_arena_finds_rivals_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock());
    for (id, name, class) in [
        (1, "Attacker", CharacterClass::Warrior),
        (2, "Defender", CharacterClass::Archer),
    ] {
        service.register(id, name, None).unwrap();
        service.choose_class(id, class).unwrap();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let result = service.fight_pvp(1, &mut rng).unwrap();
    assert_eq!(result.combat.opponent, "Archer Defender");
    let attacker = service.character(1).unwrap();
    assert_eq!(attacker.counters.pvp_wins + attacker.counters.pvp_losses, 1);
}

#[test]
fn test_pending_order_is_credited_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let ledger = FileLedger::open(dir.path()).unwrap();
        let service = GameService::new(ledger, clock());
        service.register(1, "Buyer", None).unwrap();
        let desk = PaymentDesk::new(FixedStatusGateway(InvoiceStatus::Active));
        let order = desk.create_order(service.ledger(), 1, "gems_10", noon()).unwrap();
        assert_eq!(order.invoice_id, 501);
        assert_eq!(
            desk.check_order(service.ledger(), 1, 501, noon()).unwrap(),
            PaymentCheck::Pending
        );
    }

    let ledger = FileLedger::open(dir.path()).unwrap();
    let desk = PaymentDesk::new(FixedStatusGateway(InvoiceStatus::Paid));
    assert!(matches!(
        desk.check_order(&ledger, 1, 501, noon()).unwrap(),
        PaymentCheck::Credited(pack) if pack.id == "gems_10"
    ));
    assert!(matches!(
        desk.check_order(&ledger, 1, 501, noon()),
        Err(GameError::AlreadyCredited(_))
    ));

    let buyer = ledger.get(1).unwrap().unwrap();
    assert_eq!(buyer.gems, 10);
    assert_eq!(buyer.orders.len(), 1);
    assert_eq!(buyer.orders[0].status, OrderStatus::Paid);
}

#[test]
fn test_promo_budget_and_redemptions_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let book_path = dir.path().join("promo_codes.bin");
    {
        let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock())
            .with_promos(PromoBook::open(&book_path).unwrap());
        service
            .promos()
            .add(PromoCode::new("LAUNCH", 200, 5, 2, noon()))
            .unwrap();
        service.register(1, "Early", None).unwrap();
        service.register(2, "Late", None).unwrap();
        service.redeem_promo(1, "launch").unwrap();
    }

    let service = GameService::new(FileLedger::open(dir.path()).unwrap(), clock())
        .with_promos(PromoBook::open(&book_path).unwrap());
    assert!(matches!(
        service.redeem_promo(1, "LAUNCH"),
        Err(GameError::PromoAlreadyUsed(_))
    ));
    service.redeem_promo(2, "LAUNCH").unwrap();
    service.register(3, "Latest", None).unwrap();
    assert!(matches!(
        service.redeem_promo(3, "LAUNCH"),
        Err(GameError::PromoExhausted(_))
    ));

    assert_eq!(service.character(1).unwrap().gold, 250);
    assert_eq!(service.character(2).unwrap().gems, 5);
    assert_eq!(service.promos().get("LAUNCH").unwrap().used_count, 2);
}
