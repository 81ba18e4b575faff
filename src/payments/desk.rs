use super::gateway::PaymentGateway;
use super::types::*;
use crate::character::Character;
use crate::error::{GameError, LedgerError, PaymentError, Result};
use crate::ledger::Ledger;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

/// Donation desk.
///
/// Invoices are created with the gateway and recorded as orders on the
/// buyer's character, so they live in the ledger and survive restarts.
/// Gateway calls run outside any lock; the state change and the credit of
/// a paid order happen together in one [`Ledger::apply`], which credits
/// each invoice at most once.
pub struct PaymentDesk<G: PaymentGateway> {
    gateway: Option<G>,
}

fn order_mut(character: &mut Character, invoice_id: u64) -> Result<&mut Order> {
    character
        .orders
        .iter_mut()
        .find(|o| o.invoice_id == invoice_id)
        .ok_or_else(|| GameError::not_found("invoice", invoice_id.to_string()))
}

impl<G: PaymentGateway> PaymentDesk<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    /// Desk with no gateway; every request fails with `NotConfigured`.
    pub fn disabled() -> Self {
        Self { gateway: None }
    }

    fn gateway(&self) -> Result<&G, PaymentError> {
        self.gateway.as_ref().ok_or(PaymentError::NotConfigured)
    }

    /// Orders of one character, oldest first.
    pub fn orders_for(&self, ledger: &impl Ledger, character_id: u64) -> Result<Vec<Order>> {
        let character = ledger
            .get(character_id)?
            .ok_or(LedgerError::UnknownCharacter(character_id))?;
        Ok(character.orders)
    }

    pub fn order(&self, ledger: &impl Ledger, character_id: u64, invoice_id: u64) -> Result<Order> {
        self.orders_for(ledger, character_id)?
            .into_iter()
            .find(|o| o.invoice_id == invoice_id)
            .ok_or_else(|| GameError::not_found("invoice", invoice_id.to_string()))
    }

    /// Creates an invoice for `pack_id` and records a pending order.
    pub fn create_order(
        &self,
        ledger: &impl Ledger,
        character_id: u64,
        pack_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Order> {
        let pack = find_pack(pack_id).ok_or_else(|| GameError::not_found("pack", pack_id))?;
        if !ledger.contains(character_id)? {
            return Err(LedgerError::UnknownCharacter(character_id).into());
        }

        let payload = json!({
            "user_id": character_id,
            "item": pack.id,
            "nonce": Uuid::new_v4(),
        })
        .to_string();
        let description = format!("Dungeon Master: {}", pack.name);
        let invoice = self
            .gateway()?
            .create_invoice(pack.price_usd, &description, &payload)
            .inspect_err(|e| warn!(character = character_id, pack = pack.id, error = %e, "invoice creation failed"))?;

        let order = Order {
            invoice_id: invoice.invoice_id,
            character_id,
            pack_id: pack.id.to_string(),
            amount_usd: pack.price_usd,
            payload,
            pay_url: invoice.pay_url,
            status: OrderStatus::Pending,
            created_at: now.timestamp(),
            paid_at: None,
        };
        ledger.apply(character_id, |c| {
            c.orders.push(order.clone());
            Ok(())
        })?;
        info!(character = character_id, invoice = order.invoice_id, pack = pack.id, "invoice created");
        Ok(order)
    }

    /// Polls the gateway for one of the character's orders and credits the
    /// pack if it has just been paid.
    pub fn check_order(
        &self,
        ledger: &impl Ledger,
        character_id: u64,
        invoice_id: u64,
        now: DateTime<Utc>,
    ) -> Result<PaymentCheck> {
        let order = self.order(ledger, character_id, invoice_id)?;
        match order.status {
            OrderStatus::Paid => return Err(GameError::AlreadyCredited(invoice_id.to_string())),
            OrderStatus::Expired => return Ok(PaymentCheck::Expired),
            OrderStatus::Pending => {}
        }

        let status = self
            .gateway()?
            .invoice_status(invoice_id)
            .inspect_err(|e| warn!(invoice = invoice_id, error = %e, "invoice status check failed"))?;

        match status {
            Some(InvoiceStatus::Paid) => {
                let pack = find_pack(&order.pack_id)
                    .ok_or_else(|| GameError::not_found("pack", order.pack_id.clone()))?;
                let check = ledger.apply(character_id, |c| {
                    let order = order_mut(c, invoice_id)?;
                    match order.status {
                        OrderStatus::Paid => {
                            return Err(GameError::AlreadyCredited(invoice_id.to_string()))
                        }
                        OrderStatus::Expired => return Ok(PaymentCheck::Expired),
                        OrderStatus::Pending => {
                            order.status = OrderStatus::Paid;
                            order.paid_at = Some(now.timestamp());
                        }
                    }
                    credit_pack(c, pack, now);
                    Ok(PaymentCheck::Credited(pack))
                })?;
                if matches!(check, PaymentCheck::Credited(_)) {
                    info!(character = character_id, invoice = invoice_id, pack = pack.id, usd = pack.price_usd, "payment credited");
                }
                Ok(check)
            }
            Some(InvoiceStatus::Expired) => ledger.apply(character_id, |c| {
                let order = order_mut(c, invoice_id)?;
                match order.status {
                    OrderStatus::Paid => Err(GameError::AlreadyCredited(invoice_id.to_string())),
                    _ => {
                        order.status = OrderStatus::Expired;
                        Ok(PaymentCheck::Expired)
                    }
                }
            }),
            _ => Ok(PaymentCheck::Pending),
        }
    }
}

/// Adds a pack's contents to a character. Purchased gold does not count
/// towards lifetime earnings, purchased gems do.
pub fn credit_pack(character: &mut Character, pack: &DonationPack, now: DateTime<Utc>) {
    character.gold += pack.gold;
    if pack.gems > 0 {
        character.earn_gems(pack.gems);
    }
    if pack.tier_days > 0 {
        character.extend_tier(pack.tier_days, now);
    }
    character.total_spent_usd += pack.price_usd;
}
