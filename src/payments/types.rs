use serde::{Deserialize, Serialize};

/// A purchasable bundle of currency and tier days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonationPack {
    pub id: &'static str,
    pub name: &'static str,
    pub price_usd: f64,
    pub gold: u64,
    pub gems: u64,
    pub tier_days: u32,
}

const fn pack(
    id: &'static str,
    name: &'static str,
    price_usd: f64,
    gold: u64,
    gems: u64,
    tier_days: u32,
) -> DonationPack {
    DonationPack {
        id,
        name,
        price_usd,
        gold,
        gems,
        tier_days,
    }
}

pub const DONATION_PACKS: &[DonationPack] = &[
    pack("gold_100", "100 Gold", 0.5, 100, 0, 0),
    pack("gold_500", "500 Gold", 2.0, 500, 0, 0),
    pack("gold_2000", "2000 Gold", 7.0, 2000, 0, 0),
    pack("gems_10", "10 Gems", 1.0, 0, 10, 0),
    pack("gems_50", "50 Gems", 4.0, 0, 50, 0),
    pack("gems_150", "150 Gems", 10.0, 0, 150, 0),
    pack("vip_7", "VIP 7 days", 3.0, 0, 0, 7),
    pack("vip_30", "VIP 30 days", 9.0, 0, 0, 30),
    pack("starter_pack", "Starter Pack", 3.0, 300, 15, 0),
    pack("vip_pack", "VIP Pack", 5.0, 500, 30, 7),
    pack("mega_pack", "Mega Pack", 20.0, 5000, 200, 30),
];

pub fn find_pack(id: &str) -> Option<&'static DonationPack> {
    DONATION_PACKS.iter().find(|p| p.id == id)
}

/// Invoice created by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: u64,
    pub pay_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Active,
    Paid,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Paid,
    Expired,
}

/// Local record of an invoice issued to a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub invoice_id: u64,
    pub character_id: u64,
    pub pack_id: String,
    pub amount_usd: f64,
    pub payload: String,
    pub pay_url: String,
    pub status: OrderStatus,
    pub created_at: i64,
    pub paid_at: Option<i64>,
}

/// What a payment check found.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentCheck {
    /// Paid just now and credited to the character.
    Credited(&'static DonationPack),
    /// Not paid yet.
    Pending,
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pack_ids_are_unique() {
        let ids: HashSet<_> = DONATION_PACKS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), DONATION_PACKS.len());
    }

    #[test]
    fn test_every_pack_grants_something() {
        for pack in DONATION_PACKS {
            assert!(pack.price_usd > 0.0, "{}", pack.id);
            assert!(pack.gold + pack.gems + u64::from(pack.tier_days) > 0, "{}", pack.id);
        }
        assert_eq!(find_pack("vip_pack").map(|p| p.tier_days), Some(7));
        assert!(find_pack("free_lunch").is_none());
    }
}
