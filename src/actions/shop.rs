use super::{GameService, ItemGrant, PurchaseOutcome};
use crate::character::{ActiveBuff, Character};
use crate::core::constants::*;
use crate::core::{apply_regeneration, Clock};
use crate::error::{GameError, Result};
use crate::items::{find_gem_item, find_item, find_recipe, find_shop_item, ConsumableEffect, ItemDef, ItemKind, Price};
use crate::ledger::Ledger;
use chrono::{DateTime, Utc};
use tracing::info;

/// Hands an item to a character: consumables take effect (or are stored),
/// buffs start counting, equipment goes into its slot.
pub(crate) fn grant_item(character: &mut Character, item: &ItemDef, now: DateTime<Utc>) -> ItemGrant {
    match item.kind {
        ItemKind::Consumable(effects) => {
            if effects.iter().any(|e| e.is_stored()) {
                character.inventory.add(item.id, 1);
                return ItemGrant::Stored;
            }
            let mut healed = 0;
            let mut energy = 0;
            for effect in effects {
                match *effect {
                    ConsumableEffect::Heal(amount) => healed += character.heal(amount),
                    ConsumableEffect::FullHeal => healed += character.heal(character.max_hp),
                    ConsumableEffect::Energy(amount) => energy += character.restore_energy(amount, now),
                    ConsumableEffect::FullEnergy => {
                        let cap = character.max_energy(now);
                        if character.energy.current < cap {
                            energy += cap - character.energy.current;
                            character.energy.current = cap;
                        }
                    }
                    ConsumableEffect::MaxEnergyUp(amount) => character.energy.max += amount,
                    ConsumableEffect::Revive | ConsumableEffect::Respec => {}
                }
            }
            ItemGrant::Used { healed, energy }
        }
        ItemKind::Buff { effects, uses } => {
            character.buffs.push(ActiveBuff {
                item_id: item.id.to_string(),
                effects: effects.to_vec(),
                uses_left: uses,
            });
            ItemGrant::BuffActivated { uses }
        }
        ItemKind::Equipment { slot, .. } => {
            let displaced = character.equipment.set(slot, Some(item.id.to_string()));
            if let Some(old) = &displaced {
                character.inventory.add(old, 1);
            }
            ItemGrant::Equipped { slot, displaced }
        }
    }
}

fn pay(character: &mut Character, price: Price, item: &ItemDef) -> Result<()> {
    match price {
        Price::Gold(gold) => character.spend_gold(gold),
        Price::Gems(gems) => character.spend_gems(gems),
        Price::Crafted => Err(GameError::WrongItemKind(item.id.to_string())),
    }
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Pays for a heal of up to 50 HP. Returns HP restored.
    pub fn heal(&self, id: u64) -> Result<u32> {
        self.ledger.apply(id, |c| {
            if c.hp >= c.max_hp {
                return Err(GameError::HpFull);
            }
            c.spend_gold(HEAL_COST_GOLD)?;
            Ok(c.heal(HEAL_AMOUNT))
        })
    }

    /// Buys an energy refill with gems. Returns energy restored.
    pub fn buy_energy(&self, id: u64) -> Result<u32> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            apply_regeneration(c, now);
            if c.gems < ENERGY_REFILL_COST_GEMS {
                return Err(GameError::NotEnoughGems {
                    need: ENERGY_REFILL_COST_GEMS,
                    have: c.gems,
                });
            }
            if c.energy.current >= c.max_energy(now) {
                return Err(GameError::EnergyFull);
            }
            c.spend_gems(ENERGY_REFILL_COST_GEMS)?;
            let restored = c.restore_energy(ENERGY_REFILL_AMOUNT, now);
            c.energy.last_refill = now.timestamp();
            Ok(restored)
        })
    }

    /// Converts gems to gold. Returns gold received.
    pub fn exchange_gems(&self, id: u64, amount: u64) -> Result<u64> {
        self.ledger.apply(id, |c| {
            c.spend_gems(amount)?;
            let gold = amount * GEM_EXCHANGE_GOLD;
            c.gold += gold;
            Ok(gold)
        })
    }

    /// Buys from the gold shop.
    pub fn buy_item(&self, id: u64, item_id: &str) -> Result<PurchaseOutcome> {
        let item = find_shop_item(item_id).ok_or_else(|| GameError::not_found("item", item_id))?;
        self.purchase(id, item)
    }

    /// Buys from the gem shop.
    pub fn buy_gem_item(&self, id: u64, item_id: &str) -> Result<PurchaseOutcome> {
        let item = find_gem_item(item_id).ok_or_else(|| GameError::not_found("item", item_id))?;
        self.purchase(id, item)
    }

    fn purchase(&self, id: u64, item: &'static ItemDef) -> Result<PurchaseOutcome> {
        let now = self.now();
        self.ledger.apply(id, |c| {
            pay(c, item.price, item)?;
            apply_regeneration(c, now);
            let grant = grant_item(c, item, now);
            info!(character = id, item = item.id, ?grant, "item bought");
            Ok(PurchaseOutcome { item, grant })
        })
    }

    /// Moves an equipment item from the inventory into its slot.
    pub fn equip(&self, id: u64, item_id: &str) -> Result<ItemGrant> {
        let item = find_item(item_id).ok_or_else(|| GameError::not_found("item", item_id))?;
        if item.slot().is_none() {
            return Err(GameError::WrongItemKind(item_id.to_string()));
        }
        let now = self.now();
        self.ledger.apply(id, |c| {
            if !c.inventory.remove(item.id, 1) {
                return Err(GameError::not_found("inventory item", item_id));
            }
            Ok(grant_item(c, item, now))
        })
    }

    /// Crafts a recipe. Ingredients come from the inventory first, then from
    /// equipped slots.
    pub fn craft(&self, id: u64, recipe_id: &str) -> Result<PurchaseOutcome> {
        let recipe = find_recipe(recipe_id).ok_or_else(|| GameError::not_found("recipe", recipe_id))?;
        let item = recipe
            .result()
            .ok_or_else(|| GameError::not_found("item", recipe.id))?;
        let now = self.now();

        self.ledger.apply(id, |c| {
            for &(ingredient, need) in recipe.ingredients {
                let have = c.inventory.count(ingredient) + c.equipment.count_of(ingredient);
                if have < need {
                    return Err(GameError::MissingIngredients {
                        item: ingredient.to_string(),
                        need,
                        have,
                    });
                }
            }
            c.spend_gold(recipe.cost_gold)?;
            c.spend_gems(recipe.cost_gems)?;

            for &(ingredient, need) in recipe.ingredients {
                let stored = c.inventory.count(ingredient).min(need);
                c.inventory.remove(ingredient, stored);
                for _ in stored..need {
                    c.equipment.remove_item(ingredient);
                }
            }

            let grant = grant_item(c, item, now);
            c.counters.crafts_done += 1;
            info!(character = id, recipe = recipe.id, "item crafted");
            Ok(PurchaseOutcome { item, grant })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::items::EquipmentSlot;

    fn set(service: &TestService, f: impl FnOnce(&mut Character)) {
        service
            .ledger()
            .apply(1, |c| {
                f(c);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_heal_costs_gold_and_caps() {
        let service = with_warrior();
        assert!(matches!(service.heal(1), Err(GameError::HpFull)));
        set(&service, |c| c.hp = 130);
        assert_eq!(service.heal(1).unwrap(), 20);
        let c = service.character(1).unwrap();
        assert_eq!(c.hp, 150);
        assert_eq!(c.gold, 40);
    }

    #[test]
    fn test_buy_energy() {
        let service = with_warrior();
        assert!(matches!(
            service.buy_energy(1),
            Err(GameError::NotEnoughGems { need: 3, have: 0 })
        ));
        set(&service, |c| c.gems = 5);
        assert!(matches!(service.buy_energy(1), Err(GameError::EnergyFull)));
        set(&service, |c| c.energy.current = 4);
        assert_eq!(service.buy_energy(1).unwrap(), 6);
        let c = service.character(1).unwrap();
        assert_eq!(c.energy.current, 10);
        assert_eq!(c.gems, 2);
    }

    #[test]
    fn test_exchange_gems() {
        let service = with_warrior();
        set(&service, |c| c.gems = 4);
        assert_eq!(service.exchange_gems(1, 3).unwrap(), 150);
        let c = service.character(1).unwrap();
        assert_eq!((c.gems, c.gold), (1, 200));
        assert_eq!(c.counters.total_gold_earned, 0);
        assert!(service.exchange_gems(1, 2).is_err());
    }

    #[test]
    fn test_potion_heals_on_purchase() {
        let service = with_warrior();
        set(&service, |c| c.hp = 60);
        let bought = service.buy_item(1, "hp_potion").unwrap();
        assert_eq!(bought.grant, ItemGrant::Used { healed: 50, energy: 0 });
        let c = service.character(1).unwrap();
        assert_eq!((c.hp, c.gold), (110, 20));
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_revive_stone_is_stored() {
        let service = with_warrior();
        set(&service, |c| c.gold = 1000);
        let bought = service.buy_item(1, "revive_stone").unwrap();
        assert_eq!(bought.grant, ItemGrant::Stored);
        assert_eq!(service.character(1).unwrap().inventory.count(REVIVE_ITEM), 1);
    }

    #[test]
    fn test_equipment_displaces_into_inventory() {
        let service = with_warrior();
        set(&service, |c| c.gold = 1000);
        service.buy_item(1, "iron_sword").unwrap();
        let bought = service.buy_item(1, "steel_sword").unwrap();
        assert_eq!(
            bought.grant,
            ItemGrant::Equipped {
                slot: EquipmentSlot::Weapon,
                displaced: Some("iron_sword".into())
            }
        );
        let c = service.character(1).unwrap();
        assert_eq!(c.equipment.get(EquipmentSlot::Weapon), Some("steel_sword"));
        assert_eq!(c.inventory.count("iron_sword"), 1);
        assert_eq!(c.gold, 300);

        let grant = service.equip(1, "iron_sword").unwrap();
        assert!(matches!(grant, ItemGrant::Equipped { displaced: Some(ref old), .. } if old == "steel_sword"));
        let c = service.character(1).unwrap();
        assert_eq!(c.equipment.get(EquipmentSlot::Weapon), Some("iron_sword"));
        assert_eq!(c.inventory.count("steel_sword"), 1);
        assert_eq!(c.inventory.count("iron_sword"), 0);
    }

    #[test]
    fn test_equip_refusals() {
        let service = with_warrior();
        assert!(matches!(
            service.equip(1, "hp_potion"),
            Err(GameError::WrongItemKind(_))
        ));
        assert!(matches!(
            service.equip(1, "iron_sword"),
            Err(GameError::NotFound { .. })
        ));
        assert!(matches!(
            service.equip(1, "excalibur"),
            Err(GameError::NotFound { kind: "item", .. })
        ));
    }

    #[test]
    fn test_buffs_and_gem_shop() {
        let service = with_warrior();
        assert!(matches!(
            service.buy_gem_item(1, "xp_booster"),
            Err(GameError::NotEnoughGems { need: 8, have: 0 })
        ));
        set(&service, |c| c.gems = 30);
        let bought = service.buy_gem_item(1, "xp_booster").unwrap();
        assert_eq!(bought.grant, ItemGrant::BuffActivated { uses: 10 });
        service.buy_gem_item(1, "max_energy_up").unwrap();
        let c = service.character(1).unwrap();
        assert_eq!(c.buffs.len(), 1);
        assert_eq!(c.energy.max, 15);
        assert_eq!(c.gems, 2);
        // Gold shop ids are not sold for gems
        assert!(matches!(
            service.buy_gem_item(1, "hp_potion"),
            Err(GameError::NotFound { .. })
        ));
    }

    #[test]
    fn test_craft_draws_from_equipped_slots() {
        let service = with_warrior();
        set(&service, |c| {
            c.gold = 1000;
            c.gems = 5;
            c.equipment.set(EquipmentSlot::Weapon, Some("steel_sword".into()));
            c.inventory.add("atk_scroll", 2);
        });
        let crafted = service.craft(1, "enchanted_sword").unwrap();
        assert_eq!(
            crafted.grant,
            ItemGrant::Equipped {
                slot: EquipmentSlot::Weapon,
                displaced: None
            }
        );
        let c = service.character(1).unwrap();
        assert_eq!(c.equipment.get(EquipmentSlot::Weapon), Some("enchanted_sword"));
        assert!(c.inventory.is_empty());
        assert_eq!((c.gold, c.gems), (700, 0));
        assert_eq!(c.counters.crafts_done, 1);
    }

    #[test]
    fn test_craft_refusals_change_nothing() {
        let service = with_warrior();
        set(&service, |c| c.inventory.add("hp_potion", 2));
        assert!(matches!(
            service.craft(1, "super_potion"),
            Err(GameError::MissingIngredients { need: 3, have: 2, .. })
        ));
        set(&service, |c| {
            c.inventory.add("hp_potion", 1);
            c.inventory.add("big_hp_potion", 1);
            c.gold = 99;
        });
        assert!(matches!(
            service.craft(1, "super_potion"),
            Err(GameError::NotEnoughGold { need: 100, have: 99 })
        ));
        assert_eq!(service.character(1).unwrap().inventory.count("hp_potion"), 3);
        assert!(matches!(
            service.craft(1, "philosopher_stone"),
            Err(GameError::NotFound { kind: "recipe", .. })
        ));
    }

    #[test]
    fn test_crafted_potion_heals() {
        let service = with_warrior();
        set(&service, |c| {
            c.hp = 10;
            c.gold = 100;
            c.inventory.add("hp_potion", 3);
            c.inventory.add("big_hp_potion", 1);
        });
        let crafted = service.craft(1, "super_potion").unwrap();
        assert_eq!(crafted.grant, ItemGrant::Used { healed: 140, energy: 0 });
        assert_eq!(service.character(1).unwrap().hp, 150);
    }
}
