//! Static item, buff and recipe tables.

use super::types::{ConsumableEffect, Effect, EquipmentSlot, ItemDef, ItemKind, Price};

/// Items sold for gold.
pub const SHOP_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "hp_potion",
        name: "Health Potion",
        description: "Restores 50 HP",
        price: Price::Gold(30),
        kind: ItemKind::Consumable(&[ConsumableEffect::Heal(50)]),
    },
    ItemDef {
        id: "big_hp_potion",
        name: "Greater Health Potion",
        description: "Restores 150 HP",
        price: Price::Gold(80),
        kind: ItemKind::Consumable(&[ConsumableEffect::Heal(150)]),
    },
    ItemDef {
        id: "atk_scroll",
        name: "Scroll of Strength",
        description: "+5 attack for 3 fights",
        price: Price::Gold(100),
        kind: ItemKind::Buff {
            effects: &[Effect::Attack(5)],
            uses: 3,
        },
    },
    ItemDef {
        id: "def_scroll",
        name: "Scroll of Protection",
        description: "+5 defense for 3 fights",
        price: Price::Gold(100),
        kind: ItemKind::Buff {
            effects: &[Effect::Defense(5)],
            uses: 3,
        },
    },
    ItemDef {
        id: "iron_sword",
        name: "Iron Sword",
        description: "+3 attack",
        price: Price::Gold(200),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Weapon,
            effects: &[Effect::Attack(3)],
        },
    },
    ItemDef {
        id: "steel_sword",
        name: "Steel Sword",
        description: "+7 attack",
        price: Price::Gold(500),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Weapon,
            effects: &[Effect::Attack(7)],
        },
    },
    ItemDef {
        id: "iron_armor",
        name: "Iron Armor",
        description: "+4 defense",
        price: Price::Gold(250),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Armor,
            effects: &[Effect::Defense(4)],
        },
    },
    ItemDef {
        id: "steel_armor",
        name: "Steel Armor",
        description: "+8 defense",
        price: Price::Gold(600),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Armor,
            effects: &[Effect::Defense(8)],
        },
    },
    ItemDef {
        id: "lucky_ring",
        name: "Ring of Luck",
        description: "+10% crit",
        price: Price::Gold(400),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Accessory,
            effects: &[Effect::Crit(10)],
        },
    },
    ItemDef {
        id: "revive_stone",
        name: "Revival Stone",
        description: "Revives you automatically on defeat",
        price: Price::Gold(150),
        kind: ItemKind::Consumable(&[ConsumableEffect::Revive]),
    },
];

/// Items sold for gems.
pub const GEM_SHOP_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "mythic_sword",
        name: "Mythic Blade",
        description: "+15 attack, +5% crit",
        price: Price::Gems(25),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Weapon,
            effects: &[Effect::Attack(15), Effect::Crit(5)],
        },
    },
    ItemDef {
        id: "mythic_armor",
        name: "Mythic Armor",
        description: "+15 defense, +30 max HP",
        price: Price::Gems(25),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Armor,
            effects: &[Effect::Defense(15), Effect::MaxHp(30)],
        },
    },
    ItemDef {
        id: "mythic_ring",
        name: "Ring of Immortality",
        description: "+20% crit, +5 attack",
        price: Price::Gems(30),
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Accessory,
            effects: &[Effect::Crit(20), Effect::Attack(5)],
        },
    },
    ItemDef {
        id: "xp_booster",
        name: "Tome of Wisdom",
        description: "x2 experience for 10 fights",
        price: Price::Gems(8),
        kind: ItemKind::Buff {
            effects: &[Effect::XpMultiplier(2.0)],
            uses: 10,
        },
    },
    ItemDef {
        id: "gold_booster",
        name: "Tome of Alchemy",
        description: "x2 gold for 10 fights",
        price: Price::Gems(8),
        kind: ItemKind::Buff {
            effects: &[Effect::GoldMultiplier(2.0)],
            uses: 10,
        },
    },
    ItemDef {
        id: "mega_potion",
        name: "Mega Potion",
        description: "Full heal and full energy",
        price: Price::Gems(5),
        kind: ItemKind::Consumable(&[ConsumableEffect::FullHeal, ConsumableEffect::FullEnergy]),
    },
    ItemDef {
        id: "energy_refill",
        name: "Energy Crystal",
        description: "+10 energy",
        price: Price::Gems(3),
        kind: ItemKind::Consumable(&[ConsumableEffect::Energy(10)]),
    },
    ItemDef {
        id: "respec_token",
        name: "Stone of Rebirth",
        description: "Change your class",
        price: Price::Gems(15),
        kind: ItemKind::Consumable(&[ConsumableEffect::Respec]),
    },
    ItemDef {
        id: "max_energy_up",
        name: "Energy Capacity+",
        description: "+5 max energy, permanently",
        price: Price::Gems(20),
        kind: ItemKind::Consumable(&[ConsumableEffect::MaxEnergyUp(5)]),
    },
    ItemDef {
        id: "lucky_charm",
        name: "Lucky Charm",
        description: "+15% gem drop chance for 20 fights",
        price: Price::Gems(10),
        kind: ItemKind::Buff {
            effects: &[Effect::GemLuck(15)],
            uses: 20,
        },
    },
];

/// Results of crafting recipes. Not sold anywhere.
pub const CRAFTED_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "enchanted_sword",
        name: "Enchanted Sword",
        description: "+10 attack, +8% crit",
        price: Price::Crafted,
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Weapon,
            effects: &[Effect::Attack(10), Effect::Crit(8)],
        },
    },
    ItemDef {
        id: "enchanted_armor",
        name: "Enchanted Armor",
        description: "+12 defense, +20 max HP",
        price: Price::Crafted,
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Armor,
            effects: &[Effect::Defense(12), Effect::MaxHp(20)],
        },
    },
    ItemDef {
        id: "mega_ring",
        name: "Ring of Power",
        description: "+15% crit, +3 attack, +3 defense",
        price: Price::Crafted,
        kind: ItemKind::Equipment {
            slot: EquipmentSlot::Accessory,
            effects: &[Effect::Crit(15), Effect::Attack(3), Effect::Defense(3)],
        },
    },
    ItemDef {
        id: "super_potion",
        name: "Rainbow Potion",
        description: "Full heal",
        price: Price::Crafted,
        kind: ItemKind::Consumable(&[ConsumableEffect::Heal(9999)]),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftRecipe {
    /// Same id as the resulting entry in [`CRAFTED_ITEMS`].
    pub id: &'static str,
    pub ingredients: &'static [(&'static str, u32)],
    pub cost_gold: u64,
    pub cost_gems: u64,
}

pub const CRAFT_RECIPES: &[CraftRecipe] = &[
    CraftRecipe {
        id: "enchanted_sword",
        ingredients: &[("steel_sword", 1), ("atk_scroll", 2)],
        cost_gold: 300,
        cost_gems: 5,
    },
    CraftRecipe {
        id: "enchanted_armor",
        ingredients: &[("steel_armor", 1), ("def_scroll", 2)],
        cost_gold: 300,
        cost_gems: 5,
    },
    CraftRecipe {
        id: "mega_ring",
        ingredients: &[("lucky_ring", 1), ("revive_stone", 3)],
        cost_gold: 500,
        cost_gems: 10,
    },
    CraftRecipe {
        id: "super_potion",
        ingredients: &[("hp_potion", 3), ("big_hp_potion", 1)],
        cost_gold: 100,
        cost_gems: 0,
    },
];

impl CraftRecipe {
    pub fn result(&self) -> Option<&'static ItemDef> {
        CRAFTED_ITEMS.iter().find(|item| item.id == self.id)
    }
}

/// Looks up any catalog item (gold shop, gem shop or crafted).
pub fn find_item(id: &str) -> Option<&'static ItemDef> {
    SHOP_ITEMS
        .iter()
        .chain(GEM_SHOP_ITEMS)
        .chain(CRAFTED_ITEMS)
        .find(|item| item.id == id)
}

pub fn find_shop_item(id: &str) -> Option<&'static ItemDef> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

pub fn find_gem_item(id: &str) -> Option<&'static ItemDef> {
    GEM_SHOP_ITEMS.iter().find(|item| item.id == id)
}

pub fn find_recipe(id: &str) -> Option<&'static CraftRecipe> {
    CRAFT_RECIPES.iter().find(|recipe| recipe.id == id)
}
