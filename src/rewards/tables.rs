//! Chest and fortune wheel tables.

use super::types::{Reward, RewardEntry, RewardTable, ValueRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestDef {
    pub price_gems: u64,
    pub table: RewardTable,
}

pub const CHESTS: &[ChestDef] = &[
    ChestDef {
        price_gems: 5,
        table: RewardTable {
            id: "bronze",
            name: "Bronze Chest",
            entries: &[
                RewardEntry {
                    label: "Gold",
                    weight: 50,
                    reward: Reward::Gold(ValueRange::new(50, 200)),
                },
                RewardEntry {
                    label: "Experience",
                    weight: 30,
                    reward: Reward::Xp(ValueRange::new(30, 100)),
                },
                RewardEntry {
                    label: "Supplies",
                    weight: 15,
                    reward: Reward::Item(&["hp_potion", "big_hp_potion", "revive_stone"]),
                },
                RewardEntry {
                    label: "Gems",
                    weight: 5,
                    reward: Reward::Gems(ValueRange::new(1, 3)),
                },
            ],
        },
    },
    ChestDef {
        price_gems: 15,
        table: RewardTable {
            id: "silver",
            name: "Silver Chest",
            entries: &[
                RewardEntry {
                    label: "Gold",
                    weight: 35,
                    reward: Reward::Gold(ValueRange::new(200, 800)),
                },
                RewardEntry {
                    label: "Experience",
                    weight: 25,
                    reward: Reward::Xp(ValueRange::new(100, 400)),
                },
                RewardEntry {
                    label: "Iron gear",
                    weight: 20,
                    reward: Reward::Item(&["atk_scroll", "def_scroll", "iron_sword", "iron_armor"]),
                },
                RewardEntry {
                    label: "Gems",
                    weight: 10,
                    reward: Reward::Gems(ValueRange::new(3, 8)),
                },
                RewardEntry {
                    label: "Steel gear",
                    weight: 10,
                    reward: Reward::Item(&["steel_sword", "steel_armor", "lucky_ring"]),
                },
            ],
        },
    },
    ChestDef {
        price_gems: 35,
        table: RewardTable {
            id: "golden",
            name: "Golden Chest",
            entries: &[
                RewardEntry {
                    label: "Gold",
                    weight: 25,
                    reward: Reward::Gold(ValueRange::new(500, 2000)),
                },
                RewardEntry {
                    label: "Experience",
                    weight: 15,
                    reward: Reward::Xp(ValueRange::new(300, 1000)),
                },
                RewardEntry {
                    label: "Steel gear",
                    weight: 20,
                    reward: Reward::Item(&["steel_sword", "steel_armor", "lucky_ring"]),
                },
                RewardEntry {
                    label: "Gems",
                    weight: 15,
                    reward: Reward::Gems(ValueRange::new(8, 20)),
                },
                RewardEntry {
                    label: "Mythic gear",
                    weight: 10,
                    reward: Reward::Equipment(&["mythic_sword", "mythic_armor", "mythic_ring"]),
                },
                RewardEntry {
                    label: "VIP days",
                    weight: 15,
                    reward: Reward::TierDays(ValueRange::new(1, 7)),
                },
            ],
        },
    },
];

pub const WHEEL: RewardTable = RewardTable {
    id: "wheel",
    name: "Wheel of Fortune",
    entries: &[
        RewardEntry {
            label: "50 gold",
            weight: 25,
            reward: Reward::Gold(ValueRange::fixed(50)),
        },
        RewardEntry {
            label: "150 gold",
            weight: 15,
            reward: Reward::Gold(ValueRange::fixed(150)),
        },
        RewardEntry {
            label: "500 gold",
            weight: 5,
            reward: Reward::Gold(ValueRange::fixed(500)),
        },
        RewardEntry {
            label: "1 gem",
            weight: 20,
            reward: Reward::Gems(ValueRange::fixed(1)),
        },
        RewardEntry {
            label: "3 gems",
            weight: 10,
            reward: Reward::Gems(ValueRange::fixed(3)),
        },
        RewardEntry {
            label: "10 gems",
            weight: 2,
            reward: Reward::Gems(ValueRange::fixed(10)),
        },
        RewardEntry {
            label: "100 XP",
            weight: 15,
            reward: Reward::Xp(ValueRange::fixed(100)),
        },
        RewardEntry {
            label: "5 energy",
            weight: 10,
            reward: Reward::Energy(5),
        },
        RewardEntry {
            label: "Full heal",
            weight: 8,
            reward: Reward::FullHeal,
        },
        RewardEntry {
            label: "Nothing",
            weight: 15,
            reward: Reward::Nothing,
        },
        RewardEntry {
            label: "Jackpot",
            weight: 3,
            reward: Reward::Jackpot {
                gold: ValueRange::new(100, 500),
                gems: ValueRange::new(1, 5),
            },
        },
    ],
};

pub fn find_chest(id: &str) -> Option<&'static ChestDef> {
    CHESTS.iter().find(|chest| chest.table.id == id)
}
