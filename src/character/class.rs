use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Archer,
    Assassin,
}

/// Base combat stats a class starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub crit: i32,
}

/// Stat increase granted by one or more level-ups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGrowth {
    pub hp: u32,
    pub attack: i32,
    pub defense: i32,
}

impl StatGrowth {
    /// Per-level growth. Characters without a class use the plain rates.
    pub fn per_level(class: Option<CharacterClass>) -> Self {
        let mut growth = StatGrowth {
            hp: LEVEL_HP_GROWTH,
            attack: LEVEL_ATTACK_GROWTH,
            defense: LEVEL_DEFENSE_GROWTH,
        };
        match class {
            Some(CharacterClass::Warrior) => {
                growth.hp += WARRIOR_EXTRA_HP_GROWTH;
                growth.defense += WARRIOR_EXTRA_DEFENSE_GROWTH;
            }
            Some(CharacterClass::Mage) | Some(CharacterClass::Assassin) => {
                growth.attack += STRIKER_EXTRA_ATTACK_GROWTH;
            }
            Some(CharacterClass::Archer) | None => {}
        }
        growth
    }

    pub fn add(&mut self, other: StatGrowth) {
        self.hp += other.hp;
        self.attack += other.attack;
        self.defense += other.defense;
    }

    /// Growth for `levels` level-ups at the same rate.
    pub fn times(self, levels: u32) -> Self {
        StatGrowth {
            hp: self.hp * levels,
            attack: self.attack * levels as i32,
            defense: self.defense * levels as i32,
        }
    }
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Archer,
        CharacterClass::Assassin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Archer => "Archer",
            CharacterClass::Assassin => "Assassin",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "warrior",
            CharacterClass::Mage => "mage",
            CharacterClass::Archer => "archer",
            CharacterClass::Assassin => "assassin",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.key() == key)
    }

    pub fn base_stats(&self) -> ClassStats {
        match self {
            CharacterClass::Warrior => ClassStats {
                max_hp: 150,
                attack: 12,
                defense: 10,
                crit: 5,
            },
            CharacterClass::Mage => ClassStats {
                max_hp: 90,
                attack: 20,
                defense: 4,
                crit: 10,
            },
            CharacterClass::Archer => ClassStats {
                max_hp: 110,
                attack: 15,
                defense: 6,
                crit: 20,
            },
            CharacterClass::Assassin => ClassStats {
                max_hp: 100,
                attack: 18,
                defense: 5,
                crit: 25,
            },
        }
    }
}
