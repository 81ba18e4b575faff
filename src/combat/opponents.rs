//! Dungeon, elite and arena opponents.

use super::types::{DungeonDef, EliteDef, MonsterDef, Opponent};
use crate::character::{Character, EffectiveStats};
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;

const fn monster(name: &'static str, hp: u32, attack: u32, gold: u64, xp: u64) -> MonsterDef {
    MonsterDef {
        name,
        hp,
        attack,
        gold,
        xp,
    }
}

pub const DUNGEONS: &[DungeonDef] = &[
    DungeonDef {
        id: 1,
        name: "Dark Forest",
        min_level: 1,
        monsters: [
            monster("Wolf", 30, 5, 10, 15),
            monster("Spider", 25, 7, 12, 18),
            monster("Goblin", 40, 8, 15, 22),
        ],
        boss: monster("Forest Bear", 100, 15, 50, 80),
    },
    DungeonDef {
        id: 2,
        name: "Abandoned Ruins",
        min_level: 5,
        monsters: [
            monster("Skeleton", 50, 12, 20, 30),
            monster("Zombie", 60, 10, 22, 35),
            monster("Ghost", 45, 15, 25, 40),
        ],
        boss: monster("Bone Knight", 200, 25, 120, 180),
    },
    DungeonDef {
        id: 3,
        name: "Fire Caves",
        min_level: 10,
        monsters: [
            monster("Salamander", 80, 18, 35, 50),
            monster("Fire Elemental", 70, 22, 40, 55),
            monster("Drakeling", 100, 20, 45, 60),
        ],
        boss: monster("Ancient Dragon", 400, 40, 300, 400),
    },
    DungeonDef {
        id: 4,
        name: "Ice Peak",
        min_level: 15,
        monsters: [
            monster("Ice Golem", 120, 25, 50, 70),
            monster("Ice Spirit", 90, 30, 55, 75),
            monster("Mammoth", 150, 22, 60, 80),
        ],
        boss: monster("Ice King", 600, 55, 500, 600),
    },
    DungeonDef {
        id: 5,
        name: "The Abyss",
        min_level: 20,
        monsters: [
            monster("Demon", 180, 35, 80, 100),
            monster("Vampire", 160, 40, 85, 110),
            monster("Lich", 200, 45, 90, 120),
        ],
        boss: monster("Lord of the Abyss", 1000, 70, 1000, 1200),
    },
    DungeonDef {
        id: 6,
        name: "The Void",
        min_level: 28,
        monsters: [
            monster("Dark Entity", 250, 50, 120, 150),
            monster("Eye of the Abyss", 220, 55, 130, 160),
            monster("Soul Eater", 280, 48, 140, 170),
        ],
        boss: monster("Keeper of the Void", 1500, 90, 1500, 2000),
    },
    DungeonDef {
        id: 7,
        name: "Celestial Hall",
        min_level: 35,
        monsters: [
            monster("Fallen Angel", 350, 60, 180, 220),
            monster("Thunder Titan", 400, 65, 200, 250),
            monster("Storm Lord", 380, 70, 220, 270),
        ],
        boss: monster("Archangel of Darkness", 2500, 120, 3000, 4000),
    },
];

pub const ELITE_MONSTERS: &[EliteDef] = &[
    EliteDef {
        name: "Golden Dragon",
        hp: 500,
        attack: 50,
        gold: 500,
        xp: 300,
        gems: 3,
        min_level: 10,
    },
    EliteDef {
        name: "Shadow Lord",
        hp: 400,
        attack: 60,
        gold: 400,
        xp: 250,
        gems: 2,
        min_level: 8,
    },
    EliteDef {
        name: "Crystal Golem",
        hp: 600,
        attack: 45,
        gold: 350,
        xp: 350,
        gems: 4,
        min_level: 12,
    },
    EliteDef {
        name: "Bone Emperor",
        hp: 800,
        attack: 55,
        gold: 600,
        xp: 400,
        gems: 5,
        min_level: 15,
    },
    EliteDef {
        name: "Rainbow Phoenix",
        hp: 700,
        attack: 65,
        gold: 700,
        xp: 500,
        gems: 6,
        min_level: 20,
    },
];

const STRANGER_NAMES: &[&str] = &["Golem", "Wanderer", "Elf"];

pub fn find_dungeon(id: u32) -> Option<&'static DungeonDef> {
    DUNGEONS.iter().find(|d| d.id == id)
}

/// Elites a character of `level` may fight.
pub fn available_elites(level: u32) -> Vec<&'static EliteDef> {
    ELITE_MONSTERS
        .iter()
        .filter(|e| level >= e.min_level)
        .collect()
}

pub fn random_monster(dungeon: &DungeonDef, rng: &mut impl Rng) -> Opponent {
    let index = rng.gen_range(0..dungeon.monsters.len());
    Opponent::from(&dungeon.monsters[index])
}

pub fn random_elite(level: u32, rng: &mut impl Rng) -> Option<Opponent> {
    available_elites(level)
        .choose(rng)
        .map(|elite| Opponent::from(*elite))
}

/// Arena opponent built from another character: their base max HP and
/// effective attack.
pub fn rival_opponent(rival: &Character, rng: &mut impl Rng) -> Opponent {
    let stats = EffectiveStats::from_character(rival);
    let class = rival.class.map_or("Adventurer", |c| c.name());
    Opponent {
        name: format!("{} {}", class, rival.name),
        hp: rival.max_hp as i64,
        attack: stats.attack as i64,
        gold: rng.gen_range(PVP_RIVAL_GOLD_MIN..=PVP_RIVAL_GOLD_MAX),
        xp: PVP_RIVAL_XP,
        gems: None,
    }
}

/// Arena opponent when nobody is in range: a copy of the attacker's base
/// stats with a small attack wobble.
pub fn stranger_opponent(attacker: &Character, rng: &mut impl Rng) -> Opponent {
    let name = STRANGER_NAMES.choose(rng).copied().unwrap_or("Stranger");
    let wobble = rng.gen_range(-PVP_ATTACK_VARIANCE..=PVP_ATTACK_VARIANCE);
    Opponent {
        name: name.to_string(),
        hp: attacker.max_hp as i64,
        attack: (attacker.attack + wobble) as i64,
        gold: PVP_STRANGER_GOLD,
        xp: PVP_STRANGER_XP,
        gems: None,
    }
}

/// Inclusive level window for arena matchmaking.
pub fn pvp_level_range(level: u32) -> (u32, u32) {
    (
        level.saturating_sub(PVP_LEVEL_WINDOW).max(1),
        level + PVP_LEVEL_WINDOW,
    )
}
