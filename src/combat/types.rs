use serde::{Deserialize, Serialize};

/// Static monster stat block from a dungeon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterDef {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub gold: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonDef {
    pub id: u32,
    pub name: &'static str,
    pub min_level: u32,
    pub monsters: [MonsterDef; 3],
    pub boss: MonsterDef,
}

/// Rare opponent with a guaranteed gem reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliteDef {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub gold: u64,
    pub xp: u64,
    pub gems: u64,
    pub min_level: u32,
}

/// Input to the combat resolver, whatever its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub hp: i64,
    pub attack: i64,
    pub gold: u64,
    pub xp: u64,
    /// Guaranteed gem reward. When absent, gems drop by chance.
    pub gems: Option<u64>,
}

impl From<&MonsterDef> for Opponent {
    fn from(def: &MonsterDef) -> Self {
        Self {
            name: def.name.to_string(),
            hp: def.hp as i64,
            attack: def.attack as i64,
            gold: def.gold,
            xp: def.xp,
            gems: None,
        }
    }
}

impl From<&EliteDef> for Opponent {
    fn from(def: &EliteDef) -> Self {
        Self {
            name: def.name.to_string(),
            hp: def.hp as i64,
            attack: def.attack as i64,
            gold: def.gold,
            xp: def.xp,
            gems: Some(def.gems),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    Ongoing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerAttack { damage: i64, was_crit: bool },
    EnemyAttack { damage: i64 },
    /// A revive item turned a defeat into a win.
    Revived { hp: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRewards {
    pub gold: u64,
    pub xp: u64,
    pub gems: u64,
}

/// Everything a resolved fight produced. Applying it is a separate step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub opponent: String,
    pub outcome: CombatState,
    pub turns: u32,
    /// The fight stopped at the turn cap with both sides alive.
    pub turn_limit_reached: bool,
    pub events: Vec<CombatEvent>,
    pub revive_used: bool,
    /// HP the attacker is left with, already floored/restored.
    pub final_hp: u32,
    /// Present only on a win.
    pub rewards: Option<CombatRewards>,
}

impl CombatReport {
    pub fn won(&self) -> bool {
        self.outcome == CombatState::Won
    }
}
