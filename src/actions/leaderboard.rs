//! Rankings over every character in the ledger.

use super::GameService;
use crate::character::{Character, CharacterClass};
use crate::core::Clock;
use crate::error::Result;
use crate::ledger::Ledger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderboardCategory {
    Level,
    PvpWins,
    Gold,
    BossKills,
    GemsEarned,
    EliteKills,
}

impl LeaderboardCategory {
    pub const ALL: [LeaderboardCategory; 6] = [
        LeaderboardCategory::Level,
        LeaderboardCategory::PvpWins,
        LeaderboardCategory::Gold,
        LeaderboardCategory::BossKills,
        LeaderboardCategory::GemsEarned,
        LeaderboardCategory::EliteKills,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LeaderboardCategory::Level => "Level",
            LeaderboardCategory::PvpWins => "PvP",
            LeaderboardCategory::Gold => "Gold",
            LeaderboardCategory::BossKills => "Bosses",
            LeaderboardCategory::GemsEarned => "Gems",
            LeaderboardCategory::EliteKills => "Elites",
        }
    }

    /// The ranked value of a character.
    pub fn value(&self, character: &Character) -> u64 {
        match self {
            LeaderboardCategory::Level => u64::from(character.level),
            LeaderboardCategory::PvpWins => character.counters.pvp_wins,
            LeaderboardCategory::Gold => character.gold,
            LeaderboardCategory::BossKills => character.counters.boss_kills,
            LeaderboardCategory::GemsEarned => character.counters.total_gems_earned,
            LeaderboardCategory::EliteKills => character.counters.elite_kills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    pub character_id: u64,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub tier_active: bool,
    pub value: u64,
}

/// Ranks characters that have chosen a class: value descending, then XP
/// descending, then id.
pub fn rank_characters(
    characters: Vec<Character>,
    category: LeaderboardCategory,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(u64, Character)> = characters
        .into_iter()
        .filter(|c| c.class.is_some())
        .map(|c| (category.value(&c), c))
        .collect();
    ranked.sort_by(|(va, a), (vb, b)| {
        vb.cmp(va)
            .then_with(|| b.xp.cmp(&a.xp))
            .then_with(|| a.id.cmp(&b.id))
    });

    ranked
        .into_iter()
        .take(limit)
        .zip(1..)
        .filter_map(|((value, c), rank)| {
            Some(LeaderboardEntry {
                rank,
                character_id: c.id,
                tier_active: c.tier_active(now),
                class: c.class?,
                level: c.level,
                value,
                name: c.name,
            })
        })
        .collect()
}

impl<L: Ledger, C: Clock> GameService<L, C> {
    /// Top `limit` characters in `category`.
    pub fn leaderboard(
        &self,
        category: LeaderboardCategory,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank_characters(self.ledger.all()?, category, limit, self.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::constants::LEADERBOARD_SIZE;

    fn set(service: &TestService, id: u64, f: impl FnOnce(&mut Character)) {
        service
            .ledger()
            .apply(id, |c| {
                f(c);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_level_board_breaks_ties_by_xp() {
        let service = service();
        for (id, level, xp) in [(1, 5, 10), (2, 7, 0), (3, 5, 90), (4, 2, 0)] {
            service.register(id, "Hero", None).unwrap();
            service.choose_class(id, CharacterClass::Archer).unwrap();
            set(&service, id, |c| {
                c.level = level;
                c.xp = xp;
            });
        }
        service.register(5, "Classless", None).unwrap();
        set(&service, 5, |c| c.level = 50);

        let board = service
            .leaderboard(LeaderboardCategory::Level, LEADERBOARD_SIZE)
            .unwrap();
        let order: Vec<_> = board.iter().map(|e| (e.rank, e.character_id)).collect();
        assert_eq!(order, vec![(1, 2), (2, 3), (3, 1), (4, 4)]);
        assert_eq!(board[0].value, 7);
        assert_eq!(board[0].class, CharacterClass::Archer);
    }

    #[test]
    fn test_board_is_truncated_and_uses_category_value() {
        let service = service();
        for id in 1..=4 {
            service.register(id, "Hero", None).unwrap();
            service.choose_class(id, CharacterClass::Warrior).unwrap();
            set(&service, id, |c| c.counters.boss_kills = id * 3);
        }
        let board = service.leaderboard(LeaderboardCategory::BossKills, 2).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!((board[0].character_id, board[0].value), (4, 12));
        assert_eq!((board[1].character_id, board[1].value), (3, 9));
    }

    #[test]
    fn test_empty_ledger_gives_empty_board() {
        let service = service();
        for category in LeaderboardCategory::ALL {
            assert!(service.leaderboard(category, 10).unwrap().is_empty());
        }
    }
}
