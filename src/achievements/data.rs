//! Static achievement definitions.

use super::types::{AchievementCounter, AchievementDef, AchievementId};

const fn def(
    id: AchievementId,
    name: &'static str,
    description: &'static str,
    counter: AchievementCounter,
    threshold: u64,
    reward_gold: u64,
    reward_gems: u64,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        counter,
        threshold,
        reward_gold,
        reward_gems,
    }
}

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // COMBAT
    // ═══════════════════════════════════════════════════════════════
    def(AchievementId::FirstBlood, "First Blood", "Defeat your first monster", AchievementCounter::DungeonWins, 1, 20, 1),
    def(AchievementId::Hunter10, "Hunter", "Defeat 10 monsters", AchievementCounter::DungeonWins, 10, 50, 2),
    def(AchievementId::Hunter100, "Exterminator", "Defeat 100 monsters", AchievementCounter::DungeonWins, 100, 200, 10),
    def(AchievementId::Hunter500, "Annihilator", "Defeat 500 monsters", AchievementCounter::DungeonWins, 500, 1000, 30),
    def(AchievementId::Boss1, "Boss Slayer", "Defeat your first boss", AchievementCounter::BossKills, 1, 50, 3),
    def(AchievementId::Boss10, "Dragonbane", "Defeat 10 bosses", AchievementCounter::BossKills, 10, 200, 8),
    def(AchievementId::Boss50, "Lord of Bosses", "Defeat 50 bosses", AchievementCounter::BossKills, 50, 500, 25),
    // ═══════════════════════════════════════════════════════════════
    // ARENA
    // ═══════════════════════════════════════════════════════════════
    def(AchievementId::Pvp1, "First Duel", "Win an arena fight", AchievementCounter::PvpWins, 1, 30, 1),
    def(AchievementId::Pvp10, "Gladiator", "Win 10 arena fights", AchievementCounter::PvpWins, 10, 100, 5),
    def(AchievementId::Pvp50, "Arena Champion", "Win 50 arena fights", AchievementCounter::PvpWins, 50, 500, 20),
    // ═══════════════════════════════════════════════════════════════
    // LEVEL
    // ═══════════════════════════════════════════════════════════════
    def(AchievementId::Level5, "Apprentice", "Reach level 5", AchievementCounter::Level, 5, 30, 2),
    def(AchievementId::Level10, "Seasoned", "Reach level 10", AchievementCounter::Level, 10, 100, 5),
    def(AchievementId::Level20, "Veteran", "Reach level 20", AchievementCounter::Level, 20, 300, 10),
    def(AchievementId::Level30, "Legend", "Reach level 30", AchievementCounter::Level, 30, 500, 20),
    // ═══════════════════════════════════════════════════════════════
    // ECONOMY & SOCIAL
    // ═══════════════════════════════════════════════════════════════
    def(AchievementId::Gold1000, "Wealthy", "Earn 1,000 gold", AchievementCounter::TotalGoldEarned, 1_000, 100, 3),
    def(AchievementId::Gold10000, "Tycoon", "Earn 10,000 gold", AchievementCounter::TotalGoldEarned, 10_000, 500, 15),
    def(AchievementId::Streak7, "Regular", "Claim the daily bonus 7 days in a row", AchievementCounter::DailyStreak, 7, 200, 10),
    def(AchievementId::Streak30, "Devoted", "Claim the daily bonus 30 days in a row", AchievementCounter::DailyStreak, 30, 1000, 50),
    def(AchievementId::Referrals5, "Recruiter", "Invite 5 friends", AchievementCounter::Referrals, 5, 200, 10),
];

/// Get achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Definitions watching one counter, in threshold order.
pub fn achievements_for_counter(counter: AchievementCounter) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.counter == counter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = ALL_ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ALL_ACHIEVEMENTS.len());
        assert_eq!(ALL_ACHIEVEMENTS.len(), 19);
    }

    #[test]
    fn test_thresholds_increase_per_counter() {
        for def in ALL_ACHIEVEMENTS {
            let ladder = achievements_for_counter(def.counter);
            for pair in ladder.windows(2) {
                assert!(pair[0].threshold < pair[1].threshold);
            }
        }
    }

    #[test]
    fn test_get_achievement_def() {
        let def = get_achievement_def(AchievementId::Boss10).unwrap();
        assert_eq!(def.threshold, 10);
        assert_eq!((def.reward_gold, def.reward_gems), (200, 8));
    }
}
