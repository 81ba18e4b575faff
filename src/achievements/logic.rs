use super::data::ALL_ACHIEVEMENTS;
use super::types::AchievementReport;
use crate::character::Character;
use tracing::info;

/// Unlocks every achievement whose counter has reached its threshold.
///
/// Already unlocked achievements are skipped, so rewards are paid once.
/// Rewards of everything unlocked in this pass are summed and credited in
/// a single update. Gem rewards count towards lifetime gems, gold rewards
/// do not count towards lifetime gold.
pub fn evaluate_achievements(character: &mut Character) -> AchievementReport {
    let mut report = AchievementReport::default();

    for def in ALL_ACHIEVEMENTS {
        if character.achievements.contains(&def.id) || !def.is_met(character) {
            continue;
        }
        report.unlocked.push(def.id);
        report.reward_gold += def.reward_gold;
        report.reward_gems += def.reward_gems;
    }

    if report.is_empty() {
        return report;
    }

    character.achievements.extend(report.unlocked.iter().copied());
    character.gold += report.reward_gold;
    character.earn_gems(report.reward_gems);
    info!(
        character = character.id,
        unlocked = ?report.unlocked,
        gold = report.reward_gold,
        gems = report.reward_gems,
        "achievements unlocked"
    );
    report
}
