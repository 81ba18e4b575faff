use super::types::*;
use crate::character::{Character, EffectiveStats, Multipliers};
use crate::core::combat_math::{player_attack, retaliation_damage, roll_gold_reward, roll_percent};
use crate::core::constants::*;
use crate::core::progression::{grant_experience, LevelUpReport};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

/// Runs the turn loop between a character and an opponent.
///
/// Reads the character but does not change it; see [`apply_combat`].
pub fn resolve_combat(
    character: &Character,
    opponent: &Opponent,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> CombatReport {
    let stats = EffectiveStats::from_character(character);
    let mut player_hp = stats.hp as i64;
    let mut enemy_hp = opponent.hp;
    let mut events = Vec::new();
    let mut state = CombatState::Ongoing;
    let mut turns = 0;

    while state == CombatState::Ongoing {
        if turns >= MAX_COMBAT_TURNS {
            break;
        }
        turns += 1;

        let attack = player_attack(stats.attack, stats.crit, rng);
        enemy_hp -= attack.damage;
        events.push(CombatEvent::PlayerAttack {
            damage: attack.damage,
            was_crit: attack.is_crit,
        });
        if enemy_hp <= 0 {
            state = CombatState::Won;
            break;
        }

        let hit = retaliation_damage(opponent.attack, stats.defense, rng);
        player_hp -= hit;
        events.push(CombatEvent::EnemyAttack { damage: hit });
        if player_hp <= 0 {
            state = CombatState::Lost;
        }
    }

    let turn_limit_reached = state == CombatState::Ongoing;
    if turn_limit_reached {
        state = CombatState::Lost;
    }

    let mut revive_used = false;
    if state == CombatState::Lost
        && player_hp <= 0
        && character.inventory.count(REVIVE_ITEM) > 0
    {
        revive_used = true;
        player_hp = (character.max_hp / 2) as i64;
        state = CombatState::Won;
        events.push(CombatEvent::Revived {
            hp: player_hp as u32,
        });
    }

    let final_hp = match state {
        CombatState::Won => player_hp.max(0) as u32,
        _ => player_hp.max(1) as u32,
    };

    let rewards = (state == CombatState::Won).then(|| {
        let mults = Multipliers::for_character(character, now);
        roll_rewards(opponent, &mults, rng)
    });

    debug!(
        character = character.id,
        opponent = %opponent.name,
        ?state,
        turns,
        revive_used,
        final_hp,
        "combat resolved"
    );

    CombatReport {
        opponent: opponent.name.clone(),
        outcome: state,
        turns,
        turn_limit_reached,
        events,
        revive_used,
        final_hp,
        rewards,
    }
}

fn roll_rewards(opponent: &Opponent, mults: &Multipliers, rng: &mut impl Rng) -> CombatRewards {
    let gold = mults.scale_gold(roll_gold_reward(opponent.gold, rng));
    let xp = mults.scale_xp(opponent.xp);
    let gems = match opponent.gems {
        Some(gems) if gems > 0 => gems,
        _ => {
            if roll_percent(BASE_GEM_DROP_PERCENT + mults.gem_luck, rng) {
                1
            } else {
                0
            }
        }
    };
    CombatRewards { gold, xp, gems }
}

/// Writes a resolved fight back onto the character.
///
/// Sets HP, consumes the revive item if one was used, and on a win grants
/// rewards and ticks every buff down by one use.
pub fn apply_combat(character: &mut Character, report: &CombatReport) -> Option<LevelUpReport> {
    character.hp = report.final_hp;
    if report.revive_used {
        character.inventory.remove(REVIVE_ITEM, 1);
    }

    let rewards = report.rewards?;
    character.earn_gold(rewards.gold);
    if rewards.gems > 0 {
        character.earn_gems(rewards.gems);
    }
    let level_up = grant_experience(character, rewards.xp);
    tick_buffs(character);
    Some(level_up)
}

/// Drops buffs on their last use and decrements the rest.
pub fn tick_buffs(character: &mut Character) {
    character.buffs.retain_mut(|buff| {
        if buff.uses_left > 1 {
            buff.uses_left -= 1;
            true
        } else {
            false
        }
    });
}
