//! Pure per-turn combat formulas.
//!
//! Damage values are `i64` so opponent HP can go negative within a turn.

use super::constants::*;
use rand::Rng;

/// Result of one attacker swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub damage: i64,
    pub is_crit: bool,
}

/// Rolls 1..=100 and crits if the roll is at or below `crit_percent`.
pub fn roll_crit(crit_percent: i32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=100) <= crit_percent
}

/// `max(1, attack - 0..=ATTACK_VARIANCE)`, doubled on a crit.
pub fn attack_damage(attack: i32, is_crit: bool, rng: &mut impl Rng) -> i64 {
    let base = (attack as i64 - rng.gen_range(0..=ATTACK_VARIANCE)).max(1);
    if is_crit {
        base * CRIT_DAMAGE_MULTIPLIER
    } else {
        base
    }
}

/// Full attacker swing: crit roll first, then damage.
pub fn player_attack(attack: i32, crit_percent: i32, rng: &mut impl Rng) -> AttackResult {
    let is_crit = roll_crit(crit_percent, rng);
    AttackResult {
        damage: attack_damage(attack, is_crit, rng),
        is_crit,
    }
}

/// Opponent hit: `max(1, attack - floor(defense / 2) ± RETALIATION_VARIANCE)`.
pub fn retaliation_damage(opponent_attack: i64, defense: i32, rng: &mut impl Rng) -> i64 {
    let mitigated = opponent_attack - (defense as i64).div_euclid(2);
    (mitigated + rng.gen_range(-RETALIATION_VARIANCE..=RETALIATION_VARIANCE)).max(1)
}

/// Victory gold before multipliers: base plus a roll, floored at zero.
pub fn roll_gold_reward(base_gold: u64, rng: &mut impl Rng) -> u64 {
    let offset = rng.gen_range(GOLD_REWARD_MIN_OFFSET..=GOLD_REWARD_MAX_OFFSET);
    (base_gold as i64 + offset).max(0) as u64
}

/// Percentage roll used by every chance-based drop.
pub fn roll_percent(chance: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=100) <= chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_crit_always_and_never() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..200 {
            assert!(roll_crit(100, &mut rng));
            assert!(!roll_crit(0, &mut rng));
        }
    }

    #[test]
    fn test_attack_damage_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..500 {
            let dmg = attack_damage(10, false, &mut rng);
            assert!((7..=10).contains(&dmg));
            let crit = attack_damage(10, true, &mut rng);
            assert!((14..=20).contains(&crit) && crit % 2 == 0);
        }
    }

    #[test]
    fn test_attack_damage_floor_is_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(attack_damage(0, false, &mut rng), 1);
            assert_eq!(attack_damage(-5, true, &mut rng), 2);
        }
    }

    #[test]
    fn test_retaliation_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..500 {
            let dmg = retaliation_damage(20, 10, &mut rng);
            assert!((13..=17).contains(&dmg));
            assert_eq!(retaliation_damage(0, 10, &mut rng), 1);
        }
    }

    #[test]
    fn test_odd_defense_floors() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let dmg = retaliation_damage(10, 5, &mut rng);
            assert!((6..=10).contains(&dmg));
        }
    }

    #[test]
    fn test_gold_reward_never_negative() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..500 {
            let gold = roll_gold_reward(0, &mut rng);
            assert!(gold <= 10);
            let gold = roll_gold_reward(100, &mut rng);
            assert!((95..=110).contains(&gold));
        }
    }

    #[test]
    fn test_roll_percent_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..100 {
            assert!(roll_percent(100, &mut rng));
            assert!(!roll_percent(0, &mut rng));
        }
    }
}
