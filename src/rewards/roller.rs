use super::types::*;
use crate::character::Character;
use crate::core::progression::{grant_experience, LevelUpReport};
use crate::error::{GameError, Result};
use crate::items::find_item;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Index chosen with probability proportional to its weight.
/// `None` when there is no positive weight.
pub fn weighted_index(weights: impl IntoIterator<Item = u32> + Clone, rng: &mut impl Rng) -> Option<usize> {
    let total: u64 = weights.clone().into_iter().map(u64::from).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (index, weight) in weights.into_iter().enumerate() {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(index);
        }
        roll -= weight;
    }
    None
}

/// Weighted pick over `entries`. Fails on an empty or all-zero table.
pub fn pick_entry<'a>(entries: &'a [RewardEntry], rng: &mut impl Rng) -> Result<&'a RewardEntry> {
    weighted_index(entries.iter().map(|e| e.weight), rng)
        .map(|index| &entries[index])
        .ok_or(GameError::InvalidRewardTable)
}

/// Uniform draw in `[min, max]`.
pub fn roll_range(range: ValueRange, rng: &mut impl Rng) -> u64 {
    if range.max <= range.min {
        range.min
    } else {
        rng.gen_range(range.min..=range.max)
    }
}

fn roll_pool(pool: &'static [&'static str], rng: &mut impl Rng) -> Result<String> {
    pool.choose(rng)
        .map(|id| id.to_string())
        .ok_or(GameError::InvalidRewardTable)
}

/// Rolls one concrete outcome from a table entry.
pub fn roll_outcome(reward: &Reward, rng: &mut impl Rng) -> Result<RewardOutcome> {
    Ok(match *reward {
        Reward::Gold(range) => RewardOutcome::Gold(roll_range(range, rng)),
        Reward::Gems(range) => RewardOutcome::Gems(roll_range(range, rng)),
        Reward::Xp(range) => RewardOutcome::Xp(roll_range(range, rng)),
        Reward::Energy(amount) => RewardOutcome::Energy(amount),
        Reward::FullHeal => RewardOutcome::FullHeal,
        Reward::Item(pool) => RewardOutcome::Item(roll_pool(pool, rng)?),
        Reward::Equipment(pool) => RewardOutcome::Equipment(roll_pool(pool, rng)?),
        Reward::TierDays(range) => RewardOutcome::TierDays(roll_range(range, rng) as u32),
        Reward::Jackpot { gold, gems } => RewardOutcome::Jackpot {
            gold: roll_range(gold, rng),
            gems: roll_range(gems, rng),
        },
        Reward::Nothing => RewardOutcome::Nothing,
    })
}

/// Weighted pick plus the value roll for the chosen entry.
pub fn roll_reward(table: &RewardTable, rng: &mut impl Rng) -> Result<RolledReward> {
    let entry = pick_entry(table.entries, rng)?;
    let outcome = roll_outcome(&entry.reward, rng)?;
    debug!(table = table.id, label = entry.label, ?outcome, "reward rolled");
    Ok(RolledReward {
        label: entry.label.to_string(),
        outcome,
    })
}

/// Credits an outcome to the character.
///
/// Equipment goes straight into its slot; whatever it displaces moves to
/// the inventory.
pub fn apply_reward(
    character: &mut Character,
    outcome: &RewardOutcome,
    now: DateTime<Utc>,
) -> Option<LevelUpReport> {
    match outcome {
        RewardOutcome::Gold(gold) => character.earn_gold(*gold),
        RewardOutcome::Gems(gems) => character.earn_gems(*gems),
        RewardOutcome::Xp(xp) => return Some(grant_experience(character, *xp)),
        RewardOutcome::Energy(amount) => {
            character.restore_energy(*amount, now);
        }
        RewardOutcome::FullHeal => character.hp = character.max_hp,
        RewardOutcome::Item(id) => character.inventory.add(id, 1),
        RewardOutcome::Equipment(id) => {
            if let Some(slot) = find_item(id).and_then(|item| item.slot()) {
                if let Some(old) = character.equipment.set(slot, Some(id.clone())) {
                    character.inventory.add(&old, 1);
                }
            }
        }
        RewardOutcome::TierDays(days) => character.extend_tier(*days, now),
        RewardOutcome::Jackpot { gold, gems } => {
            character.earn_gold(*gold);
            character.earn_gems(*gems);
        }
        RewardOutcome::Nothing => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::EquipmentSlot;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SKEWED: &[RewardEntry] = &[
        RewardEntry {
            label: "common",
            weight: 75,
            reward: Reward::Gold(ValueRange::fixed(1)),
        },
        RewardEntry {
            label: "rare",
            weight: 25,
            reward: Reward::Gems(ValueRange::new(1, 3)),
        },
        RewardEntry {
            label: "never",
            weight: 0,
            reward: Reward::Nothing,
        },
    ];

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_weights_converge() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let draws = 40_000;
        let mut common = 0;
        for _ in 0..draws {
            match pick_entry(SKEWED, &mut rng).unwrap().label {
                "common" => common += 1,
                "rare" => {}
                other => panic!("zero-weight entry {other} picked"),
            }
        }
        let ratio = common as f64 / draws as f64;
        assert!((ratio - 0.75).abs() < 0.02, "ratio {ratio}");
    }

    #[test]
    fn test_empty_or_zero_table_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        assert!(matches!(
            pick_entry(&[], &mut rng),
            Err(GameError::InvalidRewardTable)
        ));
        assert!(pick_entry(&SKEWED[2..], &mut rng).is_err());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut seen = [false; 4];
        for _ in 0..500 {
            if let RewardOutcome::Gems(g) =
                roll_outcome(&Reward::Gems(ValueRange::new(1, 3)), &mut rng).unwrap()
            {
                seen[g as usize] = true;
            }
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn test_apply_equipment_displaces_into_inventory() {
        let mut c = Character::new(1, "Hero", now());
        c.equipment
            .set(EquipmentSlot::Weapon, Some("iron_sword".into()));
        apply_reward(&mut c, &RewardOutcome::Equipment("mythic_sword".into()), now());
        assert_eq!(c.equipment.get(EquipmentSlot::Weapon), Some("mythic_sword"));
        assert_eq!(c.inventory.count("iron_sword"), 1);
    }

    #[test]
    fn test_apply_jackpot_and_tier_days() {
        let mut c = Character::new(1, "Hero", now());
        apply_reward(&mut c, &RewardOutcome::Jackpot { gold: 200, gems: 3 }, now());
        assert_eq!(c.gold, 250);
        assert_eq!(c.gems, 3);
        assert_eq!(c.counters.total_gems_earned, 3);
        apply_reward(&mut c, &RewardOutcome::TierDays(2), now());
        assert!(c.tier_active(now()));
    }

    #[test]
    fn test_apply_xp_reports_level_up() {
        let mut c = Character::new(1, "Hero", now());
        let report = apply_reward(&mut c, &RewardOutcome::Xp(100), now()).unwrap();
        assert!(report.leveled_up);
        assert_eq!(c.level, 2);
    }
}
