//! Gold-staked gambling games. Each function rolls the game and reports
//! the gross payout; stake handling belongs to the caller.

use super::roller::weighted_index;
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceBet {
    /// Total above seven.
    High,
    /// Total below seven.
    Low,
    /// Exactly seven.
    Seven,
}

impl DiceBet {
    pub fn multiplier(&self) -> u64 {
        match self {
            DiceBet::High | DiceBet::Low => 2,
            DiceBet::Seven => 5,
        }
    }

    fn wins(&self, total: u32) -> bool {
        match self {
            DiceBet::High => total > 7,
            DiceBet::Low => total < 7,
            DiceBet::Seven => total == 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub dice: [u32; 2],
    pub total: u32,
    pub won: bool,
    pub payout: u64,
}

/// Rolls 2d6 against a bet.
pub fn roll_dice(bet: DiceBet, rng: &mut impl Rng) -> DiceRoll {
    let dice = [rng.gen_range(1..=6), rng.gen_range(1..=6)];
    let total = dice[0] + dice[1];
    let won = bet.wins(total);
    DiceRoll {
        dice,
        total,
        won,
        payout: if won { DICE_STAKE * bet.multiplier() } else { 0 },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Orange,
    Grape,
    Diamond,
    Seven,
    Bell,
    Star,
}

impl SlotSymbol {
    pub const ALL: [SlotSymbol; 8] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Orange,
        SlotSymbol::Grape,
        SlotSymbol::Diamond,
        SlotSymbol::Seven,
        SlotSymbol::Bell,
        SlotSymbol::Star,
    ];

    /// Relative reel weight.
    pub fn weight(&self) -> u32 {
        match self {
            SlotSymbol::Cherry => 30,
            SlotSymbol::Lemon => 25,
            SlotSymbol::Orange => 20,
            SlotSymbol::Grape => 15,
            SlotSymbol::Diamond => 5,
            SlotSymbol::Seven => 2,
            SlotSymbol::Bell => 10,
            SlotSymbol::Star => 8,
        }
    }

    /// Stake multiplier for three of a kind.
    pub fn triple_payout(&self) -> u64 {
        match self {
            SlotSymbol::Seven => 50,
            SlotSymbol::Diamond => 30,
            SlotSymbol::Star => 20,
            SlotSymbol::Bell => 15,
            SlotSymbol::Grape => 10,
            SlotSymbol::Orange => 7,
            SlotSymbol::Lemon => 5,
            SlotSymbol::Cherry => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpin {
    pub reels: [SlotSymbol; 3],
    pub payout: u64,
    /// Three of a kind paying 20x or more.
    pub jackpot: bool,
}

fn spin_reel(rng: &mut impl Rng) -> SlotSymbol {
    weighted_index(SlotSymbol::ALL.iter().map(|s| s.weight()), rng)
        .map_or(SlotSymbol::Cherry, |i| SlotSymbol::ALL[i])
}

/// Scores three reels: a triple pays its multiplier times the stake, any
/// pair returns a flat amount.
pub fn score_slots(reels: [SlotSymbol; 3]) -> SlotSpin {
    let [a, b, c] = reels;
    let (payout, jackpot) = if a == b && b == c {
        let multiplier = a.triple_payout();
        (multiplier * SLOTS_STAKE, multiplier >= 20)
    } else if a == b || b == c || a == c {
        (SLOTS_PAIR_PAYOUT, false)
    } else {
        (0, false)
    };
    SlotSpin {
        reels,
        payout,
        jackpot,
    }
}

pub fn spin_slots(rng: &mut impl Rng) -> SlotSpin {
    let reels = [spin_reel(rng), spin_reel(rng), spin_reel(rng)];
    score_slots(reels)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouletteColor {
    Red,
    Black,
    Green,
}

impl RouletteColor {
    pub fn multiplier(&self) -> u64 {
        match self {
            RouletteColor::Red | RouletteColor::Black => 2,
            RouletteColor::Green => 10,
        }
    }

    /// 1..=3 green, 4..=51 red, the rest black.
    pub fn for_number(number: u32) -> Self {
        match number {
            0..=3 => RouletteColor::Green,
            4..=51 => RouletteColor::Red,
            _ => RouletteColor::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteSpin {
    pub number: u32,
    pub color: RouletteColor,
    pub won: bool,
    pub payout: u64,
}

pub fn spin_roulette(bet: RouletteColor, rng: &mut impl Rng) -> RouletteSpin {
    let number = rng.gen_range(1..=100);
    let color = RouletteColor::for_number(number);
    let won = color == bet;
    RouletteSpin {
        number,
        color,
        won,
        payout: if won { ROULETTE_STAKE * bet.multiplier() } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dice_payouts_follow_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for bet in [DiceBet::High, DiceBet::Low, DiceBet::Seven] {
            for _ in 0..300 {
                let roll = roll_dice(bet, &mut rng);
                assert!((2..=12).contains(&roll.total));
                assert_eq!(roll.total, roll.dice[0] + roll.dice[1]);
                let expected_win = match bet {
                    DiceBet::High => roll.total > 7,
                    DiceBet::Low => roll.total < 7,
                    DiceBet::Seven => roll.total == 7,
                };
                assert_eq!(roll.won, expected_win);
                let expected = if expected_win { 10 * bet.multiplier() } else { 0 };
                assert_eq!(roll.payout, expected);
            }
        }
    }

    #[test]
    fn test_slot_scoring() {
        use SlotSymbol::*;
        let spin = score_slots([Seven, Seven, Seven]);
        assert_eq!(spin.payout, 1000);
        assert!(spin.jackpot);
        let spin = score_slots([Cherry, Cherry, Cherry]);
        assert_eq!(spin.payout, 60);
        assert!(!spin.jackpot);
        assert_eq!(score_slots([Bell, Lemon, Bell]).payout, 10);
        assert_eq!(score_slots([Bell, Lemon, Star]).payout, 0);
    }

    #[test]
    fn test_slot_reels_follow_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let draws = 30_000;
        let cherries = (0..draws)
            .filter(|_| spin_reel(&mut rng) == SlotSymbol::Cherry)
            .count();
        let ratio = cherries as f64 / draws as f64;
        // 30 of 115 total weight
        assert!((ratio - 30.0 / 115.0).abs() < 0.02, "ratio {ratio}");
    }

    #[test]
    fn test_roulette_colors() {
        assert_eq!(RouletteColor::for_number(1), RouletteColor::Green);
        assert_eq!(RouletteColor::for_number(3), RouletteColor::Green);
        assert_eq!(RouletteColor::for_number(4), RouletteColor::Red);
        assert_eq!(RouletteColor::for_number(51), RouletteColor::Red);
        assert_eq!(RouletteColor::for_number(52), RouletteColor::Black);
        assert_eq!(RouletteColor::for_number(100), RouletteColor::Black);
    }

    #[test]
    fn test_roulette_payout() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..300 {
            let spin = spin_roulette(RouletteColor::Green, &mut rng);
            assert_eq!(spin.won, spin.number <= 3);
            assert_eq!(spin.payout, if spin.won { 150 } else { 0 });
        }
    }
}
