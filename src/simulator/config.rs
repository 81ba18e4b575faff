//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Fights per class, dungeon and opponent kind
    pub fights_per_matchup: u32,

    /// Draws per reward table
    pub rolls_per_table: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fights_per_matchup: 1000,
            rolls_per_table: 20_000,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Small sample for a fast sanity check
    pub fn quick() -> Self {
        Self {
            fights_per_matchup: 100,
            rolls_per_table: 2_000,
            ..Default::default()
        }
    }
}
