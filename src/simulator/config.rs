//! Simulation configuration.

use crate::combat::types::FighterClass;
use crate::core::constants::MAX_DUEL_TURNS;

/// One side of a simulated matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FighterPreset {
    pub class: FighterClass,
    pub level: u32,
}

impl FighterPreset {
    pub fn new(class: FighterClass, level: u32) -> Self {
        Self { class, level }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of duels to run
    pub num_duels: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Fighter A (the challenger on even-numbered duels)
    pub fighter_a: FighterPreset,

    /// Fighter B
    pub fighter_b: FighterPreset,

    /// Turn cap per duel
    pub max_turns: u32,

    /// Alternate who is listed first so tie-breaks don't favor one side
    pub alternate_sides: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per duel)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_duels: 1000,
            seed: None,
            fighter_a: FighterPreset::new(FighterClass::Warrior, 5),
            fighter_b: FighterPreset::new(FighterClass::Rogue, 5),
            max_turns: MAX_DUEL_TURNS,
            alternate_sides: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a class mirror match
    pub fn mirror_test(class: FighterClass, level: u32) -> Self {
        Self {
            num_duels: 200,
            fighter_a: FighterPreset::new(class, level),
            fighter_b: FighterPreset::new(class, level),
            ..Default::default()
        }
    }

    /// Quick config for an underdog matchup (B is `gap` levels above A)
    pub fn level_gap_test(level: u32, gap: u32) -> Self {
        Self {
            num_duels: 500,
            fighter_a: FighterPreset::new(FighterClass::Warrior, level),
            fighter_b: FighterPreset::new(FighterClass::Warrior, level + gap),
            ..Default::default()
        }
    }
}
