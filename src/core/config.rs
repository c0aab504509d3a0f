//! Runtime combat configuration.

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::error::CombatError;

/// Tunable knobs for the combat engines.
///
/// `Default` reproduces the shipped balance; deployments can override
/// individual fields from a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Turn cap for a duel before the HP-percentage tiebreak applies
    pub max_turns: u32,

    /// Chance the boss focuses the weakest living player
    pub boss_focus_chance: f64,

    /// Crit multiplier for player hits on a boss
    pub boss_crit_multiplier: f64,

    /// Share of the winner's rewards granted to a PvP loser
    pub loser_reward_share: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_DUEL_TURNS,
            boss_focus_chance: BOSS_FOCUS_CHANCE,
            boss_crit_multiplier: BOSS_CRIT_MULTIPLIER,
            loser_reward_share: LOSER_REWARD_SHARE,
        }
    }
}

impl CombatConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CombatError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CombatError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CombatError> {
        if self.max_turns == 0 {
            return Err(CombatError::InvalidConfig(
                "max_turns must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.boss_focus_chance) {
            return Err(CombatError::InvalidConfig(format!(
                "boss_focus_chance {} outside [0, 1]",
                self.boss_focus_chance
            )));
        }
        if !self.boss_crit_multiplier.is_finite() || self.boss_crit_multiplier < 1.0 {
            return Err(CombatError::InvalidConfig(format!(
                "boss_crit_multiplier {} must be finite and >= 1",
                self.boss_crit_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.loser_reward_share) {
            return Err(CombatError::InvalidConfig(format!(
                "loser_reward_share {} outside [0, 1]",
                self.loser_reward_share
            )));
        }
        Ok(())
    }
}
