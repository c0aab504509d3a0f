//! Two-fighter duel engine.
//!
//! A duel runs turn by turn until one fighter is knocked out or the turn cap
//! is reached. The engine owns private copies of both fighters, performs no
//! I/O and holds no locks, so independent duels can run on any thread.

use tracing::debug;

use super::damage::{a_acts_first, apply_damage, calculate_damage, roll_crit};
use super::types::{Action, BattleResult, Fighter, Rewards};
use crate::core::config::CombatConfig;
use crate::core::constants::*;
use crate::core::error::CombatError;
use crate::core::rng::RandomSource;

/// Which side of the duel a fighter sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    One,
    Two,
}

/// Progress of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelStatus {
    Running,
    /// One fighter reached 0 HP.
    Knockout,
    /// The turn cap was hit with both fighters standing.
    TimedOut,
}

pub struct DuelEngine {
    fighter1: Fighter,
    fighter2: Fighter,
    actions: Vec<Action>,
    turn: u32,
    max_turns: u32,
}

impl DuelEngine {
    /// Create a duel with the default turn cap.
    pub fn new(fighter1: &Fighter, fighter2: &Fighter) -> Result<Self, CombatError> {
        Self::with_config(fighter1, fighter2, &CombatConfig::default())
    }

    pub fn with_config(
        fighter1: &Fighter,
        fighter2: &Fighter,
        config: &CombatConfig,
    ) -> Result<Self, CombatError> {
        config.validate()?;
        fighter1.validate()?;
        fighter2.validate()?;
        if fighter1.id == fighter2.id {
            return Err(CombatError::DuplicateFighter(fighter1.id.clone()));
        }
        for fighter in [fighter1, fighter2] {
            if !fighter.is_alive() {
                return Err(CombatError::InvalidFighter {
                    id: fighter.id.clone(),
                    reason: "already knocked out".to_string(),
                });
            }
        }

        Ok(Self {
            fighter1: fighter1.clone(),
            fighter2: fighter2.clone(),
            actions: Vec::new(),
            turn: 0,
            max_turns: config.max_turns,
        })
    }

    /// Actions resolved so far, in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn fighters(&self) -> (&Fighter, &Fighter) {
        (&self.fighter1, &self.fighter2)
    }

    pub fn status(&self) -> DuelStatus {
        if !self.fighter1.is_alive() || !self.fighter2.is_alive() {
            DuelStatus::Knockout
        } else if self.turn >= self.max_turns {
            DuelStatus::TimedOut
        } else {
            DuelStatus::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() != DuelStatus::Running
    }

    /// Play one turn. Returns the actions it produced (empty once finished).
    pub fn step(&mut self, rng: &mut impl RandomSource) -> &[Action] {
        let start = self.actions.len();
        if self.is_finished() {
            return &self.actions[start..];
        }

        self.turn += 1;
        let (first, second) = if a_acts_first(&self.fighter1, &self.fighter2, rng) {
            (Side::One, Side::Two)
        } else {
            (Side::Two, Side::One)
        };

        self.attack(first, rng);
        if self.side(second).is_alive() {
            self.attack(second, rng);
        }

        &self.actions[start..]
    }

    /// Run to completion and build the result.
    pub fn run(mut self, rng: &mut impl RandomSource) -> BattleResult {
        while !self.is_finished() {
            self.step(rng);
        }
        self.into_result()
    }

    fn side(&self, side: Side) -> &Fighter {
        match side {
            Side::One => &self.fighter1,
            Side::Two => &self.fighter2,
        }
    }

    fn attack(&mut self, attacker_side: Side, rng: &mut impl RandomSource) {
        let (attacker, defender) = match attacker_side {
            Side::One => (&self.fighter1, &mut self.fighter2),
            Side::Two => (&self.fighter2, &mut self.fighter1),
        };

        let is_crit = roll_crit(attacker.stats.crit_chance, rng);
        let hit = calculate_damage(attacker, defender, is_crit, rng);
        defender.current_hp = apply_damage(defender.current_hp, hit.damage);

        self.actions.push(Action {
            turn: self.turn,
            actor_id: attacker.id.clone(),
            target_id: defender.id.clone(),
            damage: hit.damage,
            is_crit: hit.is_crit,
            resulting_hp: defender.current_hp,
            is_heal: false,
        });
    }

    fn into_result(self) -> BattleResult {
        let timed_out = self.status() == DuelStatus::TimedOut;

        let fighter1_wins = if !self.fighter2.is_alive() {
            true
        } else if !self.fighter1.is_alive() {
            false
        } else {
            // Timeout: higher HP percentage wins, ties favor fighter 1
            self.fighter1.hp_ratio() >= self.fighter2.hp_ratio()
        };

        let (winner, loser) = if fighter1_wins {
            (self.fighter1, self.fighter2)
        } else {
            (self.fighter2, self.fighter1)
        };
        let rewards = calculate_rewards(&winner, &loser);

        debug!(
            winner = %winner.id,
            loser = %loser.id,
            turns = self.turn,
            timed_out,
            "duel finished"
        );

        BattleResult {
            winner,
            loser,
            actions: self.actions,
            total_turns: self.turn,
            rewards,
            timed_out,
        }
    }
}

/// Winner rewards for beating `loser`.
///
/// Beating a higher-level opponent adds 10% per level of difference;
/// beating a lower-level one never reduces the base.
pub fn calculate_rewards(winner: &Fighter, loser: &Fighter) -> Rewards {
    let level_diff = loser.level as f64 - winner.level as f64;
    let level_bonus = (level_diff * LEVEL_DIFF_BONUS).max(0.0);
    let multiplier = 1.0 + level_bonus;

    let base_xp = DUEL_XP_BASE + loser.level as u64 * DUEL_XP_PER_LEVEL;
    let base_gold = DUEL_GOLD_BASE + loser.level as u64 * DUEL_GOLD_PER_LEVEL;

    Rewards {
        xp: (base_xp as f64 * multiplier).floor() as u64,
        gold: (base_gold as f64 * multiplier).floor() as u64,
    }
}

/// Run a full duel between two snapshots.
pub fn run_duel(
    fighter1: &Fighter,
    fighter2: &Fighter,
    rng: &mut impl RandomSource,
) -> Result<BattleResult, CombatError> {
    Ok(DuelEngine::new(fighter1, fighter2)?.run(rng))
}
