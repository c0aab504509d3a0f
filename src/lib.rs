//! DevQuest Arena - combat resolution for the DevQuest RPG.
//!
//! Turns fighter snapshots into replayable action logs and results:
//! two-fighter duels, cooperative boss rounds, and the challenge
//! coordinator that makes sure each PvP challenge is fought exactly once.
//! Storage, notifications and rendering live outside this crate.

pub mod boss;
pub mod challenge;
pub mod combat;
pub mod core;
pub mod simulator;

pub use boss::{BossBattleState, BossBattleStatus, BossEncounter, BossInstance};
pub use challenge::{AcceptOutcome, Challenge, ChallengeCoordinator, ChallengeStatus};
pub use combat::{run_duel, Action, BattleResult, DuelEngine, Fighter, FighterClass, Rewards};
pub use crate::core::{
    ChallengeError, CombatConfig, CombatError, FixedSource, RandomSource, RngSource, StoreError,
};
