//! Fighter snapshots, the damage model and the duel engine.

pub mod damage;
pub mod duel;
pub mod types;

pub use damage::{
    a_acts_first, apply_damage, calculate_damage, compute_damage, determine_turn_order,
    roll_crit, AttackResult,
};
pub use duel::{calculate_rewards, run_duel, DuelEngine, DuelStatus};
pub use types::*;
