//! Cooperative boss encounters.
//!
//! A boss template is scaled once per encounter from the participants'
//! average level, then fought one round at a time.

mod data;
mod encounter;
mod logic;
mod types;

pub use data::{get_all_bosses, get_boss};
pub use encounter::BossEncounter;
pub use logic::{
    apply_round, average_level, boss_rewards, run_boss_turn, scale_boss, select_target,
};
pub use types::*;
