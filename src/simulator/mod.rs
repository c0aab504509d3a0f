//! Duel balance simulator for Monte Carlo analysis.
//!
//! Runs thousands of duels between two class/level presets to analyze
//! win rates, fight length, crit frequency and reward payouts. It drives the
//! real duel engine, so results match live PvP behavior.

mod config;
mod report;
mod runner;

pub use config::{FighterPreset, SimConfig};
pub use report::{DuelStats, SimReport};
pub use runner::run_simulation;
