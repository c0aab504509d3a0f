//! Shared balance constants, configuration, errors and randomness.

pub mod config;
pub mod constants;
pub mod error;
pub mod rng;

pub use config::CombatConfig;
pub use constants::*;
pub use error::{ChallengeError, CombatError, StoreError};
pub use rng::{FixedSource, RandomSource, RngSource, SequenceSource};
