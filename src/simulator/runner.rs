//! Duel simulation runner using the real duel engine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::{DuelStats, SimReport};
use crate::combat::duel::DuelEngine;
use crate::combat::types::Fighter;
use crate::core::config::CombatConfig;
use crate::core::error::CombatError;
use crate::core::rng::RngSource;

const FIGHTER_A_ID: &str = "fighter_a";
const FIGHTER_B_ID: &str = "fighter_b";

/// Run every duel in the config and return the aggregated report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, CombatError> {
    let combat_config = CombatConfig {
        max_turns: config.max_turns,
        ..Default::default()
    };
    let a = Fighter::new(
        FIGHTER_A_ID,
        format!("{} L{}", config.fighter_a.class.name(), config.fighter_a.level),
        config.fighter_a.class,
        config.fighter_a.level,
    );
    let b = Fighter::new(
        FIGHTER_B_ID,
        format!("{} L{}", config.fighter_b.class.name(), config.fighter_b.level),
        config.fighter_b.class,
        config.fighter_b.level,
    );

    let mut all_duels = Vec::with_capacity(config.num_duels as usize);

    for duel_idx in 0..config.num_duels {
        // Create RNG for this duel
        let mut rng = RngSource::new(match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(duel_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        });

        let b_first = config.alternate_sides && duel_idx % 2 == 1;
        let engine = if b_first {
            DuelEngine::with_config(&b, &a, &combat_config)?
        } else {
            DuelEngine::with_config(&a, &b, &combat_config)?
        };
        let result = engine.run(&mut rng);
        let stats = DuelStats::from_result(&result, FIGHTER_A_ID);

        if config.verbosity >= 2 {
            println!(
                "Duel {}/{} - winner {}, {} turns{}",
                duel_idx + 1,
                config.num_duels,
                result.winner.name,
                result.total_turns,
                if result.timed_out { " (timeout)" } else { "" }
            );
        }
        all_duels.push(stats);
    }

    Ok(SimReport::from_duels(config, all_duels))
}
