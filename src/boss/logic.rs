//! Boss scaling and per-round resolution.
//!
//! Boss fights are driven one round at a time by an external coordinator.
//! [`run_boss_turn`] mutates the boss and fighters in place and returns the
//! round's actions; [`apply_round`] folds those actions into the persisted
//! state.

use tracing::debug;

use super::types::{BossBattleState, BossBattleStatus, BossDefinition, BossInstance};
use crate::combat::damage::{apply_damage, compute_damage, roll_crit};
use crate::combat::types::{Action, Fighter, Rewards};
use crate::core::config::CombatConfig;
use crate::core::constants::*;
use crate::core::error::CombatError;
use crate::core::rng::RandomSource;

/// Average level of the participants (0.0 for an empty slice).
pub fn average_level(players: &[Fighter]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    players.iter().map(|p| p.level as f64).sum::<f64>() / players.len() as f64
}

/// Scale a boss template to the participants' average level.
///
/// `scale = 1 + avg * 0.1`, `level = max(1, floor(avg * 1.2))`, and each
/// stat is `floor(base * scale)`.
pub fn scale_boss(definition: &BossDefinition, avg_level: f64) -> BossInstance {
    let level_scale = 1.0 + avg_level * BOSS_SCALE_PER_LEVEL;
    let level = ((avg_level * BOSS_LEVEL_FACTOR).floor() as u32).max(1);
    let scale = |base: u32| (base as f64 * level_scale).floor() as u32;

    let max_hp = scale(definition.base_hp);
    BossInstance {
        definition: definition.clone(),
        level,
        current_hp: max_hp,
        max_hp,
        attack: scale(definition.base_attack),
        defense: scale(definition.base_defense),
        speed: scale(definition.base_speed),
    }
}

/// Pick the boss's target among living players.
///
/// With `focus_chance` the boss goes for the lowest current HP (ties favor
/// the earlier player); otherwise it picks uniformly among the living.
/// Returns an index into `players`, or `None` if nobody is standing.
pub fn select_target(
    players: &[Fighter],
    focus_chance: f64,
    rng: &mut impl RandomSource,
) -> Option<usize> {
    let living: Vec<usize> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_alive())
        .map(|(i, _)| i)
        .collect();
    if living.is_empty() {
        return None;
    }

    if rng.uniform(0.0, 1.0) < focus_chance {
        let mut weakest = living[0];
        for &i in &living[1..] {
            if players[i].current_hp < players[weakest].current_hp {
                weakest = i;
            }
        }
        Some(weakest)
    } else {
        let pick = rng.uniform(0.0, living.len() as f64) as usize;
        Some(living[pick.min(living.len() - 1)])
    }
}

/// Resolve one round of a boss fight.
///
/// Each living player (in order) hits the boss while it stands, using the
/// fixed boss crit multiplier instead of the player's own crit damage. A
/// surviving boss then attacks one player without crits. A necromancer also
/// heals itself on every third round if still alive.
///
/// `turn` is the 1-based round number. HP changes are applied in place.
pub fn run_boss_turn(
    boss: &mut BossInstance,
    players: &mut [Fighter],
    turn: u32,
    config: &CombatConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<Action>, CombatError> {
    if players.is_empty() {
        return Err(CombatError::NoPlayers);
    }
    if players.len() > MAX_RAID_PLAYERS {
        return Err(CombatError::EncounterFull {
            max: MAX_RAID_PLAYERS,
        });
    }
    boss.validate()?;
    for (i, player) in players.iter().enumerate() {
        player.validate()?;
        if player.id == boss.id() || players[..i].iter().any(|p| p.id == player.id) {
            return Err(CombatError::DuplicateFighter(player.id.clone()));
        }
    }

    let mut actions = Vec::new();

    for player in players.iter() {
        if !player.is_alive() || !boss.is_alive() {
            continue;
        }
        let is_crit = roll_crit(player.stats.crit_chance, rng);
        let damage = compute_damage(
            player.stats.attack,
            boss.defense,
            is_crit.then_some(config.boss_crit_multiplier),
            rng,
        );
        boss.take_damage(damage);
        actions.push(Action {
            turn,
            actor_id: player.id.clone(),
            target_id: boss.id().to_string(),
            damage,
            is_crit,
            resulting_hp: boss.current_hp,
            is_heal: false,
        });
    }

    if boss.is_alive() {
        if let Some(index) = select_target(players, config.boss_focus_chance, rng) {
            let target = &mut players[index];
            let damage = compute_damage(boss.attack, target.stats.defense, None, rng);
            target.current_hp = apply_damage(target.current_hp, damage);
            actions.push(Action {
                turn,
                actor_id: boss.id().to_string(),
                target_id: target.id.clone(),
                damage,
                is_crit: false,
                resulting_hp: target.current_hp,
                is_heal: false,
            });
        }
    }

    if boss.definition.heals_periodically()
        && turn % NECROMANCER_HEAL_INTERVAL == 0
        && boss.is_alive()
    {
        let healed = boss.heal(NECROMANCER_HEAL_AMOUNT);
        actions.push(Action {
            turn,
            actor_id: boss.id().to_string(),
            target_id: boss.id().to_string(),
            damage: healed,
            is_crit: false,
            resulting_hp: boss.current_hp,
            is_heal: true,
        });
    }

    debug!(
        boss = boss.id(),
        turn,
        boss_hp = boss.current_hp,
        actions = actions.len(),
        "boss round resolved"
    );

    Ok(actions)
}

/// Fold a round's actions into the persisted battle state.
///
/// HP fields take each action's `resulting_hp`, the log is extended, and an
/// in-progress fight becomes `Completed` when the boss drops or `Failed`
/// when every player is down.
pub fn apply_round(mut state: BossBattleState, actions: &[Action]) -> BossBattleState {
    for action in actions {
        if action.target_id == state.boss_id {
            state.boss_current_hp = action.resulting_hp;
        } else if let Some(player) = state
            .players
            .iter_mut()
            .find(|p| p.player_id == action.target_id)
        {
            player.current_hp = action.resulting_hp;
        }
        state.turn = state.turn.max(action.turn);
    }
    state.battle_log.extend_from_slice(actions);

    if state.status == BossBattleStatus::InProgress {
        if state.boss_current_hp == 0 {
            state.status = BossBattleStatus::Completed;
        } else if !state.players.is_empty() && state.players.iter().all(|p| p.current_hp == 0) {
            state.status = BossBattleStatus::Failed;
        }
    }

    state
}

/// Per-participant rewards for defeating a boss of the given level.
pub fn boss_rewards(boss_level: u32) -> Rewards {
    Rewards {
        xp: BOSS_XP_BASE + boss_level as u64 * BOSS_XP_PER_LEVEL,
        gold: BOSS_GOLD_BASE + boss_level as u64 * BOSS_GOLD_PER_LEVEL,
    }
}
