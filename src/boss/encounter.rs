//! Cooperative boss encounter lifecycle.
//!
//! `BossEncounter` walks a raid through lobby, ready and in-progress states
//! and plays rounds through [`run_boss_turn`]. Callers must serialize
//! `play_turn` calls for the same encounter; the type takes `&mut self` so a
//! single owner does that naturally.

use tracing::info;
use uuid::Uuid;

use super::logic::{apply_round, average_level, boss_rewards, run_boss_turn, scale_boss};
use super::types::{BossBattleState, BossBattleStatus, BossDefinition, BossInstance, PlayerHp};
use crate::combat::types::{Action, Fighter, Rewards};
use crate::core::config::CombatConfig;
use crate::core::constants::MAX_RAID_PLAYERS;
use crate::core::error::CombatError;
use crate::core::rng::RandomSource;

pub struct BossEncounter {
    definition: BossDefinition,
    boss: Option<BossInstance>,
    players: Vec<Fighter>,
    state: BossBattleState,
    config: CombatConfig,
}

impl BossEncounter {
    /// Open a lobby for the given boss.
    pub fn new(definition: BossDefinition) -> Self {
        Self::with_config(definition, CombatConfig::default())
    }

    pub fn with_config(definition: BossDefinition, config: CombatConfig) -> Self {
        let state = BossBattleState {
            id: Uuid::new_v4(),
            boss_id: definition.id.clone(),
            ..Default::default()
        };
        Self {
            definition,
            boss: None,
            players: Vec::new(),
            state,
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn status(&self) -> BossBattleStatus {
        self.state.status
    }

    pub fn state(&self) -> &BossBattleState {
        &self.state
    }

    pub fn boss(&self) -> Option<&BossInstance> {
        self.boss.as_ref()
    }

    pub fn players(&self) -> &[Fighter] {
        &self.players
    }

    /// Add a player while the lobby is open.
    pub fn join(&mut self, player: Fighter) -> Result<(), CombatError> {
        if self.state.status != BossBattleStatus::Lobby {
            return Err(CombatError::EncounterNotActive {
                status: self.state.status,
            });
        }
        if self.players.len() >= MAX_RAID_PLAYERS {
            return Err(CombatError::EncounterFull {
                max: MAX_RAID_PLAYERS,
            });
        }
        player.validate()?;
        if player.id == self.definition.id || self.players.iter().any(|p| p.id == player.id) {
            return Err(CombatError::DuplicateFighter(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    /// Close the lobby.
    pub fn mark_ready(&mut self) -> Result<(), CombatError> {
        if self.players.is_empty() {
            return Err(CombatError::NoPlayers);
        }
        self.transition(BossBattleStatus::Ready)
    }

    /// Spawn the scaled boss and begin the fight.
    pub fn start(&mut self) -> Result<(), CombatError> {
        self.transition(BossBattleStatus::InProgress)?;

        let boss = scale_boss(&self.definition, average_level(&self.players));
        self.state.boss_current_hp = boss.current_hp;
        self.state.boss_max_hp = boss.max_hp;
        self.state.players = self
            .players
            .iter()
            .map(|p| PlayerHp {
                player_id: p.id.clone(),
                current_hp: p.current_hp,
            })
            .collect();

        info!(
            encounter = %self.state.id,
            boss = %boss.definition.id,
            level = boss.level,
            hp = boss.max_hp,
            players = self.players.len(),
            "boss encounter started"
        );
        self.boss = Some(boss);
        Ok(())
    }

    /// Play the next round. Only valid while the fight is in progress.
    pub fn play_turn(&mut self, rng: &mut impl RandomSource) -> Result<Vec<Action>, CombatError> {
        let status = self.state.status;
        let boss = match self.boss.as_mut() {
            Some(boss) if status == BossBattleStatus::InProgress => boss,
            _ => return Err(CombatError::EncounterNotActive { status }),
        };

        let turn = self.state.turn + 1;
        let actions = run_boss_turn(boss, &mut self.players, turn, &self.config, rng)?;

        let state = std::mem::take(&mut self.state);
        self.state = apply_round(state, &actions);
        self.state.turn = turn;

        if self.state.status.is_terminal() {
            info!(
                encounter = %self.state.id,
                status = ?self.state.status,
                turns = turn,
                "boss encounter finished"
            );
        }
        Ok(actions)
    }

    /// Give up on the encounter. No further turns can be played.
    pub fn abandon(&mut self) -> Result<(), CombatError> {
        self.transition(BossBattleStatus::Abandoned)
    }

    /// Rewards owed to each participant once the boss is defeated.
    pub fn rewards(&self) -> Option<Vec<(String, Rewards)>> {
        if self.state.status != BossBattleStatus::Completed {
            return None;
        }
        let rewards = boss_rewards(self.boss.as_ref()?.level);
        Some(
            self.players
                .iter()
                .map(|p| (p.id.clone(), rewards))
                .collect(),
        )
    }

    fn transition(&mut self, to: BossBattleStatus) -> Result<(), CombatError> {
        let from = self.state.status;
        if !from.can_transition_to(to) {
            return Err(CombatError::InvalidTransition { from, to });
        }
        self.state.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::data::get_boss;
    use crate::combat::types::FighterClass;
    use crate::core::rng::RngSource;

    fn lobby_with_players(n: usize) -> BossEncounter {
        let mut encounter = BossEncounter::new(get_boss("merge_conflict").unwrap());
        for i in 0..n {
            let player = Fighter::new(format!("p{}", i), "Dev", FighterClass::Rogue, 5);
            encounter.join(player).unwrap();
        }
        encounter
    }

    #[test]
    fn test_lobby_to_in_progress() {
        let mut encounter = lobby_with_players(2);
        assert_eq!(encounter.status(), BossBattleStatus::Lobby);
        encounter.mark_ready().unwrap();
        encounter.start().unwrap();
        assert_eq!(encounter.status(), BossBattleStatus::InProgress);

        let boss = encounter.boss().unwrap();
        assert_eq!(boss.level, 6);
        assert_eq!(encounter.state().boss_current_hp, boss.max_hp);
        assert_eq!(encounter.state().players.len(), 2);
    }

    #[test]
    fn test_join_limits() {
        let mut encounter = lobby_with_players(2);
        let extra = Fighter::new("p9", "Late", FighterClass::Mage, 1);
        assert_eq!(
            encounter.join(extra),
            Err(CombatError::EncounterFull { max: 2 })
        );

        let mut encounter = lobby_with_players(1);
        let dup = Fighter::new("p0", "Again", FighterClass::Mage, 1);
        assert!(matches!(
            encounter.join(dup),
            Err(CombatError::DuplicateFighter(_))
        ));
    }

    #[test]
    fn test_cannot_ready_empty_lobby() {
        let mut encounter = lobby_with_players(0);
        assert_eq!(encounter.mark_ready(), Err(CombatError::NoPlayers));
    }

    #[test]
    fn test_cannot_start_from_lobby() {
        let mut encounter = lobby_with_players(1);
        assert!(matches!(
            encounter.start(),
            Err(CombatError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_turns_refused_before_start() {
        let mut encounter = lobby_with_players(1);
        let mut rng = RngSource::seeded(1);
        assert!(matches!(
            encounter.play_turn(&mut rng),
            Err(CombatError::EncounterNotActive { .. })
        ));
    }

    #[test]
    fn test_abandoned_encounter_refuses_turns() {
        let mut encounter = lobby_with_players(1);
        encounter.mark_ready().unwrap();
        encounter.start().unwrap();
        encounter.abandon().unwrap();
        let mut rng = RngSource::seeded(1);
        assert_eq!(
            encounter.play_turn(&mut rng),
            Err(CombatError::EncounterNotActive {
                status: BossBattleStatus::Abandoned
            })
        );
        assert!(encounter.abandon().is_err());
    }

    #[test]
    fn test_play_turn_updates_state() {
        let mut encounter = lobby_with_players(2);
        encounter.mark_ready().unwrap();
        encounter.start().unwrap();
        let mut rng = RngSource::seeded(3);

        let actions = encounter.play_turn(&mut rng).unwrap();
        assert!(!actions.is_empty());
        assert_eq!(encounter.state().turn, 1);
        assert_eq!(encounter.state().battle_log, actions);
        assert_eq!(
            encounter.state().boss_current_hp,
            encounter.boss().unwrap().current_hp
        );
        for player in encounter.players() {
            assert_eq!(encounter.state().player_hp(&player.id), Some(player.current_hp));
        }
    }

    #[test]
    fn test_rewards_only_after_victory() {
        let mut encounter = lobby_with_players(1);
        assert!(encounter.rewards().is_none());
        encounter.mark_ready().unwrap();
        encounter.start().unwrap();
        assert!(encounter.rewards().is_none());
    }
}
