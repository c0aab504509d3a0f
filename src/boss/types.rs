use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::types::Action;
use crate::core::constants::NECROMANCER_ID;
use crate::core::error::CombatError;

/// Static boss template, scaled per encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossDefinition {
    pub id: String,
    pub name: String,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_speed: u32,
    /// Flavor text for the boss's special trait
    pub special: String,
}

impl BossDefinition {
    /// Whether this boss raises itself every few turns.
    pub fn heals_periodically(&self) -> bool {
        self.id == NECROMANCER_ID
    }
}

/// A boss scaled to the participants of one encounter.
///
/// Stats are fixed at creation; only `current_hp` changes during the fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossInstance {
    pub definition: BossDefinition,
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BossInstance {
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restore up to `amount` HP without exceeding max. Returns HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.current_hp));
        self.current_hp += healed;
        healed
    }

    /// Reject boss snapshots that could not have come from `scale_boss`.
    pub fn validate(&self) -> Result<(), CombatError> {
        let fail = |reason: String| {
            Err(CombatError::InvalidFighter {
                id: self.id().to_string(),
                reason,
            })
        };

        if self.id().is_empty() {
            return fail("id is empty".to_string());
        }
        if self.max_hp == 0 {
            return fail("max HP must be positive".to_string());
        }
        if self.current_hp > self.max_hp {
            return fail(format!(
                "current HP {} exceeds max HP {}",
                self.current_hp, self.max_hp
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a cooperative boss fight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossBattleStatus {
    #[default]
    Lobby,
    Ready,
    InProgress,
    Completed,
    Failed,
    Abandoned,
}

impl BossBattleStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BossBattleStatus::Completed | BossBattleStatus::Failed | BossBattleStatus::Abandoned
        )
    }

    pub fn can_transition_to(&self, next: BossBattleStatus) -> bool {
        use BossBattleStatus::*;
        match (self, next) {
            (Lobby, Ready) => true,
            (Ready, InProgress) => true,
            (InProgress, Completed) | (InProgress, Failed) => true,
            (from, Abandoned) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// HP of one raid participant as persisted between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHp {
    pub player_id: String,
    pub current_hp: u32,
}

/// Persisted shape of a boss fight between realtime turns.
///
/// The engine never holds this across turns; the owner passes it through
/// [`apply_round`](crate::boss::apply_round) after each round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossBattleState {
    pub id: Uuid,
    pub boss_id: String,
    pub boss_current_hp: u32,
    pub boss_max_hp: u32,
    pub players: Vec<PlayerHp>,
    pub battle_log: Vec<Action>,
    /// Last round played (0 before the first)
    pub turn: u32,
    pub status: BossBattleStatus,
}

impl BossBattleState {
    pub fn player_hp(&self, player_id: &str) -> Option<u32> {
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.current_hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(current_hp: u32, max_hp: u32) -> BossInstance {
        BossInstance {
            definition: BossDefinition {
                id: "test".to_string(),
                name: "Test".to_string(),
                base_hp: max_hp,
                base_attack: 10,
                base_defense: 5,
                base_speed: 5,
                special: String::new(),
            },
            level: 1,
            current_hp,
            max_hp,
            attack: 10,
            defense: 5,
            speed: 5,
        }
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut boss = instance(480, 500);
        assert_eq!(boss.heal(50), 20);
        assert_eq!(boss.current_hp, 500);
        assert_eq!(boss.heal(50), 0);
    }

    #[test]
    fn test_heal_above_max_restores_nothing() {
        let mut boss = instance(600, 500);
        assert_eq!(boss.heal(50), 0);
        assert_eq!(boss.current_hp, 600);
    }

    #[test]
    fn test_validate_rejects_bad_hp() {
        assert!(instance(500, 500).validate().is_ok());
        assert!(matches!(
            instance(600, 500).validate(),
            Err(CombatError::InvalidFighter { .. })
        ));
        assert!(instance(0, 0).validate().is_err());
    }

    #[test]
    fn test_take_damage_no_underflow() {
        let mut boss = instance(30, 500);
        boss.take_damage(100);
        assert_eq!(boss.current_hp, 0);
        assert!(!boss.is_alive());
    }

    #[test]
    fn test_status_transitions() {
        use BossBattleStatus::*;
        assert!(Lobby.can_transition_to(Ready));
        assert!(Ready.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Failed));
        assert!(Lobby.can_transition_to(Abandoned));
        assert!(InProgress.can_transition_to(Abandoned));

        assert!(!Lobby.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(Abandoned));
        assert!(!Failed.can_transition_to(InProgress));
        assert!(!Abandoned.can_transition_to(Lobby));
    }

    #[test]
    fn test_status_json_is_snake_case() {
        let json = serde_json::to_string(&BossBattleStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
