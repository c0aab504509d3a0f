use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::types::{Action, BattleResult, Rewards};

/// Lifecycle of a PvP challenge.
///
/// `Pending` moves to `Accepted` (the claim) and then `Completed`, or
/// directly to `Declined`. Nothing leaves `Completed` or `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Accepted,
    Completed,
    Declined,
}

impl ChallengeStatus {
    pub fn can_transition_to(&self, next: ChallengeStatus) -> bool {
        use ChallengeStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Declined) | (Accepted, Completed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: Uuid,
    pub challenger_id: String,
    pub opponent_id: String,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub winner_id: Option<String>,
    #[serde(default)]
    pub battle_log: Vec<Action>,
    #[serde(default)]
    pub rewards: Option<Rewards>,
    #[serde(default)]
    pub loser_rewards: Option<Rewards>,
}

impl Challenge {
    /// Fresh pending challenge.
    pub fn new(challenger_id: impl Into<String>, opponent_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenger_id: challenger_id.into(),
            opponent_id: opponent_id.into(),
            status: ChallengeStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            winner_id: None,
            battle_log: Vec::new(),
            rewards: None,
            loser_rewards: None,
        }
    }
}

/// Fields written when a claimed challenge's duel has been run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResolution {
    pub winner_id: String,
    pub loser_id: String,
    pub battle_log: Vec<Action>,
    pub total_turns: u32,
    pub rewards: Rewards,
    pub loser_rewards: Rewards,
    pub resolved_at: DateTime<Utc>,
}

/// One reward disbursement. `key` makes retries idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardGrant {
    pub key: String,
    pub user_id: String,
    pub rewards: Rewards,
}

/// A challenge whose duel this call executed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChallenge {
    pub challenge_id: Uuid,
    pub result: BattleResult,
    pub loser_rewards: Rewards,
    /// False if writing the completed record failed (the result still stands)
    pub persisted: bool,
    /// False if any reward disbursement failed and needs a retry
    pub rewards_applied: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcceptOutcome {
    /// This call won the claim and ran the duel.
    Resolved(Box<ResolvedChallenge>),
    /// Another call already claimed or declined the challenge.
    AlreadyHandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineOutcome {
    Declined,
    AlreadyHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_challenge_is_pending() {
        let challenge = Challenge::new("alice", "bob");
        assert_eq!(challenge.status, ChallengeStatus::Pending);
        assert!(challenge.winner_id.is_none());
        assert!(challenge.battle_log.is_empty());
    }

    #[test]
    fn test_valid_transitions() {
        use ChallengeStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Declined));
        assert!(Accepted.can_transition_to(Completed));

        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Declined));
        assert!(!Completed.can_transition_to(Accepted));
        assert!(!Declined.can_transition_to(Accepted));
    }

    #[test]
    fn test_challenge_json_round_trip() {
        let challenge = Challenge::new("alice", "bob");
        let json = serde_json::to_string(&challenge).unwrap();
        assert!(json.contains("\"challengerId\":\"alice\""));
        assert!(json.contains("\"status\":\"pending\""));
        let back: Challenge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, challenge);
    }
}
