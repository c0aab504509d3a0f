//! Error types for the combat engines and the challenge coordinator.

use thiserror::Error;
use uuid::Uuid;

use crate::boss::BossBattleStatus;

/// Input or lifecycle errors raised by the combat engines.
///
/// These indicate a bug in the caller (bad snapshot, wrong encounter state),
/// so the engines fail fast instead of clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombatError {
    #[error("invalid fighter {id}: {reason}")]
    InvalidFighter { id: String, reason: String },

    #[error("fighter {0} appears more than once in the same battle")]
    DuplicateFighter(String),

    #[error("invalid combat config: {0}")]
    InvalidConfig(String),

    #[error("encounter already has the maximum of {max} players")]
    EncounterFull { max: usize },

    #[error("encounter has no players")]
    NoPlayers,

    #[error("cannot move encounter from {from:?} to {to:?}")]
    InvalidTransition {
        from: BossBattleStatus,
        to: BossBattleStatus,
    },

    #[error("encounter is {status:?}, turns can only be played while in progress")]
    EncounterNotActive { status: BossBattleStatus },
}

/// Failures reported by the external collaborators (record store, profile
/// store, reward ledger).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the challenge coordinator.
///
/// Losing the claim race is not an error; see `AcceptOutcome::AlreadyHandled`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChallengeError {
    #[error("challenge {0} not found")]
    NotFound(Uuid),

    #[error("user {actor_id} is not the opponent of challenge {challenge_id}")]
    NotYourChallenge { challenge_id: Uuid, actor_id: String },

    #[error("a user cannot challenge themselves ({0})")]
    SelfChallenge(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}
