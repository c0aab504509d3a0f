//! Collaborator interfaces for the challenge coordinator, plus in-memory
//! implementations.
//!
//! The only operation that must be atomic is [`ChallengeStore::transition_if`]:
//! a single compare-and-set on status. Everything else is plain reads and
//! writes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock};

use uuid::Uuid;

use super::types::{Challenge, ChallengeResolution, ChallengeStatus, RewardGrant};
use crate::combat::types::{Fighter, Rewards};
use crate::core::error::StoreError;

/// Persistence for challenge records.
pub trait ChallengeStore {
    fn insert(&self, challenge: Challenge) -> Result<(), StoreError>;

    fn get(&self, id: Uuid) -> Result<Option<Challenge>, StoreError>;

    /// Atomically move a challenge from `from` to `to`, but only if it is
    /// currently `from` and `opponent_id` is its designated opponent.
    ///
    /// Returns `Ok(false)` when no record matched the condition.
    fn transition_if(
        &self,
        id: Uuid,
        from: ChallengeStatus,
        to: ChallengeStatus,
        opponent_id: &str,
    ) -> Result<bool, StoreError>;

    /// Write the duel outcome and mark an accepted challenge completed.
    fn complete(&self, id: Uuid, resolution: &ChallengeResolution) -> Result<(), StoreError>;
}

/// Source of current fighter stats.
pub trait ProfileStore {
    fn fighter_snapshot(&self, user_id: &str) -> Result<Fighter, StoreError>;
}

/// Reward disbursement. Implementations must treat a repeated `grant.key`
/// as already applied.
pub trait RewardLedger {
    fn apply_reward(&self, grant: &RewardGrant) -> Result<(), StoreError>;
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable(format!("{} lock poisoned", what)))
}

/// Challenge records held in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryChallengeStore {
    records: Mutex<HashMap<Uuid, Challenge>>,
}

impl MemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChallengeStore for MemoryChallengeStore {
    fn insert(&self, challenge: Challenge) -> Result<(), StoreError> {
        lock(&self.records, "challenge store")?.insert(challenge.id, challenge);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<Challenge>, StoreError> {
        Ok(lock(&self.records, "challenge store")?.get(&id).cloned())
    }

    fn transition_if(
        &self,
        id: Uuid,
        from: ChallengeStatus,
        to: ChallengeStatus,
        opponent_id: &str,
    ) -> Result<bool, StoreError> {
        let mut records = lock(&self.records, "challenge store")?;
        match records.get_mut(&id) {
            Some(record)
                if record.status == from
                    && record.opponent_id == opponent_id
                    && from.can_transition_to(to) =>
            {
                record.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn complete(&self, id: Uuid, resolution: &ChallengeResolution) -> Result<(), StoreError> {
        let mut records = lock(&self.records, "challenge store")?;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.status != ChallengeStatus::Accepted {
            return Err(StoreError::Unavailable(format!(
                "challenge {} is {:?}, expected Accepted",
                id, record.status
            )));
        }

        record.status = ChallengeStatus::Completed;
        record.winner_id = Some(resolution.winner_id.clone());
        record.battle_log = resolution.battle_log.clone();
        record.rewards = Some(resolution.rewards);
        record.loser_rewards = Some(resolution.loser_rewards);
        record.resolved_at = Some(resolution.resolved_at);
        Ok(())
    }
}

/// Fighter snapshots keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Fighter>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, fighter: Fighter) -> Result<(), StoreError> {
        self.profiles
            .write()
            .map_err(|_| StoreError::Unavailable("profile store lock poisoned".to_string()))?
            .insert(fighter.id.clone(), fighter);
        Ok(())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn fighter_snapshot(&self, user_id: &str) -> Result<Fighter, StoreError> {
        self.profiles
            .read()
            .map_err(|_| StoreError::Unavailable("profile store lock poisoned".to_string()))?
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))
    }
}

/// Ledger that records grants by key and ignores repeats.
#[derive(Debug, Default)]
pub struct MemoryRewardLedger {
    grants: Mutex<HashMap<String, RewardGrant>>,
}

impl MemoryRewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rewards credited to a user.
    pub fn balance(&self, user_id: &str) -> Result<Rewards, StoreError> {
        let grants = lock(&self.grants, "reward ledger")?;
        Ok(grants
            .values()
            .filter(|g| g.user_id == user_id)
            .fold(Rewards::default(), |acc, g| Rewards {
                xp: acc.xp + g.rewards.xp,
                gold: acc.gold + g.rewards.gold,
            }))
    }

    pub fn grant_count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.grants, "reward ledger")?.len())
    }
}

impl RewardLedger for MemoryRewardLedger {
    fn apply_reward(&self, grant: &RewardGrant) -> Result<(), StoreError> {
        lock(&self.grants, "reward ledger")?
            .entry(grant.key.clone())
            .or_insert_with(|| grant.clone());
        Ok(())
    }
}
