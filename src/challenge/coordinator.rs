//! PvP challenge coordinator.
//!
//! Guarantees that a challenge's duel runs at most once, no matter how many
//! accept calls race for it. The pending -> accepted claim is a single
//! conditional write in the store; whoever loses that write gets
//! `AcceptOutcome::AlreadyHandled` and never touches the duel engine.
//!
//! Once a duel has run, its result is authoritative. Failures writing the
//! record or paying rewards are logged and reported on the outcome, never
//! rolled back, since re-running the duel would produce a different fight.

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::store::{ChallengeStore, ProfileStore, RewardLedger};
use super::types::{
    AcceptOutcome, Challenge, ChallengeResolution, ChallengeStatus, DeclineOutcome,
    ResolvedChallenge, RewardGrant,
};
use crate::combat::duel::DuelEngine;
use crate::combat::types::{BattleResult, Rewards};
use crate::core::config::CombatConfig;
use crate::core::error::ChallengeError;
use crate::core::rng::RandomSource;

pub struct ChallengeCoordinator<C, P, L> {
    challenges: C,
    profiles: P,
    ledger: L,
    config: CombatConfig,
}

impl<C, P, L> ChallengeCoordinator<C, P, L>
where
    C: ChallengeStore,
    P: ProfileStore,
    L: RewardLedger,
{
    pub fn new(challenges: C, profiles: P, ledger: L) -> Self {
        Self::with_config(challenges, profiles, ledger, CombatConfig::default())
    }

    pub fn with_config(challenges: C, profiles: P, ledger: L, config: CombatConfig) -> Self {
        Self {
            challenges,
            profiles,
            ledger,
            config,
        }
    }

    pub fn challenges(&self) -> &C {
        &self.challenges
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Create a pending challenge from `challenger_id` to `opponent_id`.
    pub fn issue_challenge(
        &self,
        challenger_id: &str,
        opponent_id: &str,
    ) -> Result<Challenge, ChallengeError> {
        if challenger_id == opponent_id {
            return Err(ChallengeError::SelfChallenge(challenger_id.to_string()));
        }
        let challenge = Challenge::new(challenger_id, opponent_id);
        self.challenges.insert(challenge.clone())?;
        info!(
            challenge = %challenge.id,
            challenger = challenger_id,
            opponent = opponent_id,
            "challenge issued"
        );
        Ok(challenge)
    }

    /// Accept a pending challenge on behalf of its opponent and run the duel.
    ///
    /// Only the call that wins the pending -> accepted claim runs the duel;
    /// every other call returns `AlreadyHandled`.
    pub fn accept_challenge(
        &self,
        challenge_id: Uuid,
        actor_id: &str,
        rng: &mut impl RandomSource,
    ) -> Result<AcceptOutcome, ChallengeError> {
        let challenge = self.load_for_opponent(challenge_id, actor_id)?;

        let claimed = self.challenges.transition_if(
            challenge_id,
            ChallengeStatus::Pending,
            ChallengeStatus::Accepted,
            actor_id,
        )?;
        if !claimed {
            info!(challenge = %challenge_id, actor = actor_id, "challenge already handled");
            return Ok(AcceptOutcome::AlreadyHandled);
        }
        info!(challenge = %challenge_id, actor = actor_id, "challenge claimed");

        let engine = match self.prepare_duel(&challenge) {
            Ok(engine) => engine,
            Err(e) => {
                // The claim is spent; the record stays accepted with no duel run.
                warn!(challenge = %challenge_id, error = %e, "claimed challenge could not start");
                return Err(e);
            }
        };

        let result = engine.run(rng);
        let loser_rewards = result.rewards.share(self.config.loser_reward_share);

        let persisted = self.persist(&challenge, &result, loser_rewards);
        let rewards_applied = self.disburse(&challenge, &result, loser_rewards);

        info!(
            challenge = %challenge_id,
            winner = %result.winner.id,
            turns = result.total_turns,
            persisted,
            rewards_applied,
            "challenge resolved"
        );

        Ok(AcceptOutcome::Resolved(Box::new(ResolvedChallenge {
            challenge_id,
            result,
            loser_rewards,
            persisted,
            rewards_applied,
        })))
    }

    /// Decline a pending challenge on behalf of its opponent.
    pub fn decline_challenge(
        &self,
        challenge_id: Uuid,
        actor_id: &str,
    ) -> Result<DeclineOutcome, ChallengeError> {
        self.load_for_opponent(challenge_id, actor_id)?;

        let declined = self.challenges.transition_if(
            challenge_id,
            ChallengeStatus::Pending,
            ChallengeStatus::Declined,
            actor_id,
        )?;
        if declined {
            info!(challenge = %challenge_id, actor = actor_id, "challenge declined");
            Ok(DeclineOutcome::Declined)
        } else {
            Ok(DeclineOutcome::AlreadyHandled)
        }
    }

    fn load_for_opponent(
        &self,
        challenge_id: Uuid,
        actor_id: &str,
    ) -> Result<Challenge, ChallengeError> {
        let challenge = self
            .challenges
            .get(challenge_id)?
            .ok_or(ChallengeError::NotFound(challenge_id))?;
        if challenge.opponent_id != actor_id {
            return Err(ChallengeError::NotYourChallenge {
                challenge_id,
                actor_id: actor_id.to_string(),
            });
        }
        Ok(challenge)
    }

    /// The challenger is fighter 1, so ties and timeouts favor them.
    fn prepare_duel(&self, challenge: &Challenge) -> Result<DuelEngine, ChallengeError> {
        let challenger = self.profiles.fighter_snapshot(&challenge.challenger_id)?;
        let opponent = self.profiles.fighter_snapshot(&challenge.opponent_id)?;
        Ok(DuelEngine::with_config(&challenger, &opponent, &self.config)?)
    }

    fn persist(&self, challenge: &Challenge, result: &BattleResult, loser_rewards: Rewards) -> bool {
        let resolution = ChallengeResolution {
            winner_id: result.winner.id.clone(),
            loser_id: result.loser.id.clone(),
            battle_log: result.actions.clone(),
            total_turns: result.total_turns,
            rewards: result.rewards,
            loser_rewards,
            resolved_at: Utc::now(),
        };
        match self.challenges.complete(challenge.id, &resolution) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    challenge = %challenge.id,
                    error = %e,
                    "failed to persist challenge result"
                );
                false
            }
        }
    }

    fn disburse(&self, challenge: &Challenge, result: &BattleResult, loser_rewards: Rewards) -> bool {
        let grants = [
            RewardGrant {
                key: format!("{}:winner", challenge.id),
                user_id: result.winner.id.clone(),
                rewards: result.rewards,
            },
            RewardGrant {
                key: format!("{}:loser", challenge.id),
                user_id: result.loser.id.clone(),
                rewards: loser_rewards,
            },
        ];

        let mut all_applied = true;
        for grant in &grants {
            if let Err(e) = self.ledger.apply_reward(grant) {
                error!(
                    challenge = %challenge.id,
                    user = %grant.user_id,
                    key = %grant.key,
                    error = %e,
                    "failed to apply reward"
                );
                all_applied = false;
            }
        }
        all_applied
    }
}
