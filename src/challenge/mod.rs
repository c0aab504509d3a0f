//! PvP challenges: records, collaborator traits and the coordinator that
//! claims, runs and settles them.

pub mod coordinator;
pub mod store;
pub mod types;

pub use coordinator::ChallengeCoordinator;
pub use store::{
    ChallengeStore, MemoryChallengeStore, MemoryProfileStore, MemoryRewardLedger, ProfileStore,
    RewardLedger,
};
pub use types::*;
