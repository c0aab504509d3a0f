//! Balance constants shared by the duel engine, boss engine and simulator.
//!
//! All combat numbers live here. Change once, test everywhere.

// =============================================================================
// DAMAGE MODEL
// =============================================================================

/// Lower bound of the damage variance band (-10%).
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;

/// Upper bound of the damage variance band (+10%).
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;

/// Defense is divided by this before being subtracted from attack.
pub const DEFENSE_DIVISOR: f64 = 2.0;

/// A landed hit never deals less than this.
pub const MIN_DAMAGE: u32 = 1;

/// Upper bound of the random bonus added to speed when ordering a turn.
pub const TURN_ORDER_JITTER: f64 = 2.0;

// =============================================================================
// DUEL ENGINE
// =============================================================================

/// Hard cap on duel turns. Reaching it resolves the fight by HP percentage.
pub const MAX_DUEL_TURNS: u32 = 100;

/// Winner XP before the level bonus: BASE + loser level * PER_LEVEL.
pub const DUEL_XP_BASE: u64 = 50;
pub const DUEL_XP_PER_LEVEL: u64 = 10;

/// Winner gold before the level bonus: BASE + loser level * PER_LEVEL.
pub const DUEL_GOLD_BASE: u64 = 25;
pub const DUEL_GOLD_PER_LEVEL: u64 = 5;

/// Reward bonus per level the loser had over the winner.
pub const LEVEL_DIFF_BONUS: f64 = 0.1;

/// Share of the winner's rewards paid to the loser of a PvP challenge.
pub const LOSER_REWARD_SHARE: f64 = 0.25;

// =============================================================================
// BOSS ENCOUNTERS
// =============================================================================

/// Players allowed in one boss encounter.
pub const MAX_RAID_PLAYERS: usize = 2;

/// Boss stat multiplier per average participant level: 1 + avg * STEP.
pub const BOSS_SCALE_PER_LEVEL: f64 = 0.1;

/// Boss level = floor(avg participant level * this), at least 1.
pub const BOSS_LEVEL_FACTOR: f64 = 1.2;

/// Crit multiplier applied to player hits on a boss, regardless of the
/// player's own crit damage stat.
pub const BOSS_CRIT_MULTIPLIER: f64 = 1.5;

/// Probability that the boss focuses the living player with the lowest HP.
pub const BOSS_FOCUS_CHANCE: f64 = 0.7;

/// Id of the boss template that periodically heals itself.
pub const NECROMANCER_ID: &str = "necromancer";

/// The necromancer heals on every turn that is a multiple of this.
pub const NECROMANCER_HEAL_INTERVAL: u32 = 3;

/// HP restored by each necromancer heal (capped at max HP).
pub const NECROMANCER_HEAL_AMOUNT: u32 = 50;

/// Per-participant XP for a defeated boss: BASE + boss level * PER_LEVEL.
pub const BOSS_XP_BASE: u64 = 100;
pub const BOSS_XP_PER_LEVEL: u64 = 20;

/// Per-participant gold for a defeated boss: BASE + boss level * PER_LEVEL.
pub const BOSS_GOLD_BASE: u64 = 50;
pub const BOSS_GOLD_PER_LEVEL: u64 = 10;

// =============================================================================
// FIGHTER DERIVATION
// =============================================================================

/// Per-level growth applied on top of class base stats.
pub const HP_PER_LEVEL: u32 = 10;
pub const ATTACK_PER_LEVEL: u32 = 2;
pub const DEFENSE_PER_LEVEL: u32 = 1;
pub const SPEED_PER_LEVEL: u32 = 1;
