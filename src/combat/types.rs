use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::error::CombatError;

/// Fighter archetype. Determines base stats before level growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FighterClass {
    Warrior,
    Mage,
    Rogue,
    Paladin,
}

impl FighterClass {
    pub fn all() -> [FighterClass; 4] {
        [
            FighterClass::Warrior,
            FighterClass::Mage,
            FighterClass::Rogue,
            FighterClass::Paladin,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FighterClass::Warrior => "Warrior",
            FighterClass::Mage => "Mage",
            FighterClass::Rogue => "Rogue",
            FighterClass::Paladin => "Paladin",
        }
    }

    /// Level-1 stats: (max_hp, attack, defense, speed, crit_chance, crit_damage).
    fn base_stats(&self) -> (u32, u32, u32, u32, f64, f64) {
        match self {
            FighterClass::Warrior => (120, 14, 10, 8, 0.05, 1.5),
            FighterClass::Mage => (80, 18, 5, 10, 0.10, 1.75),
            FighterClass::Rogue => (90, 15, 6, 14, 0.20, 2.0),
            FighterClass::Paladin => (110, 12, 12, 7, 0.05, 1.5),
        }
    }
}

impl std::str::FromStr for FighterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warrior" => Ok(FighterClass::Warrior),
            "mage" => Ok(FighterClass::Mage),
            "rogue" => Ok(FighterClass::Rogue),
            "paladin" => Ok(FighterClass::Paladin),
            other => Err(format!("unknown class: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Probability in [0, 1]
    pub crit_chance: f64,
    /// Damage multiplier applied on a crit in duels
    pub crit_damage: f64,
}

impl FighterStats {
    /// Derive stats for a class at a given level (level 1 = class base).
    pub fn for_class(class: FighterClass, level: u32) -> Self {
        let (hp, attack, defense, speed, crit_chance, crit_damage) = class.base_stats();
        let growth = level.saturating_sub(1);
        Self {
            max_hp: hp + growth * HP_PER_LEVEL,
            attack: attack + growth * ATTACK_PER_LEVEL,
            defense: defense + growth * DEFENSE_PER_LEVEL,
            speed: speed + growth * SPEED_PER_LEVEL,
            crit_chance,
            crit_damage,
        }
    }
}

/// Stat snapshot of one combat participant.
///
/// Engines always work on their own clone, so a caller's fighter is never
/// mutated by a duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub id: String,
    pub name: String,
    pub class: FighterClass,
    pub level: u32,
    pub stats: FighterStats,
    pub current_hp: u32,
}

impl Fighter {
    /// Full-HP fighter with class-derived stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, class: FighterClass, level: u32) -> Self {
        let stats = FighterStats::for_class(class, level);
        Self {
            id: id.into(),
            name: name.into(),
            class,
            level,
            current_hp: stats.max_hp,
            stats,
        }
    }

    /// Fighter with explicit stats, starting at full HP.
    pub fn with_stats(
        id: impl Into<String>,
        name: impl Into<String>,
        class: FighterClass,
        level: u32,
        stats: FighterStats,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class,
            level,
            current_hp: stats.max_hp,
            stats,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.stats.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.stats.max_hp as f64
    }

    /// Reject snapshots that can only come from an upstream bug.
    pub fn validate(&self) -> Result<(), CombatError> {
        let fail = |reason: String| {
            Err(CombatError::InvalidFighter {
                id: self.id.clone(),
                reason,
            })
        };

        if self.id.is_empty() {
            return fail("id is empty".to_string());
        }
        if self.level == 0 {
            return fail("level must be at least 1".to_string());
        }
        if self.stats.max_hp == 0 {
            return fail("max HP must be positive".to_string());
        }
        if self.current_hp > self.stats.max_hp {
            return fail(format!(
                "current HP {} exceeds max HP {}",
                self.current_hp, self.stats.max_hp
            ));
        }
        if !(0.0..=1.0).contains(&self.stats.crit_chance) {
            return fail(format!(
                "crit chance {} outside [0, 1]",
                self.stats.crit_chance
            ));
        }
        if !self.stats.crit_damage.is_finite() || self.stats.crit_damage < 1.0 {
            return fail(format!(
                "crit damage {} must be finite and >= 1",
                self.stats.crit_damage
            ));
        }
        Ok(())
    }
}

/// One resolved attack or heal in a battle's replay log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// 1-based turn number
    pub turn: u32,
    pub actor_id: String,
    pub target_id: String,
    /// Damage dealt, or HP restored for a heal
    pub damage: u32,
    pub is_crit: bool,
    /// Target HP after this action; authoritative for replay
    pub resulting_hp: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_heal: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u64,
    pub gold: u64,
}

impl Rewards {
    pub fn new(xp: u64, gold: u64) -> Self {
        Self { xp, gold }
    }

    /// Floor of `fraction` of these rewards.
    pub fn share(&self, fraction: f64) -> Rewards {
        Rewards {
            xp: (self.xp as f64 * fraction).floor() as u64,
            gold: (self.gold as f64 * fraction).floor() as u64,
        }
    }
}

/// Outcome of one duel. Built once when the engine finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub winner: Fighter,
    pub loser: Fighter,
    pub actions: Vec<Action>,
    pub total_turns: u32,
    /// Winner's rewards
    pub rewards: Rewards,
    /// True when the turn cap decided the fight
    pub timed_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fighter() -> Fighter {
        Fighter::new("u1", "Ada", FighterClass::Warrior, 1)
    }

    #[test]
    fn test_fighter_creation_full_hp() {
        let fighter = valid_fighter();
        assert_eq!(fighter.current_hp, fighter.stats.max_hp);
        assert_eq!(fighter.stats.max_hp, 120);
        assert!(fighter.is_alive());
    }

    #[test]
    fn test_stats_grow_with_level() {
        let l1 = FighterStats::for_class(FighterClass::Mage, 1);
        let l5 = FighterStats::for_class(FighterClass::Mage, 5);
        assert_eq!(l5.max_hp, l1.max_hp + 4 * HP_PER_LEVEL);
        assert_eq!(l5.attack, l1.attack + 4 * ATTACK_PER_LEVEL);
        assert_eq!(l5.crit_chance, l1.crit_chance);
    }

    #[test]
    fn test_take_damage_no_underflow() {
        let mut fighter = valid_fighter();
        fighter.take_damage(10_000);
        assert_eq!(fighter.current_hp, 0);
        assert!(!fighter.is_alive());
    }

    #[test]
    fn test_validate_rejects_level_zero() {
        let mut fighter = valid_fighter();
        fighter.level = 0;
        assert!(matches!(
            fighter.validate(),
            Err(CombatError::InvalidFighter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overfull_hp() {
        let mut fighter = valid_fighter();
        fighter.current_hp = fighter.stats.max_hp + 1;
        assert!(fighter.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_crit_chance_out_of_range() {
        let mut fighter = valid_fighter();
        fighter.stats.crit_chance = 1.2;
        assert!(fighter.validate().is_err());
        fighter.stats.crit_chance = -0.1;
        assert!(fighter.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_crit_damage() {
        let mut fighter = valid_fighter();
        fighter.stats.crit_damage = f64::NAN;
        assert!(fighter.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_knocked_out_fighter() {
        let mut fighter = valid_fighter();
        fighter.current_hp = 0;
        assert!(fighter.validate().is_ok());
    }

    #[test]
    fn test_rewards_share_floors() {
        let rewards = Rewards::new(101, 51);
        assert_eq!(rewards.share(0.25), Rewards::new(25, 12));
    }

    #[test]
    fn test_action_json_uses_replay_field_names() {
        let action = Action {
            turn: 1,
            actor_id: "a".to_string(),
            target_id: "b".to_string(),
            damage: 15,
            is_crit: false,
            resulting_hp: 85,
            is_heal: false,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"actorId\":\"a\""));
        assert!(json.contains("\"resultingHp\":85"));
        assert!(!json.contains("isHeal"));
    }

    #[test]
    fn test_class_from_str() {
        assert_eq!("ROGUE".parse::<FighterClass>(), Ok(FighterClass::Rogue));
        assert!("bard".parse::<FighterClass>().is_err());
    }
}
