//! Damage model shared by the duel and boss engines.
//!
//! These pure functions compute combat outcomes without side effects beyond
//! drawing from the supplied random source.

use crate::combat::types::Fighter;
use crate::core::constants::*;
use crate::core::rng::RandomSource;

/// Result of a single attack calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (after crit multiplier if applicable).
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Roll for a critical hit.
///
/// # Arguments
/// * `crit_chance` - Probability of a crit in [0, 1]
/// * `rng` - Random source
///
/// # Returns
/// true with probability `crit_chance`
pub fn roll_crit(crit_chance: f64, rng: &mut impl RandomSource) -> bool {
    rng.uniform(0.0, 1.0) < crit_chance
}

/// Raw damage from attack and defense stats.
///
/// Defense is halved before subtraction (not floored first), then a ±10%
/// variance is applied and floored. The crit multiplier, if any, is applied
/// to the floored value and floored again. A hit always deals at least 1.
///
/// # Arguments
/// * `attack` - Attacker's attack stat
/// * `defense` - Defender's defense stat
/// * `crit_multiplier` - `Some(mult)` when the hit is a crit
/// * `rng` - Random source for the variance draw
pub fn compute_damage(
    attack: u32,
    defense: u32,
    crit_multiplier: Option<f64>,
    rng: &mut impl RandomSource,
) -> u32 {
    let base = attack as f64 - defense as f64 / DEFENSE_DIVISOR;
    let variance = rng.uniform(DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX);
    let mut damage = (base * variance).floor();

    if let Some(mult) = crit_multiplier {
        damage = (damage * mult).floor();
    }

    damage.max(MIN_DAMAGE as f64) as u32
}

/// Damage for a fighter-vs-fighter hit, using the attacker's own crit damage.
pub fn calculate_damage(
    attacker: &Fighter,
    defender: &Fighter,
    is_crit: bool,
    rng: &mut impl RandomSource,
) -> AttackResult {
    let crit_multiplier = is_crit.then_some(attacker.stats.crit_damage);
    AttackResult {
        damage: compute_damage(
            attacker.stats.attack,
            defender.stats.defense,
            crit_multiplier,
            rng,
        ),
        is_crit,
    }
}

/// Decide who acts first this turn.
///
/// Each side gets `speed + uniform(0, 2)`; the higher value goes first and
/// ties go to `a`.
///
/// # Returns
/// true if `a` acts first
pub fn a_acts_first(a: &Fighter, b: &Fighter, rng: &mut impl RandomSource) -> bool {
    let a_roll = a.stats.speed as f64 + rng.uniform(0.0, TURN_ORDER_JITTER);
    let b_roll = b.stats.speed as f64 + rng.uniform(0.0, TURN_ORDER_JITTER);
    a_roll >= b_roll
}

/// Order two fighters for a turn. Returns `(first, second)`.
pub fn determine_turn_order<'a>(
    a: &'a Fighter,
    b: &'a Fighter,
    rng: &mut impl RandomSource,
) -> (&'a Fighter, &'a Fighter) {
    if a_acts_first(a, b, rng) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Apply damage to HP, returning remaining HP (minimum 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{FighterClass, FighterStats};
    use crate::core::rng::{FixedSource, RngSource, SequenceSource};

    fn fighter(id: &str, attack: u32, defense: u32, speed: u32, crit_damage: f64) -> Fighter {
        Fighter::with_stats(
            id,
            id,
            FighterClass::Warrior,
            1,
            FighterStats {
                max_hp: 100,
                attack,
                defense,
                speed,
                crit_chance: 0.0,
                crit_damage,
            },
        )
    }

    #[test]
    fn test_roll_crit_always() {
        let mut rng = RngSource::seeded(1);
        for _ in 0..100 {
            assert!(roll_crit(1.0, &mut rng));
        }
    }

    #[test]
    fn test_roll_crit_never() {
        let mut rng = RngSource::seeded(1);
        for _ in 0..100 {
            assert!(!roll_crit(0.0, &mut rng));
        }
    }

    #[test]
    fn test_roll_crit_frequency() {
        let mut rng = RngSource::seeded(99);
        let crits = (0..10_000).filter(|_| roll_crit(0.3, &mut rng)).count();
        assert!((2_700..3_300).contains(&crits), "crits = {}", crits);
    }

    #[test]
    fn test_damage_with_neutral_variance() {
        let attacker = fighter("a", 20, 10, 10, 1.5);
        let defender = fighter("b", 20, 10, 10, 1.5);
        let result = calculate_damage(&attacker, &defender, false, &mut FixedSource::midpoint());
        assert_eq!(result.damage, 15);
        assert!(!result.is_crit);
    }

    #[test]
    fn test_defense_halved_before_subtraction() {
        // 20 - 11/2 = 14.5 -> floor 14; flooring defense first would give 15
        let attacker = fighter("a", 20, 0, 10, 1.5);
        let defender = fighter("b", 0, 11, 10, 1.5);
        let result = calculate_damage(&attacker, &defender, false, &mut FixedSource::midpoint());
        assert_eq!(result.damage, 14);
    }

    #[test]
    fn test_crit_applied_after_variance() {
        let attacker = fighter("a", 20, 10, 10, 1.5);
        let defender = fighter("b", 20, 10, 10, 1.5);
        // variance 1.1 -> floor(15 * 1.1) = 16, crit -> floor(16 * 1.5) = 24
        let mut rng = SequenceSource::new([1.1]);
        let result = calculate_damage(&attacker, &defender, true, &mut rng);
        assert_eq!(result.damage, 24);
        assert!(result.is_crit);
    }

    #[test]
    fn test_damage_floor_when_defense_dominates() {
        let attacker = fighter("a", 1, 0, 10, 2.0);
        let defender = fighter("b", 0, 500, 10, 2.0);
        let mut rng = RngSource::seeded(3);
        for _ in 0..100 {
            assert_eq!(calculate_damage(&attacker, &defender, false, &mut rng).damage, 1);
            assert_eq!(calculate_damage(&attacker, &defender, true, &mut rng).damage, 1);
        }
    }

    #[test]
    fn test_damage_at_least_one_across_stat_grid() {
        let mut rng = RngSource::seeded(11);
        for attack in [0, 1, 5, 20, 200] {
            for defense in [0, 1, 10, 50, 400] {
                let a = fighter("a", attack, 0, 10, 1.5);
                let d = fighter("d", 0, defense, 10, 1.5);
                for is_crit in [false, true] {
                    assert!(calculate_damage(&a, &d, is_crit, &mut rng).damage >= 1);
                }
            }
        }
    }

    #[test]
    fn test_crit_increases_expected_damage() {
        let attacker = fighter("a", 30, 10, 10, 1.5);
        let defender = fighter("b", 20, 10, 10, 1.5);
        let mut rng = RngSource::seeded(5);
        let samples = 2_000;
        let normal: u64 = (0..samples)
            .map(|_| calculate_damage(&attacker, &defender, false, &mut rng).damage as u64)
            .sum();
        let crit: u64 = (0..samples)
            .map(|_| calculate_damage(&attacker, &defender, true, &mut rng).damage as u64)
            .sum();
        assert!(crit > normal);
    }

    #[test]
    fn test_turn_order_tie_favors_first_argument() {
        let a = fighter("a", 10, 10, 10, 1.5);
        let b = fighter("b", 10, 10, 10, 1.5);
        let (first, second) = determine_turn_order(&a, &b, &mut FixedSource::midpoint());
        assert_eq!(first.id, "a");
        assert_eq!(second.id, "b");

        let (first, _) = determine_turn_order(&b, &a, &mut FixedSource::midpoint());
        assert_eq!(first.id, "b");
    }

    #[test]
    fn test_turn_order_jitter_can_flip() {
        let a = fighter("a", 10, 10, 10, 1.5);
        let b = fighter("b", 10, 10, 11, 1.5);
        // a rolls 10 + 1.9, b rolls 11 + 0.0
        let mut rng = SequenceSource::new([1.9, 0.0]);
        assert!(a_acts_first(&a, &b, &mut rng));
    }

    #[test]
    fn test_faster_fighter_usually_first() {
        let slow = fighter("slow", 10, 10, 5, 1.5);
        let fast = fighter("fast", 10, 10, 20, 1.5);
        let mut rng = RngSource::seeded(8);
        for _ in 0..100 {
            let (first, _) = determine_turn_order(&slow, &fast, &mut rng);
            assert_eq!(first.id, "fast");
        }
    }

    #[test]
    fn test_apply_damage() {
        assert_eq!(apply_damage(100, 30), 70);
        assert_eq!(apply_damage(30, 100), 0);
        assert_eq!(apply_damage(50, 0), 50);
    }
}
