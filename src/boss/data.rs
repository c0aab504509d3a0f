//! Boss template definitions.

use super::types::BossDefinition;
use crate::core::constants::NECROMANCER_ID;

fn boss(
    id: &str,
    name: &str,
    stats: (u32, u32, u32, u32),
    special: &str,
) -> BossDefinition {
    let (base_hp, base_attack, base_defense, base_speed) = stats;
    BossDefinition {
        id: id.to_string(),
        name: name.to_string(),
        base_hp,
        base_attack,
        base_defense,
        base_speed,
        special: special.to_string(),
    }
}

/// Returns every boss template available for raids.
pub fn get_all_bosses() -> Vec<BossDefinition> {
    vec![
        boss(
            "merge_conflict",
            "The Merge Conflict",
            (400, 18, 8, 8),
            "Splits every hit across both branches",
        ),
        boss(
            "legacy_monolith",
            "Legacy Monolith",
            (650, 14, 16, 4),
            "Thick layers of undocumented defense",
        ),
        boss(
            "flaky_test",
            "The Flaky Test",
            (300, 22, 5, 14),
            "Strikes fast and without warning",
        ),
        boss(
            NECROMANCER_ID,
            "Necromancer of Dead Code",
            (450, 16, 10, 9),
            "Raises itself every third turn",
        ),
    ]
}

/// Look up a boss template by id.
pub fn get_boss(id: &str) -> Option<BossDefinition> {
    get_all_bosses().into_iter().find(|b| b.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_boss_ids_unique() {
        let bosses = get_all_bosses();
        let ids: HashSet<_> = bosses.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids.len(), bosses.len());
    }

    #[test]
    fn test_only_necromancer_heals() {
        for boss in get_all_bosses() {
            assert_eq!(boss.heals_periodically(), boss.id == NECROMANCER_ID);
        }
    }

    #[test]
    fn test_get_boss() {
        assert_eq!(get_boss("necromancer").unwrap().name, "Necromancer of Dead Code");
        assert!(get_boss("missing").is_none());
    }

    #[test]
    fn test_bosses_have_positive_stats() {
        for boss in get_all_bosses() {
            assert!(boss.base_hp > 0, "{} has no HP", boss.id);
            assert!(boss.base_attack > 0, "{} has no attack", boss.id);
        }
    }
}
