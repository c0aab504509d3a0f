//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

use super::config::SimConfig;
use crate::combat::types::BattleResult;

/// Per-duel numbers the report aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct DuelStats {
    pub a_won: bool,
    pub turns: u32,
    pub timed_out: bool,
    pub hits: u32,
    pub crits: u32,
    pub winner_xp: u64,
    pub winner_gold: u64,
}

impl DuelStats {
    pub fn from_result(result: &BattleResult, a_id: &str) -> Self {
        Self {
            a_won: result.winner.id == a_id,
            turns: result.total_turns,
            timed_out: result.timed_out,
            hits: result.actions.len() as u32,
            crits: result.actions.iter().filter(|a| a.is_crit).count() as u32,
            winner_xp: result.rewards.xp,
            winner_gold: result.rewards.gold,
        }
    }
}

/// Aggregated results from many simulated duels.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub matchup: String,
    pub num_duels: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub a_win_rate: f64,
    pub timeouts: u32,
    pub avg_turns: f64,
    pub crit_rate: f64,
    pub avg_winner_xp: f64,
    pub avg_winner_gold: f64,
    /// Turn count -> number of duels that ended on it
    pub turn_distribution: BTreeMap<u32, u32>,
}

impl SimReport {
    pub fn from_duels(config: &SimConfig, duels: Vec<DuelStats>) -> Self {
        let num_duels = duels.len() as u32;
        let n = num_duels.max(1) as f64;

        let a_wins = duels.iter().filter(|d| d.a_won).count() as u32;
        let timeouts = duels.iter().filter(|d| d.timed_out).count() as u32;
        let total_hits: u32 = duels.iter().map(|d| d.hits).sum();
        let total_crits: u32 = duels.iter().map(|d| d.crits).sum();

        let mut turn_distribution = BTreeMap::new();
        for duel in &duels {
            *turn_distribution.entry(duel.turns).or_insert(0) += 1;
        }

        Self {
            matchup: format!(
                "{} L{} vs {} L{}",
                config.fighter_a.class.name(),
                config.fighter_a.level,
                config.fighter_b.class.name(),
                config.fighter_b.level
            ),
            num_duels,
            a_wins,
            b_wins: num_duels - a_wins,
            a_win_rate: a_wins as f64 / n,
            timeouts,
            avg_turns: duels.iter().map(|d| d.turns as f64).sum::<f64>() / n,
            crit_rate: total_crits as f64 / total_hits.max(1) as f64,
            avg_winner_xp: duels.iter().map(|d| d.winner_xp as f64).sum::<f64>() / n,
            avg_winner_gold: duels.iter().map(|d| d.winner_gold as f64).sum::<f64>() / n,
            turn_distribution,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DUEL SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Matchup: {}\n", self.matchup));
        report.push_str(&format!(
            "Duels: {} total, {} timed out\n\n",
            self.num_duels, self.timeouts
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Fighter A wins:      {} ({:.1}%)\n",
            self.a_wins,
            self.a_win_rate * 100.0
        ));
        report.push_str(&format!("  Fighter B wins:      {}\n", self.b_wins));
        report.push_str(&format!("  Avg Turns:           {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Crit Rate:           {:.1}%\n\n",
            self.crit_rate * 100.0
        ));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Winner XP:       {:.1}\n", self.avg_winner_xp));
        report.push_str(&format!(
            "  Avg Winner Gold:     {:.1}\n\n",
            self.avg_winner_gold
        ));

        report.push_str("── DUEL LENGTH ──────────────────────────────────────────────────\n");
        for (turns, count) in &self.turn_distribution {
            let pct = (*count as f64 / self.num_duels.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 2.0) as usize);
            report.push_str(&format!("  {:3} turns: {:>5.1}% {}\n", turns, pct, bar));
        }

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
