//! Writes a solved decision tensor back onto the domain entities and
//! summarises the outcome.

use crate::indexer::SlotIndex;
use crate::solver::{ObjectiveTerms, SolveStatus, SolvedAssignment};
use crate::types::{Game, Referee};
use log::info;
use serde::Serialize;

/// One assignment row, in the writer's deterministic emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub ref_name: String,
    pub game_number: u32,
    pub day: String,
    pub time: String,
    pub location: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefereeHours {
    pub ref_name: String,
    pub hours: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HourStats {
    pub min: u32,
    pub mean: f64,
    pub max: u32,
}

/// Staffing outcome over the written game collection.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CoverageSummary {
    pub fully_staffed: usize,
    pub understaffed: usize,
    pub overstaffed: usize,
}

/// The result of a successful optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub status: SolveStatus,
    pub objective: f64,
    pub terms: ObjectiveTerms,
    pub assignments: Vec<AssignmentRecord>,
    pub hours_by_ref: Vec<RefereeHours>,
    pub hour_stats: HourStats,
}

/// Clear all assignment fields and write the solved tensor back:
/// `Game.refs` gains referee names, `Referee.optimized_games` gains
/// game numbers. Emission order is `r`, `d`, `h`, `g` by index, so a
/// fixed solution always writes the same sequence.
pub fn write_assignments(
    refs: &mut [Referee],
    games: &mut [Game],
    index: &SlotIndex,
    solved: &SolvedAssignment,
) -> ScheduleReport {
    for game in games.iter_mut() {
        game.clear_refs();
    }
    for referee in refs.iter_mut() {
        referee.clear_optimized_games();
    }

    let mut assignments = Vec::new();
    let mut hours = vec![0u32; refs.len()];
    for r in 0..refs.len() {
        for d in 0..index.days().len() {
            for h in 0..index.times().len() {
                for g in 0..index.g_max() {
                    if !solved.is_assigned(r, d, h, g) {
                        continue;
                    }
                    let Some(game_idx) = index.game_at(d, h, g) else {
                        continue;
                    };
                    let game = &mut games[game_idx];
                    game.add_ref(refs[r].name());
                    refs[r].add_optimized_game(game.number());
                    hours[r] += 1;
                    assignments.push(AssignmentRecord {
                        ref_name: refs[r].name().to_string(),
                        game_number: game.number(),
                        day: game.day().to_string(),
                        time: game.time().to_string(),
                        location: game.location().to_string(),
                        difficulty: game.difficulty().to_string(),
                    });
                }
            }
        }
    }

    let hours_by_ref: Vec<RefereeHours> = refs
        .iter()
        .zip(&hours)
        .map(|(referee, &count)| RefereeHours {
            ref_name: referee.name().to_string(),
            hours: count,
        })
        .collect();
    for entry in &hours_by_ref {
        info!("{} assigned {} hours", entry.ref_name, entry.hours);
    }

    let hour_stats = HourStats {
        min: hours.iter().copied().min().unwrap_or(0),
        mean: if hours.is_empty() {
            0.0
        } else {
            hours.iter().map(|&h| f64::from(h)).sum::<f64>() / hours.len() as f64
        },
        max: hours.iter().copied().max().unwrap_or(0),
    };
    info!(
        "Assigned hours: min {} / mean {:.2} / max {}",
        hour_stats.min, hour_stats.mean, hour_stats.max
    );

    ScheduleReport {
        status: solved.status,
        objective: solved.objective,
        terms: solved.terms,
        assignments,
        hours_by_ref,
        hour_stats,
    }
}

/// Count fully staffed, understaffed, and overstaffed games from the
/// written domain state.
pub fn coverage(games: &[Game]) -> CoverageSummary {
    let mut summary = CoverageSummary::default();
    for game in games {
        if game.is_overstaffed() {
            summary.overstaffed += 1;
        } else if game.is_fully_staffed() {
            summary.fully_staffed += 1;
        } else {
            summary.understaffed += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_classifies_games_by_staffing_band() {
        let mut full = Game::new(1, "Monday", "6:30", "Court 1", "TBD", 1, 2);
        full.add_ref("Avery");
        let under = Game::new(2, "Monday", "7:30", "Court 1", "TBD", 1, 2);
        let mut over = Game::new(3, "Monday", "8:30", "Court 1", "TBD", 1, 1);
        over.add_ref("Avery");
        over.add_ref("Blake");

        let summary = coverage(&[full, under, over]);
        assert_eq!(summary.fully_staffed, 1);
        assert_eq!(summary.understaffed, 1);
        assert_eq!(summary.overstaffed, 1);
    }
}
