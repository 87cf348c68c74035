//! The scheduling façade: owns the referee and game collections,
//! carries the run parameters, and drives index → normalize → compile
//! → solve → write.

use crate::compiler::normalizer::Normalizers;
use crate::compiler::ModelContext;
use crate::error::ScheduleError;
use crate::extractor::{self, ScheduleReport};
use crate::indexer::SlotIndex;
use crate::params::ScheduleParams;
use crate::parser::MeridiemRules;
use crate::solver::{self, SolveOptions};
use crate::types::{Game, Referee};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;

/// A slot where fewer referees are available than the games there
/// minimally need. Cheap pre-solve diagnostic; the MILP stays the
/// authority on feasibility.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageViolation {
    pub day: String,
    pub time: String,
    pub available: usize,
    pub needed: u32,
    pub games: usize,
}

pub struct Scheduler {
    refs: Vec<Referee>,
    games: Vec<Game>,
    params: ScheduleParams,
    time_rules: MeridiemRules,
    solve_options: SolveOptions,
}

impl Scheduler {
    pub fn new(refs: Vec<Referee>, games: Vec<Game>) -> Self {
        Scheduler {
            refs,
            games,
            params: ScheduleParams::default(),
            time_rules: MeridiemRules::default(),
            solve_options: SolveOptions::default(),
        }
    }

    /// Apply named options (hour caps, objective weights). Unknown keys
    /// are logged and ignored.
    pub fn set_parameters(&mut self, options: &HashMap<String, f64>) {
        self.params.apply(options);
    }

    pub fn set_meridiem_rules(&mut self, rules: MeridiemRules) {
        self.time_rules = rules;
    }

    pub fn set_solve_options(&mut self, options: SolveOptions) {
        self.solve_options = options;
    }

    pub fn params(&self) -> &ScheduleParams {
        &self.params
    }

    pub fn refs(&self) -> &[Referee] {
        &self.refs
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn into_parts(self) -> (Vec<Referee>, Vec<Game>) {
        (self.refs, self.games)
    }

    /// Check every slot for `available referees >= sum of min_refs`.
    pub fn preflight(&self) -> Vec<CoverageViolation> {
        let index = SlotIndex::build(&self.games, &self.time_rules);
        preflight_violations(&self.refs, &self.games, &index)
    }

    /// Assign referees to games. On success the collections carry the
    /// new assignments and the report summarises them; on failure they
    /// are left exactly as they were.
    pub fn optimize(&mut self) -> Result<ScheduleReport, ScheduleError> {
        if self.refs.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "no referees to schedule".to_string(),
            ));
        }
        if self.games.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "no games to schedule".to_string(),
            ));
        }

        info!(
            "Optimizing schedule: {} referees, {} games",
            self.refs.len(),
            self.games.len()
        );

        let index = SlotIndex::build(&self.games, &self.time_rules);
        if index.days().is_empty() || index.times().is_empty() || index.g_max() == 0 {
            return Err(ScheduleError::InvalidInput(
                "schedule grid has no usable slots".to_string(),
            ));
        }

        for violation in preflight_violations(&self.refs, &self.games, &index) {
            warn!(
                "Coverage shortfall at {} {}: {} referees available, {} needed across {} games",
                violation.day,
                violation.time,
                violation.available,
                violation.needed,
                violation.games
            );
        }

        let norms = Normalizers::compute(&self.refs, &self.games, &index);
        let ctx = ModelContext {
            refs: &self.refs,
            games: &self.games,
            index: &index,
            params: &self.params,
            norms: &norms,
        };
        let solved = solver::solve(&ctx, &self.solve_options)?;

        Ok(extractor::write_assignments(
            &mut self.refs,
            &mut self.games,
            &index,
            &solved,
        ))
    }
}

fn preflight_violations(
    refs: &[Referee],
    games: &[Game],
    index: &SlotIndex,
) -> Vec<CoverageViolation> {
    let mut violations = Vec::new();
    for d in 0..index.days().len() {
        for h in 0..index.times().len() {
            let mut slot_games = 0usize;
            let mut needed = 0u32;
            for g in 0..index.g_max() {
                let Some(game_idx) = index.game_at(d, h, g) else {
                    break;
                };
                slot_games += 1;
                needed += games[game_idx].min_refs();
            }
            if slot_games == 0 {
                continue;
            }
            let available = refs
                .iter()
                .filter(|referee| index.is_available(referee, d, h))
                .count();
            if (available as u32) < needed {
                violations.push(CoverageViolation {
                    day: index.days()[d].clone(),
                    time: index.times()[h].clone(),
                    available,
                    needed,
                    games: slot_games,
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referee(name: &str, availability: Vec<u8>) -> Referee {
        Referee::new(name, availability, "", "")
    }

    fn game(number: u32, day: &str, time: &str, min_refs: u32, max_refs: u32) -> Game {
        Game::new(number, day, time, "Court 1", "TBD", min_refs, max_refs)
    }

    /// Re-derive the slot index and check the universal feasibility
    /// properties against the written domain state.
    fn assert_feasible(scheduler: &Scheduler) {
        let index = SlotIndex::build(scheduler.games(), &MeridiemRules::default());
        let params = scheduler.params();

        for g in scheduler.games() {
            let staffed = g.ref_count() as u32;
            assert!(
                staffed >= g.min_refs() && staffed <= g.max_refs(),
                "game {} staffed with {} refs outside [{}, {}]",
                g.number(),
                staffed,
                g.min_refs(),
                g.max_refs()
            );
        }

        for referee in scheduler.refs() {
            let mut slots_worked = Vec::new();
            let mut per_day: HashMap<usize, u32> = HashMap::new();
            for &number in referee.optimized_games() {
                let (d, h, _) = index.index_of(number).expect("assigned game must exist");
                assert!(
                    index.is_available(referee, d, h),
                    "{} assigned while unavailable at ({}, {})",
                    referee.name(),
                    d,
                    h
                );
                assert!(
                    !slots_worked.contains(&(d, h)),
                    "{} double-booked at ({}, {})",
                    referee.name(),
                    d,
                    h
                );
                slots_worked.push((d, h));
                *per_day.entry(d).or_default() += 1;
            }
            let weekly = referee.optimized_games().len() as u32;
            assert!(weekly <= params.max_hours_per_week.min(referee.max_hours()));
            for count in per_day.values() {
                assert!(*count <= params.max_hours_per_day);
            }
        }
    }

    #[test]
    fn lone_referee_covers_the_single_game() {
        let refs = vec![referee("Avery", vec![1])];
        let games = vec![game(1, "Monday", "6:30 PM", 1, 1)];
        let mut scheduler = Scheduler::new(refs, games);
        let report = scheduler.optimize().expect("trivial instance must solve");

        assert_eq!(report.assignments.len(), 1);
        assert_eq!(report.assignments[0].ref_name, "Avery");
        assert_eq!(report.assignments[0].game_number, 1);
        assert_eq!(scheduler.games()[0].refs(), &["Avery".to_string()]);
        assert_eq!(scheduler.refs()[0].optimized_games(), &[1]);
        assert_eq!(report.hour_stats.min, 1);
        assert_eq!(report.hour_stats.max, 1);
        assert_feasible(&scheduler);
    }

    #[test]
    fn availability_decides_who_takes_the_game() {
        let refs = vec![referee("Avery", vec![0]), referee("Blake", vec![1])];
        let games = vec![game(1, "Monday", "6:30", 1, 1)];
        let mut scheduler = Scheduler::new(refs, games);
        let report = scheduler.optimize().expect("Blake can cover the game");

        assert_eq!(report.assignments.len(), 1);
        assert_eq!(report.assignments[0].ref_name, "Blake");
        assert!(scheduler.refs()[0].optimized_games().is_empty());
        assert_feasible(&scheduler);
    }

    #[test]
    fn manual_lock_is_honoured() {
        let mut refs = vec![
            referee("Avery", vec![1, 1, 1]),
            referee("Blake", vec![1, 1, 1]),
            referee("Casey", vec![1, 1, 1]),
        ];
        refs[0].add_assigned_game(2);
        let games = vec![
            game(1, "Monday", "6:30 PM", 2, 2),
            game(2, "Monday", "7:30 PM", 2, 2),
            game(3, "Monday", "8:30 PM", 2, 2),
        ];
        let mut scheduler = Scheduler::new(refs, games);
        scheduler.optimize().expect("lock leaves room to staff all games");

        let locked_game = &scheduler.games()[1];
        assert!(
            locked_game.refs().contains(&"Avery".to_string()),
            "manual lock must place Avery on game 2"
        );
        assert_feasible(&scheduler);
    }

    #[test]
    fn impossible_staffing_reports_an_infeasible_core() {
        let refs = vec![referee("Avery", vec![1]), referee("Blake", vec![1])];
        let games = vec![game(1, "Monday", "6:30", 3, 3)];
        let mut scheduler = Scheduler::new(refs, games);

        match scheduler.optimize() {
            Err(ScheduleError::Infeasible {
                report: Some(report),
            }) => {
                assert!(
                    report
                        .constraints
                        .iter()
                        .any(|label| label.contains("at least 3")),
                    "infeasible core should cite the staffing lower bound: {:?}",
                    report.constraints
                );
                assert!(!report.bounds.is_empty());
            }
            other => panic!("expected an infeasibility diagnosis, got {:?}", other),
        }
        // Never write partial assignments on failure.
        assert!(scheduler.games()[0].refs().is_empty());
        assert!(scheduler.refs()[0].optimized_games().is_empty());
    }

    fn balancing_instance() -> Scheduler {
        let times = [
            "8:00", "9:00", "10:00", "11:01", "12:00", "13:00", "14:00", "15:00", "16:00",
            "17:00",
        ];
        let refs = (0..5)
            .map(|i| referee(&format!("ref_{}", i), vec![1; times.len()]))
            .collect();
        let games = times
            .iter()
            .enumerate()
            .map(|(i, time)| game(i as u32 + 1, "Monday", time, 1, 1))
            .collect();
        Scheduler::new(refs, games)
    }

    #[test]
    fn identical_referees_end_up_balanced() {
        let mut scheduler = balancing_instance();
        let report = scheduler.optimize().expect("balanced instance is feasible");

        let spread = report.hour_stats.max - report.hour_stats.min;
        assert!(
            spread <= 1,
            "hour spread {} exceeds 1 (hours: {:?})",
            spread,
            report.hours_by_ref
        );
        assert_feasible(&scheduler);
    }

    #[test]
    fn all_terms_stay_near_the_baseline_magnitude() {
        let mut scheduler = balancing_instance();
        let report = scheduler.optimize().expect("instance is feasible");

        for (name, value) in [
            ("effort", report.terms.effort),
            ("balance", report.terms.balance),
            ("skill_deficit", report.terms.skill_deficit),
            ("shift_blocks", report.terms.shift_blocks),
            ("pairing", report.terms.pairing),
        ] {
            assert!(
                (0.0..=25.0).contains(&value),
                "term {} = {} strays beyond an order of magnitude of the baseline",
                name,
                value
            );
        }
    }

    #[test]
    fn rerunning_the_same_instance_is_stable() {
        let mut scheduler = balancing_instance();
        let first = scheduler.optimize().expect("first run solves");
        let second = scheduler.optimize().expect("second run solves");

        assert_eq!(first.assignments.len(), second.assignments.len());
        assert_eq!(first.assignments, second.assignments);
        assert!((first.terms.effort - second.terms.effort).abs() < 1e-9);
        assert!((first.terms.balance - second.terms.balance).abs() < 1e-9);
        assert!((first.terms.shift_blocks - second.terms.shift_blocks).abs() < 1e-9);
    }

    #[test]
    fn shift_blocks_prefer_contiguous_runs() {
        let times = ["18:00", "19:00", "20:00", "21:00"];
        let refs = vec![
            referee("Avery", vec![1; times.len()]),
            referee("Blake", vec![1; times.len()]),
        ];
        let games = times
            .iter()
            .enumerate()
            .map(|(i, time)| game(i as u32 + 1, "Monday", time, 1, 1))
            .collect();
        let mut scheduler = Scheduler::new(refs, games);

        let mut options = HashMap::new();
        options.insert("weight_hour_balancing".to_string(), 0.0);
        options.insert("weight_skill_combo".to_string(), 0.0);
        options.insert("weight_low_skill_penalty".to_string(), 0.0);
        options.insert("weight_effort_bonus".to_string(), 0.0);
        options.insert("max_hours_per_day".to_string(), 2.0);
        scheduler.set_parameters(&options);

        let report = scheduler.optimize().expect("two contiguous pairs exist");

        // Games are numbered in time order, so a contiguous shift is a
        // contiguous run of game numbers.
        for referee in scheduler.refs() {
            let mut numbers: Vec<u32> = referee.optimized_games().to_vec();
            numbers.sort_unstable();
            assert_eq!(numbers.len(), 2);
            assert_eq!(
                numbers[1] - numbers[0],
                1,
                "{} was handed a split shift: {:?}",
                referee.name(),
                numbers
            );
        }

        // Two referees, two shift starts: t = 2 / (R * days * 0.3 / B).
        let expected = 2.0 / (2.0 * 1.0 * 0.3 / 2.5);
        assert!((report.terms.shift_blocks - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_weight_disables_a_term() {
        let mut scheduler = balancing_instance();
        let mut options = HashMap::new();
        options.insert("weight_shift_block_penalty".to_string(), 0.0);
        options.insert("weight_effort_bonus".to_string(), 0.0);
        scheduler.set_parameters(&options);

        let report = scheduler.optimize().expect("instance is feasible");
        assert_eq!(report.terms.shift_blocks, 0.0);
        assert_eq!(report.terms.effort, 0.0);
    }

    #[test]
    fn stale_manual_lock_is_skipped_not_fatal() {
        let mut refs = vec![referee("Avery", vec![1])];
        refs[0].add_assigned_game(99);
        let games = vec![game(1, "Monday", "6:30", 1, 1)];
        let mut scheduler = Scheduler::new(refs, games);
        let report = scheduler.optimize().expect("stale lock must not fail the run");
        assert_eq!(report.assignments.len(), 1);
    }

    #[test]
    fn empty_inputs_are_rejected_up_front() {
        let mut no_refs = Scheduler::new(vec![], vec![game(1, "Monday", "6:30", 1, 1)]);
        assert!(matches!(
            no_refs.optimize(),
            Err(ScheduleError::InvalidInput(_))
        ));

        let mut no_games = Scheduler::new(vec![referee("Avery", vec![1])], vec![]);
        assert!(matches!(
            no_games.optimize(),
            Err(ScheduleError::InvalidInput(_))
        ));
    }

    #[test]
    fn preflight_flags_slots_that_cannot_meet_minimums() {
        let refs = vec![referee("Avery", vec![1, 0]), referee("Blake", vec![0, 0])];
        let games = vec![game(1, "Monday", "6:30", 1, 2), game(2, "Monday", "7:30", 1, 2)];
        let scheduler = Scheduler::new(refs, games);

        let violations = scheduler.preflight();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].time, "7:30");
        assert_eq!(violations[0].available, 0);
        assert_eq!(violations[0].needed, 1);
    }
}
