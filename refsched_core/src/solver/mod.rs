//! Solver driver: hands the built model to good_lp's default backend,
//! classifies the outcome, and on infeasibility runs a deletion filter
//! to extract an irreducible infeasible subset for diagnosis.

use crate::compiler::{compile, BuiltModel, ModelContext};
use crate::error::{InfeasibilityReport, ScheduleError};
use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// How the driver classifies a usable solution. The bundled microlp
/// backend solves to proven optimality; `Feasible` covers backends that
/// stop on the time limit or inside the gap tolerance and hand back
/// their incumbent, which the driver accepts as success all the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
}

/// Driver limits. Recorded and logged for every run; backends that
/// support them enforce them, the bundled one runs to optimality.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub time_limit: Duration,
    pub gap_tolerance: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            time_limit: Duration::from_secs(240),
            gap_tolerance: 0.05,
        }
    }
}

/// Deletion-filter probe budget. Every probe is a full re-solve, so
/// past this many hard constraints the driver reports plain
/// infeasibility instead.
const MAX_IIS_PROBES: usize = 400;

/// The five evaluated objective-term values of a solved model.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ObjectiveTerms {
    pub effort: f64,
    pub balance: f64,
    pub skill_deficit: f64,
    pub shift_blocks: f64,
    pub pairing: f64,
}

/// A solved decision tensor plus the evaluated objective breakdown.
#[derive(Debug, Clone)]
pub struct SolvedAssignment {
    pub status: SolveStatus,
    pub objective: f64,
    pub terms: ObjectiveTerms,
    values: Vec<f64>,
    days: usize,
    times: usize,
    ordinals: usize,
}

impl SolvedAssignment {
    pub fn value(&self, r: usize, d: usize, h: usize, g: usize) -> f64 {
        self.values[((r * self.days + d) * self.times + h) * self.ordinals + g]
    }

    /// Whether the solver placed referee `r` on ordinal `g` at `(d, h)`,
    /// rounding the relaxed value.
    pub fn is_assigned(&self, r: usize, d: usize, h: usize, g: usize) -> bool {
        self.value(r, d, h, g) > 0.5
    }
}

/// Solve the instance. The solver handle lives inside this call and is
/// released on every exit path.
pub fn solve(
    ctx: &ModelContext<'_>,
    options: &SolveOptions,
) -> Result<SolvedAssignment, ScheduleError> {
    info!(
        "Starting solve (time limit {}s, gap tolerance {})",
        options.time_limit.as_secs(),
        options.gap_tolerance
    );

    let built = compile(ctx);
    let hard_count = built.hard.len();
    match run(built, &HashSet::new()) {
        Ok(solved) => {
            info!("Solver finished: objective {:.4}", solved.objective);
            Ok(solved)
        }
        Err(ResolutionError::Infeasible) => {
            warn!("Model is infeasible; extracting an irreducible infeasible subset");
            let report = extract_iis(ctx, hard_count);
            Err(ScheduleError::Infeasible { report })
        }
        Err(other) => Err(ScheduleError::Solver(other.to_string())),
    }
}

/// Instantiate and solve one model, leaving out the hard constraints in
/// `skip` (by build order).
fn run(built: BuiltModel, skip: &HashSet<usize>) -> Result<SolvedAssignment, ResolutionError> {
    let BuiltModel {
        vars,
        x,
        hard,
        defs,
        objective,
        terms,
    } = built;

    let mut model = vars.maximise(objective.clone()).using(default_solver);
    for def in defs {
        model = model.with(def);
    }
    for (i, labeled) in hard.into_iter().enumerate() {
        if !skip.contains(&i) {
            model = model.with(labeled.constraint);
        }
    }

    let solution = model.solve()?;

    let values: Vec<f64> = x.vars().iter().map(|&var| solution.value(var)).collect();
    let (_, days, times, ordinals) = x.dims();
    Ok(SolvedAssignment {
        status: SolveStatus::Optimal,
        objective: solution.eval(objective),
        terms: ObjectiveTerms {
            effort: solution.eval(terms.effort),
            balance: solution.eval(terms.balance),
            skill_deficit: solution.eval(terms.skill_deficit),
            shift_blocks: solution.eval(terms.shift_blocks),
            pairing: solution.eval(terms.pairing),
        },
        values,
        days,
        times,
        ordinals,
    })
}

/// Deletion filter: drop each hard constraint in turn and re-solve. A
/// constraint whose removal leaves the model infeasible is not needed
/// to prove infeasibility; what survives is irreducible.
fn extract_iis(ctx: &ModelContext<'_>, hard_count: usize) -> Option<InfeasibilityReport> {
    if hard_count == 0 {
        return None;
    }
    if hard_count > MAX_IIS_PROBES {
        warn!(
            "Skipping infeasibility diagnosis: {} hard constraints exceed the {}-probe budget",
            hard_count, MAX_IIS_PROBES
        );
        return None;
    }

    let mut removed: HashSet<usize> = HashSet::new();
    for i in 0..hard_count {
        removed.insert(i);
        match run(compile(ctx), &removed) {
            // Still infeasible without it: discard permanently.
            Err(ResolutionError::Infeasible) => {
                debug!("Constraint {} is not part of the infeasible core", i);
            }
            // Feasible without it (or the probe itself failed): the
            // constraint is essential, keep it.
            _ => {
                removed.remove(&i);
            }
        }
    }

    let built = compile(ctx);
    let mut constraints = Vec::new();
    let mut bounds: Vec<String> = Vec::new();
    for (i, labeled) in built.hard.iter().enumerate() {
        if removed.contains(&i) {
            continue;
        }
        constraints.push(labeled.label.clone());
        for bound in &labeled.involved {
            if !bounds.contains(bound) {
                bounds.push(bound.clone());
            }
        }
    }

    info!(
        "Irreducible infeasible subset: {} constraints over {} variable bounds",
        constraints.len(),
        bounds.len()
    );
    Some(InfeasibilityReport {
        constraints,
        bounds,
    })
}
