//! Translates the domain model plus run parameters into a mixed-integer
//! program: one binary decision per `(referee, day, time, ordinal)`,
//! the hard feasibility constraints, and the weighted soft objective.

pub mod constraints;
pub mod difficulty;
pub mod normalizer;
pub mod objective;

use crate::compiler::constraints::{availability, hours, manual, staffing, LabeledConstraint};
use crate::compiler::normalizer::Normalizers;
use crate::compiler::objective::TermExpressions;
use crate::indexer::SlotIndex;
use crate::params::ScheduleParams;
use crate::types::{Game, Referee};
use good_lp::{variable, variables, Constraint, Expression, ProblemVariables, Variable};
use log::info;

/// Everything the builder reads. The compiler never mutates the domain
/// model; assignment fields are written only by the solution writer.
pub struct ModelContext<'a> {
    pub refs: &'a [Referee],
    pub games: &'a [Game],
    pub index: &'a SlotIndex,
    pub params: &'a ScheduleParams,
    pub norms: &'a Normalizers,
}

/// The binary decision tensor `x[r, d, h, g]`, stored flat in
/// `r`-major order.
pub struct XGrid {
    vars: Vec<Variable>,
    refs: usize,
    days: usize,
    times: usize,
    ordinals: usize,
}

impl XGrid {
    fn allocate(
        problem: &mut ProblemVariables,
        refs: usize,
        days: usize,
        times: usize,
        ordinals: usize,
    ) -> Self {
        let count = refs * days * times * ordinals;
        let mut vars = Vec::with_capacity(count);
        for _ in 0..count {
            vars.push(problem.add(variable().binary()));
        }
        XGrid {
            vars,
            refs,
            days,
            times,
            ordinals,
        }
    }

    pub fn at(&self, r: usize, d: usize, h: usize, g: usize) -> Variable {
        self.vars[((r * self.days + d) * self.times + h) * self.ordinals + g]
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    /// `(refs, days, times, ordinals)`.
    pub fn dims(&self) -> (usize, usize, usize, usize) {
        (self.refs, self.days, self.times, self.ordinals)
    }
}

/// A fully built model, ready to hand to the solver driver. Hard
/// constraints stay labelled so infeasibility diagnosis can name them;
/// the auxiliary defining constraints cannot cause infeasibility and
/// are kept apart.
pub struct BuiltModel {
    pub vars: ProblemVariables,
    pub x: XGrid,
    pub hard: Vec<LabeledConstraint>,
    pub defs: Vec<Constraint>,
    pub objective: Expression,
    pub terms: TermExpressions,
}

/// Build the full MILP for one instance. Deterministic: iteration is
/// always `r`, then `d`, `h`, `g`, by index.
pub fn compile(ctx: &ModelContext<'_>) -> BuiltModel {
    let mut vars = variables!();
    let x = XGrid::allocate(
        &mut vars,
        ctx.refs.len(),
        ctx.index.days().len(),
        ctx.index.times().len(),
        ctx.index.g_max(),
    );

    let mut hard = Vec::new();
    hours::add_hour_constraints(ctx, &x, &mut hard);
    availability::add_availability_constraints(ctx, &x, &mut hard);
    staffing::add_staffing_constraints(ctx, &x, &mut hard);
    manual::add_manual_locks(ctx, &x, &mut hard);

    let mut defs = Vec::new();
    let (objective, terms) = objective::build_objective(ctx, &mut vars, &x, &mut defs);

    info!(
        "Built MILP: {} decision variables, {} hard constraints, {} auxiliary constraints",
        x.vars().len(),
        hard.len(),
        defs.len()
    );

    BuiltModel {
        vars,
        x,
        hard,
        defs,
        objective,
        terms,
    }
}
