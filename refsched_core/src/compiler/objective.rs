//! Auxiliary variables and the five-term weighted objective.
//!
//! Every term arrives pre-divided by its scaling constant, so the
//! weights compose additively on a common magnitude. A term whose
//! weight is zero is disabled outright: none of its auxiliary
//! variables or defining constraints are created.

use crate::compiler::difficulty::difficulty_value;
use crate::compiler::{ModelContext, XGrid};
use good_lp::{variable, Constraint, Expression, ProblemVariables};

/// The five normalized, unweighted term expressions.
pub struct TermExpressions {
    pub effort: Expression,
    pub balance: Expression,
    pub skill_deficit: Expression,
    pub shift_blocks: Expression,
    pub pairing: Expression,
}

/// Build the auxiliary variables, push their defining constraints into
/// `defs`, and return the combined objective plus the individual terms.
pub(crate) fn build_objective(
    ctx: &ModelContext<'_>,
    vars: &mut ProblemVariables,
    x: &XGrid,
    defs: &mut Vec<Constraint>,
) -> (Expression, TermExpressions) {
    let params = ctx.params;
    let norms = ctx.norms;
    let r_count = ctx.refs.len();
    let d_count = ctx.index.days().len();
    let h_count = ctx.index.times().len();
    let g_max = ctx.index.g_max();

    // Per-referee assigned-hour expressions, shared by the effort and
    // balance terms.
    let hours: Vec<Expression> = (0..r_count)
        .map(|r| {
            (0..d_count)
                .flat_map(|d| (0..h_count).flat_map(move |h| (0..g_max).map(move |g| (d, h, g))))
                .map(|(d, h, g)| x.at(r, d, h, g))
                .sum()
        })
        .collect();

    // Effort reward: hours weighted by the referee's declared effort,
    // over the cap set.
    let mut effort = Expression::from(0.0);
    if params.weight_effort_bonus > 0.0 && !norms.cap_set.is_empty() {
        let scale = 1.0 / (norms.cap_set.len() as f64 * norms.n_effort);
        for &r in &norms.cap_set {
            effort = effort + scale * f64::from(ctx.refs[r].effort()) * hours[r].clone();
        }
    }

    // Workload balance: absolute deviation of each cap-set referee's
    // hours from the mean over all referees. Deviation variables exist
    // only for the cap set.
    let mut balance = Expression::from(0.0);
    if params.weight_hour_balancing > 0.0 && !norms.cap_set.is_empty() {
        let total_hours = hours
            .iter()
            .fold(Expression::from(0.0), |acc, h| acc + h.clone());
        let mean_hours = (1.0 / r_count as f64) * total_hours;
        let scale = 1.0 / (norms.cap_set.len() as f64 * norms.n_balance);
        for &r in &norms.cap_set {
            let dev = vars.add(variable().min(0.0));
            defs.push((Expression::from(dev) - hours[r].clone() + mean_hours.clone()).geq(0.0));
            defs.push((Expression::from(dev) + hours[r].clone() - mean_hours.clone()).geq(0.0));
            balance = balance + scale * dev;
        }
    }

    // Skill deficit: per game, how far the assigned crew's relative
    // experience falls short of the game's relative difficulty.
    let mut skill_deficit = Expression::from(0.0);
    if params.weight_low_skill_penalty > 0.0 {
        let scale = 1.0 / (ctx.games.len() as f64 * norms.n_skill);
        for d in 0..d_count {
            for h in 0..h_count {
                for g in 0..g_max {
                    let Some(game_idx) = ctx.index.game_at(d, h, g) else {
                        continue;
                    };
                    let diff_ratio =
                        difficulty_value(ctx.games[game_idx].difficulty()) / norms.mu_difficulty;
                    let mut shortfall = Expression::from(0.0);
                    for (r, referee) in ctx.refs.iter().enumerate() {
                        let coeff = diff_ratio - f64::from(referee.experience()) / norms.mu_skill;
                        shortfall = shortfall + coeff * x.at(r, d, h, g);
                    }
                    let deficit = vars.add(variable().min(0.0));
                    defs.push((Expression::from(deficit) - shortfall).geq(0.0));
                    skill_deficit = skill_deficit + scale * deficit;
                }
            }
        }
    }

    // Shift blocks: count the slots where a referee works but did not
    // work the previous hour of the same day.
    let mut shift_blocks = Expression::from(0.0);
    if params.weight_shift_block_penalty > 0.0 {
        let scale = 1.0 / norms.n_blocks;
        for r in 0..r_count {
            for d in 0..d_count {
                let mut prev_worked: Option<Expression> = None;
                for h in 0..h_count {
                    let worked: Expression = (0..g_max).map(|g| x.at(r, d, h, g)).sum();
                    let start = vars.add(variable().binary());
                    defs.push((Expression::from(start) - worked.clone()).leq(0.0));
                    match &prev_worked {
                        // First hour of the day: working means starting.
                        None => defs.push((Expression::from(start) - worked.clone()).geq(0.0)),
                        Some(prev) => {
                            defs.push(
                                (Expression::from(start) - worked.clone() + prev.clone()).geq(0.0),
                            );
                            defs.push((Expression::from(start) + prev.clone()).leq(1.0));
                        }
                    }
                    shift_blocks = shift_blocks + scale * start;
                    prev_worked = Some(worked);
                }
            }
        }
    }

    // Pairing bonus: reward experience gaps inside a game's crew, so
    // greener referees run with seasoned ones.
    let mut pairing = Expression::from(0.0);
    if params.weight_skill_combo > 0.0 && r_count >= 2 {
        let scale = 1.0 / norms.n_pairing;
        for i in 0..r_count {
            for j in (i + 1)..r_count {
                let gap = (f64::from(ctx.refs[i].experience())
                    - f64::from(ctx.refs[j].experience()))
                .abs();
                if gap == 0.0 {
                    continue;
                }
                for d in 0..d_count {
                    for h in 0..h_count {
                        for g in 0..g_max {
                            if ctx.index.game_at(d, h, g).is_none() {
                                continue;
                            }
                            let xi = x.at(i, d, h, g);
                            let xj = x.at(j, d, h, g);
                            let together = vars.add(variable().binary());
                            defs.push((Expression::from(together) - xi).leq(0.0));
                            defs.push((Expression::from(together) - xj).leq(0.0));
                            defs.push((Expression::from(together) - xi - xj).geq(-1.0));
                            pairing = pairing + scale * gap * together;
                        }
                    }
                }
            }
        }
    }

    let objective = params.weight_effort_bonus * effort.clone()
        - params.weight_hour_balancing * balance.clone()
        - params.weight_low_skill_penalty * skill_deficit.clone()
        - params.weight_shift_block_penalty * shift_blocks.clone()
        + params.weight_skill_combo * pairing.clone();

    (
        objective,
        TermExpressions {
            effort,
            balance,
            skill_deficit,
            shift_blocks,
            pairing,
        },
    )
}
