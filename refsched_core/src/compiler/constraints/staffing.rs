//! Staffing band per existing game, and the zero forced onto ordinals
//! where no game exists.

use crate::compiler::constraints::{binary_bound, ConstraintKind, LabeledConstraint};
use crate::compiler::{ModelContext, XGrid};
use good_lp::Expression;

pub(crate) fn add_staffing_constraints(
    ctx: &ModelContext<'_>,
    x: &XGrid,
    out: &mut Vec<LabeledConstraint>,
) {
    let days = ctx.index.days();
    let times = ctx.index.times();
    let g_max = ctx.index.g_max();

    for (d, day) in days.iter().enumerate() {
        for (h, time) in times.iter().enumerate() {
            for g in 0..g_max {
                let staffed: Expression = (0..ctx.refs.len()).map(|r| x.at(r, d, h, g)).sum();
                let involved: Vec<String> = ctx
                    .refs
                    .iter()
                    .map(|referee| binary_bound(referee.name(), day, time, g))
                    .collect();

                match ctx.index.game_at(d, h, g) {
                    Some(game_idx) => {
                        let game = &ctx.games[game_idx];
                        out.push(LabeledConstraint::new(
                            ConstraintKind::StaffingMin,
                            format!(
                                "Game {} at {} {} needs at least {} refs",
                                game.number(),
                                day,
                                time,
                                game.min_refs()
                            ),
                            involved.clone(),
                            staffed.clone().geq(f64::from(game.min_refs())),
                        ));
                        out.push(LabeledConstraint::new(
                            ConstraintKind::StaffingMax,
                            format!(
                                "Game {} at {} {} allows at most {} refs",
                                game.number(),
                                day,
                                time,
                                game.max_refs()
                            ),
                            involved,
                            staffed.leq(f64::from(game.max_refs())),
                        ));
                    }
                    None => {
                        out.push(LabeledConstraint::new(
                            ConstraintKind::PhantomGame,
                            format!("No game exists at {} {} slot {}", day, time, g),
                            involved,
                            staffed.leq(0.0),
                        ));
                    }
                }
            }
        }
    }
}
