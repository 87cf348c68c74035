//! Availability: a referee whose bit for `(day, time)` is 0 cannot be
//! placed on any game in that slot. Slots with the bit set need no
//! constraint; the binary bound already caps the variable.

use crate::compiler::constraints::{binary_bound, ConstraintKind, LabeledConstraint};
use crate::compiler::{ModelContext, XGrid};
use good_lp::Expression;

pub(crate) fn add_availability_constraints(
    ctx: &ModelContext<'_>,
    x: &XGrid,
    out: &mut Vec<LabeledConstraint>,
) {
    let days = ctx.index.days();
    let times = ctx.index.times();
    let g_max = ctx.index.g_max();

    for (r, referee) in ctx.refs.iter().enumerate() {
        for (d, day) in days.iter().enumerate() {
            for (h, time) in times.iter().enumerate() {
                if ctx.index.is_available(referee, d, h) {
                    continue;
                }
                let worked: Expression = (0..g_max).map(|g| x.at(r, d, h, g)).sum();
                let involved = (0..g_max)
                    .map(|g| binary_bound(referee.name(), day, time, g))
                    .collect();
                out.push(LabeledConstraint::new(
                    ConstraintKind::Availability,
                    format!("{} is unavailable at {} {}", referee.name(), day, time),
                    involved,
                    worked.leq(0.0),
                ));
            }
        }
    }
}
