//! Manual pre-assignments become fixing constraints. A lock whose game
//! number the index cannot resolve is logged and skipped; failing the
//! whole model over one stale checkbox would be worse than ignoring it.

use crate::compiler::constraints::{binary_bound, ConstraintKind, LabeledConstraint};
use crate::compiler::{ModelContext, XGrid};
use good_lp::Expression;
use log::warn;

pub(crate) fn add_manual_locks(
    ctx: &ModelContext<'_>,
    x: &XGrid,
    out: &mut Vec<LabeledConstraint>,
) {
    for (r, referee) in ctx.refs.iter().enumerate() {
        for &game_number in referee.assigned_games() {
            let Some((d, h, g)) = ctx.index.index_of(game_number) else {
                warn!(
                    "Manual assignment of {} to game {} does not match any scheduled game; skipping",
                    referee.name(),
                    game_number
                );
                continue;
            };
            let day = &ctx.index.days()[d];
            let time = &ctx.index.times()[h];
            out.push(LabeledConstraint::new(
                ConstraintKind::ManualLock,
                format!(
                    "{} is manually locked onto game {} at {} {}",
                    referee.name(),
                    game_number,
                    day,
                    time
                ),
                vec![binary_bound(referee.name(), day, time, g)],
                Expression::from(x.at(r, d, h, g)).eq(1.0),
            ));
        }
    }
}
