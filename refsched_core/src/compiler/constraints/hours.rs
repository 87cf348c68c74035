//! Hour-shaped hard constraints: one game per referee per hour, the
//! per-day cap, and the per-week cap (the tighter of the global cap and
//! the referee's own).

use crate::compiler::constraints::{binary_bound, ConstraintKind, LabeledConstraint};
use crate::compiler::{ModelContext, XGrid};
use good_lp::Expression;

pub(crate) fn add_hour_constraints(
    ctx: &ModelContext<'_>,
    x: &XGrid,
    out: &mut Vec<LabeledConstraint>,
) {
    let days = ctx.index.days();
    let times = ctx.index.times();
    let g_max = ctx.index.g_max();

    // At most one game per referee per hour.
    for (r, referee) in ctx.refs.iter().enumerate() {
        for (d, day) in days.iter().enumerate() {
            for (h, time) in times.iter().enumerate() {
                let worked: Expression = (0..g_max).map(|g| x.at(r, d, h, g)).sum();
                let involved = (0..g_max)
                    .map(|g| binary_bound(referee.name(), day, time, g))
                    .collect();
                out.push(LabeledConstraint::new(
                    ConstraintKind::HourlyOverlap,
                    format!("{} can take at most one game at {} {}", referee.name(), day, time),
                    involved,
                    worked.leq(1.0),
                ));
            }
        }
    }

    // Daily cap.
    for (r, referee) in ctx.refs.iter().enumerate() {
        for (d, day) in days.iter().enumerate() {
            let worked: Expression = (0..times.len())
                .flat_map(|h| (0..g_max).map(move |g| (h, g)))
                .map(|(h, g)| x.at(r, d, h, g))
                .sum();
            let involved = times
                .iter()
                .map(|time| binary_bound(referee.name(), day, time, 0))
                .collect();
            out.push(LabeledConstraint::new(
                ConstraintKind::DailyCap,
                format!(
                    "{} is capped at {} hours on {}",
                    referee.name(),
                    ctx.params.max_hours_per_day,
                    day
                ),
                involved,
                worked.leq(f64::from(ctx.params.max_hours_per_day)),
            ));
        }
    }

    // Weekly cap: the global cap still binds even when the referee's
    // own cap sits above it.
    for (r, referee) in ctx.refs.iter().enumerate() {
        let cap = ctx.params.max_hours_per_week.min(referee.max_hours());
        let worked: Expression = (0..days.len())
            .flat_map(|d| {
                (0..times.len()).flat_map(move |h| (0..g_max).map(move |g| (d, h, g)))
            })
            .map(|(d, h, g)| x.at(r, d, h, g))
            .sum();
        out.push(LabeledConstraint::new(
            ConstraintKind::WeeklyCap,
            format!("{} is capped at {} hours this week", referee.name(), cap),
            vec![format!("weekly hours of {} in [0, {}]", referee.name(), cap)],
            worked.leq(f64::from(cap)),
        ));
    }
}
