//! Per-term scaling constants computed from the problem instance so
//! the five objective terms land on a comparable magnitude.

use crate::compiler::difficulty::difficulty_value;
use crate::indexer::SlotIndex;
use crate::types::{Game, Referee};

/// Target magnitude every normalized term should sit near when its
/// weight is 1.
pub const BASELINE: f64 = 2.5;

/// Slack below the mean weekly cap that still counts a referee as "not
/// at cap". Heuristic carried over from the original tuning.
pub const CAP_SLACK_HOURS: f64 = 3.0;

/// Instance-derived scaling constants and the balancing cap set.
#[derive(Debug, Clone)]
pub struct Normalizers {
    /// Referee indices subject to the balancing and effort terms:
    /// everyone whose weekly cap exceeds `mean(caps) - CAP_SLACK_HOURS`.
    pub cap_set: Vec<usize>,
    pub mu_effort: f64,
    pub mu_hours_expected: f64,
    pub mu_skill: f64,
    pub mu_difficulty: f64,
    pub n_effort: f64,
    pub n_balance: f64,
    pub n_skill: f64,
    pub n_blocks: f64,
    pub n_pairing: f64,
}

impl Normalizers {
    pub fn compute(refs: &[Referee], games: &[Game], index: &SlotIndex) -> Self {
        let r = refs.len();
        let l = games.len();

        let mean_cap = if r > 0 {
            refs.iter().map(|rf| f64::from(rf.max_hours())).sum::<f64>() / r as f64
        } else {
            0.0
        };
        let cap_set: Vec<usize> = (0..r)
            .filter(|&i| f64::from(refs[i].max_hours()) > mean_cap - CAP_SLACK_HOURS)
            .collect();

        let mu_effort = if cap_set.is_empty() {
            1.0
        } else {
            cap_set
                .iter()
                .map(|&i| f64::from(refs[i].effort()))
                .sum::<f64>()
                / cap_set.len() as f64
        };

        // Rough expected workload, assuming roughly two refs per game.
        let mu_hours_expected = if cap_set.is_empty() {
            1.0
        } else {
            2.0 * l as f64 / cap_set.len() as f64
        };

        let mu_skill = if r > 0 {
            refs.iter().map(|rf| f64::from(rf.experience())).sum::<f64>() / r as f64
        } else {
            3.0
        };

        let mu_difficulty = if l > 0 {
            games
                .iter()
                .map(|g| difficulty_value(g.difficulty()))
                .sum::<f64>()
                / l as f64
        } else {
            3.0
        };

        let max_possible_starts = (r * index.days().len()) as f64;
        let pair_magnitude = 4.0 * (r * r.saturating_sub(1)) as f64 / 2.0 * 0.6;

        Normalizers {
            cap_set,
            mu_effort,
            mu_hours_expected,
            mu_skill,
            mu_difficulty,
            n_effort: mu_effort * mu_hours_expected / BASELINE,
            n_balance: 1.0 / BASELINE,
            n_skill: mu_skill / BASELINE,
            n_blocks: max_possible_starts * 0.3 / BASELINE,
            n_pairing: if pair_magnitude > 0.0 {
                pair_magnitude / BASELINE
            } else {
                1.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MeridiemRules;

    fn referee(name: &str, effort: u8, max_hours: u32) -> Referee {
        let mut r = Referee::new(name, vec![1; 8], "", "");
        r.set_effort(effort);
        r.set_max_hours(max_hours);
        r
    }

    fn instance() -> (Vec<Referee>, Vec<Game>) {
        let refs = vec![
            referee("Avery", 2, 20),
            referee("Blake", 4, 20),
            referee("Casey", 3, 4),
        ];
        let games = vec![
            Game::new(1, "Monday", "6:30", "Court 1", "Open - Top Gun", 1, 2),
            Game::new(2, "Monday", "7:30", "Court 1", "Co-Rec - Just Fun", 1, 2),
        ];
        (refs, games)
    }

    #[test]
    fn cap_set_drops_referees_well_below_the_mean_cap() {
        let (refs, games) = instance();
        let index = SlotIndex::build(&games, &MeridiemRules::default());
        let norms = Normalizers::compute(&refs, &games, &index);
        // mean cap is 44/3 = 14.67; Casey (4) falls below 11.67.
        assert_eq!(norms.cap_set, vec![0, 1]);
    }

    #[test]
    fn means_are_taken_over_the_right_populations() {
        let (refs, games) = instance();
        let index = SlotIndex::build(&games, &MeridiemRules::default());
        let norms = Normalizers::compute(&refs, &games, &index);
        // effort over the cap set only, experience over everyone
        assert_eq!(norms.mu_effort, 3.0);
        assert_eq!(norms.mu_skill, 3.0);
        assert_eq!(norms.mu_difficulty, 3.0);
        assert_eq!(norms.mu_hours_expected, 2.0);
    }

    #[test]
    fn scaling_constants_divide_by_the_baseline() {
        let (refs, games) = instance();
        let index = SlotIndex::build(&games, &MeridiemRules::default());
        let norms = Normalizers::compute(&refs, &games, &index);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(norms.n_balance, 1.0 / BASELINE));
        assert!(close(norms.n_effort, 3.0 * 2.0 / BASELINE));
        assert!(close(norms.n_skill, 3.0 / BASELINE));
        // 3 refs, 1 day
        assert!(close(norms.n_blocks, 3.0 * 0.3 / BASELINE));
        // 4 * C(3,2) * 0.6 = 7.2
        assert!(close(norms.n_pairing, 7.2 / BASELINE));
    }

    #[test]
    fn single_referee_disables_the_pairing_scale() {
        let refs = vec![referee("Avery", 3, 20)];
        let games = vec![Game::new(1, "Monday", "6:30", "Court 1", "TBD", 1, 1)];
        let index = SlotIndex::build(&games, &MeridiemRules::default());
        let norms = Normalizers::compute(&refs, &games, &index);
        assert_eq!(norms.n_pairing, 1.0);
    }
}
