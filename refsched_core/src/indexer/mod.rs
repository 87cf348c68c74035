//! Canonical `(day, time, within-slot ordinal)` indexing over the game
//! collection, plus the availability-vector index derived from it.

use crate::parser::clock::{parse_clock_label, MeridiemRules};
use crate::types::{Game, Referee};
use log::warn;
use std::collections::HashMap;

/// Fixed week order used to sort day labels.
pub const WEEK_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Minutes assumed for a time label the parser cannot read.
const FALLBACK_MINUTES: u32 = 12 * 60;

/// Slot-ordinal index over a game collection.
///
/// Days follow the fixed week order, times are chronological, and games
/// inside a slot are ordered by ascending game number. All lookups are
/// by index into the game slice the index was built from.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    days: Vec<String>,
    times: Vec<String>,
    // One entry per (day, time) slot, holding game indices sorted by
    // game number.
    slots: Vec<Vec<usize>>,
    by_number: HashMap<u32, (usize, usize, usize)>,
    g_max: usize,
}

impl SlotIndex {
    pub fn build(games: &[Game], rules: &MeridiemRules) -> Self {
        let mut days: Vec<String> = Vec::new();
        let mut times: Vec<String> = Vec::new();
        for game in games {
            if !days.iter().any(|d| d == game.day()) {
                days.push(game.day().to_string());
            }
            if !times.iter().any(|t| t == game.time()) {
                times.push(game.time().to_string());
            }
        }

        // Unknown day labels sort after the week, alphabetically, so
        // the ordering stays reproducible.
        days.sort_by_key(|day| (week_position(day), day.clone()));
        times.sort_by_key(|time| (clock_minutes(time, rules), time.clone()));

        let day_pos: HashMap<&str, usize> = days
            .iter()
            .enumerate()
            .map(|(i, d)| (d.as_str(), i))
            .collect();
        let time_pos: HashMap<&str, usize> = times
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let mut slots = vec![Vec::new(); days.len() * times.len()];
        for (idx, game) in games.iter().enumerate() {
            let d = day_pos[game.day()];
            let h = time_pos[game.time()];
            slots[d * times.len() + h].push(idx);
        }
        for slot in &mut slots {
            slot.sort_by_key(|&idx| games[idx].number());
        }

        let g_max = slots.iter().map(Vec::len).max().unwrap_or(0);

        let mut by_number = HashMap::new();
        for (d, _) in days.iter().enumerate() {
            for (h, _) in times.iter().enumerate() {
                for (g, &idx) in slots[d * times.len() + h].iter().enumerate() {
                    by_number.insert(games[idx].number(), (d, h, g));
                }
            }
        }

        SlotIndex {
            days,
            times,
            slots,
            by_number,
            g_max,
        }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// Largest number of games sharing a single `(day, time)` slot.
    pub fn g_max(&self) -> usize {
        self.g_max
    }

    pub fn slot_count(&self) -> usize {
        self.days.len() * self.times.len()
    }

    /// Index (into the originating game slice) of the `g`-th game at
    /// `(days[d], times[h])`, if one exists.
    pub fn game_at(&self, d: usize, h: usize, g: usize) -> Option<usize> {
        self.slots
            .get(d * self.times.len() + h)
            .and_then(|slot| slot.get(g))
            .copied()
    }

    /// Inverse lookup from a game number to its `(d, h, g)` triple.
    pub fn index_of(&self, game_number: u32) -> Option<(usize, usize, usize)> {
        self.by_number.get(&game_number).copied()
    }

    pub fn availability_index(&self, d: usize, h: usize) -> usize {
        d * self.times.len() + h
    }

    pub fn is_available(&self, referee: &Referee, d: usize, h: usize) -> bool {
        referee.is_available(self.availability_index(d, h))
    }
}

fn week_position(day: &str) -> usize {
    WEEK_ORDER
        .iter()
        .position(|&d| d == day)
        .unwrap_or(WEEK_ORDER.len())
}

fn clock_minutes(label: &str, rules: &MeridiemRules) -> u32 {
    match parse_clock_label(label, rules) {
        Ok(minutes) => minutes,
        Err(err) => {
            warn!("{}; assuming noon for ordering", err);
            FALLBACK_MINUTES
        }
    }
}
