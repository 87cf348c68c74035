use serde::{Deserialize, Serialize};
use std::fmt;

/// A single game on the weekly schedule.
///
/// Identity is the game number. `refs` holds the names of assigned
/// referees and is written only by the solution writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    number: u32,
    day: String,
    time: String,
    location: String,
    difficulty: String,
    min_refs: u32,
    max_refs: u32,
    refs: Vec<String>,
}

impl Game {
    pub fn new(
        number: u32,
        day: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
        difficulty: impl Into<String>,
        min_refs: u32,
        max_refs: u32,
    ) -> Self {
        Game {
            number,
            day: day.into(),
            time: time.into(),
            location: location.into(),
            difficulty: difficulty.into(),
            min_refs,
            max_refs,
            refs: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: impl Into<String>) {
        self.difficulty = difficulty.into();
    }

    pub fn min_refs(&self) -> u32 {
        self.min_refs
    }

    pub fn set_min_refs(&mut self, min_refs: u32) {
        self.min_refs = min_refs;
    }

    pub fn max_refs(&self) -> u32 {
        self.max_refs
    }

    pub fn set_max_refs(&mut self, max_refs: u32) {
        self.max_refs = max_refs.max(1);
    }

    /// Names of the referees currently assigned to this game.
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    pub fn set_refs(&mut self, refs: Vec<String>) {
        self.refs.clear();
        for name in refs {
            self.add_ref(name);
        }
    }

    pub fn add_ref(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.refs.contains(&name) {
            self.refs.push(name);
        }
    }

    pub fn remove_ref(&mut self, name: &str) {
        self.refs.retain(|n| n != name);
    }

    pub fn clear_refs(&mut self) {
        self.refs.clear();
    }

    pub fn ref_count(&self) -> usize {
        self.refs.len()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.refs.len() as u32 >= self.min_refs
    }

    pub fn is_overstaffed(&self) -> bool {
        self.refs.len() as u32 > self.max_refs
    }

    pub fn can_add_ref(&self) -> bool {
        (self.refs.len() as u32) < self.max_refs
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = if self.refs.is_empty() {
            "No refs assigned".to_string()
        } else {
            self.refs.join(", ")
        };
        write!(
            f,
            "Game {}: {} at {}, {}, Difficulty: {}, Refs: {} ({}/{}-{})",
            self.number,
            self.day,
            self.time,
            self.location,
            self.difficulty,
            names,
            self.refs.len(),
            self.min_refs,
            self.max_refs
        )
    }
}
