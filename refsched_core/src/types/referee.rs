use serde::{Deserialize, Serialize};
use std::fmt;

/// A referee available for assignment.
///
/// Availability is a fixed-length 0/1 vector indexed by slot ordinal
/// (`day_index * |times| + time_index`). Experience and effort sit on a
/// 1-5 scale; setters clamp into that range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referee {
    name: String,
    availability: Vec<u8>,
    email: String,
    phone: String,
    experience: u8,
    effort: u8,
    max_hours: u32,
    assigned_games: Vec<u32>,
    optimized_games: Vec<u32>,
}

impl Referee {
    pub fn new(
        name: impl Into<String>,
        availability: Vec<u8>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Referee {
            name: name.into(),
            availability,
            email: email.into(),
            phone: phone.into(),
            experience: 3,
            effort: 3,
            max_hours: 20,
            assigned_games: Vec::new(),
            optimized_games: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn availability(&self) -> &[u8] {
        &self.availability
    }

    /// Availability bit at a slot ordinal; out-of-range indices read as
    /// unavailable so mismatched fixtures degrade instead of panicking.
    pub fn is_available(&self, slot: usize) -> bool {
        self.availability.get(slot).is_some_and(|&bit| bit != 0)
    }

    pub fn experience(&self) -> u8 {
        self.experience
    }

    pub fn set_experience(&mut self, experience: u8) {
        self.experience = experience.clamp(1, 5);
    }

    /// Experience rescaled from 1-5 to 0-1.
    pub fn experience_normalized(&self) -> f64 {
        f64::from(self.experience - 1) / 4.0
    }

    pub fn effort(&self) -> u8 {
        self.effort
    }

    pub fn set_effort(&mut self, effort: u8) {
        self.effort = effort.clamp(1, 5);
    }

    /// Effort rescaled from 1-5 to 0-1.
    pub fn effort_normalized(&self) -> f64 {
        f64::from(self.effort - 1) / 4.0
    }

    pub fn max_hours(&self) -> u32 {
        self.max_hours
    }

    pub fn set_max_hours(&mut self, max_hours: u32) {
        self.max_hours = max_hours;
    }

    /// Game numbers this referee was manually locked onto.
    pub fn assigned_games(&self) -> &[u32] {
        &self.assigned_games
    }

    pub fn set_assigned_games(&mut self, game_numbers: Vec<u32>) {
        self.assigned_games.clear();
        for number in game_numbers {
            self.add_assigned_game(number);
        }
    }

    pub fn add_assigned_game(&mut self, game_number: u32) {
        if !self.assigned_games.contains(&game_number) {
            self.assigned_games.push(game_number);
        }
    }

    pub fn remove_assigned_game(&mut self, game_number: u32) {
        self.assigned_games.retain(|&n| n != game_number);
    }

    pub fn clear_assigned_games(&mut self) {
        self.assigned_games.clear();
    }

    /// Game numbers placed on this referee by the optimizer. Written
    /// only by the solution writer.
    pub fn optimized_games(&self) -> &[u32] {
        &self.optimized_games
    }

    pub fn add_optimized_game(&mut self, game_number: u32) {
        if !self.optimized_games.contains(&game_number) {
            self.optimized_games.push(game_number);
        }
    }

    pub fn clear_optimized_games(&mut self) {
        self.optimized_games.clear();
    }
}

impl fmt::Display for Referee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ref: {}, Email: {}, Phone: {}",
            self.name, self.email, self.phone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_and_effort_clamp_to_scale() {
        let mut referee = Referee::new("Avery", vec![1, 1], "a@x.org", "555-0100");
        referee.set_experience(9);
        assert_eq!(referee.experience(), 5);
        referee.set_experience(0);
        assert_eq!(referee.experience(), 1);
        referee.set_effort(7);
        assert_eq!(referee.effort(), 5);
    }

    #[test]
    fn normalized_scales_map_1_to_5_onto_unit_interval() {
        let mut referee = Referee::new("Avery", vec![], "", "");
        referee.set_experience(1);
        assert_eq!(referee.experience_normalized(), 0.0);
        referee.set_experience(5);
        assert_eq!(referee.experience_normalized(), 1.0);
        referee.set_effort(3);
        assert_eq!(referee.effort_normalized(), 0.5);
    }

    #[test]
    fn manual_assignments_are_a_set() {
        let mut referee = Referee::new("Avery", vec![], "", "");
        referee.add_assigned_game(4);
        referee.add_assigned_game(4);
        referee.add_assigned_game(7);
        assert_eq!(referee.assigned_games(), &[4, 7]);
        referee.remove_assigned_game(4);
        assert_eq!(referee.assigned_games(), &[7]);
    }

    #[test]
    fn optimized_games_are_idempotent_and_clearable() {
        let mut referee = Referee::new("Avery", vec![], "", "");
        referee.add_optimized_game(12);
        referee.add_optimized_game(12);
        assert_eq!(referee.optimized_games(), &[12]);
        referee.clear_optimized_games();
        assert!(referee.optimized_games().is_empty());
    }

    #[test]
    fn out_of_range_availability_reads_as_unavailable() {
        let referee = Referee::new("Avery", vec![1, 0], "", "");
        assert!(referee.is_available(0));
        assert!(!referee.is_available(1));
        assert!(!referee.is_available(5));
    }
}
