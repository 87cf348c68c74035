use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-run scheduling configuration: hour caps and the weights of the
/// five soft objectives.
///
/// Weights live on a 0-10 scale where 0 disables a term and 2.5 is the
/// baseline emphasis. The facade recognises a closed set of option
/// names; anything else is ignored with a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleParams {
    pub max_hours_per_week: u32,
    pub max_hours_per_day: u32,
    pub weight_hour_balancing: f64,
    pub weight_skill_combo: f64,
    pub weight_low_skill_penalty: f64,
    pub weight_shift_block_penalty: f64,
    pub weight_effort_bonus: f64,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        ScheduleParams {
            max_hours_per_week: 20,
            max_hours_per_day: 8,
            weight_hour_balancing: 1.0,
            weight_skill_combo: 1.0,
            weight_low_skill_penalty: 1.0,
            weight_shift_block_penalty: 1.0,
            weight_effort_bonus: 1.0,
        }
    }
}

impl ScheduleParams {
    /// Apply a mapping of named options. Hour caps are clamped to
    /// nonnegative integers, weights to `[0, inf)`; unknown keys are
    /// warnings, not errors.
    pub fn apply(&mut self, options: &HashMap<String, f64>) {
        for (key, &value) in options {
            match key.as_str() {
                "max_hours_per_week" => self.max_hours_per_week = clamp_hours(value),
                "max_hours_per_day" => self.max_hours_per_day = clamp_hours(value),
                "weight_hour_balancing" => self.weight_hour_balancing = clamp_weight(value),
                "weight_skill_combo" => self.weight_skill_combo = clamp_weight(value),
                "weight_low_skill_penalty" => self.weight_low_skill_penalty = clamp_weight(value),
                "weight_shift_block_penalty" => {
                    self.weight_shift_block_penalty = clamp_weight(value)
                }
                "weight_effort_bonus" => self.weight_effort_bonus = clamp_weight(value),
                other => warn!("Ignoring unknown scheduling option: {}", other),
            }
        }
    }
}

fn clamp_hours(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

fn clamp_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
