use colored::*;
use refsched_core::{Game, Referee, Scheduler};
use std::collections::HashMap;

fn main() {
    env_logger::init();

    let mut avery = Referee::new("Avery", vec![1, 1, 1, 1, 1, 1], "avery@league.org", "555-0101");
    avery.set_experience(5);
    avery.set_effort(4);
    let mut blake = Referee::new("Blake", vec![1, 1, 1, 0, 1, 1], "blake@league.org", "555-0102");
    blake.set_experience(2);
    let mut casey = Referee::new("Casey", vec![0, 1, 1, 1, 1, 1], "casey@league.org", "555-0103");
    casey.set_experience(3);
    casey.set_effort(5);
    // Casey already promised to take game 4.
    casey.add_assigned_game(4);

    let games = vec![
        Game::new(1, "Monday", "6:30 PM", "Court 1", "Co-Rec - Just Fun", 1, 2),
        Game::new(2, "Monday", "7:30 PM", "Court 1", "Open - Just Fun", 1, 2),
        Game::new(3, "Monday", "8:30 PM", "Court 2", "Womens", 1, 2),
        Game::new(4, "Wednesday", "6:30 PM", "Court 1", "Open - Top Gun", 2, 2),
        Game::new(5, "Wednesday", "7:30 PM", "Court 1", "Co-Rec - Top Gun", 1, 2),
        Game::new(6, "Wednesday", "8:30 PM", "Court 2", "Open - Just Fun", 1, 2),
    ];

    let mut scheduler = Scheduler::new(vec![avery, blake, casey], games);

    let mut options = HashMap::new();
    options.insert("max_hours_per_week".to_string(), 6.0);
    options.insert("weight_hour_balancing".to_string(), 2.5);
    scheduler.set_parameters(&options);

    match scheduler.optimize() {
        Ok(report) => {
            println!("{}", "--- Optimized schedule ---".yellow().bold());
            for record in &report.assignments {
                println!(
                    "  {} {} | game {} at {} ({}) -> {}",
                    record.day,
                    record.time,
                    record.game_number,
                    record.location,
                    record.difficulty,
                    record.ref_name.cyan()
                );
            }
            println!(
                "Hours: min {} / mean {:.2} / max {}",
                report.hour_stats.min, report.hour_stats.mean, report.hour_stats.max
            );
            println!("Objective: {:.4}", report.objective);
        }
        Err(err) => eprintln!("{} {}", "Scheduling failed:".red().bold(), err),
    }
}
