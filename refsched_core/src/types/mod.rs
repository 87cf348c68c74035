pub mod game;
pub mod referee;

pub use game::Game;
pub use referee::Referee;
