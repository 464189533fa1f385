pub mod game_controller;
pub mod history;

pub use game_controller::*;
pub use history::*;
