pub mod board;
pub mod engine;

pub use board::{Colour, Side, Squares};
pub use engine::{GameEngine, GameStatus, Move, Outcome, Placement};
