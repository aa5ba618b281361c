use serde::{Deserialize, Serialize};

use super::board::{Board, Colour, Side, Squares};
use crate::error::MoveError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Active,
    Finished,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outcome {
    Win { colour: Colour },
    Tie,
    /// The named colour left before the game was decided.
    Abandoned { colour: Colour },
}

impl Outcome {
    pub fn winner(&self) -> Option<Colour> {
        match self {
            Outcome::Win { colour } => Some(*colour),
            Outcome::Tie | Outcome::Abandoned { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub side: Side,
}

/// Where an accepted move landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
}

/// Read-only projection of the engine used for broadcasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub squares: Squares,
    pub current_player: Option<Colour>,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    pub move_count: u32,
}

/// Turn, status and outcome bookkeeping around a single board.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    turn: Option<Colour>,
    status: GameStatus,
    outcome: Option<Outcome>,
    win_length: usize,
    move_count: u32,
}

impl GameEngine {
    pub fn new(size: usize, win_length: usize) -> Self {
        GameEngine {
            board: Board::new(size),
            turn: Some(Colour::Red),
            status: GameStatus::Waiting,
            outcome: None,
            win_length,
            move_count: 0,
        }
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn turn(&self) -> Option<Colour> {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Moves from `waiting` to `active`. Returns false if the game was not waiting.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Waiting {
            return false;
        }
        self.status = GameStatus::Active;
        true
    }

    /// Validate and apply a move for `colour`.
    ///
    /// On success the piece is placed and the game either finishes (win or
    /// tie) or hands the turn to the other colour. On error nothing changes.
    pub fn apply_move(&mut self, colour: Colour, mv: Move) -> Result<Placement, MoveError> {
        if self.status != GameStatus::Active {
            return Err(MoveError::GameNotActive);
        }
        if self.turn != Some(colour) {
            return Err(MoveError::NotYourTurn);
        }
        if mv.row >= self.board.size() {
            return Err(MoveError::InvalidRow);
        }

        let column = self.board.place(mv.row, mv.side, colour)?;
        self.move_count += 1;

        if self.board.longest_run_through(mv.row, column) >= self.win_length {
            self.finish(Outcome::Win { colour });
        } else if self.board.is_full() {
            self.finish(Outcome::Tie);
        } else {
            self.turn = Some(colour.other());
        }

        Ok(Placement {
            row: mv.row,
            column,
        })
    }

    /// Ends an undecided game because `colour` left. Returns false if the game
    /// had already finished.
    pub fn abandon(&mut self, colour: Colour) -> bool {
        if self.status == GameStatus::Finished {
            return false;
        }
        self.finish(Outcome::Abandoned { colour });
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            squares: self.board.squares().clone(),
            current_player: self.turn,
            status: self.status,
            outcome: self.outcome,
            move_count: self.move_count,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = GameStatus::Finished;
        self.outcome = Some(outcome);
        self.turn = None;
    }
}
