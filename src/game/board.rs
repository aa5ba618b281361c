use serde::{Deserialize, Serialize};

use crate::error::MoveError;

/// The two piece colours. Red always moves first.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Black,
}

impl Colour {
    pub fn other(self) -> Colour {
        match self {
            Colour::Red => Colour::Black,
            Colour::Black => Colour::Red,
        }
    }
}

/// The end of a row a piece is dropped in from.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

pub type Squares = Vec<Vec<Option<Colour>>>;

/// N×N grid where pieces slide in from either end of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Squares,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Option<Colour> {
        self.cells[row][col]
    }

    pub fn squares(&self) -> &Squares {
        &self.cells
    }

    #[cfg(test)]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .map_or(true, |cells| cells.iter().all(Option::is_some))
    }

    /// Drop a piece into `row` from `side`, returns the column where it landed.
    ///
    /// The scan walks strictly inward from the insertion side and stops at the
    /// first empty cell, so a piece never passes over a gap.
    pub fn place(&mut self, row: usize, side: Side, colour: Colour) -> Result<usize, MoveError> {
        let cells = self.cells.get_mut(row).ok_or(MoveError::InvalidRow)?;

        let col = match side {
            Side::Left => cells.iter().position(Option::is_none),
            Side::Right => cells.iter().rposition(Option::is_none),
        }
        .ok_or(MoveError::RowFull)?;

        cells[col] = Some(colour);
        Ok(col)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Length of the longest same-coloured run through (row, col) along each
    /// of the four line directions, returning the best one.
    pub fn longest_run_through(&self, row: usize, col: usize) -> usize {
        let Some(colour) = self.get(row, col) else {
            return 0;
        };

        // horizontal, vertical, diagonal \, diagonal /
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| {
                1 + self.count_from(row, col, dr, dc, colour)
                    + self.count_from(row, col, -dr, -dc, colour)
            })
            .max()
            .unwrap_or(1)
    }

    /// Count consecutive `colour` cells stepping away from (row, col), excluding the origin.
    fn count_from(&self, row: usize, col: usize, dr: isize, dc: isize, colour: Colour) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.in_bounds(r, c) && self.cells[r as usize][c as usize] == Some(colour) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size
    }
}
