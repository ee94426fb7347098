use std::fmt;
use std::str::FromStr;

use shakmaty::{File, Rank, Square};
use thiserror::Error;

use crate::board::BoardError;

/// Number of cells along one edge of the board.
pub const BOARD_SIZE: u8 = 8;

/// Error when parsing algebraic notation such as `"e4"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid position notation: '{0}'")]
pub struct ParsePositionError(pub String);

/// A single cell address on the 8×8 board.
///
/// Files and ranks are exposed as 0-based indices: file 0 is `a`, rank 0 is
/// rank `1`. A `Position` can only hold in-range coordinates, so every lookup
/// keyed by it is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(Square);

impl Position {
    /// Creates a position from 0-based file and rank indices.
    pub fn new(file: i32, rank: i32) -> Result<Self, BoardError> {
        let size = i32::from(BOARD_SIZE);
        if !(0..size).contains(&file) || !(0..size).contains(&rank) {
            return Err(BoardError::InvalidPosition { file, rank });
        }
        Ok(Self(Square::from_coords(
            File::new(file as u32),
            Rank::new(rank as u32),
        )))
    }

    /// The underlying square.
    #[inline]
    pub const fn square(self) -> Square {
        self.0
    }

    /// 0-based file index (`a` = 0).
    #[inline]
    pub fn file(self) -> i32 {
        self.0.file() as i32
    }

    /// 0-based rank index (rank `1` = 0).
    #[inline]
    pub fn rank(self) -> i32 {
        self.0.rank() as i32
    }

    /// Dense index 0-63 (a1 = 0, h1 = 7, a8 = 56).
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// The position `(df, dr)` steps away, if it is still on the board.
    pub fn offset(self, df: i32, dr: i32) -> Option<Self> {
        Self::new(self.file() + df, self.rank() + dr).ok()
    }

    /// True when the two positions sit on neighbouring files.
    #[inline]
    pub fn is_adjacent_file(self, other: Position) -> bool {
        (self.file() - other.file()).abs() == 1
    }

    /// Translates a point in screen space into the cell under it.
    ///
    /// The board is drawn with rank 8 along the top edge and file `a` on the
    /// left, each cell `cell_size` pixels square. Points outside the board
    /// yield `None`.
    pub fn from_screen(x: f32, y: f32, cell_size: f32) -> Option<Self> {
        if cell_size <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let file = (x / cell_size) as i32;
        let row = (y / cell_size) as i32;
        Self::new(file, i32::from(BOARD_SIZE) - 1 - row).ok()
    }

    /// Iterates all 64 positions, rank by rank from a1 to h8.
    pub fn all() -> impl Iterator<Item = Position> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::from_coords(file, rank)))
            .map(Position)
    }

    /// Positions strictly between `self` and `to`, walking from `self`.
    ///
    /// Empty unless the two positions share a file, a rank, or a diagonal.
    pub fn between(self, to: Position) -> Vec<Position> {
        let df = to.file() - self.file();
        let dr = to.rank() - self.rank();
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if !aligned || (df == 0 && dr == 0) {
            return Vec::new();
        }

        let (step_f, step_r) = (df.signum(), dr.signum());
        let steps = df.abs().max(dr.abs());
        (1..steps)
            .filter_map(|i| self.offset(step_f * i, step_r * i))
            .collect()
    }
}

impl From<Square> for Position {
    fn from(square: Square) -> Self {
        Self(square)
    }
}

impl From<Position> for Square {
    fn from(position: Position) -> Self {
        position.0
    }
}

/// Parse algebraic notation like `"e4"` (case-insensitive).
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .to_ascii_lowercase()
            .parse::<Square>()
            .map(Position)
            .map_err(|_| ParsePositionError(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.file().char(), self.0.rank().char())
    }
}
