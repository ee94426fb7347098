use std::fmt;

use crate::board::Board;
use crate::position::Position;

/// The player owning a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank step a pawn of this side advances by.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// 0-based rank of this side's back row.
    #[inline]
    pub const fn back_rank(self) -> i32 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// 0-based rank pawns of this side start on.
    #[inline]
    pub const fn pawn_rank(self) -> i32 {
        self.back_rank() + self.forward()
    }
}

impl From<Side> for shakmaty::Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => shakmaty::Color::White,
            Side::Black => shakmaty::Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl From<PieceKind> for shakmaty::Role {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => shakmaty::Role::Pawn,
            PieceKind::Rook => shakmaty::Role::Rook,
            PieceKind::Knight => shakmaty::Role::Knight,
            PieceKind::Bishop => shakmaty::Role::Bishop,
            PieceKind::Queen => shakmaty::Role::Queen,
            PieceKind::King => shakmaty::Role::King,
        }
    }
}

/// A piece standing on the board.
///
/// Pieces are owned by the [`Board`]; `position` always equals the key of the
/// cell holding the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    position: Position,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, side: Side, position: Position) -> Self {
        Self {
            kind,
            side,
            position,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Single letter for this piece: upper case for White, lower case for Black.
    pub fn char(&self) -> char {
        shakmaty::Piece {
            role: self.kind.into(),
            color: self.side.into(),
        }
        .char()
    }

    /// Decides whether this piece may move to `candidate` on the current board.
    ///
    /// Pure: evaluates geometry, path blocking and capture rules only. There is
    /// no notion of check, castling, en passant or promotion.
    pub fn legal_destination(&self, candidate: Position, board: &Board) -> bool {
        if candidate == self.position {
            return false;
        }
        // Never onto our own piece, whatever the kind.
        if board.occupant_side(candidate) == Some(self.side) {
            return false;
        }

        let df = candidate.file() - self.position.file();
        let dr = candidate.rank() - self.position.rank();

        match self.kind {
            PieceKind::Pawn => self.pawn_reaches(candidate, df, dr, board),
            PieceKind::Rook => (df == 0 || dr == 0) && self.slides_to(candidate, board),
            PieceKind::Bishop => df.abs() == dr.abs() && self.slides_to(candidate, board),
            PieceKind::Queen => {
                (df == 0 || dr == 0 || df.abs() == dr.abs()) && self.slides_to(candidate, board)
            }
            PieceKind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
            PieceKind::King => df.abs().max(dr.abs()) == 1,
        }
    }

    /// Every position [`Self::legal_destination`] accepts, in a1..h8 order.
    pub fn destinations(&self, board: &Board) -> Vec<Position> {
        Position::all()
            .filter(|&candidate| self.legal_destination(candidate, board))
            .collect()
    }

    fn pawn_reaches(&self, candidate: Position, df: i32, dr: i32, board: &Board) -> bool {
        let d = self.side.forward();

        if dr == d && df == 0 {
            board.is_empty(candidate)
        } else if dr == d && self.position.is_adjacent_file(candidate) {
            board.occupant_side(candidate) == Some(self.side.opposite())
        } else if dr == 2 * d && df == 0 {
            // The square being skipped must be empty as well.
            self.position.rank() == self.side.pawn_rank()
                && board.is_empty(candidate)
                && self.slides_to(candidate, board)
        } else {
            false
        }
    }

    /// Any occupied cell strictly between here and `to` blocks the slide.
    fn slides_to(&self, to: Position, board: &Board) -> bool {
        self.position
            .between(to)
            .into_iter()
            .all(|cell| board.is_empty(cell))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.char(), self.position)
    }
}
