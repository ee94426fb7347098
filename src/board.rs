use std::fmt;
use std::str::FromStr;

use shakmaty::{File, Rank, Square};
use thiserror::Error;

use crate::piece::{Piece, PieceKind, Side};
use crate::position::Position;

/// Errors raised by the board model.
///
/// All of these indicate a caller bug rather than a user mistake; illegal
/// destination clicks are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinates outside the 8×8 range.
    #[error("position out of range: file {file}, rank {rank}")]
    InvalidPosition { file: i32, rank: i32 },

    /// Setup tried to place a piece on a taken cell.
    #[error("cell {0} is already occupied")]
    OccupiedCell(Position),

    /// A move was requested from an empty cell.
    #[error("no piece on {0} to move")]
    EmptySource(Position),
}

/// Starting arrangement used to populate a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Pawns on each side's second rank, rooks on the four corners.
    #[default]
    Prototype,
    /// The standard chess starting array.
    Full,
    /// No pieces at all.
    Empty,
}

/// Error when parsing a [`Layout`] name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown layout '{0}' (expected prototype, full or empty)")]
pub struct ParseLayoutError(String);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prototype" => Ok(Layout::Prototype),
            "full" | "startpos" => Ok(Layout::Full),
            "empty" => Ok(Layout::Empty),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

impl Layout {
    /// Back-row kinds from file `a` to file `h`, `None` where the row stays empty.
    fn back_row(self) -> [Option<PieceKind>; 8] {
        use PieceKind::*;
        match self {
            Layout::Prototype => [
                Some(Rook),
                None,
                None,
                None,
                None,
                None,
                None,
                Some(Rook),
            ],
            Layout::Full => [
                Some(Rook),
                Some(Knight),
                Some(Bishop),
                Some(Queen),
                Some(King),
                Some(Bishop),
                Some(Knight),
                Some(Rook),
            ],
            Layout::Empty => [None; 8],
        }
    }

    fn has_pawns(self) -> bool {
        !matches!(self, Layout::Empty)
    }
}

/// The 64 cells of the board and the pieces on them.
///
/// The board is the only owner of pieces: a captured piece is dropped, never
/// relocated.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Creates a board populated with the given layout.
    pub fn with_layout(layout: Layout) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        board.populate(layout)?;
        Ok(board)
    }

    /// Adds the pieces of `layout` to this board.
    pub fn populate(&mut self, layout: Layout) -> Result<(), BoardError> {
        for side in [Side::White, Side::Black] {
            for (file, kind) in layout.back_row().into_iter().enumerate() {
                if let Some(kind) = kind {
                    self.place(kind, side, Position::new(file as i32, side.back_rank())?)?;
                }
            }
            if layout.has_pawns() {
                for file in 0..8 {
                    self.place(PieceKind::Pawn, side, Position::new(file, side.pawn_rank())?)?;
                }
            }
        }
        log::debug!("populated {layout:?} layout with {} pieces", self.pieces().count());
        Ok(())
    }

    /// Puts a new piece on an empty cell. Setup only.
    pub fn place(&mut self, kind: PieceKind, side: Side, pos: Position) -> Result<(), BoardError> {
        let cell = &mut self.cells[pos.index()];
        if cell.is_some() {
            return Err(BoardError::OccupiedCell(pos));
        }
        *cell = Some(Piece::new(kind, side, pos));
        Ok(())
    }

    /// The piece on `pos`, if any.
    #[inline]
    pub fn cell_at(&self, pos: Position) -> Option<&Piece> {
        self.cells[pos.index()].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.cell_at(pos).is_none()
    }

    #[inline]
    pub fn occupant_side(&self, pos: Position) -> Option<Side> {
        self.cell_at(pos).map(Piece::side)
    }

    /// Moves the piece on `from` to `to`, returning the piece captured there.
    ///
    /// Either fully applied or, when `from` is empty, not applied at all.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>, BoardError> {
        let mut piece = self.cells[from.index()]
            .take()
            .ok_or(BoardError::EmptySource(from))?;
        piece.set_position(to);
        Ok(self.cells[to.index()].replace(piece))
    }

    /// All pieces on the board, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Read-only copy of what stands where, for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.cells.map(|cell| cell.map(|piece| (piece.kind(), piece.side()))))
    }
}

/// Board text with rank 8 on top, one character per cell (`.` for empty).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let pos = Position::from(Square::from_coords(file, *rank));
                let c = self.cell_at(pos).map_or('.', Piece::char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("pieces", &self.pieces().map(ToString::to_string).collect::<Vec<_>>())
            .finish()
    }
}

/// Kind and side of every occupied cell at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot([Option<(PieceKind, Side)>; 64]);

impl Snapshot {
    #[inline]
    pub fn get(&self, pos: Position) -> Option<(PieceKind, Side)> {
        self.0[pos.index()]
    }

    /// Every position with its occupant, a1 to h8.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<(PieceKind, Side)>)> + '_ {
        Position::all().map(|pos| (pos, self.get(pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pos(s: &str) -> Position {
        s.parse().expect("test position should be valid")
    }

    #[test]
    fn test_prototype_layout() {
        let board = Board::with_layout(Layout::Prototype).unwrap();

        for p in Position::all() {
            let expected = match (p.file(), p.rank()) {
                (_, 1) => Some((PieceKind::Pawn, Side::White)),
                (_, 6) => Some((PieceKind::Pawn, Side::Black)),
                (0 | 7, 0) => Some((PieceKind::Rook, Side::White)),
                (0 | 7, 7) => Some((PieceKind::Rook, Side::Black)),
                _ => None,
            };
            let actual = board.cell_at(p).map(|piece| (piece.kind(), piece.side()));
            assert_eq!(actual, expected, "unexpected occupant on {p}");
        }
    }

    #[test]
    fn test_piece_positions_match_their_cells() {
        let board = Board::with_layout(Layout::Full).unwrap();
        assert_eq!(board.pieces().count(), 32);
        for p in Position::all() {
            if let Some(piece) = board.cell_at(p) {
                assert_eq!(piece.position(), p);
            }
        }
    }

    #[test]
    fn test_full_layout_text() {
        let board = Board::with_layout(Layout::Full).unwrap();
        assert_eq!(
            board.to_string(),
            "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n"
        );
    }

    #[test]
    fn test_empty_layout() {
        let board = Board::with_layout(Layout::Empty).unwrap();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board, Board::empty());
    }

    #[test_case("prototype", Layout::Prototype)]
    #[test_case("FULL", Layout::Full)]
    #[test_case("startpos", Layout::Full)]
    #[test_case(" empty ", Layout::Empty)]
    fn test_layout_from_str(s: &str, expected: Layout) {
        assert_eq!(s.parse::<Layout>(), Ok(expected));
    }

    #[test]
    fn test_layout_from_str_unknown() {
        assert!("chess960".parse::<Layout>().is_err());
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Side::White, pos("a1")).unwrap();

        let result = board.place(PieceKind::Pawn, Side::Black, pos("a1"));

        assert_eq!(result, Err(BoardError::OccupiedCell(pos("a1"))));
        assert_eq!(board.cell_at(pos("a1")).unwrap().kind(), PieceKind::Rook);
    }

    #[test]
    fn test_populate_twice_conflicts() {
        let mut board = Board::with_layout(Layout::Prototype).unwrap();
        assert_eq!(
            board.populate(Layout::Prototype),
            Err(BoardError::OccupiedCell(pos("a1")))
        );
    }

    #[test]
    fn test_queries() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Side::Black, pos("c7")).unwrap();

        assert!(board.is_empty(pos("c6")));
        assert!(!board.is_empty(pos("c7")));
        assert_eq!(board.occupant_side(pos("c7")), Some(Side::Black));
        assert_eq!(board.occupant_side(pos("c6")), None);
    }

    #[test]
    fn test_move_piece_relocates_and_updates_position() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Side::White, pos("e2")).unwrap();

        let captured = board.move_piece(pos("e2"), pos("e4")).unwrap();

        assert_eq!(captured, None);
        assert!(board.is_empty(pos("e2")));
        let piece = board.cell_at(pos("e4")).unwrap();
        assert_eq!(piece.position(), pos("e4"));
        assert_eq!(piece.kind(), PieceKind::Pawn);
    }

    #[test]
    fn test_move_piece_captures() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Side::White, pos("a1")).unwrap();
        board.place(PieceKind::Pawn, Side::Black, pos("a5")).unwrap();

        let captured = board.move_piece(pos("a1"), pos("a5")).unwrap();

        let captured = captured.expect("black pawn should be captured");
        assert_eq!(captured.kind(), PieceKind::Pawn);
        assert_eq!(captured.side(), Side::Black);
        assert_eq!(board.occupant_side(pos("a5")), Some(Side::White));
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_move_piece_from_empty_leaves_board_unchanged() {
        let mut board = Board::with_layout(Layout::Prototype).unwrap();
        let before = board.clone();

        let result = board.move_piece(pos("e4"), pos("e5"));

        assert_eq!(result, Err(BoardError::EmptySource(pos("e4"))));
        assert_eq!(board, before);
        assert_eq!(board.snapshot(), before.snapshot());
    }

    #[test]
    fn test_move_piece_onto_itself_is_noop() {
        let mut board = Board::with_layout(Layout::Prototype).unwrap();
        let before = board.clone();

        assert_eq!(board.move_piece(pos("a1"), pos("a1")), Ok(None));
        assert_eq!(board, before);
    }

    #[test]
    fn test_snapshot_reflects_board() {
        let board = Board::with_layout(Layout::Prototype).unwrap();
        let snapshot = board.snapshot();

        assert_eq!(snapshot.get(pos("h1")), Some((PieceKind::Rook, Side::White)));
        assert_eq!(snapshot.get(pos("b7")), Some((PieceKind::Pawn, Side::Black)));
        assert_eq!(snapshot.get(pos("d4")), None);
        assert_eq!(snapshot.iter().filter(|(_, cell)| cell.is_some()).count(), 20);
    }
}
