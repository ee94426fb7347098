use crate::board::{Board, BoardError};
use crate::piece::Piece;
use crate::position::Position;

/// Where the two-click move input currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Idle,
    /// A piece on this cell is waiting for its destination.
    Awaiting(Position),
}

/// Outcome of feeding one cell activation to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Empty cell activated with nothing selected.
    Ignored(Position),
    /// Piece picked up.
    Selected(Position),
    /// Selected cell activated again.
    Deselected(Position),
    /// Move applied, possibly capturing a piece.
    Moved {
        from: Position,
        to: Position,
        captured: Option<Piece>,
    },
    /// Destination not reachable; selection dropped, board untouched.
    Rejected { from: Position, to: Position },
}

/// Turns `CellActivated` events into selections and moves.
///
/// Any piece may be selected: there is no turn order.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: Selection::Idle,
        }
    }

    #[inline]
    pub const fn state(&self) -> Selection {
        self.state
    }

    /// The selected cell, for highlighting.
    #[inline]
    pub const fn current_selection(&self) -> Option<Position> {
        match self.state {
            Selection::Idle => None,
            Selection::Awaiting(pos) => Some(pos),
        }
    }

    /// Drops any selection.
    pub fn reset(&mut self) {
        self.state = Selection::Idle;
    }

    /// Processes one activated cell against `board`.
    ///
    /// After a destination click the controller is always back to
    /// [`Selection::Idle`], whether or not a move was applied. Fails with
    /// [`BoardError::EmptySource`] if the selected cell emptied out since it
    /// was picked.
    pub fn activate(&mut self, board: &mut Board, pos: Position) -> Result<Transition, BoardError> {
        let transition = match std::mem::take(&mut self.state) {
            Selection::Idle => {
                if board.is_empty(pos) {
                    Transition::Ignored(pos)
                } else {
                    self.state = Selection::Awaiting(pos);
                    Transition::Selected(pos)
                }
            }
            Selection::Awaiting(from) if from == pos => Transition::Deselected(pos),
            Selection::Awaiting(from) => {
                let piece = *board.cell_at(from).ok_or(BoardError::EmptySource(from))?;
                if piece.legal_destination(pos, board) {
                    let captured = board.move_piece(from, pos)?;
                    Transition::Moved {
                        from,
                        to: pos,
                        captured,
                    }
                } else {
                    Transition::Rejected { from, to: pos }
                }
            }
        };

        log::debug!("{pos}: {transition:?} -> {:?}", self.state);
        Ok(transition)
    }
}
