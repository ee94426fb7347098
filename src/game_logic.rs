use thiserror::Error;

use crate::board::{Board, BoardError, Layout, Snapshot};
use crate::feedback::{FeedbackSource, Target, compute_feedback};
use crate::piece::Piece;
use crate::position::Position;
use crate::selection::{SelectionController, Transition};
use crate::{BoardDisplay, ClickSource};

/// Current match state snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    snapshot: Snapshot,
    selected: Option<Position>,
    targets: Vec<Target>,
    transition: Option<Transition>,
}

impl MatchState {
    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// What the last processed activation did, if any.
    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }
}

impl FeedbackSource for MatchState {
    fn selected(&self) -> Option<Position> {
        self.selected
    }

    fn targets(&self) -> &[Target] {
        &self.targets
    }
}

/// A match in progress: the board plus the click-driven selection state.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    selection: SelectionController,
    layout: Layout,
}

impl Match {
    /// Creates a match with the default layout.
    pub fn new() -> Result<Self, BoardError> {
        Self::with_layout(Layout::default())
    }

    pub fn with_layout(layout: Layout) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::with_layout(layout)?,
            selection: SelectionController::new(),
            layout,
        })
    }

    /// Creates a match from an already set up board.
    ///
    /// [`Self::reset`] on such a match clears the board.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            selection: SelectionController::new(),
            layout: Layout::Empty,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given position, if any
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.board.cell_at(pos)
    }

    #[inline]
    pub fn current_selection(&self) -> Option<Position> {
        self.selection.current_selection()
    }

    /// Process one `CellActivated` event.
    ///
    /// The state transition and any board mutation complete before this
    /// returns; the returned state reflects the board after the event.
    pub fn activate(&mut self, pos: Position) -> Result<MatchState, BoardError> {
        let transition = match self.selection.activate(&mut self.board, pos) {
            Ok(transition) => transition,
            Err(err) => {
                log::warn!("activation at {pos} failed: {err}");
                return Err(err);
            }
        };

        match transition {
            Transition::Moved {
                from,
                to,
                captured: Some(captured),
            } => log::info!("{from}-{to} captures {captured}"),
            Transition::Moved { from, to, .. } => log::info!("{from}-{to}"),
            Transition::Rejected { from, to } => log::debug!("{from}-{to} is not a legal move"),
            _ => {}
        }

        Ok(self.state_after(Some(transition)))
    }

    /// State for rendering without processing an event.
    pub fn state(&self) -> MatchState {
        self.state_after(None)
    }

    /// Put the board back to its starting layout and drop any selection.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        self.board = Board::with_layout(self.layout)?;
        self.selection.reset();
        log::info!("reset to {:?} layout", self.layout);
        Ok(())
    }

    fn state_after(&self, transition: Option<Transition>) -> MatchState {
        let selected = self.selection.current_selection();
        let targets = selected
            .and_then(|from| self.board.cell_at(from))
            .map(|piece| {
                piece
                    .destinations(&self.board)
                    .into_iter()
                    .map(|to| Target {
                        to,
                        capture: !self.board.is_empty(to),
                    })
                    .collect()
            })
            .unwrap_or_default();

        MatchState {
            snapshot: self.board.snapshot(),
            selected,
            targets,
            transition,
        }
    }
}

/// Error from [`run`]: either end of the loop failed, or the board did.
#[derive(Debug, Error)]
pub enum RunError<S, D> {
    #[error("click source failed: {0}")]
    Source(S),
    #[error("display failed: {0}")]
    Display(D),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Drive a match from `source` until it runs dry, showing the board after
/// every processed event.
pub fn run<S, D>(
    game: &mut Match,
    source: &mut S,
    display: &mut D,
) -> Result<(), RunError<S::Error, D::Error>>
where
    S: ClickSource,
    D: BoardDisplay,
{
    let state = game.state();
    display
        .show(state.snapshot(), &compute_feedback(&state))
        .map_err(RunError::Display)?;

    while let Some(pos) = source.next_click().map_err(RunError::Source)? {
        let state = game.activate(pos)?;
        display
            .show(state.snapshot(), &compute_feedback(&state))
            .map_err(RunError::Display)?;
    }
    Ok(())
}
