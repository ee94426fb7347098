use board::Snapshot;
use position::Position;

pub mod board;
pub mod feedback;
pub mod game_logic;
pub mod piece;
pub mod position;
pub mod selection;

/// Trait for reading cell activations from the player.
///
/// Abstracts over pointer input (a window translating clicks through
/// [`Position::from_screen`]) and mock/scripted inputs, providing a uniform
/// interface for the match driver.
pub trait ClickSource {
    /// Error type for input read failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Wait for the next activated cell. `Ok(None)` means the input is closed.
    fn next_click(&mut self) -> Result<Option<Position>, Self::Error>;
}

/// Trait for displaying the board to the player.
///
/// Abstracts over real rendering and terminal output, providing a uniform
/// interface for the output side of the match loop. Mirrors [`ClickSource`]
/// on the input side.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board and the selection highlights.
    fn show(
        &mut self,
        snapshot: &Snapshot,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}

pub mod mock;
