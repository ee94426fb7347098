use std::io::{self, Write};

use shakmaty::{File, Rank, Square};

use crate::BoardDisplay;
use crate::board::Snapshot;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::piece::{PieceKind, Side};
use crate::position::Position;

/// Terminal-based board display for development and testing.
///
/// Renders a [`Snapshot`] as an 8×8 grid of piece letters, with ANSI
/// color-coded backgrounds for the [`BoardFeedback`] highlights.
#[derive(Debug)]
pub struct TerminalDisplay<W = io::Stdout> {
    out: W,
}

impl TerminalDisplay {
    /// Create a display writing to stdout.
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Create a display writing to any writer.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, snapshot: &Snapshot, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.out, snapshot, feedback)
    }
}

/// Render the board to any writer, rank 8 on top.
fn render_board(
    w: &mut impl Write,
    snapshot: &Snapshot,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for rank in Rank::ALL.iter().rev() {
        write!(w, " {} ", rank.char())?;
        for file in File::ALL {
            let pos = Position::from(Square::from_coords(file, *rank));
            let symbol = piece_symbol(snapshot.get(pos));
            match background(feedback.get(pos)) {
                Some(bg) => write!(w, "{bg} {symbol} \x1b[0m")?,
                None => write!(w, " {symbol} ")?,
            }
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Letter for an occupant: upper case White, lower case Black.
fn piece_symbol(occupant: Option<(PieceKind, Side)>) -> char {
    let Some((kind, side)) = occupant else {
        return '·';
    };
    let c = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Rook => 'r',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match side {
        Side::White => c.to_ascii_uppercase(),
        Side::Black => c,
    }
}

/// Map a feedback variant to an ANSI background escape.
fn background(feedback: Option<SquareFeedback>) -> Option<&'static str> {
    match feedback? {
        SquareFeedback::Origin => Some("\x1b[43m"),
        SquareFeedback::Destination => Some("\x1b[44m"),
        SquareFeedback::Capture => Some("\x1b[41m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Layout};

    fn pos(s: &str) -> Position {
        s.parse().expect("test position should be valid")
    }

    fn render_to_string(snapshot: &Snapshot, feedback: &BoardFeedback) -> String {
        let mut display = TerminalDisplay::with_writer(Vec::new());
        display
            .show(snapshot, feedback)
            .expect("rendering to buffer should succeed");
        String::from_utf8(display.into_inner()).expect("output should be valid UTF-8")
    }

    fn prototype() -> Snapshot {
        Board::with_layout(Layout::Prototype).unwrap().snapshot()
    }

    #[test]
    fn show_contains_all_ranks_and_files() {
        let output = render_to_string(&prototype(), &BoardFeedback::new());

        for rank in '1'..='8' {
            assert!(
                output.contains(&format!(" {rank} ")),
                "output should contain rank label '{rank}'"
            );
        }
        assert!(
            output.contains("a  b  c  d  e  f  g  h"),
            "output should contain file labels"
        );
    }

    #[test]
    fn show_prototype_rows() {
        let output = render_to_string(&prototype(), &BoardFeedback::new());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], " 8  r  ·  ·  ·  ·  ·  ·  r ");
        assert_eq!(lines[1], " 7  p  p  p  p  p  p  p  p ");
        assert_eq!(lines[4], " 4  ·  ·  ·  ·  ·  ·  ·  · ");
        assert_eq!(lines[6], " 2  P  P  P  P  P  P  P  P ");
        assert_eq!(lines[7], " 1  R  ·  ·  ·  ·  ·  ·  R ");
    }

    #[test]
    fn show_origin_uses_yellow_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(pos("e2"), SquareFeedback::Origin);

        let output = render_to_string(&prototype(), &feedback);

        assert!(output.contains("\x1b[43m P \x1b[0m"));
    }

    #[test]
    fn show_destination_uses_blue_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(pos("e4"), SquareFeedback::Destination);

        let output = render_to_string(&prototype(), &feedback);

        assert!(output.contains("\x1b[44m · \x1b[0m"));
    }

    #[test]
    fn show_capture_uses_red_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(pos("d7"), SquareFeedback::Capture);

        let output = render_to_string(&prototype(), &feedback);

        assert!(output.contains("\x1b[41m p \x1b[0m"));
    }

    #[test]
    fn empty_feedback_has_no_ansi_codes() {
        let output = render_to_string(&prototype(), &BoardFeedback::new());

        assert!(
            !output.contains('\x1b'),
            "empty feedback should have no ANSI codes"
        );
    }
}
