use crate::position::Position;

/// Type of visual feedback for an individual cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece stands here
    Origin,
    /// The selected piece may move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
}

/// Contains the set of cells and their associated feedback types for the current match state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by terminal rendering
/// (or any other [`BoardDisplay`](crate::BoardDisplay)) to highlight the selection. Highlighting
/// is derived from the logical selection every time; nothing in the core stores colours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Position, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all cell feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Position, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific cell, if any
    #[inline]
    pub fn get(&self, pos: Position) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a cell, replacing any previous entry
    pub fn set(&mut self, pos: Position, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(p, _)| *p == pos) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((pos, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Position, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Position, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// A cell the selected piece can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub to: Position,
    pub capture: bool,
}

/// Match state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the match.
pub trait FeedbackSource {
    /// The currently selected cell
    fn selected(&self) -> Option<Position>;

    /// Legal destinations of the selected piece
    fn targets(&self) -> &[Target];
}

/// Compute visual feedback based on the current selection.
///
/// Nothing is highlighted while idle. With a piece selected its cell is the
/// origin and every reachable cell is a destination or a capture.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let Some(from) = source.selected() else {
        return BoardFeedback::default();
    };

    std::iter::once((from, SquareFeedback::Origin))
        .chain(source.targets().iter().map(classify_target))
        .collect::<Vec<_>>()
        .into()
}

/// Classify a target as either a capture or regular destination
fn classify_target(target: &Target) -> (Position, SquareFeedback) {
    if target.capture {
        (target.to, SquareFeedback::Capture)
    } else {
        (target.to, SquareFeedback::Destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockFeedbackSource {
        selected: Option<Position>,
        targets: Vec<Target>,
    }

    impl FeedbackSource for MockFeedbackSource {
        fn selected(&self) -> Option<Position> {
            self.selected
        }

        fn targets(&self) -> &[Target] {
            &self.targets
        }
    }

    fn pos(s: &str) -> Position {
        s.parse().expect("test position should be valid")
    }

    #[test]
    fn test_no_feedback_when_idle() {
        let source = MockFeedbackSource {
            selected: None,
            targets: vec![Target {
                to: pos("e3"),
                capture: false,
            }],
        };

        let feedback = compute_feedback(&source);
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_selected_piece_without_targets_is_still_origin() {
        let source = MockFeedbackSource {
            selected: Some(pos("a1")),
            targets: Vec::new(),
        };

        let feedback = compute_feedback(&source);

        assert_eq!(feedback.squares(), &[(pos("a1"), SquareFeedback::Origin)]);
    }

    #[test]
    fn test_distinguish_captures() {
        let source = MockFeedbackSource {
            selected: Some(pos("e4")),
            targets: vec![
                Target {
                    to: pos("e5"),
                    capture: false,
                },
                Target {
                    to: pos("d5"),
                    capture: true,
                },
            ],
        };

        let feedback = compute_feedback(&source);

        assert_eq!(feedback.get(pos("e4")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(pos("e5")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(pos("d5")), Some(SquareFeedback::Capture));
        assert_eq!(feedback.get(pos("f5")), None);
    }

    #[test]
    fn test_set_replaces_existing_entry() {
        let mut feedback = BoardFeedback::new();
        feedback.set(pos("c3"), SquareFeedback::Destination);
        feedback.set(pos("c3"), SquareFeedback::Capture);

        assert_eq!(feedback.squares().len(), 1);
        assert_eq!(feedback.get(pos("c3")), Some(SquareFeedback::Capture));
    }
}
