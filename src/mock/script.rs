use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::ClickSource;
use crate::position::Position;

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseError(String);

/// A scriptable click source that replays cells from a text script.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClicks {
    pending: VecDeque<Position>,
}

impl ScriptedClicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Cells are 2 characters (e.g., "e2", "a1"), each one click
    /// - Spaces and periods only separate clicks; use periods to mark
    ///   the end of a move for readability
    ///
    /// Examples:
    /// - `"e2e4."` - Select e2, then activate e4
    /// - `"e2 e4. e7 e5."` - Two moves
    /// - `"e2. e2."` - Select and deselect e2
    ///
    /// Nothing is queued if any cell fails to parse.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let clicks = parse_script(script)?;
        self.pending.extend(clicks);
        Ok(())
    }

    /// Number of clicks still queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Replay all pending clicks, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_click: F)
    where
        F: FnMut(Position),
    {
        while let Some(pos) = self.pending.pop_front() {
            on_click(pos);
        }
    }
}

impl ClickSource for ScriptedClicks {
    type Error = Infallible;

    fn next_click(&mut self) -> Result<Option<Position>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a click script into the cells it activates, in order.
fn parse_script(script: &str) -> Result<Vec<Position>, ParseError> {
    let mut clicks = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        if ch == '.' || ch.is_whitespace() {
            flush_token(&mut current_token, &mut clicks)?;
            continue;
        }

        current_token.push(ch);

        // Cells are exactly 2 characters (e.g., "e2", "a1")
        if current_token.chars().count() == 2 {
            flush_token(&mut current_token, &mut clicks)?;
        }
    }

    flush_token(&mut current_token, &mut clicks)?;
    Ok(clicks)
}

/// Add current token to the clicks and clear it.
fn flush_token(token: &mut String, clicks: &mut Vec<Position>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let pos: Position = token.parse().map_err(|_| ParseError(token.clone()))?;
        clicks.push(pos);
        token.clear();
    }
    Ok(())
}
