//! Two-phase move selection: a column digit, then a row digit.

use crate::HEIGHT;

/// Which half of a move the selector is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    /// The next digit picks a column.
    AwaitingColumn,
    /// The next digit picks a row.
    AwaitingRow,
}

/// The result of feeding one digit into the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The column is stored; a row digit is needed next.
    Partial,
    /// Both halves are in. `row`/`col` are board coordinates, ready for
    /// [`Board::place`](crate::Board::place).
    Complete { row: usize, col: usize },
}

/// Accumulates a player's two-phase selection into a committed move.
///
/// Pure state, no I/O. Owned by the session and fed only digits the
/// input gate already accepted. The selector returns to
/// [`MovePhase::AwaitingColumn`] after every completed move, whether or
/// not the placement it produced is ultimately legal — rejection and
/// re-prompting are the session's business.
#[derive(Debug, Clone, Default)]
pub struct MoveSelector {
    pending_column: Option<usize>,
}

impl MoveSelector {
    /// Creates a selector awaiting a column digit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> MovePhase {
        match self.pending_column {
            None => MovePhase::AwaitingColumn,
            Some(_) => MovePhase::AwaitingRow,
        }
    }

    /// Feeds one digit (0–2) into the selector.
    ///
    /// The first digit is the column and yields [`MoveOutcome::Partial`].
    /// The second digit is the row and yields [`MoveOutcome::Complete`].
    ///
    /// Row digits are labeled bottom-up on the rendered board while
    /// storage puts row 0 at the top, so the raw row choice is inverted
    /// here: `row = (HEIGHT - 1) - value`. The column passes through
    /// unchanged.
    pub fn submit(&mut self, value: usize) -> MoveOutcome {
        match self.pending_column.take() {
            None => {
                self.pending_column = Some(value);
                MoveOutcome::Partial
            }
            Some(col) => MoveOutcome::Complete {
                row: (HEIGHT - 1) - value,
                col,
            },
        }
    }

    /// Discards any pending column choice and returns to the column phase.
    pub fn reset(&mut self) {
        self.pending_column = None;
    }
}

// =========================================================================
// Tests
// =========================================================================
