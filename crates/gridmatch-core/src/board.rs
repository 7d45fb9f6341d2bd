//! The 3×3 board: cell occupancy, fullness, and win detection.

use serde::{Deserialize, Serialize};

/// Board width in cells.
pub const WIDTH: usize = 3;
/// Board height in cells.
pub const HEIGHT: usize = 3;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A player's fixed seat for the duration of a session.
///
/// Roles are assigned at invitation time and never change; which role
/// is allowed to move at a given instant is the turn owner, tracked by
/// the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    One,
    Two,
}

impl Role {
    /// The opposing seat. Turn alternation is `turn = turn.other()`.
    pub fn other(self) -> Self {
        match self {
            Role::One => Role::Two,
            Role::Two => Role::One,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::One => write!(f, "player 1"),
            Role::Two => write!(f, "player 2"),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The 3×3 grid of cell occupancy.
///
/// Cells are stored row-major with row 0 at the top. A cell goes from
/// empty to occupied exactly once and never back; the only mutating
/// operation is [`place`](Self::place), which refuses occupied cells.
///
/// Created empty at session start, never reset mid-session, discarded
/// with the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Role>; WIDTH * HEIGHT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the occupant of a cell, if any.
    ///
    /// Callers guarantee `row, col ∈ 0..3`.
    pub fn get(&self, row: usize, col: usize) -> Option<Role> {
        self.cells[row * WIDTH + col]
    }

    /// Places a marker for `role` at the given cell.
    ///
    /// Returns `false` without mutating anything if the cell is already
    /// occupied. Callers guarantee `row, col ∈ 0..3`; occupancy is the
    /// only condition checked here.
    pub fn place(&mut self, row: usize, col: usize, role: Role) -> bool {
        if self.get(row, col).is_some() {
            return false;
        }
        self.cells[row * WIDTH + col] = Some(role);
        true
    }

    /// Returns `true` iff every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Returns whether the top-row cell of `column` is still empty.
    ///
    /// Deliberately inspects a single cell, not the whole column: this
    /// mirrors the product's availability notion, which drives only
    /// which digit symbols get offered. The authoritative rejection of
    /// a bad target stays in [`place`](Self::place).
    pub fn column_available(&self, column: usize) -> bool {
        self.cells[column].is_none()
    }

    /// Scans for a completed line and returns its owner.
    ///
    /// Scan order is fixed for determinism: rows top to bottom, then
    /// columns left to right, then the upward diagonal, then the
    /// downward diagonal. The first complete line found wins. Multiple
    /// simultaneous lines can't arise from alternating single-cell
    /// placement, but the order is preserved so pathological boards
    /// still resolve deterministically.
    pub fn winner(&self) -> Option<Role> {
        for row in 0..HEIGHT {
            if let Some(role) = self.line_owner([(row, 0), (row, 1), (row, 2)]) {
                return Some(role);
            }
        }
        for col in 0..WIDTH {
            if let Some(role) = self.line_owner([(0, col), (1, col), (2, col)]) {
                return Some(role);
            }
        }
        if let Some(role) = self.line_owner([(2, 0), (1, 1), (0, 2)]) {
            return Some(role);
        }
        self.line_owner([(0, 0), (1, 1), (2, 2)])
    }

    /// Returns the owner of a line iff all three cells hold the same role.
    fn line_owner(&self, line: [(usize, usize); 3]) -> Option<Role> {
        let first = self.get(line[0].0, line[0].1)?;
        line[1..]
            .iter()
            .all(|&(row, col)| self.get(row, col) == Some(first))
            .then_some(first)
    }
}

// =========================================================================
// Tests
// =========================================================================
