//! Rendering the game state into a display payload.
//!
//! Pure functions from state to text; the session decides *when* to
//! render and what the status line says.

use gridmatch_core::{Board, HEIGHT, MovePhase, Role, WIDTH};
use gridmatch_protocol::{Digit, PlayerHandle};

/// Glyph for an empty cell.
const EMPTY_GLYPH: &str = ":black_square_button:";
/// Glyph for a cell held by player one.
const PLAYER_ONE_GLYPH: &str = ":x:";
/// Glyph for a cell held by player two.
const PLAYER_TWO_GLYPH: &str = ":o:";
/// Phase marker shown while a column digit is expected.
const COLUMN_MARKER: &str = ":arrow_right:";
/// Phase marker shown while a row digit is expected.
const ROW_MARKER: &str = ":arrow_up:";

fn cell_glyph(cell: Option<Role>) -> &'static str {
    match cell {
        None => EMPTY_GLYPH,
        Some(Role::One) => PLAYER_ONE_GLYPH,
        Some(Role::Two) => PLAYER_TWO_GLYPH,
    }
}

fn phase_marker(phase: MovePhase) -> &'static str {
    match phase {
        MovePhase::AwaitingColumn => COLUMN_MARKER,
        MovePhase::AwaitingRow => ROW_MARKER,
    }
}

/// Renders the invitation payload published when a session opens.
pub fn render_invitation(
    challenger: &PlayerHandle,
    invitee: &PlayerHandle,
) -> String {
    format!(
        "{challenger} wants to play with you {invitee}, \
         do you accept the challenge?"
    )
}

/// Renders the full game payload: header, board, phase line, status.
///
/// Deterministic layout: three board lines of three glyphs each, every
/// line prefixed by its bottom-origin digit label (the top line carries
/// `3`, the bottom line `1`, matching how row digits are submitted),
/// then the phase marker followed by the three digit symbols, then the
/// free-text status line.
pub fn render_match(
    board: &Board,
    players: &[PlayerHandle; 2],
    phase: MovePhase,
    status: &str,
) -> String {
    let mut out = format!(
        "{PLAYER_ONE_GLYPH} {} - {} {PLAYER_TWO_GLYPH}\n\n",
        players[0], players[1]
    );

    for row in 0..HEIGHT {
        // Bottom-origin labels: storage row 0 (top) is labeled "3".
        let label = Digit::ALL[(HEIGHT - 1) - row];
        out.push_str(label.as_str());
        for col in 0..WIDTH {
            out.push_str(cell_glyph(board.get(row, col)));
        }
        out.push('\n');
    }

    out.push_str(phase_marker(phase));
    for digit in Digit::ALL {
        out.push_str(digit.as_str());
    }
    out.push_str("\n\n");
    out.push_str(status);
    out
}

// =========================================================================
// Tests
// =========================================================================
