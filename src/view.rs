//! Pure derivations a presentation layer needs from a [`Session`].
//!
//! Nothing here mutates the session: the status line, which cells accept
//! input, and a text rendering of the board with the winning line marked.

use crate::board::{Cell, Mark, Outcome};
use crate::constants::{CELLS, N};
use crate::game::Session;

/// Human-readable status for the current state of the game.
pub fn status_text(session: &Session) -> String {
    match session.outcome() {
        Outcome::Win { mark: Mark::O, .. } if session.is_automated() => {
            "AI (O) wins!".to_string()
        }
        Outcome::Win { mark, .. } => format!("{mark} wins!"),
        Outcome::Draw => "It's a draw.".to_string(),
        Outcome::InProgress => {
            let current = session.current_player();
            if session.is_automated_turn() {
                format!("{current}'s turn (AI thinking…)")
            } else {
                format!("{current}'s turn")
            }
        }
    }
}

/// Whether a click on `index` should be accepted by the presentation layer.
pub fn cell_enabled(session: &Session, index: usize) -> bool {
    !session.is_over() && session.board().is_open(index) && !session.is_automated_turn()
}

/// Render the board as a 3x3 grid.
///
/// Empty cells show their index so a player can type it; cells on the
/// winning line are wrapped in brackets.
pub fn render_board(session: &Session) -> String {
    let line = session.outcome().line();
    let mut out = String::new();
    for row in 0..N {
        let cells: Vec<String> = (0..N)
            .map(|col| {
                let pt = row * N + col;
                let ch = match session.board().cells()[pt] {
                    Cell::Marked(m) => m.symbol(),
                    Cell::Empty => char::from_digit(pt as u32, 10).unwrap_or('?'),
                };
                if line.is_some_and(|l| l.contains(&pt)) {
                    format!("[{ch}]")
                } else {
                    format!(" {ch} ")
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        if row + 1 < N {
            out.push_str("\n---+---+---\n");
        }
    }
    out
}

/// Indices of every cell the presentation layer should enable.
pub fn enabled_cells(session: &Session) -> Vec<usize> {
    (0..CELLS).filter(|&i| cell_enabled(session, i)).collect()
}
