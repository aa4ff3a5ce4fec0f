//! Exhaustive minimax search.
//!
//! This module finds the game-theoretically optimal move for either mark:
//! - `O` (the automated player) maximizes, `X` minimizes
//! - Terminal positions score +10 (O wins), -10 (X wins), or 0 (draw)
//! - Wins are not discounted by depth
//! - Ties keep the first candidate in cell order
//!
//! The full game tree from the empty board is a little over half a million
//! positions, so the search walks it without pruning or memoization.

use tracing::debug;

use crate::board::{Board, Mark, Outcome};
use crate::constants::{DRAW_SCORE, LOSS_SCORE, WIN_SCORE};

/// Result of a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen cell, or `None` when the board is already terminal.
    pub best: Option<usize>,
    /// Minimax score from the automated player's point of view.
    pub score: i32,
    /// Number of positions visited.
    pub nodes: u64,
}

/// Score of a terminal outcome, or `None` if the game is still going.
fn terminal_score(outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::Win { mark, .. } if mark == Mark::AUTOMATED => Some(WIN_SCORE),
        Outcome::Win { .. } => Some(LOSS_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::InProgress => None,
    }
}

/// Search `board` with `player` to move and return the best move and its score.
///
/// The input board is never modified; every candidate is tried on a copy.
pub fn search(board: &Board, player: Mark) -> SearchResult {
    let mut nodes = 0;
    let (best, score) = minimax(board, player, &mut nodes);
    debug!(
        player = %player,
        best = ?best,
        score,
        nodes,
        "search finished"
    );
    SearchResult { best, score, nodes }
}

fn minimax(board: &Board, player: Mark, nodes: &mut u64) -> (Option<usize>, i32) {
    *nodes += 1;

    if let Some(score) = terminal_score(board.outcome()) {
        return (None, score);
    }

    let maximizing = player == Mark::AUTOMATED;
    let mut best: Option<(usize, i32)> = None;

    for pt in board.available_moves() {
        let next = board.with_mark(pt, player);
        let (_, score) = minimax(&next, player.opponent(), nodes);

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((pt, score));
        }
    }

    // An in-progress board always has an empty cell, so `best` is set.
    match best {
        Some((pt, score)) => (Some(pt), score),
        None => (None, DRAW_SCORE),
    }
}
