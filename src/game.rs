//! Game session: the single source of truth for board, turn, and termination.
//!
//! A [`Session`] owns one [`Board`], the mark to move, and a terminal flag.
//! It is mutated only through [`Session::apply_move`], [`Session::reset`],
//! and [`Session::set_automated`]. The outcome is derived from the board on
//! every query.
//!
//! Turn order is the caller's responsibility: `apply_move` accepts a move
//! for either mark, and [`Session::play`] is the shorthand for "whoever is
//! to move".
//!
//! ## Deferred automated turns
//!
//! The automated reply is scheduled and fired in two steps. Scheduling
//! hands out a [`PendingTurn`] that records the session generation; firing
//! re-checks the session and does nothing if the token went stale, e.g.
//! because the game was restarted in between.

use tracing::{debug, info, trace};

use crate::board::{Board, Mark, Outcome};
use crate::search::search;

/// Token for an automated turn that has been scheduled but not yet played.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    generation: u64,
}

/// One game of tic-tac-toe, optionally against the automated player.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    current: Mark,
    over: bool,
    automated: bool,
    /// Bumped on every reset; used to detect stale pending turns.
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Session {
    /// Create a new session with automated play on or off.
    pub fn new(automated: bool) -> Self {
        Self {
            board: Board::new(),
            current: Mark::FIRST,
            over: false,
            automated,
            generation: 0,
        }
    }

    /// Create a session from an arbitrary position.
    ///
    /// The terminal flag is derived from the board, so loading a finished
    /// position yields a frozen session.
    pub fn from_board(board: Board, to_move: Mark, automated: bool) -> Self {
        Self {
            board,
            current: to_move,
            over: board.outcome().is_terminal(),
            automated,
            generation: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_automated(&self) -> bool {
        self.automated
    }

    /// Whether the automated player is the one to move in a live game.
    pub fn is_automated_turn(&self) -> bool {
        self.automated && !self.over && self.current == Mark::AUTOMATED
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Place `player`'s mark at `index`.
    ///
    /// Rejected (returns false, nothing changes) when the game is over,
    /// `index` is off the board, or the cell is taken. On success the turn
    /// passes to `player`'s opponent unless the move ended the game, in
    /// which case the session freezes with the current player unchanged.
    pub fn apply_move(&mut self, index: usize, player: Mark) -> bool {
        if self.over {
            trace!(index, %player, "move rejected: game over");
            return false;
        }
        if !self.board.place(index, player) {
            trace!(index, %player, "move rejected: cell unavailable");
            return false;
        }

        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            self.over = true;
            info!(?outcome, "game over");
        } else {
            self.current = player.opponent();
        }
        debug!(index, %player, next = %self.current, "move applied");
        true
    }

    /// Play `index` for the mark currently to move.
    pub fn play(&mut self, index: usize) -> bool {
        self.apply_move(index, self.current)
    }

    /// Clear the board and hand the first move back to `X`.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current = Mark::FIRST;
        self.over = false;
        self.generation += 1;
        debug!(generation = self.generation, "session reset");
    }

    /// Replace the position with `board`, `to_move` to play next.
    ///
    /// Counts as a restart: pending automated turns become stale.
    pub fn load(&mut self, board: Board, to_move: Mark) {
        self.board = board;
        self.current = to_move;
        self.over = board.outcome().is_terminal();
        self.generation += 1;
        debug!(generation = self.generation, over = self.over, "position loaded");
    }

    /// Switch automated play on or off. Always starts a new game.
    pub fn set_automated(&mut self, enabled: bool) {
        self.automated = enabled;
        info!(automated = enabled, "mode changed");
        self.reset();
    }

    /// Schedule the automated player's reply if it is its turn.
    pub fn schedule_automated_turn(&self) -> Option<PendingTurn> {
        self.is_automated_turn().then_some(PendingTurn {
            generation: self.generation,
        })
    }

    /// Fire a previously scheduled automated turn.
    ///
    /// Returns the cell played, or `None` if the token is stale or it is no
    /// longer the automated player's turn.
    pub fn run_automated_turn(&mut self, pending: PendingTurn) -> Option<usize> {
        if pending.generation != self.generation || !self.is_automated_turn() {
            debug!(?pending, generation = self.generation, "stale automated turn skipped");
            return None;
        }
        let pt = search(&self.board, Mark::AUTOMATED).best?;
        self.apply_move(pt, Mark::AUTOMATED).then_some(pt)
    }
}
