//! Self-play demo: search against a random mover.
//!
//! A random mover picks uniformly among the empty cells. Playing it against
//! the search over many seeded games is a quick way to see that the search
//! never loses from either seat.

use tracing::{debug, info, warn};

use crate::board::{Mark, Outcome};
use crate::game::Session;
use crate::search::search;

/// Results of a batch of games, from the search player's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, outcome: Outcome, searcher: Mark) {
        match outcome.winner() {
            Some(mark) if mark == searcher => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }
}

/// Pick a random empty cell, or `None` if the board is full.
pub fn random_move(session: &Session, rng: &mut fastrand::Rng) -> Option<usize> {
    let moves = session.board().available_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play one game to the end; `searcher` is the mark chosen by search.
pub fn play_game(searcher: Mark, rng: &mut fastrand::Rng) -> Outcome {
    let mut session = Session::new(false);

    while !session.is_over() {
        let player = session.current_player();
        let pt = if player == searcher {
            search(session.board(), player).best
        } else {
            random_move(&session, rng)
        };
        let Some(pt) = pt else { break };
        if !session.apply_move(pt, player) {
            warn!(pt, %player, "move rejected, abandoning game");
            break;
        }
    }

    debug!(board = %session.board(), "game finished");
    session.outcome()
}

/// Play `games` games against a random mover seeded with `seed`.
pub fn run(games: usize, seed: u64, searcher: Mark) -> Tally {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tally = Tally::default();
    for _ in 0..games {
        tally.record(play_game(searcher, &mut rng), searcher);
    }
    info!(?tally, %searcher, seed, "demo finished");
    tally
}
