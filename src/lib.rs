//! Tictactoe-Rust: a tic-tac-toe engine with a perfect-play opponent.
//!
//! The engine keeps the game state and answers moves with an exhaustive
//! minimax search, so the automated player never loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning lines, and search scores
//! - [`board`] - Marks, cells, the 3x3 board, and outcome detection
//! - [`game`] - The game session and deferred automated turns
//! - [`search`] - Minimax search
//! - [`view`] - Status line, enabled cells, and board rendering
//! - [`protocol`] - Text command loop used by the binary
//! - [`demo`] - Search against a seeded random mover
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::board::{Mark, Outcome};
//! use tictactoe_rust::game::Session;
//! use tictactoe_rust::search::search;
//!
//! let mut session = Session::new(true);
//! assert!(session.play(4));
//!
//! let pending = session.schedule_automated_turn().unwrap();
//! let reply = session.run_automated_turn(pending).unwrap();
//! assert_ne!(reply, 4);
//!
//! let result = search(session.board(), Mark::X);
//! assert_eq!(result.score, 0);
//! assert_eq!(session.outcome(), Outcome::InProgress);
//! ```

pub mod board;
pub mod constants;
pub mod demo;
pub mod game;
pub mod protocol;
pub mod search;
pub mod view;
