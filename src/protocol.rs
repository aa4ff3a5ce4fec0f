//! Line-oriented text protocol for driving a game session.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and a response of `=<id> <message>` on success or
//! `?<id> <message>` on failure, followed by a blank line. It is the
//! presentation layer of the binary and is easy to script from tests or a
//! GUI front end.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine metadata
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `new` / `clear_board` - Start a new game
//! - `play <cell>` - Human move for the mark to move; the automated reply
//!   (if any) follows after the configured delay and is returned
//! - `genmove` - Let search play for the mark to move
//! - `ai on|off` - Toggle the automated opponent (starts a new game)
//! - `setboard <layout> [x|o]` - Load a position
//! - `showboard` - Board and status line
//! - `status` - Status line only
//! - `outcome` - `in-progress`, `draw`, or `win <mark> <a> <b> <c>`
//! - `search [x|o]` - Best move and score without playing it
//! - `quit` - Exit
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::protocol::Engine;
//!
//! let mut engine = Engine::new(true).with_delay(std::time::Duration::ZERO);
//! let mut out = Vec::new();
//! engine.run_with("play 4\nquit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("\n= "));
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::board::{Board, Mark, Outcome};
use crate::constants::AI_DELAY_MS;
use crate::game::Session;
use crate::search::search;
use crate::view::{render_board, status_text};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "ai",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "new",
    "outcome",
    "play",
    "protocol_version",
    "quit",
    "search",
    "setboard",
    "showboard",
    "status",
    "version",
];

/// Why a command could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command name not recognized
    Unknown(String),
    /// Required argument absent
    MissingArgument,
    /// Argument present but unparseable
    InvalidArgument(String),
    /// Cell occupied or off the board
    IllegalMove,
    /// The automated player is to move
    NotYourTurn,
    /// The game has already ended
    GameOver,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd}"),
            CommandError::MissingArgument => write!(f, "missing argument"),
            CommandError::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),
            CommandError::IllegalMove => write!(f, "illegal move"),
            CommandError::NotYourTurn => write!(f, "not your turn"),
            CommandError::GameOver => write!(f, "game over"),
        }
    }
}

impl std::error::Error for CommandError {}

type CommandResult = std::result::Result<String, CommandError>;

/// Protocol engine state.
pub struct Engine {
    /// The game being played
    session: Session,
    /// Pause before the automated reply
    delay: Duration,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Engine {
    /// Create an engine with automated play on or off and the default delay.
    pub fn new(automated: bool) -> Self {
        Self {
            session: Session::new(automated),
            delay: Duration::from_millis(AI_DELAY_MS),
        }
    }

    /// Set the pause before the automated player replies.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on arbitrary input and output streams.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let response = self.execute(&command, args);
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            let written = match &response {
                Ok(message) => writeln!(output, "\n={id_str} {message}\n"),
                Err(err) => {
                    warn!(%command, %err, "command failed");
                    writeln!(output, "\n?{id_str} {err}\n")
                }
            };
            written.context("failed to write response")?;
            output.flush().context("failed to flush output")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return its response message.
    fn execute(&mut self, command: &str, args: &[&str]) -> CommandResult {
        debug!(command, ?args, "executing");
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(CommandError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "new" | "clear_board" => {
                self.session.reset();
                Ok(String::new())
            }

            "ai" => {
                let enabled = match args.first().map(|a| a.to_lowercase()).as_deref() {
                    Some("on") | Some("true") => true,
                    Some("off") | Some("false") => false,
                    Some(other) => return Err(CommandError::InvalidArgument(other.to_string())),
                    None => return Err(CommandError::MissingArgument),
                };
                self.session.set_automated(enabled);
                Ok(String::new())
            }

            "play" => {
                let arg = args.first().ok_or(CommandError::MissingArgument)?;
                let pt = arg
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidArgument(arg.to_string()))?;
                if self.session.is_over() {
                    return Err(CommandError::GameOver);
                }
                if self.session.is_automated_turn() {
                    return Err(CommandError::NotYourTurn);
                }
                if !self.session.play(pt) {
                    return Err(CommandError::IllegalMove);
                }
                Ok(self.automated_reply())
            }

            "genmove" => {
                if self.session.is_over() {
                    return Err(CommandError::GameOver);
                }
                let player = self.session.current_player();
                let pt = search(self.session.board(), player)
                    .best
                    .ok_or(CommandError::GameOver)?;
                if !self.session.apply_move(pt, player) {
                    return Err(CommandError::IllegalMove);
                }
                Ok(pt.to_string())
            }

            "setboard" => {
                let layout = args.first().ok_or(CommandError::MissingArgument)?;
                let board = Board::from_layout(layout)
                    .ok_or_else(|| CommandError::InvalidArgument(layout.to_string()))?;
                let to_move = match args.get(1) {
                    Some(m) => {
                        Mark::parse(m).ok_or_else(|| CommandError::InvalidArgument(m.to_string()))?
                    }
                    None => infer_to_move(&board),
                };
                self.session.load(board, to_move);
                Ok(String::new())
            }

            "showboard" => Ok(format!(
                "\n{}\n{}",
                render_board(&self.session),
                status_text(&self.session)
            )),

            "status" => Ok(status_text(&self.session)),

            "outcome" => Ok(format_outcome(self.session.outcome())),

            "search" => {
                let player = match args.first() {
                    Some(m) => {
                        Mark::parse(m).ok_or_else(|| CommandError::InvalidArgument(m.to_string()))?
                    }
                    None => self.session.current_player(),
                };
                let result = search(self.session.board(), player);
                let best = result.best.map_or("none".to_string(), |pt| pt.to_string());
                Ok(format!("{best} {}", result.score))
            }

            _ => Err(CommandError::Unknown(command.to_string())),
        }
    }

    /// Let the automated player answer, after the configured delay.
    ///
    /// Returns the cell it played, or an empty string if it had nothing to do.
    fn automated_reply(&mut self) -> String {
        let Some(pending) = self.session.schedule_automated_turn() else {
            return String::new();
        };
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.session
            .run_automated_turn(pending)
            .map(|pt| pt.to_string())
            .unwrap_or_default()
    }
}

/// X moves first, so X is to move whenever the mark counts are equal.
fn infer_to_move(board: &Board) -> Mark {
    let xs = board.cells().iter().filter(|c| c.mark() == Some(Mark::X)).count();
    let os = board.cells().iter().filter(|c| c.mark() == Some(Mark::O)).count();
    if xs > os { Mark::O } else { Mark::X }
}

fn format_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::InProgress => "in-progress".to_string(),
        Outcome::Draw => "draw".to_string(),
        Outcome::Win { mark, line: [a, b, c] } => format!("win {mark} {a} {b} {c}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(automated: bool) -> Engine {
        Engine::new(automated).with_delay(Duration::ZERO)
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Engine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Engine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine(true);
        assert_eq!(engine.execute("name", &[]).unwrap(), "tictactoe-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine(true);
        assert_eq!(engine.execute("known_command", &["play"]).unwrap(), "true");
        assert_eq!(engine.execute("known_command", &["boardsize"]).unwrap(), "false");
        assert_eq!(
            engine.execute("known_command", &[]),
            Err(CommandError::MissingArgument)
        );
    }

    #[test]
    fn test_play_gets_reply() {
        let mut engine = engine(true);
        let reply = engine.execute("play", &["4"]).unwrap();
        let pt: usize = reply.parse().unwrap();
        assert_ne!(pt, 4);
        assert_eq!(engine.session().board().count(), 2);
        assert_eq!(engine.session().current_player(), Mark::X);
    }

    #[test]
    fn test_play_without_ai() {
        let mut engine = engine(false);
        assert_eq!(engine.execute("play", &["4"]).unwrap(), "");
        assert_eq!(engine.session().current_player(), Mark::O);
        assert_eq!(engine.execute("play", &["0"]).unwrap(), "");
        assert_eq!(engine.session().board().count(), 2);
    }

    #[test]
    fn test_play_errors() {
        let mut engine = engine(false);
        assert_eq!(engine.execute("play", &[]), Err(CommandError::MissingArgument));
        assert_eq!(
            engine.execute("play", &["a1"]),
            Err(CommandError::InvalidArgument("a1".to_string()))
        );
        assert_eq!(engine.execute("play", &["9"]), Err(CommandError::IllegalMove));
        engine.execute("play", &["4"]).unwrap();
        assert_eq!(engine.execute("play", &["4"]), Err(CommandError::IllegalMove));
    }

    #[test]
    fn test_play_on_automated_turn() {
        let mut engine = engine(true);
        engine.execute("setboard", &["X........", "o"]).unwrap();
        assert_eq!(engine.execute("play", &["1"]), Err(CommandError::NotYourTurn));
        assert_eq!(engine.execute("genmove", &[]).unwrap(), "4");
    }

    #[test]
    fn test_setboard_and_outcome() {
        let mut engine = engine(false);
        engine.execute("setboard", &["XX.|OO.|..."]).unwrap();
        assert_eq!(engine.session().current_player(), Mark::X);
        assert_eq!(engine.execute("outcome", &[]).unwrap(), "in-progress");
        engine.execute("play", &["2"]).unwrap();
        assert_eq!(engine.execute("outcome", &[]).unwrap(), "win X 0 1 2");
        assert_eq!(engine.execute("play", &["5"]), Err(CommandError::GameOver));
        assert_eq!(engine.execute("genmove", &[]), Err(CommandError::GameOver));
    }

    #[test]
    fn test_search_command() {
        let mut engine = engine(false);
        engine.execute("setboard", &["XX.|OO.|X..", "o"]).unwrap();
        assert_eq!(engine.execute("search", &[]).unwrap(), "5 10");
        // Searching does not play.
        assert_eq!(engine.session().board().count(), 5);
    }

    #[test]
    fn test_ai_toggle_resets() {
        let mut engine = engine(false);
        engine.execute("play", &["4"]).unwrap();
        engine.execute("ai", &["on"]).unwrap();
        assert!(engine.session().is_automated());
        assert_eq!(engine.session().board().count(), 0);
        assert!(matches!(
            engine.execute("ai", &["maybe"]),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_run_with_keeps_going_after_errors() {
        let mut engine = engine(false);
        let script = "7 play 9\n# comment\n\n8 bogus\n9 play 4\n10 outcome\nquit\nplay 0\n";
        let mut out = Vec::new();
        engine.run_with(script.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\n?7 illegal move\n\n\
             \n?8 unknown command: bogus\n\n\
             \n=9 \n\n\
             \n=10 in-progress\n\n\
             \n= \n\n"
        );
        // The move after the errors was played; nothing after quit was.
        assert_eq!(engine.session().board().count(), 1);
        assert_eq!(engine.session().current_player(), Mark::O);
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = engine(true);
        assert_eq!(
            engine.execute("boardsize", &["19"]),
            Err(CommandError::Unknown("boardsize".to_string()))
        );
    }
}
