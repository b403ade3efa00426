//! Line-oriented command protocol.
//!
//! Stands in for a window event loop: each input line is one event, and
//! responses follow the GTP conventions (`=` on success, `?` on failure,
//! optional numeric id echoed back, blank line after every response).
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `click <x> <y>` - Primary-button press at a pixel
//! - `select <square>` - Click on a board square, e.g. `select c3`
//! - `showboard` - Render the current frame as text
//! - `legal` - List highlighted destination squares
//! - `turn` - Side to move
//! - `undo` - Revert the last click that moved a piece
//! - `clear_board` - Start a new game
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::ClickEngine;
//! let mut engine = ClickEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::board::Square;
use crate::game::{ClickOutcome, GameState, Rules, click};
use crate::render::{Layout, frame};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "click",
    "known_command",
    "legal",
    "list_commands",
    "name",
    "protocol_version",
    "quit",
    "select",
    "showboard",
    "turn",
    "undo",
    "version",
];

/// Diagnostic for a selection with nowhere to go.
pub const NO_MOVES_MESSAGE: &str = "No valid moves for this piece!";

/// Command loop state.
pub struct ClickEngine {
    /// Current game
    state: GameState,
    /// Positions before each move, selection dropped
    history: Vec<GameState>,
    layout: Layout,
}

impl Default for ClickEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickEngine {
    pub fn new() -> Self {
        Self::with_options(Layout::default(), Rules::default())
    }

    pub fn with_options(layout: Layout, rules: Rules) -> Self {
        Self {
            state: GameState::with_rules(rules),
            history: Vec::new(),
            layout,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the command loop over stdin and stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// A line that is not valid UTF-8 gets a `?` response; only read and write
    /// failures end the loop early.
    pub fn run_with<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = input
                .read_until(b'\n', &mut buf)
                .context("failed to read command")?;
            if n == 0 {
                break;
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                writeln!(out, "? invalid UTF-8\n")?;
                out.flush()?;
                continue;
            };

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(out, "{prefix}{id_str} {message}\n")?;
            out.flush()?;

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
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.state = GameState::with_rules(self.state.rules());
                self.history.clear();
                (true, String::new())
            }

            "click" => match self.parse_pixel(args) {
                // Presses outside the board never reach the game.
                Ok(None) => (true, "outside board".to_string()),
                Ok(Some(sq)) => self.click(sq),
                Err(e) => (false, format!("{e:#}")),
            },

            "select" => match Self::parse_square(args) {
                Ok(sq) => self.click(sq),
                Err(e) => (false, format!("{e:#}")),
            },

            "showboard" => (true, format!("\n{}", frame(&self.state))),

            "legal" => {
                let squares: Vec<String> = self
                    .state
                    .destinations()
                    .iter()
                    .map(Square::to_string)
                    .collect();
                (true, squares.join(" "))
            }

            "turn" => (true, self.state.turn().name().to_lowercase()),

            "undo" => match self.history.pop() {
                Some(prev) => {
                    self.state = prev;
                    (true, String::new())
                }
                None => (false, "nothing to undo".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn parse_pixel(&self, args: &[&str]) -> Result<Option<Square>> {
        let [x, y] = args else {
            bail!("expected two arguments: <x> <y>");
        };
        let x: i64 = x.parse().with_context(|| format!("invalid x coordinate '{x}'"))?;
        let y: i64 = y.parse().with_context(|| format!("invalid y coordinate '{y}'"))?;
        Ok(self.layout.square_at(x, y))
    }

    fn parse_square(args: &[&str]) -> Result<Square> {
        let [vertex] = args else {
            bail!("expected one argument: <square>");
        };
        vertex.parse()
    }

    /// Feed a board click to the game and describe the outcome.
    fn click(&mut self, sq: Square) -> (bool, String) {
        let before = self.state.clone();
        let outcome = click(&mut self.state, sq);
        let message = match outcome {
            ClickOutcome::Ignored => String::new(),
            ClickOutcome::Selected { at, .. } => format!("selected {at}"),
            ClickOutcome::NoLegalMoves(_) => {
                eprintln!("{NO_MOVES_MESSAGE}");
                NO_MOVES_MESSAGE.to_string()
            }
            ClickOutcome::Moved { record, turn_over } => {
                self.history.push(before.without_selection());
                let sep = if record.is_jump() { 'x' } else { '-' };
                let mut msg = format!("{}{sep}{}", record.from, record.to);
                if record.promoted {
                    msg.push_str(" king");
                }
                if !turn_over {
                    msg.push_str(" continue");
                }
                msg
            }
            ClickOutcome::Cancelled => "cancelled".to_string(),
        };
        (true, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::game::ChainRule;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ClickEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ClickEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = ClickEngine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "checkers-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = ClickEngine::new();

        let (success, response) = engine.execute("known_command", &["click"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_click_select_and_move() {
        let mut engine = ClickEngine::new();

        // (130, 310) is c3, row 5 col 2.
        let (success, response) = engine.execute("click", &["130", "310"]);
        assert!(success);
        assert_eq!(response, "selected c3");

        let (_, response) = engine.execute("legal", &[]);
        assert_eq!(response, "b4 d4");

        let (_, response) = engine.execute("select", &["d4"]);
        assert_eq!(response, "c3-d4");
        assert_eq!(engine.state().turn(), Color::Black);
    }

    #[test]
    fn test_click_outside_board() {
        let mut engine = ClickEngine::new();
        let (success, response) = engine.execute("click", &["500", "10"]);
        assert!(success);
        assert_eq!(response, "outside board");
        assert!(engine.state().is_idle());
    }

    #[test]
    fn test_bad_arguments() {
        let mut engine = ClickEngine::new();
        assert!(!engine.execute("click", &["1"]).0);
        assert!(!engine.execute("click", &["a", "1"]).0);
        assert!(!engine.execute("select", &["z9"]).0);
        assert!(!engine.execute("frobnicate", &[]).0);
    }

    #[test]
    fn test_no_moves_diagnostic() {
        let mut engine = ClickEngine::new();
        let (success, response) = engine.execute("select", &["a1"]);
        assert!(success);
        assert_eq!(response, NO_MOVES_MESSAGE);
        assert!(engine.state().is_idle());
    }

    #[test]
    fn test_undo_and_clear() {
        let mut engine = ClickEngine::new();
        assert!(!engine.execute("undo", &[]).0);

        engine.execute("select", &["c3"]);
        engine.execute("select", &["d4"]);
        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.state(), &GameState::new());

        engine.execute("select", &["c3"]);
        engine.execute("select", &["d4"]);
        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.state(), &GameState::new());
        assert!(!engine.execute("undo", &[]).0);
    }

    #[test]
    fn test_invalid_utf8_line_keeps_session() {
        let mut engine = ClickEngine::new();
        let mut input = b"name\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"turn\n");
        let mut out = Vec::new();
        engine.run_with(input.as_slice(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "= checkers-rust\n\n? invalid UTF-8\n\n= white\n\n");
    }

    #[test]
    fn test_clear_board_keeps_rules() {
        let rules = Rules {
            chain: ChainRule::JumpsOnly,
        };
        let mut engine = ClickEngine::with_options(Layout::default(), rules);
        engine.execute("select", &["c3"]);
        engine.execute("select", &["d4"]);
        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.state(), &GameState::with_rules(rules));
        assert_eq!(engine.state().rules().chain, ChainRule::JumpsOnly);
    }

    #[test]
    fn test_huge_tile_size_click() {
        let mut engine = ClickEngine::with_options(Layout::new(1_000_000_000), Rules::default());
        let mut out = Vec::new();
        engine.run_with("click 10 10\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // a8 holds no piece, so the click is absorbed.
        assert_eq!(text, "= \n\n");
        assert!(engine.state().is_idle());
    }

    #[test]
    fn test_run_with_script() {
        let mut engine = ClickEngine::new();
        let script = "# opening\n1 select c3\n2 select d4\nturn\nquit\nname\n";
        let mut out = Vec::new();
        engine.run_with(script.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "=1 selected c3\n\n=2 c3-d4\n\n= black\n\n= \n\n");
    }
}
