//! Turn and selection state machine.
//!
//! A [`GameState`] is a plain value: the board, the side to move, the selected
//! piece and the squares it may move to. [`click`] is the only transition.
//! It takes a board square, never a pixel; converting input coordinates is
//! the render adapter's job.
//!
//! ```
//! use checkers_rust::board::Square;
//! use checkers_rust::game::{click, ClickOutcome, GameState};
//!
//! let mut state = GameState::new();
//! let out = click(&mut state, Square::new(5, 0));
//! assert_eq!(out, ClickOutcome::Selected { at: Square::new(5, 0), destinations: 1 });
//! ```

use std::collections::BTreeSet;

use crate::board::{Board, Cell, Color, PieceKind, Square};
use crate::constants::{BLACK_PROMOTION_ROW, WHITE_PROMOTION_ROW};
use crate::movegen::{has_jump, jump_destinations, legal_destinations};

/// How a chain of captures may continue after a jump that leaves the piece
/// with another capture available.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ChainRule {
    /// The continuation offers every legal destination, so a simple step may
    /// end the chain.
    #[default]
    AnyMove,
    /// The continuation offers only further jumps.
    JumpsOnly,
}

/// Runtime rule options.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Rules {
    pub chain: ChainRule,
}

/// What a completed move did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Square of the removed piece, for jumps.
    pub captured: Option<Square>,
    pub promoted: bool,
}

impl MoveRecord {
    pub fn is_jump(&self) -> bool {
        self.captured.is_some()
    }
}

/// Result of feeding one click to the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing selected and the click did not hit a piece of the side to move.
    Ignored,
    /// A piece was selected and has `destinations` legal moves.
    Selected { at: Square, destinations: usize },
    /// The clicked piece cannot move; the selection was reset.
    NoLegalMoves(Square),
    /// The selected piece moved. `turn_over` is false while a capture chain
    /// continues with the same piece.
    Moved { record: MoveRecord, turn_over: bool },
    /// The click missed every destination and dropped the selection.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    selected: Option<Square>,
    destinations: BTreeSet<Square>,
    turn: Color,
    rules: Rules,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starting position with White to move.
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Self::from_board(Board::setup(), Color::White, rules)
    }

    /// Arbitrary position, nothing selected.
    pub fn from_board(board: Board, turn: Color, rules: Rules) -> Self {
        GameState {
            board,
            selected: None,
            destinations: BTreeSet::new(),
            turn,
            rules,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Squares to highlight: the legal destinations of the selected piece.
    pub fn destinations(&self) -> &BTreeSet<Square> {
        &self.destinations
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn is_idle(&self) -> bool {
        self.selected.is_none()
    }

    /// Pure form of [`click`]: returns the next state and leaves `self` alone.
    pub fn after_click(&self, at: Square) -> (GameState, ClickOutcome) {
        let mut next = self.clone();
        let outcome = click(&mut next, at);
        (next, outcome)
    }

    /// Same position and side to move, nothing selected.
    pub fn without_selection(mut self) -> Self {
        self.clear_selection();
        self
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }
}

/// Move the piece on `from` to `to`, removing a jumped piece and promoting on
/// the far row.
///
/// The move must already be known legal; no rule is checked here.
pub fn execute_move(board: &mut Board, from: Square, to: Square) -> MoveRecord {
    let captured = if (to.row - from.row).abs() == 2 {
        let mid = from.midpoint(to);
        board.set(mid, Cell::Empty);
        Some(mid)
    } else {
        None
    };

    board.set(to, board.get(from));
    board.set(from, Cell::Empty);

    let mut promoted = false;
    if let Cell::Piece(mut piece) = board.get(to) {
        let far_row = match piece.owner {
            Color::White => WHITE_PROMOTION_ROW,
            Color::Black => BLACK_PROMOTION_ROW,
        };
        if to.row == far_row && piece.kind == PieceKind::Pawn {
            piece.kind = PieceKind::King;
            board.set(to, piece.into());
            promoted = true;
        }
    }

    MoveRecord {
        from,
        to,
        captured,
        promoted,
    }
}

/// Process a click on board square `at`.
///
/// Off-board squares behave like clicks on an empty cell. While a piece is
/// selected any click off its destinations cancels the selection, even one on
/// another friendly piece.
pub fn click(state: &mut GameState, at: Square) -> ClickOutcome {
    let Some(from) = state.selected else {
        return select(state, at);
    };

    if !state.destinations.contains(&at) {
        state.clear_selection();
        return ClickOutcome::Cancelled;
    }

    let record = execute_move(&mut state.board, from, at);

    if record.is_jump() && has_jump(&state.board, at) {
        state.selected = Some(at);
        state.destinations = match state.rules.chain {
            ChainRule::AnyMove => legal_destinations(&state.board, at),
            ChainRule::JumpsOnly => jump_destinations(&state.board, at),
        };
        return ClickOutcome::Moved {
            record,
            turn_over: false,
        };
    }

    state.clear_selection();
    state.turn = state.turn.other();
    ClickOutcome::Moved {
        record,
        turn_over: true,
    }
}

fn select(state: &mut GameState, at: Square) -> ClickOutcome {
    let own_piece = at.in_bounds()
        && state
            .board
            .get(at)
            .piece()
            .is_some_and(|p| p.owner == state.turn);
    if !own_piece {
        return ClickOutcome::Ignored;
    }

    let dests = legal_destinations(&state.board, at);
    if dests.is_empty() {
        state.clear_selection();
        return ClickOutcome::NoLegalMoves(at);
    }

    let destinations = dests.len();
    state.selected = Some(at);
    state.destinations = dests;
    ClickOutcome::Selected { at, destinations }
}
