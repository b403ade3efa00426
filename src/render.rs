//! Render/input adapter.
//!
//! Converts pixel clicks into board squares and snapshots a [`GameState`] into
//! a [`Frame`]: per-cell background, highlight and piece information a window
//! or terminal front end can draw directly. The adapter never mutates game
//! state.

use std::fmt;

use crate::board::{Board, Color, Piece, Square};
use crate::constants::{
    BLACK_PIECE_COLOR, DARK_COLOR, HIGHLIGHT_COLOR, KING_MARKER_COLOR, KING_MARKER_THICKNESS,
    LIGHT_COLOR, MAX_TILE_SIZE, N, N_I32, Rgba, TILE_SIZE, WHITE_PIECE_COLOR,
};
use crate::game::GameState;

/// Pixel geometry of the board window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    tile_size: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            tile_size: TILE_SIZE,
        }
    }
}

impl Layout {
    /// Tile sizes are clamped to `1..=MAX_TILE_SIZE`.
    pub fn new(tile_size: u32) -> Self {
        Layout {
            tile_size: tile_size.clamp(1, MAX_TILE_SIZE),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Width and height of the board in pixels.
    pub fn extent(&self) -> u32 {
        self.tile_size * N as u32
    }

    /// Board square under pixel `(x, y)`, or `None` outside the board.
    pub fn square_at(&self, x: i64, y: i64) -> Option<Square> {
        let extent = i64::from(self.extent());
        if !(0..extent).contains(&x) || !(0..extent).contains(&y) {
            return None;
        }
        let tile = i64::from(self.tile_size);
        Some(Square::new((y / tile) as i32, (x / tile) as i32))
    }

    /// Top-left pixel of a square.
    pub fn origin(&self, sq: Square) -> (u32, u32) {
        (
            sq.col as u32 * self.tile_size,
            sq.row as u32 * self.tile_size,
        )
    }

    /// Radius of a piece disc, a third of a tile.
    pub fn piece_radius(&self) -> u32 {
        self.tile_size / 3
    }
}

/// How to draw a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceView {
    pub fill: Rgba,
    /// Outline color and thickness for kings.
    pub king_marker: Option<(Rgba, u32)>,
    pub piece: Piece,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        let fill = match piece.owner {
            Color::White => WHITE_PIECE_COLOR,
            Color::Black => BLACK_PIECE_COLOR,
        };
        PieceView {
            fill,
            king_marker: piece
                .is_king()
                .then_some((KING_MARKER_COLOR, KING_MARKER_THICKNESS)),
            piece,
        }
    }
}

/// Everything needed to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub square: Square,
    pub background: Rgba,
    pub highlighted: bool,
    pub piece: Option<PieceView>,
}

impl CellView {
    pub fn highlight_tint(&self) -> Option<Rgba> {
        self.highlighted.then_some(HIGHLIGHT_COLOR)
    }
}

/// One rendered frame, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub cells: Vec<CellView>,
    pub turn: Color,
    pub selected: Option<Square>,
}

/// Background color of a square, keyed by `(row + col)` parity.
pub fn background(sq: Square) -> Rgba {
    if sq.is_dark() { DARK_COLOR } else { LIGHT_COLOR }
}

/// Snapshot the board, selection and highlight set.
pub fn frame(state: &GameState) -> Frame {
    let highlights = state.destinations();
    let cells = Board::squares()
        .map(|sq| CellView {
            square: sq,
            background: background(sq),
            highlighted: highlights.contains(&sq),
            piece: state.board().get(sq).piece().map(PieceView::from),
        })
        .collect();
    Frame {
        cells,
        turn: state.turn(),
        selected: state.selected(),
    }
}

impl Frame {
    pub fn cell(&self, sq: Square) -> &CellView {
        &self.cells[(sq.row * N_I32 + sq.col) as usize]
    }
}

/// Text rendering for terminals: piece glyphs, `*` on highlighted cells,
/// brackets around the selected piece.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(N) {
            let rank = N_I32 - row[0].square.row;
            write!(f, "{rank} ")?;
            for cell in row {
                let ch = match (cell.piece, cell.highlighted) {
                    (Some(view), _) => view.piece.glyph(),
                    (None, true) => '*',
                    (None, false) if cell.square.is_dark() => '_',
                    (None, false) => '.',
                };
                if self.selected == Some(cell.square) {
                    write!(f, "[{ch}]")?;
                } else {
                    write!(f, " {ch} ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..N {
            write!(f, " {} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        write!(f, "{} to move", self.turn.name())
    }
}
