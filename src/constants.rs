//! Constants for board geometry and rendering.
//!
//! The board is a fixed 8x8 grid addressed by `(row, col)`, row 0 at the top.
//! Pixel constants describe the default window layout used by the render
//! adapter; the tile size can be overridden at runtime.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Board size as a signed value, for coordinate arithmetic.
pub const N_I32: i32 = N as i32;

/// Number of rows at each end of the board that start filled with pawns.
pub const SETUP_ROWS: usize = 3;

/// Pawns each side starts with.
pub const PIECES_PER_SIDE: usize = SETUP_ROWS * N / 2;

/// Row a White piece must reach to promote.
pub const WHITE_PROMOTION_ROW: i32 = 0;

/// Row a Black piece must reach to promote.
pub const BLACK_PROMOTION_ROW: i32 = N_I32 - 1;

// =============================================================================
// Rendering
// =============================================================================

/// Default edge length of one board cell in pixels.
pub const TILE_SIZE: u32 = 60;

/// Largest tile size whose board extent still fits in a `u32`.
pub const MAX_TILE_SIZE: u32 = u32::MAX / N as u32;

/// An RGBA color.
pub type Rgba = (u8, u8, u8, u8);

/// Background of cells where `(row + col)` is even.
pub const LIGHT_COLOR: Rgba = (235, 236, 208, 255);

/// Background of cells where `(row + col)` is odd (the playable cells).
pub const DARK_COLOR: Rgba = (119, 148, 85, 255);

/// Tint drawn over cells the selected piece may move to.
pub const HIGHLIGHT_COLOR: Rgba = (255, 255, 0, 128);

/// Piece fill colors.
pub const WHITE_PIECE_COLOR: Rgba = (255, 255, 255, 255);
pub const BLACK_PIECE_COLOR: Rgba = (0, 0, 0, 255);

/// Outline drawn around kings.
pub const KING_MARKER_COLOR: Rgba = (255, 255, 0, 255);

/// Outline thickness of the king marker in pixels.
pub const KING_MARKER_THICKNESS: u32 = 3;
