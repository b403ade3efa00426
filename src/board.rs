//! Board model: cells, pieces, sides and coordinates.
//!
//! The board is a plain 8x8 row-major grid. It does not enforce any checkers
//! rule by itself; the move evaluator and the game state machine decide what
//! gets written where.

use std::fmt;
use std::str::FromStr;

use crate::constants::{N, N_I32, SETUP_ROWS};

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The opposing side.
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a forward move: White moves up the board, Black moves down.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Color,
}

impl Piece {
    pub const fn pawn(owner: Color) -> Self {
        Piece {
            kind: PieceKind::Pawn,
            owner,
        }
    }

    pub const fn king(owner: Color) -> Self {
        Piece {
            kind: PieceKind::King,
            owner,
        }
    }

    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    /// ASCII glyph: lowercase for pawns, uppercase for kings.
    pub fn glyph(self) -> char {
        match (self.owner, self.kind) {
            (Color::White, PieceKind::Pawn) => 'w',
            (Color::White, PieceKind::King) => 'W',
            (Color::Black, PieceKind::Pawn) => 'b',
            (Color::Black, PieceKind::King) => 'B',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Piece),
}

impl Cell {
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Piece(p) => Some(p),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        Cell::Piece(piece)
    }
}

/// A board coordinate. Fields are signed so that diagonal offsets may step
/// off the board; such squares fail [`Square::in_bounds`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub const fn new(row: i32, col: i32) -> Self {
        Square { row, col }
    }

    /// True iff both row and column are in `[0, N)`.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..N_I32).contains(&self.row) && (0..N_I32).contains(&self.col)
    }

    #[inline]
    pub fn offset(self, drow: i32, dcol: i32) -> Square {
        Square::new(self.row + drow, self.col + dcol)
    }

    /// Cells where `(row + col)` is odd hold pieces.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square halfway between two squares (the jumped cell of a capture).
    pub fn midpoint(self, other: Square) -> Square {
        Square::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

/// Formats as column letter plus rank, with rank 8 at row 0 (`a8` is the
/// top-left corner).
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{file}{}", N_I32 - self.row)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let mut chars = s.chars();
        let file = chars
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty square"))?;
        if !('a'..='h').contains(&file) {
            anyhow::bail!("invalid file '{file}' in square '{s}'");
        }
        let rank: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid rank in square '{s}'"))?;
        if !(1..=N_I32).contains(&rank) {
            anyhow::bail!("rank out of range in square '{s}'");
        }
        Ok(Square::new(N_I32 - rank, file as i32 - 'a' as i32))
    }
}

/// The 8x8 grid of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// The starting layout: Black pawns on the dark cells of the top three
    /// rows, White pawns on the dark cells of the bottom three.
    pub fn setup() -> Self {
        let mut board = Board::new();
        for row in 0..N {
            for col in 0..N {
                let sq = Square::new(row as i32, col as i32);
                if !sq.is_dark() {
                    continue;
                }
                if row < SETUP_ROWS {
                    board.set(sq, Piece::pawn(Color::Black).into());
                } else if row >= N - SETUP_ROWS {
                    board.set(sq, Piece::pawn(Color::White).into());
                }
            }
        }
        board
    }

    pub fn in_bounds(&self, sq: Square) -> bool {
        sq.in_bounds()
    }

    /// Cell at `sq`. The caller must check bounds first.
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.row as usize][sq.col as usize]
    }

    /// Overwrite the cell at `sq`. The caller must check bounds first.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row as usize][sq.col as usize] = cell;
    }

    /// Number of pieces owned by `color`.
    pub fn pieces(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.piece().is_some_and(|p| p.owner == color))
            .count()
    }

    /// All squares in row-major order.
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..N_I32).flat_map(|row| (0..N_I32).map(move |col| Square::new(row, col)))
    }
}
