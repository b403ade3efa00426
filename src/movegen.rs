//! Legal move generation.
//!
//! Pawns step and jump diagonally forward only; kings evaluate the forward and
//! backward diagonals. Simple moves and jumps are reported together: a capture
//! available elsewhere on the board, or even for the same piece, does not
//! remove the piece's simple moves.

use std::collections::BTreeSet;

use crate::board::{Board, Color, Piece, Square};

/// Column offsets of the two diagonals in a given row direction.
const SIDEWAYS: [i32; 2] = [-1, 1];

/// Row directions a piece may travel in, forward first.
fn row_directions(piece: Piece) -> &'static [i32] {
    const WHITE: [i32; 2] = [-1, 1];
    const BLACK: [i32; 2] = [1, -1];
    let dirs: &'static [i32; 2] = match piece.owner {
        Color::White => &WHITE,
        Color::Black => &BLACK,
    };
    if piece.is_king() { &dirs[..] } else { &dirs[..1] }
}

/// Is `dest` an empty square on the board?
#[inline]
fn is_valid_move(board: &Board, dest: Square) -> bool {
    dest.in_bounds() && board.get(dest).is_empty()
}

/// Can `piece` capture the occupant of `mid` and land on `dest`?
#[inline]
fn is_valid_jump(board: &Board, piece: Piece, mid: Square, dest: Square) -> bool {
    if !mid.in_bounds() || !dest.in_bounds() {
        return false;
    }
    let jumped_is_enemy = board
        .get(mid)
        .piece()
        .is_some_and(|p| p.owner != piece.owner);
    jumped_is_enemy && board.get(dest).is_empty()
}

/// Every square the piece at `from` may move to, simple moves and jumps alike.
///
/// Returns an empty set if `from` is off the board or empty.
pub fn legal_destinations(board: &Board, from: Square) -> BTreeSet<Square> {
    let mut dests = BTreeSet::new();
    let Some(piece) = piece_at(board, from) else {
        return dests;
    };

    for &dr in row_directions(piece) {
        for dc in SIDEWAYS {
            let step = from.offset(dr, dc);
            if is_valid_move(board, step) {
                dests.insert(step);
            }
            let land = from.offset(2 * dr, 2 * dc);
            if is_valid_jump(board, piece, step, land) {
                dests.insert(land);
            }
        }
    }
    dests
}

/// Only the capturing destinations of the piece at `from`.
pub fn jump_destinations(board: &Board, from: Square) -> BTreeSet<Square> {
    let Some(piece) = piece_at(board, from) else {
        return BTreeSet::new();
    };
    jumps(board, piece, from).collect()
}

/// Whether the piece at `from` has at least one capture available.
///
/// Used to decide if a chain of jumps continues; it stops at the first jump
/// found instead of building the destination set.
pub fn has_jump(board: &Board, from: Square) -> bool {
    match piece_at(board, from) {
        Some(piece) => jumps(board, piece, from).next().is_some(),
        None => false,
    }
}

fn jumps(board: &Board, piece: Piece, from: Square) -> impl Iterator<Item = Square> + '_ {
    row_directions(piece)
        .iter()
        .flat_map(|&dr| SIDEWAYS.into_iter().map(move |dc| (dr, dc)))
        .filter_map(move |(dr, dc)| {
            let mid = from.offset(dr, dc);
            let land = from.offset(2 * dr, 2 * dc);
            is_valid_jump(board, piece, mid, land).then_some(land)
        })
}

fn piece_at(board: &Board, sq: Square) -> Option<Piece> {
    if !sq.in_bounds() {
        return None;
    }
    board.get(sq).piece()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col)
    }

    fn set(dests: &[(i32, i32)]) -> BTreeSet<Square> {
        dests.iter().map(|&(r, c)| sq(r, c)).collect()
    }

    #[test]
    fn test_edge_pawn_single_move() {
        let mut board = Board::new();
        board.set(sq(5, 0), Piece::pawn(Color::White).into());
        assert_eq!(legal_destinations(&board, sq(5, 0)), set(&[(4, 1)]));
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let mut board = Board::new();
        board.set(sq(2, 3), Piece::pawn(Color::Black).into());
        assert_eq!(legal_destinations(&board, sq(2, 3)), set(&[(3, 2), (3, 4)]));
    }

    #[test]
    fn test_pawn_has_no_backward_moves() {
        let mut board = Board::new();
        board.set(sq(4, 4), Piece::pawn(Color::White).into());
        board.set(sq(5, 3), Piece::pawn(Color::Black).into());
        let dests = legal_destinations(&board, sq(4, 4));
        assert_eq!(dests, set(&[(3, 3), (3, 5)]));
        assert!(!has_jump(&board, sq(4, 4)));
    }

    #[test]
    fn test_king_moves_all_diagonals() {
        let mut board = Board::new();
        board.set(sq(4, 4), Piece::king(Color::White).into());
        assert_eq!(
            legal_destinations(&board, sq(4, 4)),
            set(&[(3, 3), (3, 5), (5, 3), (5, 5)])
        );
    }

    #[test]
    fn test_jump_and_simple_move_coexist() {
        let mut board = Board::new();
        board.set(sq(4, 4), Piece::pawn(Color::White).into());
        board.set(sq(3, 3), Piece::pawn(Color::Black).into());
        let dests = legal_destinations(&board, sq(4, 4));
        assert_eq!(dests, set(&[(2, 2), (3, 5)]));
        assert_eq!(jump_destinations(&board, sq(4, 4)), set(&[(2, 2)]));
        assert!(has_jump(&board, sq(4, 4)));
    }

    #[test]
    fn test_cannot_jump_own_piece() {
        let mut board = Board::new();
        board.set(sq(4, 4), Piece::pawn(Color::White).into());
        board.set(sq(3, 3), Piece::pawn(Color::White).into());
        assert_eq!(legal_destinations(&board, sq(4, 4)), set(&[(3, 5)]));
        assert!(!has_jump(&board, sq(4, 4)));
    }

    #[test]
    fn test_jump_blocked_by_occupied_landing() {
        let mut board = Board::new();
        board.set(sq(4, 4), Piece::pawn(Color::White).into());
        board.set(sq(3, 3), Piece::pawn(Color::Black).into());
        board.set(sq(2, 2), Piece::pawn(Color::Black).into());
        assert!(!has_jump(&board, sq(4, 4)));
        assert_eq!(legal_destinations(&board, sq(4, 4)), set(&[(3, 5)]));
    }

    #[test]
    fn test_jump_off_board_rejected() {
        let mut board = Board::new();
        board.set(sq(1, 1), Piece::pawn(Color::White).into());
        board.set(sq(0, 0), Piece::pawn(Color::Black).into());
        assert!(!has_jump(&board, sq(1, 1)));
        assert_eq!(legal_destinations(&board, sq(1, 1)), set(&[(0, 2)]));
    }

    #[test]
    fn test_king_backward_jump() {
        let mut board = Board::new();
        board.set(sq(2, 2), Piece::king(Color::White).into());
        board.set(sq(3, 3), Piece::pawn(Color::Black).into());
        assert!(has_jump(&board, sq(2, 2)));
        assert!(legal_destinations(&board, sq(2, 2)).contains(&sq(4, 4)));
    }

    #[test]
    fn test_black_king_moves_both_ways() {
        let mut board = Board::new();
        board.set(sq(3, 3), Piece::king(Color::Black).into());
        assert_eq!(
            legal_destinations(&board, sq(3, 3)),
            set(&[(2, 2), (2, 4), (4, 2), (4, 4)])
        );
        // A Black pawn on the same square only goes down.
        board.set(sq(3, 3), Piece::pawn(Color::Black).into());
        assert_eq!(legal_destinations(&board, sq(3, 3)), set(&[(4, 2), (4, 4)]));
    }

    #[test]
    fn test_black_king_backward_jump() {
        let mut board = Board::new();
        board.set(sq(5, 5), Piece::king(Color::Black).into());
        board.set(sq(4, 4), Piece::pawn(Color::White).into());
        board.set(sq(6, 6), Piece::pawn(Color::Black).into());
        assert!(has_jump(&board, sq(5, 5)));
        assert_eq!(jump_destinations(&board, sq(5, 5)), set(&[(3, 3)]));
        assert_eq!(
            legal_destinations(&board, sq(5, 5)),
            set(&[(3, 3), (4, 6), (6, 4)])
        );

        // Without the crown the backward capture disappears.
        board.set(sq(5, 5), Piece::pawn(Color::Black).into());
        assert!(!has_jump(&board, sq(5, 5)));
    }

    #[test]
    fn test_empty_or_offboard_source() {
        let board = Board::new();
        assert!(legal_destinations(&board, sq(3, 3)).is_empty());
        assert!(legal_destinations(&board, sq(-1, -1)).is_empty());
        assert!(!has_jump(&board, sq(9, 0)));
    }

    #[test]
    fn test_initial_position_front_row() {
        let board = Board::setup();
        // Back rows are blocked, front rows have moves.
        assert!(legal_destinations(&board, sq(7, 0)).is_empty());
        assert_eq!(legal_destinations(&board, sq(5, 0)), set(&[(4, 1)]));
        assert_eq!(legal_destinations(&board, sq(2, 1)), set(&[(3, 0), (3, 2)]));
    }
}
