//! Move generation
//!
//! Generation is unfiltered: the mandatory-capture rule is applied by the
//! caller through `filter_mandatory`, so the session and the AI share it.

use crate::board::{Board, Color, Move, Position, DIAGONALS};
use crate::rules::{is_legal_jump_move, is_legal_simple_move};

/// Enumerate every legal step and jump for `color`.
///
/// With `restrict_origin`, only the piece on that square is considered
/// (used for multi-jump continuations).
pub fn generate_moves(board: &Board, color: Color, restrict_origin: Option<Position>) -> Vec<Move> {
    let mut moves = Vec::new();

    match restrict_origin {
        Some(origin) => {
            if board.get(origin).is_some_and(|p| p.color == color) {
                generate_piece_moves(board, origin, &mut moves);
            }
        }
        None => {
            for (pos, piece) in board.pieces() {
                if piece.color == color {
                    generate_piece_moves(board, pos, &mut moves);
                }
            }
        }
    }

    moves
}

fn generate_piece_moves(board: &Board, from: Position, moves: &mut Vec<Move>) {
    for &dir in &DIAGONALS {
        if let Some(to) = from.offset(dir, 1) {
            if is_legal_simple_move(board, from, to) {
                moves.push(Move::new(from, to));
            }
        }
        if let Some(to) = from.offset(dir, 2) {
            if is_legal_jump_move(board, from, to) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Jumps only, if any jump exists; otherwise the list unchanged
pub fn filter_mandatory(moves: Vec<Move>) -> Vec<Move> {
    if moves.iter().any(Move::is_jump) {
        moves.into_iter().filter(Move::is_jump).collect()
    } else {
        moves
    }
}

/// Generation followed by the mandatory-capture filter
pub fn legal_moves(board: &Board, color: Color, restrict_origin: Option<Position>) -> Vec<Move> {
    filter_mandatory(generate_moves(board, color, restrict_origin))
}

/// Number of unfiltered moves (mobility heuristic)
pub fn mobility(board: &Board, color: Color) -> usize {
    generate_moves(board, color, None).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::rules::any_capture_available;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::new();
        // front row of each side: 4 men, edge man has one step
        assert_eq!(generate_moves(&board, Color::Red, None).len(), 7);
        assert_eq!(generate_moves(&board, Color::White, None).len(), 7);
    }

    #[test]
    fn test_restrict_origin() {
        let board = Board::new();
        let moves = generate_moves(&board, Color::Red, Some(pos(5, 2)));
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.from == pos(5, 2)));

        // origin holding an enemy piece yields nothing
        assert!(generate_moves(&board, Color::Red, Some(pos(2, 1))).is_empty());
    }

    #[test]
    fn test_mandatory_filter_keeps_only_jumps() {
        let board = Board::with_pieces(&[
            (pos(5, 2), Piece::man(Color::Red)),
            (pos(5, 6), Piece::man(Color::Red)),
            (pos(4, 3), Piece::man(Color::White)),
        ]);
        let all = generate_moves(&board, Color::Red, None);
        assert!(all.iter().any(|m| m.is_simple()));

        let filtered = legal_moves(&board, Color::Red, None);
        assert_eq!(filtered, vec![Move::new(pos(5, 2), pos(3, 4))]);
    }

    #[test]
    fn test_jumps_match_brute_force() {
        let board = Board::with_pieces(&[
            (pos(5, 2), Piece::man(Color::Red)),
            (pos(3, 4), Piece::king(Color::Red)),
            (pos(4, 3), Piece::man(Color::White)),
            (pos(2, 5), Piece::man(Color::White)),
            (pos(2, 3), Piece::man(Color::White)),
        ]);
        assert!(any_capture_available(&board, Color::Red));

        let mut generated: Vec<Move> = generate_moves(&board, Color::Red, None)
            .into_iter()
            .filter(Move::is_jump)
            .collect();
        let mut brute = Vec::new();
        for (from, piece) in board.pieces() {
            if piece.color != Color::Red {
                continue;
            }
            for dir in DIAGONALS {
                if let Some(to) = from.offset(dir, 2) {
                    if is_legal_jump_move(&board, from, to) {
                        brute.push(Move::new(from, to));
                    }
                }
            }
        }
        generated.sort_by_key(|m| (m.from.row, m.from.col, m.to.row, m.to.col));
        brute.sort_by_key(|m| (m.from.row, m.from.col, m.to.row, m.to.col));
        assert_eq!(generated, brute);
        assert!(!generated.is_empty());
    }
}
