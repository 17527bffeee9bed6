//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::movegen::mobility;

/// Positional weights per square, heaviest on the back rows
const SQUARE_WEIGHTS: [[u8; 8]; 8] = [
    [0, 4, 0, 4, 0, 4, 0, 4],
    [3, 0, 3, 0, 3, 0, 3, 0],
    [0, 2, 0, 2, 0, 2, 0, 2],
    [2, 0, 2, 0, 2, 0, 2, 0],
    [0, 2, 0, 2, 0, 2, 0, 2],
    [2, 0, 2, 0, 2, 0, 2, 0],
    [0, 3, 0, 3, 0, 3, 0, 3],
    [4, 0, 4, 0, 4, 0, 4, 0],
];

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Heuristics {
    pub man_value: f64,
    pub king_value: f64,
    /// Multiplier on `SQUARE_WEIGHTS`
    pub square_weight: f64,
    /// Per row advanced, men only
    pub advancement_weight: f64,
    /// Awarded once for the middle columns and once for the middle rows
    pub center_bonus: f64,
    /// Man or king still on its own back row
    pub back_row_bonus: f64,
    pub mobility_weight: f64,
    /// Total piece count at or below which the endgame terms apply
    pub endgame_pieces: usize,
    pub endgame_king_weight: f64,
    /// Material lead that switches on the aggression term
    pub aggression_lead: usize,
    pub aggression_weight: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            man_value: 3.0,
            king_value: 10.0,
            square_weight: 0.1,
            advancement_weight: 0.2,
            center_bonus: 0.3,
            back_row_bonus: 0.5,
            mobility_weight: 0.15,
            endgame_pieces: 8,
            endgame_king_weight: 3.0,
            aggression_lead: 2,
            aggression_weight: 0.5,
        }
    }
}

/// Evaluate with default heuristics, positive favouring `perspective`
pub fn evaluate(board: &Board, perspective: Color) -> f64 {
    evaluate_with(board, perspective, &Heuristics::default())
}

/// Evaluate a board from one side's point of view.
///
/// Every term is a difference between the two sides except the aggression
/// bonus, which only rewards `perspective` for leading on material.
pub fn evaluate_with(board: &Board, perspective: Color, heuristics: &Heuristics) -> f64 {
    let opponent = perspective.opponent();
    let mut score = 0.0;

    for (pos, piece) in board.pieces() {
        let row = pos.row as usize;
        let col = pos.col as usize;

        let mut value = if piece.is_king {
            heuristics.king_value
        } else {
            heuristics.man_value
        };
        value += SQUARE_WEIGHTS[row][col] as f64 * heuristics.square_weight;

        if !piece.is_king {
            let advanced = (pos.row - piece.color.home_row()).abs();
            value += advanced as f64 * heuristics.advancement_weight;
        }

        if (2..=5).contains(&col) {
            value += heuristics.center_bonus;
        }
        if (2..=5).contains(&row) {
            value += heuristics.center_bonus;
        }

        if pos.row == piece.color.home_row() {
            value += heuristics.back_row_bonus;
        }

        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }

    if heuristics.mobility_weight != 0.0 {
        let mine = mobility(board, perspective) as f64;
        let theirs = mobility(board, opponent) as f64;
        score += heuristics.mobility_weight * (mine - theirs);
    }

    let my_pieces = board.count(perspective);
    let their_pieces = board.count(opponent);

    if my_pieces + their_pieces <= heuristics.endgame_pieces {
        let king_diff = board.count_kings(perspective) as f64 - board.count_kings(opponent) as f64;
        score += heuristics.endgame_king_weight * king_diff;
    }

    if my_pieces > their_pieces + heuristics.aggression_lead {
        score += heuristics.aggression_weight * (my_pieces - their_pieces) as f64;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Position};

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_evaluate_symmetric() {
        let board = Board::new();
        let white = evaluate(&board, Color::White);
        let red = evaluate(&board, Color::Red);
        assert!(white.abs() < 1e-9, "Score {} should be 0 for the opening", white);
        assert!((white + red).abs() < 1e-9);
    }

    #[test]
    fn test_material_dominates() {
        let mut board = Board::new();
        board.set(pos(5, 0), None);
        assert!(evaluate(&board, Color::White) > 2.0);
        assert!(evaluate(&board, Color::Red) < -2.0);
    }

    #[test]
    fn test_king_worth_more_than_man() {
        let man = Board::with_pieces(&[
            (pos(3, 2), Piece::man(Color::White)),
            (pos(6, 5), Piece::man(Color::Red)),
        ]);
        let king = Board::with_pieces(&[
            (pos(3, 2), Piece::king(Color::White)),
            (pos(6, 5), Piece::man(Color::Red)),
        ]);
        assert!(evaluate(&king, Color::White) > evaluate(&man, Color::White) + 5.0);
    }

    #[test]
    fn test_single_piece_terms() {
        // man + square + advancement + both center bonuses + two moves of mobility
        let board = Board::with_pieces(&[(pos(2, 3), Piece::man(Color::White))]);
        let h = Heuristics::default();
        let expected = 3.0 + 0.2 + 0.4 + 0.6 + 0.15 * 2.0;
        let score = evaluate_with(&board, Color::White, &h);
        assert!((score - expected).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_aggression_bonus() {
        let board = Board::with_pieces(&[
            (pos(0, 1), Piece::man(Color::White)),
            (pos(0, 3), Piece::man(Color::White)),
            (pos(0, 5), Piece::man(Color::White)),
            (pos(0, 7), Piece::man(Color::White)),
        ]);
        let mut h = Heuristics::default();
        let with_bonus = evaluate_with(&board, Color::White, &h);
        h.aggression_weight = 0.0;
        let without = evaluate_with(&board, Color::White, &h);
        assert!((with_bonus - without - 2.0).abs() < 1e-9);
    }
}
