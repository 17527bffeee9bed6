//! Move legality, move application and terminal-state detection
//!
//! All functions are pure over the board they are given. Illegal input is
//! answered with `false`, never with an error.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Piece, Position, DIAGONALS};
use crate::movegen::generate_moves;

/// What `apply_move` did besides relocating the piece
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub captured: bool,
    pub promoted: bool,
}

/// Game status for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    /// The given color won: the other side has no pieces left
    Win(Color),
    /// The given color is to move, still has pieces, but cannot move
    Stalemate(Color),
}

impl Outcome {
    /// Winning color, if the game is over. A stalemated side loses.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Win(color) => Some(color),
            Outcome::Stalemate(stuck) => Some(stuck.opponent()),
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Whether the piece may travel in this row direction
fn direction_allowed(piece: Piece, row_delta: i8) -> bool {
    piece.is_king || row_delta.signum() == piece.color.forward()
}

/// Diagonal step of one square onto an empty cell
pub fn is_legal_simple_move(board: &Board, from: Position, to: Position) -> bool {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return false,
    };
    if !board.is_empty(to) {
        return false;
    }

    let row_delta = to.row - from.row;
    let col_delta = to.col - from.col;

    col_delta.abs() == 1 && row_delta.abs() == 1 && direction_allowed(piece, row_delta)
}

/// Diagonal jump of two squares over an enemy piece onto an empty cell
pub fn is_legal_jump_move(board: &Board, from: Position, to: Position) -> bool {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return false,
    };
    if !board.is_empty(to) {
        return false;
    }

    let row_delta = to.row - from.row;
    let col_delta = to.col - from.col;
    if row_delta.abs() != 2 || col_delta.abs() != 2 {
        return false;
    }
    if !direction_allowed(piece, row_delta) {
        return false;
    }

    match board.get(from.midpoint(to)) {
        Some(victim) => victim.color != piece.color,
        None => false,
    }
}

/// Either kind of legal move
pub fn is_legal_move(board: &Board, mv: Move) -> bool {
    if mv.is_jump() {
        is_legal_jump_move(board, mv.from, mv.to)
    } else {
        is_legal_simple_move(board, mv.from, mv.to)
    }
}

/// Move the piece, remove a jumped victim and crown on the far row.
///
/// Legality is the caller's concern. Panics if `mv.from` is empty.
pub fn apply_move(board: &mut Board, mv: Move) -> MoveOutcome {
    let mut piece = board.take(mv.from).expect("No piece at from position");
    let mut outcome = MoveOutcome::default();

    if mv.is_jump() {
        outcome.captured = board.take(mv.from.midpoint(mv.to)).is_some();
    }

    if !piece.is_king && mv.to.row == piece.color.promotion_row() {
        piece.is_king = true;
        outcome.promoted = true;
    }

    board.set(mv.to, Some(piece));
    outcome
}

/// True if the piece at `pos` has at least one legal jump
pub fn has_jump_from(board: &Board, pos: Position) -> bool {
    DIAGONALS.iter().any(|&dir| {
        pos.offset(dir, 2)
            .is_some_and(|to| is_legal_jump_move(board, pos, to))
    })
}

/// Mandatory-capture check: some piece of `color` can jump
pub fn any_capture_available(board: &Board, color: Color) -> bool {
    board
        .pieces()
        .any(|(pos, piece)| piece.color == color && has_jump_from(board, pos))
}

/// After a jump landed on `pos`, does the chain have to continue?
pub fn can_continue_capture(board: &Board, pos: Position) -> bool {
    board.get(pos).is_some() && has_jump_from(board, pos)
}

/// Win when a side has no pieces; stalemate when the mover cannot move
pub fn is_terminal(board: &Board, to_move: Color) -> Outcome {
    let mover_count = board.count(to_move);
    let other_count = board.count(to_move.opponent());

    if mover_count == 0 {
        return Outcome::Win(to_move.opponent());
    }
    if other_count == 0 {
        return Outcome::Win(to_move);
    }
    if generate_moves(board, to_move, None).is_empty() {
        return Outcome::Stalemate(to_move);
    }

    Outcome::Ongoing
}
