//! Checkers Core - Rules engine and AI
//!
//! This crate provides the core game logic for 8x8 checkers:
//! - Board model with deep-cloning boards
//! - Move legality, forced captures, multi-jumps and promotion
//! - Move generation and static evaluation
//! - Iterative-deepening alpha-beta AI with a transposition table
//! - A reference game session driving the rules turn by turn

pub mod board;
pub mod rules;
pub mod movegen;
pub mod eval;
pub mod transposition;
pub mod difficulty;
pub mod random;
pub mod ai;
pub mod game;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, BoardKey, Color, Move, Piece, Position, BOARD_SIZE};
pub use rules::{
    any_capture_available, apply_move, can_continue_capture, is_legal_jump_move,
    is_legal_simple_move, is_terminal, MoveOutcome, Outcome,
};
pub use movegen::{filter_mandatory, generate_moves, legal_moves};
pub use eval::{evaluate, evaluate_with, Heuristics};
pub use difficulty::{Difficulty, DifficultyTable, SearchLimits};
pub use random::{FixedSequence, RandomSource, SeededRandom};
pub use ai::{get_best_move, CheckersAi, EngineConfig, SearchOutcome, SearchStats, SearchStatus};
pub use game::{GameState, TurnReport};
pub use error::MoveError;

/// Fresh board in the standard opening setup
pub fn new_board() -> Board {
    Board::new()
}

/// Independent deep copy of a board
pub fn clone_board(board: &Board) -> Board {
    board.clone()
}
