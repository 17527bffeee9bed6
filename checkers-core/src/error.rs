//! Rejections reported to the session layer

use crate::board::{Color, Move, Position};
use crate::rules::Outcome;

/// Why a requested move was not played. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Illegal move {mv}")]
    IllegalMove { mv: Move },

    #[error("Move {mv} ignores an available capture")]
    MustCapture { mv: Move },

    #[error("Move {mv} abandons the capture chain at ({}, {})", .origin.row, .origin.col)]
    MustContinueJump { origin: Position, mv: Move },

    #[error("{color:?} has no legal moves")]
    NoLegalMoves { color: Color },

    #[error("Game is already over: {outcome:?}")]
    GameOver { outcome: Outcome },
}
