//! Game session: authoritative board, turn order and capture chains

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Position};
use crate::error::MoveError;
use crate::movegen::legal_moves;
use crate::rules::{
    any_capture_available, apply_move, can_continue_capture, is_legal_move, is_terminal, Outcome,
};

/// What happened when a move was played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub mv: Move,
    pub mover: Color,
    pub captured: bool,
    pub promoted: bool,
    /// Same piece must jump again; the turn did not pass
    pub continues: bool,
    pub outcome: Outcome,
}

/// Game state (mutated in place by `play`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Color,
    /// Set while a multi-jump chain is in progress
    forced_origin: Option<Position>,
    red_captures: u32,
    white_captures: u32,
    /// Moves played, chain jumps counted individually
    ply: u32,
    outcome: Outcome,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard opening, Red to move
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Red)
    }

    /// Start from an arbitrary position
    pub fn from_board(board: Board, turn: Color) -> Self {
        let outcome = is_terminal(&board, turn);
        Self {
            board,
            turn,
            forced_origin: None,
            red_captures: 0,
            white_captures: 0,
            ply: 0,
            outcome,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn forced_origin(&self) -> Option<Position> {
        self.forced_origin
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves played so far, chain jumps counted individually
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Enemy pieces taken by `color` so far
    pub fn captures(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red_captures,
            Color::White => self.white_captures,
        }
    }

    /// Moves the side to move may play, capture rule applied
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_over() {
            return vec![];
        }
        legal_moves(&self.board, self.turn, self.forced_origin)
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Validate and play a move for the side to move
    pub fn play(&mut self, mv: Move) -> Result<TurnReport, MoveError> {
        self.validate(mv)?;

        let mover = self.turn;
        let result = apply_move(&mut self.board, mv);
        self.ply += 1;

        if result.captured {
            match mover {
                Color::Red => self.red_captures += 1,
                Color::White => self.white_captures += 1,
            }
        }

        let continues = result.captured && can_continue_capture(&self.board, mv.to);
        if continues {
            self.forced_origin = Some(mv.to);
        } else {
            self.forced_origin = None;
            self.turn = mover.opponent();
        }

        self.outcome = is_terminal(&self.board, self.turn);

        tracing::debug!(
            "{:?} played {} (capture={}, promoted={}, continues={})",
            mover,
            mv,
            result.captured,
            result.promoted,
            continues
        );

        Ok(TurnReport {
            mv,
            mover,
            captured: result.captured,
            promoted: result.promoted,
            continues,
            outcome: self.outcome,
        })
    }

    fn validate(&self, mv: Move) -> Result<(), MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver { outcome: self.outcome });
        }

        let owned = self.board.get(mv.from).is_some_and(|p| p.color == self.turn);
        if !owned || !is_legal_move(&self.board, mv) {
            return Err(MoveError::IllegalMove { mv });
        }

        if let Some(origin) = self.forced_origin {
            if mv.from != origin || !mv.is_jump() {
                return Err(MoveError::MustContinueJump { origin, mv });
            }
        }

        if !mv.is_jump() && any_capture_available(&self.board, self.turn) {
            return Err(MoveError::MustCapture { mv });
        }

        Ok(())
    }

    /// Error to report when the side to move is stuck
    pub fn stalled(&self) -> Option<MoveError> {
        match self.outcome {
            Outcome::Stalemate(color) => Some(MoveError::NoLegalMoves { color }),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
