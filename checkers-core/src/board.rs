//! Board geometry, pieces and moves on the 8x8 draughts grid

use serde::{Deserialize, Serialize};

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// Diagonal direction vectors (dr, dc)
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// ============================================================================
// POSITION
// ============================================================================

/// Grid coordinates, row and column both in `0..8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    /// Create a position. Panics if off the board.
    pub const fn new(row: i8, col: i8) -> Self {
        assert!(row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE);
        Self { row, col }
    }

    /// Create a position, or `None` if off the board
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Dark squares are the playable ones
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 != 0
    }

    /// Step `times` squares along a direction vector
    pub fn offset(&self, (dr, dc): (i8, i8), times: i8) -> Option<Position> {
        Position::try_new(self.row + dr * times, self.col + dc * times)
    }

    /// Midpoint between two positions two squares apart
    pub fn midpoint(&self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    fn index(&self) -> usize {
        debug_assert!(
            (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col),
            "position off the board: {:?}",
            self
        );
        (self.row * BOARD_SIZE + self.col) as usize
    }
}

// ============================================================================
// PIECES
// ============================================================================

/// Side color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::White,
            Color::White => Color::Red,
        }
    }

    /// Row delta of a man's forward step (Red advances toward row 0)
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::White => 1,
        }
    }

    /// Row on which this color's men are crowned
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::Red => 0,
            Color::White => BOARD_SIZE - 1,
        }
    }

    /// This color's own back row
    pub fn home_row(self) -> i8 {
        self.opponent().promotion_row()
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, is_king: false }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, is_king: true }
    }
}

// ============================================================================
// MOVES
// ============================================================================

/// A single step or jump between two squares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    pub fn row_delta(&self) -> i8 {
        self.to.row - self.from.row
    }

    pub fn col_delta(&self) -> i8 {
        self.to.col - self.from.col
    }

    /// Diagonal distance 1
    pub fn is_simple(&self) -> bool {
        self.row_delta().abs() == 1 && self.col_delta().abs() == 1
    }

    /// Diagonal distance 2
    pub fn is_jump(&self) -> bool {
        self.row_delta().abs() == 2 && self.col_delta().abs() == 2
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 8x8 grid of optional pieces (clone for an independent copy)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard setup: White on rows 0-2, Red on rows 5-7, dark squares only
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in dark_squares() {
            if pos.row < 3 {
                board.set(pos, Some(Piece::man(Color::White)));
            } else if pos.row > 4 {
                board.set(pos, Some(Piece::man(Color::Red)));
            }
        }
        board
    }

    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: vec![None; (BOARD_SIZE * BOARD_SIZE) as usize],
        }
    }

    /// Build a board from explicit placements
    pub fn with_pieces(pieces: &[(Position, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(pos, piece) in pieces {
            board.set(pos, Some(piece));
        }
        board
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()]
    }

    /// Place or clear a piece. Panics on a light square.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        assert!(
            piece.is_none() || pos.is_dark(),
            "pieces live on dark squares only: {:?}",
            pos
        );
        self.cells[pos.index()] = piece;
    }

    /// Remove and return the piece at a square
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()].take()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Iterate occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        dark_squares().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, p)| p.color == color && p.is_king)
            .count()
    }

    /// Canonical encoding of the position (see `BoardKey`)
    pub fn key(&self) -> BoardKey {
        let mut key: u128 = 0;
        for pos in dark_squares() {
            let code = match self.get(pos) {
                None => 0,
                Some(Piece { color: Color::Red, is_king: false }) => 1,
                Some(Piece { color: Color::Red, is_king: true }) => 2,
                Some(Piece { color: Color::White, is_king: false }) => 3,
                Some(Piece { color: Color::White, is_king: true }) => 4,
            };
            key = key * 5 + code;
        }
        BoardKey(key)
    }
}

/// Base-5 digits over the 32 dark squares; 5^32 fits in a u128, so
/// distinct layouts never share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardKey(pub u128);

/// All 32 playable squares in row-major order
pub fn dark_squares() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE).flat_map(|row| {
        (0..BOARD_SIZE)
            .map(move |col| Position { row, col })
            .filter(Position::is_dark)
    })
}
