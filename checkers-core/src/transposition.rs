//! Transposition table for caching search results
//!
//! Keyed by the exact board encoding plus the side to move, so the same
//! layout reached with different movers never collides.

use rustc_hash::FxHashMap;

use crate::board::{BoardKey, Color};

/// How a stored score relates to the true minimax value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Searched inside the window
    Exact,
    /// Beta cutoff: true value >= score
    Lower,
    /// Failed low: true value <= score
    Upper,
}

/// Cached result for one position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub depth: u32,
    pub bound: Bound,
}

/// Position cache. Cleared at the start of every top-level search.
#[derive(Default)]
pub struct TranspositionTable {
    entries: FxHashMap<(BoardKey, Color), SearchResult>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached score usable at `depth` within `(alpha, beta)`, if any
    pub fn probe(&self, key: BoardKey, to_move: Color, depth: u32, alpha: f64, beta: f64) -> Option<f64> {
        let entry = self.entries.get(&(key, to_move))?;
        if entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Overwrite whatever was stored for this position
    pub fn store(&mut self, key: BoardKey, to_move: Color, result: SearchResult) {
        self.entries.insert((key, to_move), result);
    }
}
