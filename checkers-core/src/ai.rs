//! Computer opponent: iterative-deepening minimax with alpha-beta pruning

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Position};
use crate::difficulty::{Difficulty, DifficultyTable, SearchLimits};
use crate::eval::{evaluate_with, Heuristics};
use crate::game::GameState;
use crate::movegen::legal_moves;
use crate::random::{RandomSource, SeededRandom};
use crate::rules::apply_move;
use crate::transposition::{Bound, SearchResult, TranspositionTable};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a node whose side to move has no legal move
pub const LOSS_SCORE: f64 = 1000.0;

/// Move ordering priorities
const JUMP_PRIORITY: i32 = 1000;
const PROMOTION_PRIORITY: i32 = 500;
const CENTER_PRIORITY: i32 = 50;
const PROGRESS_PRIORITY: i32 = 10;

// ============================================================================
// CONFIGURATION AND RESULTS
// ============================================================================

/// Engine settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side the engine plays and maximizes for
    pub maximizer: Color,
    pub use_transposition: bool,
    pub heuristics: Heuristics,
    pub limits: DifficultyTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            maximizer: Color::White,
            use_transposition: true,
            heuristics: Heuristics::default(),
            limits: DifficultyTable::default(),
        }
    }
}

impl EngineConfig {
    pub fn for_color(maximizer: Color) -> Self {
        Self {
            maximizer,
            ..Default::default()
        }
    }

    pub fn with_limits(mut self, limits: DifficultyTable) -> Self {
        self.limits = limits;
        self
    }

    pub fn without_transposition(mut self) -> Self {
        self.use_transposition = false;
        self
    }
}

/// How a search finished
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Every requested depth completed
    Completed,
    /// The budget ran out; the move comes from `completed_depth`
    TimeExceeded { requested_depth: u32, completed_depth: u32 },
    /// Picked uniformly at random, no search
    Random,
    /// The side to move has nothing to play
    NoLegalMoves,
}

/// Instrumentation for one top-level search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub tt_hits: u64,
    pub tt_entries: usize,
    pub elapsed_ms: u64,
}

/// Result of `CheckersAi::search`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    /// Minimax score of `best_move` from the maximizer's side (0 if unsearched)
    pub score: f64,
    pub completed_depth: u32,
    pub status: SearchStatus,
    pub stats: SearchStats,
}

impl SearchOutcome {
    fn unsearched(best_move: Option<Move>, status: SearchStatus) -> Self {
        Self {
            best_move,
            score: 0.0,
            completed_depth: 0,
            status,
            stats: SearchStats::default(),
        }
    }
}

// ============================================================================
// CHECKERS AI
// ============================================================================

/// Computer player for one color
pub struct CheckersAi<R: RandomSource = SeededRandom> {
    config: EngineConfig,
    rng: R,
    table: TranspositionTable,
}

impl CheckersAi<SeededRandom> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, SeededRandom::default())
    }

    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> CheckersAi<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            table: TranspositionTable::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.config.maximizer
    }

    /// Best move for the engine's color, or `None` if it cannot move
    pub fn best_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        forced_origin: Option<Position>,
    ) -> Option<Move> {
        self.search(board, difficulty, forced_origin).best_move
    }

    /// Pick a move at the given tier. A pending multi-jump always uses the
    /// continuation limits, whatever the tier.
    pub fn search(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        forced_origin: Option<Position>,
    ) -> SearchOutcome {
        let limits = if forced_origin.is_some() {
            self.config.limits.continuation
        } else {
            self.config.limits.limits(difficulty)
        };

        if limits.uses_search() {
            self.search_with_limits(board, limits, forced_origin)
        } else {
            self.random_move(board, forced_origin)
        }
    }

    /// Search the session's current position
    pub fn choose_move(&mut self, state: &GameState, difficulty: Difficulty) -> SearchOutcome {
        debug_assert_eq!(state.turn(), self.color(), "engine asked to move for the wrong side");
        self.search(state.board(), difficulty, state.forced_origin())
    }

    /// Uniform choice among legal moves (captures only, when one exists)
    pub fn random_move(&mut self, board: &Board, forced_origin: Option<Position>) -> SearchOutcome {
        let moves = legal_moves(board, self.config.maximizer, forced_origin);
        if moves.is_empty() {
            return SearchOutcome::unsearched(None, SearchStatus::NoLegalMoves);
        }
        let index = self.rng.next_index(moves.len());
        SearchOutcome::unsearched(Some(moves[index]), SearchStatus::Random)
    }

    /// Iterative deepening from depth 1 to `limits.max_depth`.
    ///
    /// Depth 1 always completes. Later iterations stop at the first root move
    /// examined after the budget has elapsed, and their partial result is
    /// discarded.
    pub fn search_with_limits(
        &mut self,
        board: &Board,
        limits: SearchLimits,
        forced_origin: Option<Position>,
    ) -> SearchOutcome {
        let start = Instant::now();
        let budget = Duration::from_millis(limits.time_budget_ms);
        self.search_until(board, limits, forced_origin, |_, _| start.elapsed() > budget)
    }

    /// Iterative deepening where `expired(depth, root_moves_searched)` decides
    /// when the budget is spent. It is asked before each root move from depth 2
    /// on; depth 1 never consults it.
    pub fn search_until<F>(
        &mut self,
        board: &Board,
        limits: SearchLimits,
        forced_origin: Option<Position>,
        mut expired: F,
    ) -> SearchOutcome
    where
        F: FnMut(u32, usize) -> bool,
    {
        let start = Instant::now();
        let maximizer = self.config.maximizer;

        self.table.clear();
        let root = board.clone();

        let mut root_moves = order_moves(&root, legal_moves(&root, maximizer, forced_origin));
        if root_moves.is_empty() {
            return SearchOutcome::unsearched(None, SearchStatus::NoLegalMoves);
        }

        let mut searcher = Searcher {
            table: &mut self.table,
            heuristics: &self.config.heuristics,
            maximizer,
            use_transposition: self.config.use_transposition,
            nodes: 0,
            tt_hits: 0,
        };

        let mut best: Option<(Move, f64)> = None;
        let mut completed_depth = 0;

        'deepening: for depth in 1..=limits.max_depth.max(1) {
            let mut iteration_best: Option<(Move, f64)> = None;
            let mut alpha = f64::NEG_INFINITY;

            for (searched, &mv) in root_moves.iter().enumerate() {
                if depth > 1 && expired(depth, searched) {
                    tracing::warn!(
                        "Time budget of {} ms spent after {} root moves of depth {}, keeping depth {}",
                        limits.time_budget_ms,
                        searched,
                        depth,
                        completed_depth
                    );
                    break 'deepening;
                }

                let mut child = root.clone();
                apply_move(&mut child, mv);
                let score = searcher.minimax(&child, depth - 1, false, alpha, f64::INFINITY);

                if iteration_best.map_or(true, |(_, best_score)| score > best_score) {
                    iteration_best = Some((mv, score));
                    alpha = score;
                }
            }

            best = iteration_best;
            completed_depth = depth;

            // Search the previous best first on the next iteration
            if let Some((mv, _)) = best {
                if let Some(index) = root_moves.iter().position(|&m| m == mv) {
                    root_moves[..=index].rotate_right(1);
                }
            }

            tracing::trace!(
                "Completed depth {}, best score {:.2}, {} positions",
                depth,
                best.map_or(0.0, |(_, s)| s),
                searcher.nodes
            );
        }

        let (nodes_visited, tt_hits) = (searcher.nodes, searcher.tt_hits);
        let stats = SearchStats {
            nodes_visited,
            tt_hits,
            tt_entries: self.table.len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        tracing::debug!(
            "Search report: depth {}/{}, {} positions, {} ms",
            completed_depth,
            limits.max_depth,
            stats.nodes_visited,
            stats.elapsed_ms
        );

        let status = if completed_depth < limits.max_depth {
            SearchStatus::TimeExceeded {
                requested_depth: limits.max_depth,
                completed_depth,
            }
        } else {
            SearchStatus::Completed
        };

        SearchOutcome {
            best_move: best.map(|(mv, _)| mv),
            score: best.map_or(0.0, |(_, s)| s),
            completed_depth,
            status,
            stats,
        }
    }
}

/// One-shot search with a default engine playing White, randomness drawn
/// from OS entropy
pub fn get_best_move(board: &Board, difficulty: Difficulty, forced_origin: Option<Position>) -> Option<Move> {
    CheckersAi::with_rng(EngineConfig::default(), SeededRandom::from_entropy())
        .best_move(board, difficulty, forced_origin)
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Priority for ordering (higher = search first)
pub fn move_priority(board: &Board, mv: &Move) -> i32 {
    let mut priority = 0;

    if mv.is_jump() {
        priority += JUMP_PRIORITY;
    }

    let piece = match board.get(mv.from) {
        Some(p) => p,
        None => return priority,
    };

    if !piece.is_king && mv.to.row == piece.color.promotion_row() {
        priority += PROMOTION_PRIORITY;
    }

    if (2..=5).contains(&mv.to.col) {
        priority += CENTER_PRIORITY;
    }

    let progress = (mv.to.row - piece.color.home_row()).abs() as i32;
    priority + progress * PROGRESS_PRIORITY
}

/// Stable sort by descending priority
pub fn order_moves(board: &Board, mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|mv| Reverse(move_priority(board, mv)));
    moves
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

struct Searcher<'a> {
    table: &'a mut TranspositionTable,
    heuristics: &'a Heuristics,
    maximizer: Color,
    use_transposition: bool,
    nodes: u64,
    tt_hits: u64,
}

impl Searcher<'_> {
    fn minimax(&mut self, board: &Board, depth: u32, maximizing: bool, mut alpha: f64, mut beta: f64) -> f64 {
        self.nodes += 1;

        let to_move = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };

        let key = board.key();
        if self.use_transposition {
            if let Some(score) = self.table.probe(key, to_move, depth, alpha, beta) {
                self.tt_hits += 1;
                return score;
            }
        }

        if depth == 0 {
            return evaluate_with(board, self.maximizer, self.heuristics);
        }

        let moves = legal_moves(board, to_move, None);
        if moves.is_empty() {
            return if maximizing { -LOSS_SCORE } else { LOSS_SCORE };
        }
        let moves = order_moves(board, moves);

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let mut child = board.clone();
            apply_move(&mut child, mv);
            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        if self.use_transposition {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.table.store(key, to_move, SearchResult { score: best, depth, bound });
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
