//! Integration tests for the checkers engine
//!
//! Tests the full stack: board model, rules, move generation, search and
//! the game session driving two engines.

use std::collections::HashSet;

use checkers_core::{
    any_capture_available, apply_move, board::{dark_squares, DIAGONALS}, can_continue_capture,
    clone_board, generate_moves, is_legal_jump_move, is_legal_simple_move, is_terminal, new_board,
    Board, CheckersAi, Color, Difficulty, EngineConfig, GameState, Move, Outcome, Piece, Position,
    SearchLimits, SearchStatus,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

fn mv(from: (i8, i8), to: (i8, i8)) -> Move {
    Move::new(pos(from.0, from.1), pos(to.0, to.1))
}

/// Random position: each dark square holds a piece with probability `density`.
/// Men never sit on their own promotion row.
fn random_board(rng: &mut ChaCha8Rng, density: f64) -> Board {
    let mut board = Board::empty();
    for square in dark_squares() {
        if !rng.gen_bool(density) {
            continue;
        }
        let color = if rng.gen_bool(0.5) { Color::Red } else { Color::White };
        let is_king = rng.gen_bool(0.2) || square.row == color.promotion_row();
        board.set(square, Some(Piece { color, is_king }));
    }
    board
}

fn random_boards(seed: u64, count: usize) -> Vec<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| random_board(&mut rng, 0.2 + (i % 5) as f64 * 0.1))
        .collect()
}

/// Every jump found by trying all four directions from every owned piece
fn brute_force_jumps(board: &Board, color: Color) -> HashSet<Move> {
    let mut jumps = HashSet::new();
    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for dir in DIAGONALS {
            if let Some(to) = from.offset(dir, 2) {
                if is_legal_jump_move(board, from, to) {
                    jumps.insert(Move::new(from, to));
                }
            }
        }
    }
    jumps
}

// ============================================================================
// END-TO-END SCENARIOS
// ============================================================================

#[test]
fn test_fresh_board_layout() {
    let board = new_board();
    assert_eq!(board.count(Color::Red), 12);
    assert_eq!(board.count(Color::White), 12);

    for row in 0..8 {
        for col in 0..8 {
            let square = pos(row, col);
            match board.get(square) {
                Some(piece) => {
                    assert!(square.is_dark(), "piece on light square {:?}", square);
                    assert!(!piece.is_king);
                    match piece.color {
                        Color::White => assert!(row <= 2),
                        Color::Red => assert!(row >= 5),
                    }
                }
                None => assert!(!square.is_dark() || (3..=4).contains(&row)),
            }
        }
    }
}

#[test]
fn test_single_jump_removes_victim() {
    let mut board = Board::with_pieces(&[
        (pos(5, 2), Piece::man(Color::Red)),
        (pos(4, 3), Piece::man(Color::White)),
    ]);
    assert!(is_legal_jump_move(&board, pos(5, 2), pos(3, 4)));

    let outcome = apply_move(&mut board, mv((5, 2), (3, 4)));
    assert!(outcome.captured);
    assert_eq!(board.get(pos(4, 3)), None);
    assert_eq!(board.get(pos(5, 2)), None);
    assert_eq!(board.get(pos(3, 4)), Some(Piece::man(Color::Red)));
}

#[test]
fn test_chain_keeps_turn() {
    let board = Board::with_pieces(&[
        (pos(5, 2), Piece::man(Color::Red)),
        (pos(4, 3), Piece::man(Color::White)),
        (pos(2, 5), Piece::man(Color::White)),
        (pos(0, 1), Piece::man(Color::White)),
    ]);

    let mut after = board.clone();
    apply_move(&mut after, mv((5, 2), (3, 4)));
    assert!(can_continue_capture(&after, pos(3, 4)));

    let mut game = GameState::from_board(board, Color::Red);
    let report = game.play(mv((5, 2), (3, 4))).unwrap();
    assert!(report.continues);
    assert_eq!(game.turn(), Color::Red);
    assert_eq!(game.forced_origin(), Some(pos(3, 4)));

    game.play(mv((3, 4), (1, 6))).unwrap();
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_lone_white_king_wins() {
    let board = Board::with_pieces(&[(pos(4, 5), Piece::king(Color::White))]);
    assert_eq!(is_terminal(&board, Color::Red), Outcome::Win(Color::White));
    assert_eq!(is_terminal(&board, Color::White), Outcome::Win(Color::White));
}

#[test]
fn test_single_legal_move_is_returned() {
    // White's only move is (2,7)->(3,6); its score does not matter
    let board = Board::with_pieces(&[
        (pos(2, 7), Piece::man(Color::White)),
        (pos(7, 0), Piece::man(Color::Red)),
    ]);
    assert_eq!(generate_moves(&board, Color::White, None), vec![mv((2, 7), (3, 6))]);

    let mut ai = CheckersAi::new(EngineConfig::default());
    let outcome = ai.search_with_limits(&board, SearchLimits::new(2, 60_000), None);
    assert_eq!(outcome.best_move, Some(mv((2, 7), (3, 6))));
    assert_eq!(outcome.completed_depth, 2);
    assert_eq!(outcome.status, SearchStatus::Completed);
}

// ============================================================================
// PROPERTIES OVER RANDOM POSITIONS
// ============================================================================

#[test]
fn test_clone_never_aliases() {
    for board in random_boards(1, 50) {
        let mut copy = clone_board(&board);
        assert_eq!(copy, board);

        let square = pos(3, 2);
        let replacement = match board.get(square) {
            Some(_) => None,
            None => Some(Piece::king(Color::Red)),
        };
        copy.set(square, replacement);
        assert_ne!(copy, board);
        assert_ne!(board.get(square), replacement);
    }
}

#[test]
fn test_jump_generation_matches_brute_force() {
    for board in random_boards(2, 200) {
        for color in [Color::Red, Color::White] {
            let generated: HashSet<Move> = generate_moves(&board, color, None)
                .into_iter()
                .filter(Move::is_jump)
                .collect();
            let expected = brute_force_jumps(&board, color);

            assert_eq!(generated, expected);
            assert_eq!(any_capture_available(&board, color), !expected.is_empty());
        }
    }
}

#[test]
fn test_men_only_step_forward() {
    for board in random_boards(3, 100) {
        for (from, piece) in board.pieces().filter(|(_, p)| !p.is_king) {
            for dir in DIAGONALS {
                let Some(to) = from.offset(dir, 1) else {
                    continue;
                };
                if dir.0 != piece.color.forward() {
                    assert!(!is_legal_simple_move(&board, from, to));
                }
            }
        }
    }
}

#[test]
fn test_promotion_mid_chain() {
    // The man crowns on (0,3) and, now a king, jumps back down
    let board = Board::with_pieces(&[
        (pos(2, 1), Piece::man(Color::Red)),
        (pos(1, 2), Piece::man(Color::White)),
        (pos(1, 4), Piece::man(Color::White)),
    ]);
    let mut game = GameState::from_board(board, Color::Red);

    let first = game.play(mv((2, 1), (0, 3))).unwrap();
    assert!(first.promoted);
    assert!(first.continues);
    assert_eq!(game.board().get(pos(0, 3)), Some(Piece::king(Color::Red)));

    let second = game.play(mv((0, 3), (2, 5))).unwrap();
    assert!(!second.continues);
    assert_eq!(second.outcome, Outcome::Win(Color::Red));
}

#[test]
fn test_terminal_matches_piece_counts_and_mobility() {
    for board in random_boards(4, 200) {
        for color in [Color::Red, Color::White] {
            let mine = board.count(color);
            let theirs = board.count(color.opponent());
            let expected = if mine == 0 {
                Outcome::Win(color.opponent())
            } else if theirs == 0 {
                Outcome::Win(color)
            } else if generate_moves(&board, color, None).is_empty() {
                Outcome::Stalemate(color)
            } else {
                Outcome::Ongoing
            };
            assert_eq!(is_terminal(&board, color), expected);
        }
    }
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_engine_game_plays_only_legal_moves() {
    let mut white = CheckersAi::with_seed(EngineConfig::for_color(Color::White), 7);
    let mut red = CheckersAi::with_seed(EngineConfig::for_color(Color::Red), 8);
    let mut state = GameState::new();

    while !state.outcome().is_over() && state.ply() < 120 {
        let outcome = match state.turn() {
            Color::White => white.choose_move(&state, Difficulty::Medium),
            Color::Red => red.choose_move(&state, Difficulty::Easy),
        };
        let chosen = outcome.best_move.expect("ongoing game always has a move");
        assert!(state.legal_moves().contains(&chosen));
        state.play(chosen).unwrap();
    }

    let total = state.board().count(Color::Red) + state.board().count(Color::White);
    let captured = state.captures(Color::Red) + state.captures(Color::White);
    assert_eq!(total + captured as usize, 24);
}

#[test]
fn test_seeded_random_games_replay() {
    let play = |seed: u64| {
        let mut white = CheckersAi::with_seed(EngineConfig::for_color(Color::White), seed);
        let mut red = CheckersAi::with_seed(EngineConfig::for_color(Color::Red), seed + 1);
        let mut state = GameState::new();
        let mut moves = Vec::new();
        while !state.outcome().is_over() && state.ply() < 80 {
            let outcome = match state.turn() {
                Color::White => white.choose_move(&state, Difficulty::Easy),
                Color::Red => red.choose_move(&state, Difficulty::Easy),
            };
            let Some(chosen) = outcome.best_move else { break };
            state.play(chosen).unwrap();
            moves.push(chosen);
        }
        moves
    };

    assert_eq!(play(21), play(21));
}
