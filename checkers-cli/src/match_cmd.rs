//! Match command - play AI-vs-AI games between two difficulty tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: seeding and formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use checkers_core::{CheckersAi, Color, Difficulty, DifficultyTable, EngineConfig, GameState, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the White engine (easy, medium, hard, god-mode)
    #[arg(long, default_value = "medium")]
    pub white: Difficulty,

    /// Difficulty of the Red engine (easy, medium, hard, god-mode)
    #[arg(long, default_value = "medium")]
    pub red: Difficulty,

    /// Number of games to play
    #[arg(long, default_value = "2")]
    pub games: usize,

    /// Moves after which a game is scored as a draw (chain jumps count individually)
    #[arg(long, default_value = "200")]
    pub max_plies: u32,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a single game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
enum GameResult {
    RedWins,
    WhiteWins,
    /// Ply limit reached
    Draw,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    plies: u32,
    red_captures: u32,
    white_captures: u32,
    nodes_visited: u64,
    #[allow(dead_code)] // Kept for replay
    moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    white_wins: usize,
    draws: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Derive one seed per game
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, table: &DifficultyTable, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: White {} vs Red {} ({} games, max {} plies)",
        args.white,
        args.red,
        args.games,
        args.max_plies
    );

    let seeds = game_seeds(seed, args.games);
    let results = play_match(&args, table, &seeds)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, table: &DifficultyTable, seeds: &[u64]) -> Result<MatchResults> {
    let play = |(index, &seed): (usize, &u64)| -> Result<GameRecord> {
        let record = play_single_game(index + 1, seed, args, table)?;
        tracing::info!(
            "Game {}: {:?} ({} plies, {} nodes)",
            record.game_number,
            record.result,
            record.plies,
            record.nodes_visited
        );
        Ok(record)
    };

    let games = if args.parallel {
        seeds.par_iter().enumerate().map(play).collect::<Result<Vec<_>>>()?
    } else {
        seeds.iter().enumerate().map(play).collect::<Result<Vec<_>>>()?
    };

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game from the opening, each side driven by its own engine
fn play_single_game(
    game_number: usize,
    seed: u64,
    args: &MatchArgs,
    table: &DifficultyTable,
) -> Result<GameRecord> {
    let engine = |color: Color, seed: u64| {
        CheckersAi::with_seed(EngineConfig::for_color(color).with_limits(table.clone()), seed)
    };
    let mut white = engine(Color::White, seed);
    let mut red = engine(Color::Red, seed.wrapping_add(1));

    let mut state = GameState::new();
    let mut moves = Vec::new();
    let mut nodes_visited = 0;

    while !state.outcome().is_over() && state.ply() < args.max_plies {
        let outcome = match state.turn() {
            Color::White => white.choose_move(&state, args.white),
            Color::Red => red.choose_move(&state, args.red),
        };
        nodes_visited += outcome.stats.nodes_visited;

        let Some(mv) = outcome.best_move else {
            break;
        };
        state
            .play(mv)
            .with_context(|| format!("Game {}: engine chose a rejected move {}", game_number, mv))?;
        moves.push(mv);
    }

    let result = match state.outcome().winner() {
        Some(Color::Red) => GameResult::RedWins,
        Some(Color::White) => GameResult::WhiteWins,
        None => GameResult::Draw,
    };

    Ok(GameRecord {
        game_number,
        seed,
        result,
        plies: state.ply(),
        red_captures: state.captures(Color::Red),
        white_captures: state.captures(Color::White),
        nodes_visited,
        moves,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let red_wins = count(GameResult::RedWins);
    let white_wins = count(GameResult::WhiteWins);
    let draws = count(GameResult::Draw);

    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        white_wins,
        draws,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Seeds are drawn up front so parallel runs replay identically
fn game_seeds(seed: Option<u64>, games: usize) -> Vec<u64> {
    let mut rng = create_rng(seed);
    (0..games).map(|_| rng.gen()).collect()
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        seed: u64,
        result: GameResult,
        plies: u32,
        red_captures: u32,
        white_captures: u32,
        nodes_visited: u64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        white: String,
        red: String,
        total_games: usize,
        red_wins: usize,
        white_wins: usize,
        draws: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        white: args.white.to_string(),
        red: args.red.to_string(),
        total_games: results.games.len(),
        red_wins: results.red_wins,
        white_wins: results.white_wins,
        draws: results.draws,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: g.result,
                plies: g.plies,
                red_captures: g.red_captures,
                white_captures: g.white_captures,
                nodes_visited: g.nodes_visited,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize match results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results: White {} vs Red {} ===", args.white, args.red);
    println!("Total games: {}", total);
    println!(
        "Red wins:    {} ({:.1}%)",
        results.red_wins,
        percent(results.red_wins, total)
    );
    println!(
        "White wins:  {} ({:.1}%)",
        results.white_wins,
        percent(results.white_wins, total)
    );
    println!(
        "Draws:       {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} plies (captures red={} white={})",
            game.game_number, game.result, game.plies, game.red_captures, game.white_captures
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
