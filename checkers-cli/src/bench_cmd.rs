//! Bench command - time engine searches over the first plies of a game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_searches(), report_results()
//! - Level 3: search_ply(), summarize()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use checkers_core::{
    CheckersAi, Color, Difficulty, DifficultyTable, EngineConfig, GameState, Move, SearchStatus,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Difficulty both engines search at
    #[arg(long, default_value = "hard")]
    pub difficulty: Difficulty,

    /// Number of plies to play from the opening
    #[arg(long, default_value = "6")]
    pub plies: u32,

    /// Disable the transposition table
    #[arg(long)]
    pub no_tt: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One timed search
#[derive(Clone, Debug, serde::Serialize)]
struct PlySample {
    ply: u32,
    mover: Color,
    best_move: Option<Move>,
    completed_depth: u32,
    status: SearchStatus,
    nodes_visited: u64,
    tt_hits: u64,
    tt_entries: usize,
    elapsed_ms: u64,
}

/// Totals over all samples
#[derive(Clone, Debug, serde::Serialize)]
struct BenchSummary {
    difficulty: String,
    transposition: bool,
    samples: Vec<PlySample>,
    total_nodes: u64,
    total_ms: u64,
    nodes_per_sec: f64,
    timeouts: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
///
/// 1. Play the requested plies, timing each search
/// 2. Summarize and report
pub fn run(args: BenchArgs, table: &DifficultyTable, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Benchmarking {} searches over {} plies (tt={})",
        args.difficulty,
        args.plies,
        !args.no_tt
    );

    let samples = run_searches(&args, table, seed.unwrap_or(42))?;
    let summary = summarize(&args, samples);

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Both sides are engines at the same tier; stops early if the game ends
fn run_searches(args: &BenchArgs, table: &DifficultyTable, seed: u64) -> Result<Vec<PlySample>> {
    let engine = |color: Color, seed: u64| {
        let mut config = EngineConfig::for_color(color).with_limits(table.clone());
        if args.no_tt {
            config = config.without_transposition();
        }
        CheckersAi::with_seed(config, seed)
    };
    let mut white = engine(Color::White, seed);
    let mut red = engine(Color::Red, seed.wrapping_add(1));

    let mut state = GameState::new();
    let mut samples = Vec::with_capacity(args.plies as usize);

    while !state.outcome().is_over() && state.ply() < args.plies {
        let ai = match state.turn() {
            Color::White => &mut white,
            Color::Red => &mut red,
        };
        let sample = search_ply(ai, &mut state, args.difficulty)?;

        tracing::info!(
            "Ply {}: {:?} depth {} ({} nodes, {} ms)",
            sample.ply,
            sample.mover,
            sample.completed_depth,
            sample.nodes_visited,
            sample.elapsed_ms
        );

        let done = sample.best_move.is_none();
        samples.push(sample);
        if done {
            break;
        }
    }

    Ok(samples)
}

fn report_results(summary: &BenchSummary, json: bool) -> Result<()> {
    if json {
        let output =
            serde_json::to_string_pretty(summary).context("Failed to serialize bench results")?;
        println!("{}", output);
    } else {
        print_text_results(summary);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Search the current position and play the chosen move
fn search_ply(ai: &mut CheckersAi, state: &mut GameState, difficulty: Difficulty) -> Result<PlySample> {
    let ply = state.ply();
    let mover = state.turn();
    let outcome = ai.choose_move(state, difficulty);

    if let Some(mv) = outcome.best_move {
        state
            .play(mv)
            .with_context(|| format!("Ply {}: engine chose a rejected move {}", ply, mv))?;
    }

    Ok(PlySample {
        ply,
        mover,
        best_move: outcome.best_move,
        completed_depth: outcome.completed_depth,
        status: outcome.status,
        nodes_visited: outcome.stats.nodes_visited,
        tt_hits: outcome.stats.tt_hits,
        tt_entries: outcome.stats.tt_entries,
        elapsed_ms: outcome.stats.elapsed_ms,
    })
}

fn summarize(args: &BenchArgs, samples: Vec<PlySample>) -> BenchSummary {
    let total_nodes: u64 = samples.iter().map(|s| s.nodes_visited).sum();
    let total_ms: u64 = samples.iter().map(|s| s.elapsed_ms).sum();
    let timeouts = samples
        .iter()
        .filter(|s| matches!(s.status, SearchStatus::TimeExceeded { .. }))
        .count();

    BenchSummary {
        difficulty: args.difficulty.to_string(),
        transposition: !args.no_tt,
        samples,
        total_nodes,
        total_ms,
        nodes_per_sec: nodes_per_sec(total_nodes, total_ms),
        timeouts,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn nodes_per_sec(nodes: u64, ms: u64) -> f64 {
    if ms == 0 {
        0.0
    } else {
        nodes as f64 * 1000.0 / ms as f64
    }
}

fn format_move(mv: Option<Move>) -> String {
    mv.map_or_else(|| "-".to_string(), |m| m.to_string())
}

fn print_text_results(summary: &BenchSummary) {
    println!(
        "\n=== Search Benchmark: {} (tt={}) ===",
        summary.difficulty, summary.transposition
    );
    println!(
        "{:>4} {:>6} {:>16} {:>6} {:>12} {:>10} {:>8}",
        "ply", "side", "move", "depth", "nodes", "tt hits", "ms"
    );
    for s in &summary.samples {
        println!(
            "{:>4} {:>6} {:>16} {:>6} {:>12} {:>10} {:>8}",
            s.ply,
            format!("{:?}", s.mover),
            format_move(s.best_move),
            s.completed_depth,
            s.nodes_visited,
            s.tt_hits,
            s.elapsed_ms
        );
    }
    println!("\nTotal nodes: {}", summary.total_nodes);
    println!("Total time:  {} ms", summary.total_ms);
    println!("Nodes/sec:   {:.0}", summary.nodes_per_sec);
    println!("Timeouts:    {}", summary.timeouts);
}

// ============================================================================
// TESTS
// ============================================================================
