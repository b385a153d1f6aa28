#!/usr/bin/env rust
//! Play a headless game between two bots and print the final board.

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quoridor_core::agents::AgentKind;
use quoridor_core::config::{load_config, GameConfig};
use quoridor_core::{Game, GameState, Player};

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    about = "Play a Quoridor game between two bots",
    version
)]
struct Args {
    /// YAML config file; command line values override it
    #[arg(short, long)]
    config: Option<String>,

    /// Board rows (odd)
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns (odd)
    #[arg(long)]
    cols: Option<usize>,

    /// Walls each player can place
    #[arg(long)]
    walls: Option<u32>,

    /// Search depth for minimax bots
    #[arg(long)]
    depth: Option<u32>,

    /// Bot for the first seat (bottom, moves first)
    #[arg(long, value_enum, default_value = "minimax")]
    first: AgentKind,

    /// Bot for the second seat (top)
    #[arg(long, value_enum, default_value = "random")]
    second: AgentKind,

    /// Give up after this many scheduler ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: usize,

    /// Number of threads to use for search
    #[arg(long)]
    num_threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if let Some(num_threads) = args.num_threads {
        // Set number of threads for Rayon
        env::set_var("RAYON_NUM_THREADS", num_threads.to_string());
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.board.cols = cols;
    }
    if let Some(walls) = args.walls {
        config.board.walls_per_player = walls;
    }
    if let Some(depth) = args.depth {
        config.bot.depth = depth;
    }
    config.validate().context("Invalid configuration")?;

    let params = config.bot.search_params();
    let players = vec![
        Player::bot(1, args.first.build(params)),
        Player::bot(2, args.second.build(params)),
    ];
    let mut game = Game::new(
        config.board.rows,
        config.board.cols,
        players,
        config.board.walls_per_player,
    )?;

    info!(
        rows = config.board.rows,
        cols = config.board.cols,
        walls = config.board.walls_per_player,
        depth = params.depth,
        first = ?args.first,
        second = ?args.second,
        "starting self-play"
    );
    game.start_game()?;
    let state = game.run_until_finished(args.max_ticks)?;

    println!("{}", game.board());
    match (state, game.winner()) {
        (GameState::Finished, Some(winner)) => {
            println!("Player {} wins after {} turns", winner, game.turns());
        }
        _ => {
            println!("No winner after {} turns ({:?})", game.turns(), state);
        }
    }

    Ok(())
}
