//! Error types for the game core.
//!
//! Illegal gameplay input is not an error: legality-gated operations return
//! `false` instead. Everything here is either a configuration problem caught at
//! construction or a broken invariant that must halt the game.

use crate::actions::Move;
use crate::player::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("there must be at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("there must be no more than 4 players, got {0}")]
    TooManyPlayers(usize),

    #[error("only 2-player games are supported, got {0} players")]
    UnsupportedPlayerCount(usize),

    #[error("board sizes must be odd, got {rows}x{cols}")]
    EvenBoardSize { rows: usize, cols: usize },

    #[error("board must be at least 3x3, got {rows}x{cols}")]
    BoardTooSmall { rows: usize, cols: usize },

    #[error("player ids must be unique, {0} appears twice")]
    DuplicatePlayer(PlayerId),

    #[error("game already going")]
    AlreadyRunning,

    #[error("game isn't going")]
    NotRunning,

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    /// Search produced a move that the board then refused.
    #[error("search generated a move the board rejects: {mv}")]
    IllegalSearchMove { mv: Move },

    /// A bot committed a move that was not legal on the live board.
    #[error("player {player} chose an illegal move: {mv}")]
    IllegalBotMove { player: PlayerId, mv: Move },

    /// A server-asserted move that can't be put on the board at all.
    #[error("server move for player {player} can't be applied: {mv}")]
    UnplayableServerMove { player: PlayerId, mv: Move },

    #[error("pawn of seat {seat} has no path to its goal")]
    NoPath { seat: usize },

    #[error("player {player} failed to pick a move: {reason:#}")]
    BotFailed { player: PlayerId, reason: anyhow::Error },

    #[error("move computation for player {0} stopped without an answer")]
    WorkerLost(PlayerId),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
