//! Rules engine, search bot and turn scheduler for two-player Quoridor.
//!
//! Coordinates live on the expanded grid: pawns stand on even/even cells,
//! walls sit on the odd slots between them.

pub mod actions;
pub mod agents;
pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod grid;
pub mod minimax;
pub mod pathfinding;
pub mod pawn;
pub mod player;
pub mod validation;

pub use actions::Move;
pub use board::Board;
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use game::{Game, GameState};
pub use grid::{Orientation, Point, Wall};
pub use player::{Player, PlayerId};
