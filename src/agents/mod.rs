//! Bot implementations.
//!
//! All agents implement the [`MoveSelector`] trait.

use crate::actions::Move;
use crate::board::Board;

pub mod first_legal_agent;
pub mod minimax_agent;
pub mod random_agent;

pub use first_legal_agent::FirstLegalAgent;
pub use minimax_agent::MinimaxAgent;
pub use random_agent::RandomAgent;

/// Trait for agents that pick a move for one seat.
///
/// The board handed in is a private copy; agents may inspect it freely but
/// the move they return is applied to the live board by the game, which
/// checks it for legality again.
pub trait MoveSelector {
    fn decide_move(&mut self, board: &Board, seat: usize) -> anyhow::Result<Move>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Bot kinds selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AgentKind {
    FirstLegal,
    Random,
    Minimax,
}

impl AgentKind {
    pub fn build(self, params: crate::minimax::SearchParams) -> Box<dyn MoveSelector + Send> {
        match self {
            AgentKind::FirstLegal => Box::new(FirstLegalAgent),
            AgentKind::Random => Box::new(RandomAgent::new()),
            AgentKind::Minimax => Box::new(MinimaxAgent::new(params)),
        }
    }
}
