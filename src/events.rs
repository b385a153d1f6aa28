//! Game notifications and the observer registry that fans them out.

use crate::actions::Move;
use crate::grid::{Point, Wall};
use crate::player::PlayerId;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    /// Fired whenever the game stops running: finished, cancelled or halted.
    GameFinished,
    GameFinishedWithWinner { player: PlayerId },
    /// A turn was completed and the game goes on.
    NextTurn,
    /// The game started waiting on `player`.
    NextPlayer { player: PlayerId },
    PlayersOrderChanged { order: Vec<PlayerId> },
    PawnMoved { player: PlayerId, from: Point, to: Point },
    WallPlaced { player: PlayerId, wall: Wall },
    PosChanged { player: PlayerId, pos: Point },
    NumOfWallsChanged { player: PlayerId, remaining: u32 },
    /// A networked player asked for a move that still needs server confirmation.
    MoveRequested { player: PlayerId, mv: Move },
}

pub type Observer = Box<dyn FnMut(&GameEvent) + Send>;

/// Subscribers are called synchronously, in registration order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Observer>,
}

impl EventBus {
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn emit(&mut self, event: GameEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}
