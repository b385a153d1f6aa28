//! Seat holders: who is asked for a move, and their turn-local flags.
//!
//! A player's seat is its index in the game's player list; the pawn and wall
//! supply for that seat live on the board.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::agents::MoveSelector;

/// Identifier assigned by the host (network id for online games).
pub type PlayerId = u32;

pub type SharedSelector = Arc<Mutex<Box<dyn MoveSelector + Send>>>;

pub enum PlayerKind {
    /// Driven by local input through `Game::try_move_pawn` / `Game::try_set_wall`.
    Local,
    /// Moves are confirmed by a remote authority through `Game::apply_server_move`.
    Networked,
    /// Computed on a worker thread.
    Bot(SharedSelector),
}

impl fmt::Debug for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Local => write!(f, "Local"),
            PlayerKind::Networked => write!(f, "Networked"),
            PlayerKind::Bot(_) => write!(f, "Bot"),
        }
    }
}

#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    kind: PlayerKind,
    my_turn: bool,
    move_done: bool,
}

impl Player {
    fn with_kind(id: PlayerId, kind: PlayerKind) -> Self {
        Self {
            id,
            kind,
            my_turn: false,
            move_done: false,
        }
    }

    pub fn local(id: PlayerId) -> Self {
        Self::with_kind(id, PlayerKind::Local)
    }

    pub fn networked(id: PlayerId) -> Self {
        Self::with_kind(id, PlayerKind::Networked)
    }

    pub fn bot(id: PlayerId, selector: Box<dyn MoveSelector + Send>) -> Self {
        Self::with_kind(id, PlayerKind::Bot(Arc::new(Mutex::new(selector))))
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    pub(crate) fn selector(&self) -> Option<SharedSelector> {
        match &self.kind {
            PlayerKind::Bot(selector) => Some(Arc::clone(selector)),
            _ => None,
        }
    }

    /// Set exclusively by the game while this player is being waited on.
    pub fn my_turn(&self) -> bool {
        self.my_turn
    }

    pub fn move_done(&self) -> bool {
        self.move_done
    }

    /// May commit a move right now.
    pub fn can_act(&self) -> bool {
        self.my_turn && !self.move_done
    }

    pub(crate) fn begin_turn(&mut self) {
        self.my_turn = true;
        self.move_done = false;
    }

    pub(crate) fn mark_done(&mut self) {
        self.move_done = true;
    }

    pub(crate) fn end_turn(&mut self) {
        self.my_turn = false;
        self.move_done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::FirstLegalAgent;

    #[test]
    fn test_turn_flags() {
        let mut player = Player::local(7);
        assert!(!player.can_act());

        player.begin_turn();
        assert!(player.my_turn());
        assert!(player.can_act());

        player.mark_done();
        assert!(!player.can_act());

        player.end_turn();
        assert!(!player.my_turn());
        assert!(!player.move_done());
    }

    #[test]
    fn test_begin_turn_clears_stale_move() {
        let mut player = Player::networked(7);
        player.mark_done();
        player.begin_turn();
        assert!(!player.move_done());
        assert!(player.can_act());
    }

    #[test]
    fn test_kinds() {
        assert!(!Player::local(1).is_bot());
        assert!(Player::local(1).selector().is_none());
        assert!(matches!(Player::networked(2).kind(), PlayerKind::Networked));

        let bot = Player::bot(3, Box::new(FirstLegalAgent));
        assert!(bot.is_bot());
        assert_eq!(bot.id(), 3);
        assert_eq!(format!("{:?}", bot.kind()), "Bot");
        assert!(bot.selector().is_some());
    }
}
