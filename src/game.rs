//! Turn scheduler.
//!
//! A [`Game`] is a non-blocking state machine advanced by [`Game::tick`], which
//! the host calls repeatedly (once per frame, say). The only suspension point
//! is "waiting for the current player": local and networked players are
//! waited on until they commit through the `try_*` / `apply_server_move` entry
//! points, bots compute on a worker thread against a private board copy while
//! `tick` polls for the answer.
//!
//! All mutation takes `&mut self`. Hosts that call into the game from several
//! threads wrap it in a `Mutex`.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::actions::Move;
use crate::agents::MinimaxAgent;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::events::{EventBus, GameEvent};
use crate::grid::{Cell, CellKind, Point, Wall};
use crate::player::{Player, PlayerId, PlayerKind};
use crate::validation::is_wall_geometry_valid;

pub const DEFAULT_BOARD_SIZE: usize = 9;
pub const DEFAULT_NUM_OF_WALLS: u32 = 10;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const SUPPORTED_PLAYERS: usize = 2;

const POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

/// Reject board sizes the rules can't be played on.
pub fn validate_board_size(rows: usize, cols: usize) -> GameResult<()> {
    if rows < 3 || cols < 3 {
        return Err(GameError::BoardTooSmall { rows, cols });
    }
    if rows % 2 == 0 || cols % 2 == 0 {
        return Err(GameError::EvenBoardSize { rows, cols });
    }
    Ok(())
}

fn validate_players(players: &[Player]) -> GameResult<()> {
    let count = players.len();
    if count < MIN_PLAYERS {
        return Err(GameError::TooFewPlayers(count));
    }
    if count > MAX_PLAYERS {
        return Err(GameError::TooManyPlayers(count));
    }
    if count != SUPPORTED_PLAYERS {
        return Err(GameError::UnsupportedPlayerCount(count));
    }
    for (i, player) in players.iter().enumerate() {
        if players[..i].iter().any(|other| other.id() == player.id()) {
            return Err(GameError::DuplicatePlayer(player.id()));
        }
    }
    Ok(())
}

pub struct Game {
    board: Board,
    players: Vec<Player>,
    current: usize,
    state: GameState,
    winner: Option<PlayerId>,
    pending: Option<Receiver<anyhow::Result<Move>>>,
    events: EventBus,
    turns: u64,
}

impl Game {
    /// Build a game; players take the canonical seats in list order, which is
    /// also the turn order.
    pub fn new(rows: usize, cols: usize, players: Vec<Player>, walls_per_player: u32) -> GameResult<Self> {
        validate_players(&players)?;
        validate_board_size(rows, cols)?;

        Ok(Self {
            board: Board::new(rows, cols, players.len(), walls_per_player),
            players,
            current: 0,
            state: GameState::Idle,
            winner: None,
            pending: None,
            events: EventBus::default(),
            turns: 0,
        })
    }

    /// Two local players on the default board.
    pub fn player_vs_player(first: PlayerId, second: PlayerId) -> GameResult<Self> {
        Self::new(
            DEFAULT_BOARD_SIZE,
            DEFAULT_BOARD_SIZE,
            vec![Player::local(first), Player::local(second)],
            DEFAULT_NUM_OF_WALLS,
        )
    }

    /// A local player against the search bot on the default board.
    pub fn player_vs_bot(human: PlayerId, bot: PlayerId, human_first: bool) -> GameResult<Self> {
        let human = Player::local(human);
        let bot = Player::bot(bot, Box::new(MinimaxAgent::default()));
        let players = if human_first { vec![human, bot] } else { vec![bot, human] };
        Self::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE, players, DEFAULT_NUM_OF_WALLS)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Completed turns since the last (re)start.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// The player being waited on, while the game runs.
    pub fn current_player(&self) -> Option<&Player> {
        if self.is_running() {
            self.players.get(self.current)
        } else {
            None
        }
    }

    pub fn find_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id() == id)
    }

    pub fn walls_remaining(&self, id: PlayerId) -> Option<u32> {
        self.seat_of(id).map(|seat| self.board.walls_remaining(seat))
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.events.subscribe(observer);
    }

    pub fn start_game(&mut self) -> GameResult<()> {
        if self.is_running() {
            return Err(GameError::AlreadyRunning);
        }

        self.current = 0;
        self.winner = None;
        self.state = GameState::Running;
        info!(players = self.players.len(), "game started");
        self.events.emit(GameEvent::GameStarted);
        self.begin_turn();
        Ok(())
    }

    pub fn cancel_game(&mut self) -> GameResult<()> {
        if !self.is_running() {
            return Err(GameError::NotRunning);
        }

        info!(turns = self.turns, "game cancelled");
        self.stop(GameState::Cancelled);
        Ok(())
    }

    /// Reset the board and every player, then start again with the same seats.
    pub fn restart(&mut self) -> GameResult<()> {
        if self.is_running() {
            self.cancel_game()?;
        }
        self.reset();
        info!("game restarted");
        self.start_game()
    }

    /// Restart with the players reordered. Returns `Ok(false)` without touching
    /// anything when `order` isn't a permutation of the current player ids.
    pub fn restart_with_order(&mut self, order: &[PlayerId]) -> GameResult<bool> {
        let mut proposed = order.to_vec();
        proposed.sort_unstable();
        let mut current: Vec<PlayerId> = self.players.iter().map(Player::id).collect();
        current.sort_unstable();
        if proposed != current {
            return Ok(false);
        }

        if self.is_running() {
            self.cancel_game()?;
        }

        let mut players = std::mem::take(&mut self.players);
        self.players = order
            .iter()
            .filter_map(|id| {
                let index = players.iter().position(|player| player.id() == *id)?;
                Some(players.swap_remove(index))
            })
            .collect();

        self.reset();
        info!(?order, "game restarted with new seat order");
        self.start_game()?;
        self.events.emit(GameEvent::PlayersOrderChanged { order: order.to_vec() });
        Ok(true)
    }

    /// Advance the scheduler. Does nothing unless the game is running.
    ///
    /// A fatal condition (a bot failing, a bot worker disappearing, a bot
    /// committing an illegal move) halts the game before it is returned.
    pub fn tick(&mut self) -> GameResult<()> {
        if !self.is_running() {
            return Ok(());
        }

        match self.poll_current() {
            Ok(true) => {
                self.finish_turn();
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => {
                self.halt(&err);
                Err(err)
            }
        }
    }

    /// Tick until the game stops running or `max_ticks` polls have passed,
    /// sleeping briefly while a bot is thinking.
    pub fn run_until_finished(&mut self, max_ticks: usize) -> GameResult<GameState> {
        for _ in 0..max_ticks {
            if !self.is_running() {
                break;
            }
            self.tick()?;
            if self.is_running() && self.pending.is_some() {
                thread::sleep(POLL_INTERVAL);
            }
        }
        Ok(self.state)
    }

    /// Move the current player's pawn. `false` on anything illegal: game not
    /// running, move already committed this turn, bot seat, bad destination.
    ///
    /// For a networked seat a legal move is forwarded as
    /// [`GameEvent::MoveRequested`] and `false` is returned until the server
    /// confirms it through [`Game::apply_server_move`].
    pub fn try_move_pawn(&mut self, to: Point) -> bool {
        self.try_local_move(Move::Pawn(to))
    }

    /// Place a wall for the current player; same rules as [`Game::try_move_pawn`].
    pub fn try_set_wall(&mut self, wall: Wall) -> bool {
        self.try_local_move(Move::Wall(wall))
    }

    fn try_local_move(&mut self, mv: Move) -> bool {
        if !self.is_running() {
            return false;
        }

        let seat = self.current;
        let player = &self.players[seat];
        if !player.can_act() || player.is_bot() {
            return false;
        }
        let id = player.id();

        if matches!(player.kind(), PlayerKind::Networked) {
            if mv.is_legal(&self.board, seat) {
                self.events.emit(GameEvent::MoveRequested { player: id, mv });
            }
            return false;
        }

        if !self.apply_move(seat, mv) {
            return false;
        }
        self.players[seat].mark_done();
        true
    }

    /// Apply a move asserted by the remote authority for player `id`.
    ///
    /// The move is checked against the local rules and logged as an error on
    /// mismatch, but applied anyway so the two sides stay in sync. Only moves
    /// that can't be represented on the board at all are refused.
    pub fn apply_server_move(&mut self, id: PlayerId, mv: Move) -> GameResult<()> {
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        if !self.is_applicable(mv) {
            return Err(GameError::UnplayableServerMove { player: id, mv });
        }
        let on_turn = self.is_running() && seat == self.current;
        if !on_turn {
            error!(player = id, %mv, state = ?self.state, "server sent a move out of turn");
        } else if !mv.is_legal(&self.board, seat) {
            error!(player = id, %mv, "server sent a move that is illegal for the local game state");
        }

        let from = self.board.pawn(seat).pos;
        match mv {
            Move::Pawn(to) => self.board.unsafe_move(seat, to),
            Move::Wall(wall) => self.board.unsafe_set_wall(seat, wall),
        }
        if on_turn {
            self.players[seat].mark_done();
        }
        self.announce(seat, from, mv);
        Ok(())
    }

    fn is_applicable(&self, mv: Move) -> bool {
        let grid = self.board.grid();
        match mv {
            Move::Pawn(to) => CellKind::of(to) == CellKind::Platform && grid.get(to) == Some(Cell::Free),
            Move::Wall(wall) => is_wall_geometry_valid(grid, &wall),
        }
    }

    fn reset(&mut self) {
        self.board.reset();
        self.turns = 0;
        self.winner = None;
        self.pending = None;
        for seat in 0..self.players.len() {
            self.players[seat].end_turn();
            let player = self.players[seat].id();
            self.events.emit(GameEvent::PosChanged {
                player,
                pos: self.board.pawn(seat).pos,
            });
            self.events.emit(GameEvent::NumOfWallsChanged {
                player,
                remaining: self.board.walls_remaining(seat),
            });
        }
    }

    fn begin_turn(&mut self) {
        let seat = self.current;
        self.players[seat].begin_turn();
        let id = self.players[seat].id();
        self.events.emit(GameEvent::NextPlayer { player: id });

        if let Some(selector) = self.players[seat].selector() {
            let (tx, rx) = mpsc::channel();
            let board = self.board.clone();
            thread::spawn(move || {
                let result = match selector.lock() {
                    Ok(mut selector) => {
                        debug!(player = id, agent = selector.name(), "bot thinking");
                        selector.decide_move(&board, seat)
                    }
                    Err(_) => Err(anyhow::anyhow!("bot state poisoned by an earlier panic")),
                };
                // Nobody is listening once the turn was cancelled.
                let _ = tx.send(result);
            });
            self.pending = Some(rx);
        }
    }

    /// `Ok(true)` once the current player has committed its move.
    fn poll_current(&mut self) -> GameResult<bool> {
        let seat = self.current;
        let id = self.players[seat].id();
        if !self.players[seat].is_bot() {
            return Ok(self.players[seat].move_done());
        }

        let received = match &self.pending {
            Some(rx) => rx.try_recv(),
            None => return Err(GameError::WorkerLost(id)),
        };
        let mv = match received {
            Err(TryRecvError::Empty) => return Ok(false),
            Err(TryRecvError::Disconnected) => return Err(GameError::WorkerLost(id)),
            Ok(Err(reason)) => return Err(GameError::BotFailed { player: id, reason }),
            Ok(Ok(mv)) => mv,
        };
        self.pending = None;

        if !self.apply_move(seat, mv) {
            return Err(GameError::IllegalBotMove { player: id, mv });
        }
        self.players[seat].mark_done();
        Ok(true)
    }

    fn apply_move(&mut self, seat: usize, mv: Move) -> bool {
        let from = self.board.pawn(seat).pos;
        if !mv.try_apply(&mut self.board, seat) {
            return false;
        }
        self.announce(seat, from, mv);
        true
    }

    fn announce(&mut self, seat: usize, from: Point, mv: Move) {
        let player = self.players[seat].id();
        debug!(player, %mv, "move committed");
        match mv {
            Move::Pawn(to) => {
                self.events.emit(GameEvent::PawnMoved { player, from, to });
                self.events.emit(GameEvent::PosChanged { player, pos: to });
            }
            Move::Wall(wall) => {
                self.events.emit(GameEvent::WallPlaced { player, wall });
                self.events.emit(GameEvent::NumOfWallsChanged {
                    player,
                    remaining: self.board.walls_remaining(seat),
                });
            }
        }
    }

    fn finish_turn(&mut self) {
        self.players[self.current].end_turn();
        self.turns += 1;
        self.current = (self.current + 1) % self.players.len();

        if let Some(seat) = self.board.winner() {
            let player = self.players[seat].id();
            info!(player, turns = self.turns, "game finished with a winner");
            self.stop(GameState::Finished);
            self.winner = Some(player);
            self.events.emit(GameEvent::GameFinishedWithWinner { player });
            return;
        }

        self.events.emit(GameEvent::NextTurn);
        self.begin_turn();
    }

    fn halt(&mut self, err: &GameError) {
        error!(error = %err, "halting game");
        self.stop(GameState::Cancelled);
    }

    fn stop(&mut self, state: GameState) {
        // Dropping the receiver discards whatever an in-flight bot produces.
        self.pending = None;
        self.players[self.current].end_turn();
        self.state = state;
        self.events.emit(GameEvent::GameFinished);
    }
}
