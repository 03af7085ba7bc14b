//! Game state module - the session state machine
//!
//! Ties the board together with win/loss evaluation, flag mode and timing.
//! The lifecycle is Idle -> Playing -> Won | Lost, and `new_game` re-enters
//! Playing from any state with a freshly generated board.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::{GameConfig, GameStatus};

use super::Board;

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    /// While on, reveal input toggles flags instead of uncovering
    flag_mode: bool,
    rng: StdRng,
    started_at: Option<Instant>,
    finished_in: Option<Duration>,
}

impl GameState {
    /// Create an idle session with an OS-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an idle session with a fixed seed (deterministic boards)
    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            config,
            board: Board::new(config.width(), config.height()),
            status: GameStatus::Idle,
            flag_mode: false,
            rng,
            started_at: None,
            finished_in: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    /// Elapsed play time: live while Playing, frozen once the game is over
    pub fn elapsed(&self) -> Option<Duration> {
        match self.status {
            GameStatus::Idle => None,
            GameStatus::Playing => self.started_at.map(|t| t.elapsed()),
            GameStatus::Won | GameStatus::Lost => self.finished_in,
        }
    }

    /// Discard the current board and start a fresh game.
    ///
    /// Valid from any state. Flag mode is a UI toggle and survives restarts.
    pub fn new_game(&mut self) {
        let mut board = Board::new(self.config.width(), self.config.height());
        board.scatter_bombs(self.config.bombs(), &mut self.rng);
        board.compute_numbers();
        self.board = board;
        self.status = GameStatus::Playing;
        self.started_at = Some(Instant::now());
        self.finished_in = None;
    }

    /// Reveal the cell at (x, y), or toggle its flag while flag mode is on.
    ///
    /// Only acts while Playing; out-of-range coordinates, flagged cells and
    /// already-uncovered cells are no-ops. Uncovering a bomb loses the game;
    /// uncovering the last safe cell wins it. Either terminal transition
    /// uncovers the whole board and freezes the clock.
    pub fn reveal(&mut self, x: u16, y: u16) {
        if self.status != GameStatus::Playing {
            return;
        }
        let Some(index) = self.board.index_of(x, y) else {
            return;
        };
        if self.flag_mode {
            self.board.toggle_flag(index);
            return;
        }

        let tile = self.board.tile(index);
        if tile.flagged || !tile.covered {
            return;
        }

        for revealed in self.board.flood_reveal(index) {
            self.board.uncover(revealed);
        }

        if tile.bomb {
            self.finish(GameStatus::Lost);
        } else if self.board.uncovered_count() == self.board.len() - self.config.bombs() {
            self.finish(GameStatus::Won);
        }
    }

    /// Flip the flag on the cell at (x, y).
    ///
    /// This is the operation the flag-mode branch of `reveal` performs; it is
    /// also exposed directly for right-click input. Never uncovers anything
    /// and never ends the game.
    pub fn toggle_flag(&mut self, x: u16, y: u16) {
        if self.status != GameStatus::Playing {
            return;
        }
        let Some(index) = self.board.index_of(x, y) else {
            return;
        };
        self.board.toggle_flag(index);
    }

    pub fn set_flag_mode(&mut self, on: bool) {
        self.flag_mode = on;
    }

    pub fn toggle_flag_mode(&mut self) {
        self.flag_mode = !self.flag_mode;
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.board.uncover_all();
        self.finished_in = self.started_at.map(|t| t.elapsed());
    }
}
