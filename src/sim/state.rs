//! Game state and core simulation types
//!
//! Everything the render sink reads and every component mutates lives in
//! `GameState`.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::setup_level;
use crate::consts::MAX_PENDING_EVENTS;
use crate::settings::Settings;

/// Board-unit coordinates of an entity's top-left corner
pub type Position = IVec2;

/// Board geometry (all values in board units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells per axis
    pub grid_size: i32,
    pub cell_size: i32,
    pub player_size: i32,
    pub tent_size: i32,
}

impl Default for Board {
    fn default() -> Self {
        Settings::default().board()
    }
}

impl Board {
    /// Side length of the square board
    #[inline]
    pub fn extent(&self) -> i32 {
        self.grid_size * self.cell_size
    }

    /// Largest top-left coordinate an entity of `size` may occupy
    #[inline]
    pub fn max_corner(&self, size: i32) -> IVec2 {
        IVec2::splat(self.extent() - size)
    }

    /// Clamp a top-left corner so an entity of `size` stays on the board
    #[inline]
    pub fn clamp(&self, pos: IVec2, size: i32) -> IVec2 {
        pos.clamp(IVec2::ZERO, self.max_corner(size))
    }

    /// Player start cell (grid centre)
    pub fn player_start(&self) -> IVec2 {
        IVec2::splat((self.grid_size / 2) * self.cell_size)
    }

    /// One player step (a full cell)
    #[inline]
    pub fn player_speed(&self) -> i32 {
        self.cell_size
    }

    /// Vampire step while patrolling (half a cell)
    #[inline]
    pub fn patrol_speed(&self) -> i32 {
        self.cell_size / 2
    }

    /// Vampire step while chasing (a full cell)
    #[inline]
    pub fn aggressive_speed(&self) -> i32 {
        self.cell_size
    }

    /// Top-left corner of a grid cell
    #[inline]
    pub fn cell_to_pos(&self, cell: IVec2) -> IVec2 {
        cell * self.cell_size
    }
}

/// Vampire behaviour, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VampireMode {
    #[default]
    Patrol,
    Chase,
}

/// The antagonist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vampire {
    pub pos: Position,
    pub mode: VampireMode,
}

/// Visual variant of a collectible character (alternates by index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterKind {
    Standing,
    Walking,
}

impl CharacterKind {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            CharacterKind::Standing
        } else {
            CharacterKind::Walking
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Obstacle,
    Vampire,
    TimeUp,
}

/// Gameplay events for logging and UI (drained by the caller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CharacterCaptured { pos: Position },
    TakeoutCollected { pos: Position },
    LevelCleared { difficulty: u32 },
    GameOver { cause: GameOverCause, score: u32 },
}

/// The single repeating 1 Hz tick handle
///
/// Each `restart` cancels the live handle before creating the next one, so at
/// most one tick source exists at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickTimer {
    generation: u64,
    running: bool,
    starts: u64,
    cancels: u64,
}

impl TickTimer {
    /// Cancel the live handle (if any) and start a fresh one
    pub fn restart(&mut self) {
        self.stop();
        self.generation += 1;
        self.starts += 1;
        self.running = true;
    }

    /// Cancel the live handle. Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.cancels += 1;
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Identifier of the most recently created handle
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn cancels(&self) -> u64 {
        self.cancels
    }

    /// Handles currently alive (0 or 1)
    pub fn live_handles(&self) -> u64 {
        self.starts - self.cancels
    }
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Rejection-sampling cap used by the level generator
    pub placement_attempts: u32,

    pub player: Position,
    /// Seconds left (may dip to 0 or below on the expiring tick)
    pub countdown: i32,
    /// Cumulative across levels
    pub score: u32,
    /// Characters captured in the current level
    pub captured: u32,
    /// Difficulty multiplier (1-based)
    pub difficulty: u32,
    pub game_over: bool,
    pub game_over_cause: Option<GameOverCause>,

    pub characters: Vec<Position>,
    pub obstacles: Vec<Position>,
    pub tents: Vec<Position>,
    pub takeout_boxes: Vec<Position>,
    pub vampire: Vampire,

    pub timer: TickTimer,
    /// Ticks processed this run
    pub time_ticks: u64,
    /// Undrained events, capped at `MAX_PENDING_EVENTS` (oldest dropped)
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run: seed the RNG, centre the player and set up level 1
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        let board = settings.board();
        let mut state = Self {
            board,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            placement_attempts: settings.placement_attempts,
            player: board.player_start(),
            countdown: 0,
            score: 0,
            captured: 0,
            difficulty: 1,
            game_over: false,
            game_over_cause: None,
            characters: Vec::new(),
            obstacles: Vec::new(),
            tents: Vec::new(),
            takeout_boxes: Vec::new(),
            vampire: Vampire::default(),
            timer: TickTimer::default(),
            time_ticks: 0,
            events: Vec::new(),
        };

        log::info!("New run with seed {}", seed);
        setup_level(&mut state, 1);
        state
    }

    /// Default board with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&Settings::with_seed(seed))
    }

    /// Player bounding box
    #[inline]
    pub fn player_box(&self) -> Aabb {
        Aabb::new(self.player, self.board.player_size)
    }

    /// Bounding box of a one-cell entity
    #[inline]
    pub fn cell_box(&self, pos: Position) -> Aabb {
        Aabb::new(pos, self.board.cell_size)
    }

    /// Bounding box of a tent
    #[inline]
    pub fn tent_box(&self, pos: Position) -> Aabb {
        Aabb::new(pos, self.board.tent_size)
    }

    /// Latch game over and cancel the tick. Later calls are no-ops.
    pub fn end_game(&mut self, cause: GameOverCause) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.game_over_cause = Some(cause);
        self.timer.stop();
        self.push_event(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!(
            "Game over ({:?}) at difficulty {} with score {}",
            cause,
            self.difficulty,
            self.score
        );
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Characters paired with their visual variant
    pub fn characters_with_kind(&self) -> impl Iterator<Item = (Position, CharacterKind)> + '_ {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, CharacterKind::for_index(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_run() {
        let state = GameState::with_seed(12345);
        assert_eq!(state.player, IVec2::new(25 * CELL_SIZE, 25 * CELL_SIZE));
        assert_eq!(state.difficulty, 1);
        assert_eq!(state.countdown, 30);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(state.timer.is_running());
        assert_eq!(state.timer.live_handles(), 1);
    }

    #[test]
    fn test_timer_restart_cancels_previous() {
        let mut timer = TickTimer::default();
        timer.restart();
        timer.restart();
        timer.restart();
        assert_eq!(timer.starts(), 3);
        assert_eq!(timer.cancels(), 2);
        assert_eq!(timer.live_handles(), 1);
        assert_eq!(timer.generation(), 3);
    }

    #[test]
    fn test_timer_stop_is_idempotent() {
        let mut timer = TickTimer::default();
        assert!(!timer.stop());
        timer.restart();
        assert!(timer.stop());
        assert!(!timer.stop());
        assert_eq!(timer.cancels(), 1);
        assert_eq!(timer.live_handles(), 0);
    }

    #[test]
    fn test_end_game_latches_once() {
        let mut state = GameState::with_seed(1);
        state.drain_events();

        state.end_game(GameOverCause::Obstacle);
        state.end_game(GameOverCause::TimeUp);

        assert!(state.game_over);
        assert_eq!(state.game_over_cause, Some(GameOverCause::Obstacle));
        assert!(!state.timer.is_running());
        assert_eq!(state.timer.cancels(), 1);
        assert_eq!(state.drain_events().len(), 1);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = GameState::with_seed(2);
        state.drain_events();
        for x in 0..(MAX_PENDING_EVENTS as i32 + 10) {
            state.push_event(GameEvent::CharacterCaptured {
                pos: IVec2::new(x, 0),
            });
        }

        let events = state.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // Oldest ten were dropped
        assert_eq!(
            events[0],
            GameEvent::CharacterCaptured {
                pos: IVec2::new(10, 0)
            }
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_character_kinds_alternate() {
        let state = GameState::with_seed(3);
        let kinds: Vec<_> = state.characters_with_kind().map(|(_, k)| k).take(3).collect();
        assert_eq!(
            kinds,
            [CharacterKind::Standing, CharacterKind::Walking, CharacterKind::Standing]
        );
    }

    #[test]
    fn test_board_clamp() {
        let board = Board::default();
        let max = board.extent() - board.player_size;
        assert_eq!(board.clamp(IVec2::new(-16, 900), board.player_size), IVec2::new(0, max));
    }
}
