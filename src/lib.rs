//! Vampire Chase - a single-screen grid chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, vampire AI, levels)
//! - `game`: Fixed-rate driver feeding input, ticks and frames into `sim`
//! - `settings`: Board geometry and run parameters

pub mod game;
pub mod settings;
pub mod sim;

pub use game::{Game, LogSink, RenderSink, Snapshot};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Cells per board axis
    pub const GRID_SIZE: i32 = 50;
    /// Board units per cell (800 unit board / 50 cells)
    pub const CELL_SIZE: i32 = 16;
    /// Largest board side accepted by settings (keeps squared distances in i32)
    pub const MAX_BOARD_EXTENT: i32 = 32_767;
    /// Player and tent extents, in cells
    pub const PLAYER_CELLS: i32 = 2;
    pub const TENT_CELLS: i32 = 2;

    /// Distance (board units, Euclidean) at which the vampire starts chasing
    pub const CHASE_DISTANCE: i32 = 30;

    /// Seconds between countdown/vampire ticks
    pub const TICK_INTERVAL: f32 = 1.0;
    /// Maximum ticks drained per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// Level population
    pub const CHARACTERS_PER_LEVEL: usize = 10;
    pub const OBSTACLES_PER_DIFFICULTY: usize = 5;
    pub const TENTS_PER_LEVEL: usize = 20;
    pub const TAKEOUT_BOXES_PER_LEVEL: usize = 3;

    /// Countdown rules (seconds)
    pub const BASE_COUNTDOWN: i32 = 30;
    pub const COUNTDOWN_STEP: i32 = 5;
    pub const MIN_COUNTDOWN: i32 = 10;
    pub const TAKEOUT_BONUS: i32 = 5;

    /// Undrained gameplay events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Rejection-sampling attempts before falling back to a board scan
    pub const PLACEMENT_ATTEMPTS: u32 = 10_000;
}
