//! Fixed-rate game driver
//!
//! Owns the `GameState` and serializes everything that touches it on one
//! thread: queued input goes through the movement gate, elapsed time feeds a
//! 1 Hz accumulator that drives `sim::tick`, and each frame hands a read-only
//! `Snapshot` to a `RenderSink`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::autopilot::choose_direction;
use crate::sim::{
    Board, CharacterKind, Direction, GameEvent, GameOverCause, GameState, MoveOutcome,
    VampireMode, attempt_direction, tick,
};

/// Everything a renderer may read for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub player: IVec2,
    pub characters: Vec<(IVec2, CharacterKind)>,
    pub obstacles: Vec<IVec2>,
    pub tents: Vec<IVec2>,
    pub takeout_boxes: Vec<IVec2>,
    pub vampire: IVec2,
    pub vampire_mode: VampireMode,
    pub score: u32,
    pub captured: u32,
    pub countdown: i32,
    pub difficulty: u32,
    pub game_over: bool,
    pub game_over_cause: Option<GameOverCause>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            board: state.board,
            player: state.player,
            characters: state.characters_with_kind().collect(),
            obstacles: state.obstacles.clone(),
            tents: state.tents.clone(),
            takeout_boxes: state.takeout_boxes.clone(),
            vampire: state.vampire.pos,
            vampire_mode: state.vampire.mode,
            score: state.score,
            captured: state.captured,
            countdown: state.countdown,
            difficulty: state.difficulty,
            game_over: state.game_over,
            game_over_cause: state.game_over_cause,
        }
    }
}

/// Per-frame consumer of the world (canvas, terminal, log...)
pub trait RenderSink {
    fn present(&mut self, frame: &Snapshot);
}

/// Render sink that writes HUD changes and the final score to the log
#[derive(Debug, Default)]
pub struct LogSink {
    last_hud: Option<(u32, u32, i32, u32)>,
    announced_game_over: bool,
    pub frames: u64,
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Snapshot) {
        self.frames += 1;

        if frame.game_over {
            if !self.announced_game_over {
                self.announced_game_over = true;
                log::info!("Game Over! Score: {}", frame.score);
            }
            return;
        }

        let hud = (frame.score, frame.captured, frame.countdown, frame.difficulty);
        if self.last_hud != Some(hud) {
            self.last_hud = Some(hud);
            log::debug!(
                "Score: {}  Captured: {}  Time Left: {}s  Level: {}",
                frame.score,
                frame.captured,
                frame.countdown,
                frame.difficulty
            );
        }
    }
}

/// Game instance holding all state
///
/// Gameplay events queue up on the state until `drain_events` is called.
pub struct Game {
    pub state: GameState,
    accumulator: f32,
    /// Timer generation the accumulator is phased to
    timer_generation: u64,
    pending: Option<Direction>,
    /// Idle/demo mode - autopilot plays the game
    pub autopilot: bool,
    autopilot_interval: f32,
    autopilot_cooldown: f32,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let state = GameState::new(settings);
        let timer_generation = state.timer.generation();
        let autopilot_interval = match settings.autopilot_moves_per_sec {
            0 => f32::INFINITY,
            n => 1.0 / n as f32,
        };
        Self {
            state,
            accumulator: 0.0,
            timer_generation,
            pending: None,
            autopilot: settings.autopilot,
            autopilot_interval,
            autopilot_cooldown: 0.0,
        }
    }

    /// Queue a joystick direction for the next update (latest wins)
    pub fn push_input(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    /// Apply a direction immediately, bypassing the queue
    pub fn apply_input(&mut self, dir: Option<Direction>) -> MoveOutcome {
        let outcome = attempt_direction(&mut self.state, dir);
        self.sync_timer_phase();
        outcome
    }

    /// Advance by `dt` seconds of wall-clock time. Returns ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, TICK_INTERVAL * MAX_TICKS_PER_FRAME as f32);

        if let Some(dir) = self.pending.take() {
            self.apply_input(Some(dir));
        } else if self.autopilot {
            self.autopilot_cooldown -= dt;
            if self.autopilot_cooldown <= 0.0 {
                self.autopilot_cooldown = self.autopilot_interval;
                if let Some(dir) = choose_direction(&self.state) {
                    self.apply_input(Some(dir));
                }
            }
        }

        if !self.state.timer.is_running() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= TICK_INTERVAL && ticks < MAX_TICKS_PER_FRAME {
            if !tick(&mut self.state) {
                break;
            }
            self.accumulator -= TICK_INTERVAL;
            ticks += 1;
        }
        if !self.state.timer.is_running() {
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Hand the current frame to a render sink
    pub fn present(&self, sink: &mut dyn RenderSink) {
        sink.present(&Snapshot::capture(&self.state));
    }

    /// Start a fresh run with new settings
    pub fn restart(&mut self, settings: &Settings) {
        let autopilot = self.autopilot;
        *self = Self::new(settings);
        self.autopilot = autopilot;
        log::info!("Game restarted with seed: {}", self.state.seed);
    }

    /// Take pending gameplay events. Callers should drain once per frame;
    /// only the newest `MAX_PENDING_EVENTS` are kept between drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// A new timer handle starts a fresh one-second period
    fn sync_timer_phase(&mut self) {
        let generation = self.state.timer.generation();
        if generation != self.timer_generation {
            self.timer_generation = generation;
            self.accumulator = 0.0;
        }
    }
}
