//! Player movement gate
//!
//! The only way the player moves. A proposed step is clamped to the board and
//! then rejected whole if it would put the player inside a tent.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionReport, resolve_collisions};
use super::state::{GameState, Position};

/// Joystick directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step (screen coordinates: y grows downward)
    #[inline]
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Run is over; input is dropped
    Ignored,
    /// Target overlaps a tent; position unchanged
    Blocked,
    /// Position written (possibly unchanged after clamping) and collisions resolved
    Moved(CollisionReport),
}

/// Clamp `player + delta` to the board
#[inline]
pub fn clamped_target(state: &GameState, delta: IVec2) -> Position {
    state
        .board
        .clamp(state.player + delta, state.board.player_size)
}

/// Whether a player box at `pos` would overlap any tent
pub fn hits_tent(state: &GameState, pos: Position) -> bool {
    let candidate = Aabb::new(pos, state.board.player_size);
    state
        .tents
        .iter()
        .any(|&tent| candidate.overlaps(&state.tent_box(tent)))
}

/// Move the player by `delta` (board units per axis)
pub fn attempt_move(state: &mut GameState, delta: IVec2) -> MoveOutcome {
    if state.game_over {
        return MoveOutcome::Ignored;
    }

    let target = clamped_target(state, delta);
    if hits_tent(state, target) {
        log::trace!("Move to {:?} blocked by tent", target);
        return MoveOutcome::Blocked;
    }

    state.player = target;
    MoveOutcome::Moved(resolve_collisions(state))
}

/// Move one player step in `dir`; `None` is a zero-length move
pub fn attempt_direction(state: &mut GameState, dir: Option<Direction>) -> MoveOutcome {
    let delta = dir.map_or(IVec2::ZERO, |d| d.unit() * state.board.player_speed());
    attempt_move(state, delta)
}
