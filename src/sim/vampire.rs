//! Vampire AI
//!
//! Two modes, picked fresh every tick from the distance to the player:
//! - **Chase**: within `CHASE_DISTANCE`, step a full cell toward the player on
//!   both axes at once (diagonals allowed), clamped to the board.
//! - **Patrol**: otherwise, step half a cell in a random cardinal direction and
//!   clamp to the board. Tents do not stop the vampire.

use glam::IVec2;
use rand::Rng;

use super::movement::Direction;
use super::state::{GameState, Position, VampireMode};
use crate::consts::CHASE_DISTANCE;

/// Whether the vampire at `vampire` is close enough to chase `player`
#[inline]
pub fn in_chase_range(vampire: Position, player: Position) -> bool {
    let d = (player - vampire).as_i64vec2();
    d.length_squared() <= (CHASE_DISTANCE as i64).pow(2)
}

/// Advance the vampire by one tick
pub fn update_vampire(state: &mut GameState) {
    let player = state.player;
    let vampire = state.vampire.pos;

    if in_chase_range(vampire, player) {
        state.vampire.mode = VampireMode::Chase;
        let next = vampire + chase_step(vampire, player, state.board.aggressive_speed());
        state.vampire.pos = state.board.clamp(next, state.board.cell_size);
    } else {
        state.vampire.mode = VampireMode::Patrol;
        let dir = Direction::ALL[state.rng.random_range(0..Direction::ALL.len())];
        let next = vampire + dir.unit() * state.board.patrol_speed();
        state.vampire.pos = state.board.clamp(next, state.board.cell_size);
    }

    log::trace!(
        "Vampire {:?} -> {:?} ({:?})",
        vampire,
        state.vampire.pos,
        state.vampire.mode
    );
}

/// One chase step from `from` toward `to`
pub fn chase_step(from: Position, to: Position, speed: i32) -> IVec2 {
    (to - from).signum() * speed
}
