//! Level generation
//!
//! A level is rebuilt wholesale from the run's RNG: characters and obstacles
//! land on any cell, tents and takeout boxes are re-rolled until they avoid
//! every character, obstacle and takeout box already placed.

use glam::IVec2;
use rand::Rng;

use super::state::{GameState, Position, Vampire};
use crate::consts::*;

/// Starting countdown for a difficulty tier
pub fn countdown_for_difficulty(difficulty: u32) -> i32 {
    let steps = difficulty.saturating_sub(1).min(i32::MAX as u32) as i32;
    BASE_COUNTDOWN
        .saturating_sub(COUNTDOWN_STEP.saturating_mul(steps))
        .max(MIN_COUNTDOWN)
}

/// Obstacles spawned for a difficulty tier
pub fn obstacles_for_difficulty(difficulty: u32) -> usize {
    OBSTACLES_PER_DIFFICULTY * difficulty as usize
}

/// Populate the world for `difficulty` and restart the tick
pub fn setup_level(state: &mut GameState, difficulty: u32) {
    state.difficulty = difficulty;
    state.characters.clear();
    state.obstacles.clear();
    state.tents.clear();
    state.takeout_boxes.clear();
    state.countdown = countdown_for_difficulty(difficulty);
    state.captured = 0;

    for _ in 0..CHARACTERS_PER_LEVEL {
        let pos = random_cell(state);
        state.characters.push(pos);
    }
    for _ in 0..obstacles_for_difficulty(difficulty) {
        let pos = random_cell(state);
        state.obstacles.push(pos);
    }
    for _ in 0..TENTS_PER_LEVEL {
        let pos = place_unoccupied(state);
        state.tents.push(pos);
    }
    for _ in 0..TAKEOUT_BOXES_PER_LEVEL {
        let pos = place_unoccupied(state);
        state.takeout_boxes.push(pos);
    }

    state.vampire = Vampire::default();
    state.timer.restart();

    log::info!(
        "Level {}: countdown={}s, characters={}, obstacles={}, tents={}, boxes={}",
        difficulty,
        state.countdown,
        state.characters.len(),
        state.obstacles.len(),
        state.tents.len(),
        state.takeout_boxes.len()
    );
}

/// Uniform random grid cell, in board units
fn random_cell(state: &mut GameState) -> Position {
    let grid = state.board.grid_size;
    let cell = IVec2::new(
        state.rng.random_range(0..grid),
        state.rng.random_range(0..grid),
    );
    state.board.cell_to_pos(cell)
}

/// Whether a character, obstacle or takeout box already sits on `pos`
///
/// Tents are not part of the check.
pub fn is_occupied(state: &GameState, pos: Position) -> bool {
    state.characters.contains(&pos)
        || state.obstacles.contains(&pos)
        || state.takeout_boxes.contains(&pos)
}

/// Rejection-sample a free cell, falling back to a board scan after
/// `placement_attempts` misses
fn place_unoccupied(state: &mut GameState) -> Position {
    let mut pos = random_cell(state);
    for _ in 0..state.placement_attempts {
        if !is_occupied(state, pos) {
            return pos;
        }
        pos = random_cell(state);
    }
    if !is_occupied(state, pos) {
        return pos;
    }

    let grid = state.board.grid_size;
    let free: Vec<Position> = (0..grid)
        .flat_map(|y| (0..grid).map(move |x| IVec2::new(x, y)))
        .map(|cell| state.board.cell_to_pos(cell))
        .filter(|&p| !is_occupied(state, p))
        .collect();

    if free.is_empty() {
        log::warn!("No free cell left on the board; placing over an occupied cell");
        return pos;
    }
    log::warn!(
        "Placement gave up after {} attempts; picked from {} free cells",
        state.placement_attempts,
        free.len()
    );
    free[state.rng.random_range(0..free.len())]
}
