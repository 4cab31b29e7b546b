//! Idle/demo mode - a greedy AI that plays the game
//!
//! Heads for the nearest character one step at a time, never steps onto an
//! obstacle or the vampire, and prefers cells outside the vampire's chase
//! range. Reads state only; the chosen direction goes through the normal
//! movement gate.

use super::collision::Aabb;
use super::movement::{Direction, clamped_target, hits_tent};
use super::state::{GameState, Position};
use super::vampire::in_chase_range;

/// Manhattan distance between two corners
#[inline]
fn manhattan(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Whether a player box at `pos` would touch anything fatal
fn is_fatal(state: &GameState, pos: Position) -> bool {
    let player = Aabb::new(pos, state.board.player_size);
    player.overlaps(&state.cell_box(state.vampire.pos))
        || state
            .obstacles
            .iter()
            .any(|&o| player.overlaps(&state.cell_box(o)))
}

/// Nearest remaining character to the player
pub fn nearest_character(state: &GameState) -> Option<Position> {
    state
        .characters
        .iter()
        .copied()
        .min_by_key(|&c| manhattan(c, state.player))
}

/// Pick the next step, or `None` when there is nothing sensible to do
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    if state.game_over {
        return None;
    }
    let target = nearest_character(state)?;

    Direction::ALL
        .into_iter()
        .filter_map(|dir| {
            let step = dir.unit() * state.board.player_speed();
            let pos = clamped_target(state, step);
            if pos == state.player || hits_tent(state, pos) || is_fatal(state, pos) {
                return None;
            }
            let danger = in_chase_range(state.vampire.pos, pos);
            Some((danger, manhattan(pos, target), dir))
        })
        .min_by_key(|&(danger, dist, _)| (danger, dist))
        .map(|(_, _, dir)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn empty_state() -> GameState {
        let mut state = GameState::with_seed(99);
        state.characters.clear();
        state.obstacles.clear();
        state.tents.clear();
        state.takeout_boxes.clear();
        state.vampire.pos = IVec2::ZERO;
        state.player = IVec2::new(400, 400);
        state
    }

    #[test]
    fn test_heads_for_nearest_character() {
        let mut state = empty_state();
        state.characters = vec![IVec2::new(480, 400), IVec2::new(400, 700)];
        assert_eq!(choose_direction(&state), Some(Direction::Right));
    }

    #[test]
    fn test_avoids_obstacle() {
        let mut state = empty_state();
        state.characters = vec![IVec2::new(480, 400)];
        state.obstacles = vec![IVec2::new(432, 400)];
        let dir = choose_direction(&state).unwrap();
        assert_ne!(dir, Direction::Right);
    }

    #[test]
    fn test_respects_tents() {
        let mut state = empty_state();
        state.characters = vec![IVec2::new(400, 300)];
        state.tents = vec![IVec2::new(400, 368)];
        assert_ne!(choose_direction(&state), Some(Direction::Up));
    }

    #[test]
    fn test_nothing_to_do_when_over() {
        let mut state = empty_state();
        state.characters = vec![IVec2::new(480, 400)];
        state.game_over = true;
        assert_eq!(choose_direction(&state), None);
    }

    #[test]
    fn test_no_target_no_move() {
        let state = empty_state();
        assert_eq!(choose_direction(&state), None);
    }
}
