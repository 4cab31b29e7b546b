//! Fixed 1 Hz tick
//!
//! Body of the repeating timer: burn a second off the countdown, then move
//! the vampire. Both happen even on the tick that runs out the clock.

use super::state::{GameOverCause, GameState};
use super::vampire::update_vampire;

/// Advance the clock-driven half of the game by one tick.
///
/// Returns false (and changes nothing) when the tick timer is not running.
pub fn tick(state: &mut GameState) -> bool {
    if !state.timer.is_running() {
        return false;
    }

    state.time_ticks += 1;
    state.countdown -= 1;
    log::debug!("Tick {}: {}s left", state.time_ticks, state.countdown);
    if state.countdown <= 0 {
        state.end_game(GameOverCause::TimeUp);
    }

    update_vampire(state);
    true
}
