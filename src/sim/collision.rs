//! Collision detection and resolution
//!
//! Every entity is an axis-aligned square. After each accepted player move the
//! resolver walks the entity categories in a fixed priority order: characters,
//! obstacles, takeout boxes, the vampire, then the level-clear check.

use glam::IVec2;

use super::level::setup_level;
use super::state::{GameEvent, GameOverCause, GameState};
use crate::consts::TAKEOUT_BONUS;

/// Axis-aligned square box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub size: i32,
}

impl Aabb {
    #[inline]
    pub fn new(min: IVec2, size: i32) -> Self {
        Self { min, size }
    }

    /// Exclusive far corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + IVec2::splat(self.size)
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// What a single resolver pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Characters removed (and points scored)
    pub captured: u32,
    /// Takeout boxes removed
    pub boxes_collected: u32,
    /// Fatal hit that ended the run during this pass
    pub fatal: Option<GameOverCause>,
    /// A new level was generated
    pub level_cleared: bool,
}

/// Resolve every overlap between the player and the world
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player = state.player_box();
    let cell = state.board.cell_size;

    // Characters: collect all overlapping
    let mut captured = Vec::new();
    state.characters.retain(|&pos| {
        let hit = player.overlaps(&Aabb::new(pos, cell));
        if hit {
            captured.push(pos);
        }
        !hit
    });
    for pos in captured {
        state.score += 1;
        state.captured += 1;
        report.captured += 1;
        state.push_event(GameEvent::CharacterCaptured { pos });
    }
    if report.captured > 0 {
        log::debug!("Captured {} (score {})", report.captured, state.score);
    }

    // Obstacles: fatal, nothing else this pass
    if state
        .obstacles
        .iter()
        .any(|&pos| player.overlaps(&Aabb::new(pos, cell)))
    {
        state.end_game(GameOverCause::Obstacle);
        report.fatal = Some(GameOverCause::Obstacle);
        return report;
    }

    // Takeout boxes: bonus time each
    let mut collected = Vec::new();
    state.takeout_boxes.retain(|&pos| {
        let hit = player.overlaps(&Aabb::new(pos, cell));
        if hit {
            collected.push(pos);
        }
        !hit
    });
    for pos in collected {
        state.countdown += TAKEOUT_BONUS;
        report.boxes_collected += 1;
        state.push_event(GameEvent::TakeoutCollected { pos });
    }

    // Vampire
    if player.overlaps(&state.cell_box(state.vampire.pos)) {
        state.end_game(GameOverCause::Vampire);
        report.fatal = Some(GameOverCause::Vampire);
    }

    // Level clear (a run that just ended stays ended)
    if state.characters.is_empty() && !state.game_over {
        let next = state.difficulty + 1;
        state.push_event(GameEvent::LevelCleared { difficulty: next });
        log::info!("Level cleared, difficulty -> {}", next);
        setup_level(state, next);
        report.level_cleared = true;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    /// Level-1 state with every collection emptied except one far-away
    /// character so the level does not clear by accident.
    fn quiet_state() -> GameState {
        let mut state = GameState::with_seed(12345);
        state.characters = vec![IVec2::new(0, 784)];
        state.obstacles.clear();
        state.tents.clear();
        state.takeout_boxes.clear();
        state.vampire.pos = IVec2::ZERO;
        state.player = IVec2::new(400, 400);
        state.drain_events();
        state
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(IVec2::new(0, 0), 32);
        // Sharing an edge is not an overlap
        assert!(!a.overlaps(&Aabb::new(IVec2::new(32, 0), 16)));
        assert!(!a.overlaps(&Aabb::new(IVec2::new(0, 32), 16)));
        // One unit in is
        assert!(a.overlaps(&Aabb::new(IVec2::new(31, 31), 16)));
        // Touching from the other side
        assert!(!a.overlaps(&Aabb::new(IVec2::new(-16, 0), 16)));
        assert!(a.overlaps(&Aabb::new(IVec2::new(-15, 0), 16)));
    }

    #[test]
    fn test_captures_every_overlapping_character() {
        let mut state = quiet_state();
        // Player covers (400..432, 400..432): all four cells of its 2x2 box
        state.characters.extend([
            IVec2::new(400, 400),
            IVec2::new(416, 400),
            IVec2::new(400, 416),
            IVec2::new(432, 400), // adjacent, not covered
        ]);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.captured, 3);
        assert_eq!(state.score, 3);
        assert_eq!(state.captured, 3);
        assert_eq!(state.characters.len(), 2);
        assert!(!report.level_cleared);
    }

    #[test]
    fn test_obstacle_short_circuits() {
        let mut state = quiet_state();
        state.characters.push(IVec2::new(400, 400));
        state.obstacles.push(IVec2::new(416, 416));
        state.takeout_boxes.push(IVec2::new(416, 400));
        let countdown = state.countdown;

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, Some(GameOverCause::Obstacle));
        assert!(state.game_over);
        assert!(!state.timer.is_running());
        // Characters are checked first and still count
        assert_eq!(state.score, 1);
        // Nothing after the obstacle check ran
        assert_eq!(state.countdown, countdown);
        assert_eq!(state.takeout_boxes.len(), 1);
    }

    #[test]
    fn test_takeout_adds_time_once() {
        let mut state = quiet_state();
        state.takeout_boxes.push(IVec2::new(400, 400));
        let countdown = state.countdown;

        let report = resolve_collisions(&mut state);
        assert_eq!(report.boxes_collected, 1);
        assert_eq!(state.countdown, countdown + TAKEOUT_BONUS);
        assert!(state.takeout_boxes.is_empty());

        // Already taken: no further bonus
        resolve_collisions(&mut state);
        assert_eq!(state.countdown, countdown + TAKEOUT_BONUS);
    }

    #[test]
    fn test_vampire_ends_game() {
        let mut state = quiet_state();
        state.vampire.pos = IVec2::new(424, 424);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, Some(GameOverCause::Vampire));
        assert!(state.game_over);
        assert_eq!(state.game_over_cause, Some(GameOverCause::Vampire));
    }

    #[test]
    fn test_level_clear_resets_level() {
        let mut state = quiet_state();
        state.characters = vec![IVec2::new(400, 400)];
        state.score = 9;
        state.captured = 9;
        let starts = state.timer.starts();

        let report = resolve_collisions(&mut state);
        assert!(report.level_cleared);
        assert_eq!(state.difficulty, 2);
        assert_eq!(state.score, 10);
        // Captured count is per level
        assert_eq!(state.captured, 0);
        assert_eq!(state.characters.len(), CHARACTERS_PER_LEVEL);
        assert_eq!(state.obstacles.len(), 2 * OBSTACLES_PER_DIFFICULTY);
        assert_eq!(state.tents.len(), TENTS_PER_LEVEL);
        assert_eq!(state.takeout_boxes.len(), TAKEOUT_BOXES_PER_LEVEL);
        assert_eq!(state.countdown, 25);
        assert_eq!(state.vampire.pos, IVec2::ZERO);
        assert_eq!(state.timer.starts(), starts + 1);
        assert_eq!(state.timer.live_handles(), 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelCleared { difficulty: 2 })
        );
    }

    #[test]
    fn test_vampire_hit_blocks_level_clear() {
        let mut state = quiet_state();
        state.characters = vec![IVec2::new(400, 400)];
        state.vampire.pos = IVec2::new(416, 416);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.captured, 1);
        assert_eq!(report.fatal, Some(GameOverCause::Vampire));
        assert!(!report.level_cleared);
        assert_eq!(state.difficulty, 1);
        assert!(!state.timer.is_running());
    }

    #[test]
    fn test_obstacle_on_last_capture_blocks_level_clear() {
        let mut state = quiet_state();
        state.characters = vec![IVec2::new(400, 400)];
        state.obstacles = vec![IVec2::new(416, 416)];
        let starts = state.timer.starts();

        let report = resolve_collisions(&mut state);
        assert_eq!(report.captured, 1);
        assert_eq!(report.fatal, Some(GameOverCause::Obstacle));
        assert!(!report.level_cleared);
        assert!(state.game_over);
        assert_eq!(state.score, 1);
        assert!(state.characters.is_empty());
        assert_eq!(state.difficulty, 1);
        assert!(!state.timer.is_running());
        assert_eq!(state.timer.starts(), starts);
    }
}
