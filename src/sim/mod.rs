//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod movement;
pub mod state;
pub mod tick;
pub mod vampire;

pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use level::{countdown_for_difficulty, setup_level};
pub use movement::{Direction, MoveOutcome, attempt_direction, attempt_move};
pub use state::{
    Board, CharacterKind, GameEvent, GameOverCause, GameState, Position, TickTimer, Vampire,
    VampireMode,
};
pub use tick::tick;
pub use vampire::update_vampire;
