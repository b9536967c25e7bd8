//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (level order for bricks, spawn order for drops)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod powerup;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{Collision, Direction, check_aabb, check_ball_box, vector_direction};
pub use geometry::{Aabb, Circle};
pub use powerup::{PowerUp, PowerUpKind, PowerUpProfile};
pub use resolve::{BrickHit, bounce_off_box, bounce_off_paddle, resolve_brick};
pub use state::{Ball, Effects, Entity, GameEvent, GameMode, GameState, Playfield};
pub use tick::{process_input, tick, update};
