//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick displacements only
//! - Seeded RNG only
//! - Stable iteration order (grid storage order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BrickHit, WallContact, ball_lost, collide_paddle, collide_walls, sweep_bricks};
pub use input::{Key, key_down, key_up, pointer_moved};
pub use rect::Rect;
pub use state::{
    Ball, Brick, BrickColor, GameEvent, GamePhase, GameState, InputState, Paddle, build_grid,
};
pub use tick::{LoopDirective, TickReport, tick};
