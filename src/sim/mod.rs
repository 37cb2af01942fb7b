//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, constant per-tick velocities
//! - Stable iteration order (blocks row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, fell_out, hits_paddle, hits_side_wall, hits_top_wall, paddle_deflection};
pub use state::{Ball, Block, BlockGrid, GameEvent, GameState, Paddle, Surface};
pub use tick::tick;
