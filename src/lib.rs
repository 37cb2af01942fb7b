//! Block Breaker - a single-screen paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `input`: Key transitions and the demo autopilot
//! - `renderer`: Canvas abstraction and WebGPU rendering pipeline
//! - `hud`: Score text and overlay visibility
//! - `settings`: JSON configuration

pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::Hud;
pub use input::{Autopilot, InputController, KeyAction, KeyBindings};
pub use settings::{Settings, SettingsError};

/// Game configuration constants (surface pixels, per-tick velocities)
pub mod consts {
    /// Default surface dimensions
    pub const SURFACE_WIDTH: f32 = 600.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance of the paddle's top edge from the surface bottom
    pub const PADDLE_BOTTOM_GAP: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Scale of the horizontal velocity after a paddle hit
    pub const BALL_SPEED: f32 = 5.0;
    pub const BALL_LAUNCH_DX: f32 = 4.0;
    pub const BALL_LAUNCH_DY: f32 = -4.0;

    /// Block grid layout
    pub const BLOCK_ROWS: usize = 5;
    pub const BLOCK_COLUMNS: usize = 8;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 10.0;
    pub const BLOCK_OFFSET_TOP: f32 = 30.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 30.0;

    /// Score awarded per hit
    pub const PADDLE_HIT_SCORE: u32 = 1;
    pub const BLOCK_HIT_SCORE: u32 = 5;
}
