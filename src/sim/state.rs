//! Game state and core simulation types
//!
//! Everything `tick` mutates lives in one owned `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Playfield bounds in pixels (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner; `y` never changes after construction
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (pixels per tick)
    pub dx: f32,
}

impl Paddle {
    /// Paddle centered horizontally, resting above the surface bottom
    pub fn new(surface: &Surface) -> Self {
        Self {
            pos: Vec2::new(
                surface.width / 2.0 - PADDLE_WIDTH / 2.0,
                surface.height - PADDLE_BOTTOM_GAP,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            dx: 0.0,
        }
    }

    /// Apply velocity, then clamp into `[0, surface.width - width]`
    pub fn advance(&mut self, surface: &Surface) {
        self.pos.x += self.dx;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x + self.width > surface.width {
            self.pos.x = surface.width - self.width;
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal speed reached at the paddle's edges
    pub speed: f32,
}

impl Ball {
    /// Ball at the surface center with the diagonal launch vector
    pub fn new(surface: &Surface) -> Self {
        Self {
            pos: surface.center(),
            vel: Vec2::new(BALL_LAUNCH_DX, BALL_LAUNCH_DY),
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A breakable block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner from the grid layout
    pub pos: Vec2,
    pub broken: bool,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT))
    }
}

/// Fixed rows × columns arrangement of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockGrid {
    rows: [[Block; BLOCK_COLUMNS]; BLOCK_ROWS],
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrid {
    pub fn new() -> Self {
        let mut rows = [[Block {
            pos: Vec2::ZERO,
            broken: false,
        }; BLOCK_COLUMNS]; BLOCK_ROWS];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, block) in row.iter_mut().enumerate() {
                block.pos = Self::layout_position(r, c);
            }
        }
        Self { rows }
    }

    /// Screen position of the block at (row, column)
    pub fn layout_position(row: usize, column: usize) -> Vec2 {
        Vec2::new(
            column as f32 * (BLOCK_WIDTH + BLOCK_PADDING) + BLOCK_OFFSET_LEFT,
            row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING) + BLOCK_OFFSET_TOP,
        )
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Block> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut Block> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Row-major iteration yielding `(row, column, block)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Block)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, b)| (r, c, b)))
    }

    /// Row-major mutable iteration yielding `(row, column, block)`
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Block)> {
        self.rows
            .iter_mut()
            .enumerate()
            .flat_map(|(r, row)| row.iter_mut().enumerate().map(move |(c, b)| (r, c, b)))
    }

    /// Number of unbroken blocks
    pub fn remaining(&self) -> usize {
        self.iter().filter(|(_, _, b)| !b.broken).count()
    }

    /// Un-break every block and restore its layout position (in place)
    pub fn restore(&mut self) {
        for (r, c, block) in self.iter_mut() {
            block.broken = false;
            block.pos = Self::layout_position(r, c);
        }
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle; `dx` is the new horizontal velocity
    PaddleHit { dx: f32 },
    BlockBroken { row: usize, column: usize },
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub surface: Surface,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockGrid,
    pub score: u32,
    is_paused: bool,
    is_game_over: bool,
}

impl GameState {
    /// Create the start state for a surface
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            paddle: Paddle::new(&surface),
            ball: Ball::new(&surface),
            blocks: BlockGrid::new(),
            score: 0,
            is_paused: false,
            is_game_over: false,
        }
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        super::tick::tick(self)
    }

    /// Return to the start state without reallocating the grid
    ///
    /// Paddle velocity is zeroed as well, so a held arrow key only moves the
    /// paddle again after its next key event.
    pub fn reset(&mut self) {
        self.score = 0;
        self.ball = Ball::new(&self.surface);
        self.paddle = Paddle::new(&self.surface);
        self.is_paused = false;
        self.is_game_over = false;
        self.blocks.restore();
    }

    pub fn set_paddle_velocity(&mut self, dx: f32) {
        self.paddle.dx = dx;
    }

    /// Flip the pause flag; returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Physics runs only while neither paused nor over
    pub fn is_running(&self) -> bool {
        !self.is_paused && !self.is_game_over
    }

    pub(crate) fn set_game_over(&mut self) {
        self.is_game_over = true;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}
