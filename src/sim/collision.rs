//! Collision predicates for axis-aligned geometry
//!
//! Everything here is a pure function of positions; `tick` decides what to
//! do with the answers. All containment tests are strict, so touching an
//! edge is never a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Surface};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point lies strictly inside (edges excluded)
    pub fn contains_strict(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x > self.min.x && point.x < max.x && point.y > self.min.y && point.y < max.y
    }
}

/// Ball crossed the left or right wall
///
/// Position is not corrected, so the ball may overshoot by one tick of travel.
pub fn hits_side_wall(ball: &Ball, surface: &Surface) -> bool {
    ball.right() > surface.width || ball.left() < 0.0
}

/// Ball crossed the top wall
pub fn hits_top_wall(ball: &Ball) -> bool {
    ball.top() < 0.0
}

/// Ball fell fully below the surface
pub fn fell_out(ball: &Ball, surface: &Surface) -> bool {
    ball.top() > surface.height
}

/// Ball's bottom edge is below the paddle's top edge and its center is
/// strictly within the paddle's horizontal span.
///
/// There is no lower bound on the ball's position: a ball that already
/// dropped past the paddle top still counts if the paddle slides under it.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() > paddle.pos.y
        && ball.pos.x > paddle.pos.x
        && ball.pos.x < paddle.pos.x + paddle.width
}

/// Horizontal velocity after a paddle bounce
///
/// Offset from the paddle center, normalized by half the paddle width and
/// scaled by ball speed: center gives 0, edges give `±speed`.
pub fn paddle_deflection(ball_x: f32, paddle: &Paddle, speed: f32) -> f32 {
    let half = paddle.width / 2.0;
    let collide_point = (ball_x - paddle.center_x()) / half;
    collide_point * speed
}
