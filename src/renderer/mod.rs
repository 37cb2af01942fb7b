//! Rendering
//!
//! `draw` describes a frame through the `Canvas` capability (clear, fill
//! rectangle, fill circle). `VertexCanvas` turns those calls into triangles
//! and `RenderState` puts them on screen with WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use shapes::VertexCanvas;
pub use vertex::{Vertex, colors};

use crate::consts::{BLOCK_HEIGHT, BLOCK_WIDTH};
use crate::sim::GameState;

/// Drawing surface capability
pub trait Canvas {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [f32; 4]);
}

/// Draw one frame: paddle, ball, then unbroken blocks in row-major order
pub fn draw(state: &GameState, canvas: &mut impl Canvas) {
    let surface = &state.surface;
    canvas.clear(surface.width, surface.height);

    let paddle = &state.paddle;
    canvas.fill_rect(
        paddle.pos.x,
        paddle.pos.y,
        paddle.width,
        paddle.height,
        colors::PADDLE,
    );

    let ball = &state.ball;
    canvas.fill_circle(ball.pos.x, ball.pos.y, ball.radius, colors::BALL);

    for (_, _, block) in state.blocks.iter() {
        if block.broken {
            continue;
        }
        canvas.fill_rect(block.pos.x, block.pos.y, BLOCK_WIDTH, BLOCK_HEIGHT, colors::BLOCK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BLOCK_COLUMNS, BLOCK_ROWS};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(f32, f32),
        Rect(f32, f32, f32, f32, [f32; 4]),
        Circle(f32, f32, f32, [f32; 4]),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Canvas for Recorder {
        fn clear(&mut self, width: f32, height: f32) {
            self.0.push(Call::Clear(width, height));
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
            self.0.push(Call::Rect(x, y, w, h, color));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [f32; 4]) {
            self.0.push(Call::Circle(cx, cy, r, color));
        }
    }

    #[test]
    fn test_draw_order_and_colors() {
        let state = GameState::default();
        let mut canvas = Recorder::default();
        draw(&state, &mut canvas);

        assert_eq!(canvas.0.len(), 3 + BLOCK_ROWS * BLOCK_COLUMNS);
        assert_eq!(canvas.0[0], Call::Clear(600.0, 400.0));
        assert_eq!(
            canvas.0[1],
            Call::Rect(250.0, 350.0, 100.0, 15.0, colors::PADDLE)
        );
        assert_eq!(canvas.0[2], Call::Circle(300.0, 200.0, 12.0, colors::BALL));
        assert_eq!(canvas.0[3], Call::Rect(30.0, 30.0, 60.0, 20.0, colors::BLOCK));
        assert_eq!(canvas.0[4], Call::Rect(100.0, 30.0, 60.0, 20.0, colors::BLOCK));
    }

    #[test]
    fn test_broken_blocks_are_not_drawn() {
        let mut state = GameState::default();
        state.blocks.get_mut(0, 0).unwrap().broken = true;
        state.blocks.get_mut(4, 7).unwrap().broken = true;

        let mut canvas = Recorder::default();
        draw(&state, &mut canvas);
        assert_eq!(canvas.0.len(), 3 + BLOCK_ROWS * BLOCK_COLUMNS - 2);
        assert_eq!(canvas.0[3], Call::Rect(100.0, 30.0, 60.0, 20.0, colors::BLOCK));
    }

    #[test]
    fn test_blocks_drawn_where_they_collide() {
        let mut state = GameState::default();
        state.blocks.get_mut(0, 0).unwrap().pos = glam::Vec2::new(200.0, 250.0);

        let mut canvas = Recorder::default();
        draw(&state, &mut canvas);
        assert_eq!(canvas.0[3], Call::Rect(200.0, 250.0, 60.0, 20.0, colors::BLOCK));
    }

    #[test]
    fn test_draw_into_vertex_canvas() {
        let state = GameState::default();
        let mut canvas = VertexCanvas::default();
        draw(&state, &mut canvas);
        let expected = 6 + canvas.circle_segments as usize * 3 + 6 * BLOCK_ROWS * BLOCK_COLUMNS;
        assert_eq!(canvas.vertices.len(), expected);
    }
}
