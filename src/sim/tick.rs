//! Per-frame simulation tick
//!
//! Advances paddle and ball once, resolves walls, paddle and blocks, and
//! checks the loss condition. Order matters and is fixed.

use super::collision::{fell_out, hits_paddle, hits_side_wall, hits_top_wall, paddle_deflection};
use super::state::{GameEvent, GameState};
use crate::consts::{BLOCK_HIT_SCORE, PADDLE_HIT_SCORE};

/// Advance the game state by one tick
///
/// Does nothing while paused or after game over. Returns the events
/// produced, in the order they happened.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.is_running() {
        return events;
    }

    // Paddle motion (clamped)
    state.paddle.advance(&state.surface);

    // Ball translation
    state.ball.pos += state.ball.vel;

    // Walls
    if hits_side_wall(&state.ball, &state.surface) {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if hits_top_wall(&state.ball) {
        state.ball.vel.y = -state.ball.vel.y;
    }

    // Paddle - re-checked every tick, no debounce
    if hits_paddle(&state.ball, &state.paddle) {
        state.ball.vel.y = -state.ball.vel.y;
        state.ball.vel.x = paddle_deflection(state.ball.pos.x, &state.paddle, state.ball.speed);
        state.score += PADDLE_HIT_SCORE;
        log::debug!("Paddle hit, dx = {:.2}", state.ball.vel.x);
        events.push(GameEvent::PaddleHit {
            dx: state.ball.vel.x,
        });
    }

    // Blocks - full row-major scan, every containing block counts
    let center = state.ball.pos;
    for (row, column, block) in state.blocks.iter_mut() {
        if block.broken || !block.rect().contains_strict(center) {
            continue;
        }
        block.broken = true;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += BLOCK_HIT_SCORE;
        log::debug!("Block ({}, {}) broken", row, column);
        events.push(GameEvent::BlockBroken { row, column });
    }

    // Loss
    if fell_out(&state.ball, &state.surface) {
        state.set_game_over();
        log::info!("Game over with score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}
