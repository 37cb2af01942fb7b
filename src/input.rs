//! Keyboard transitions
//!
//! Hosts feed raw key identifiers (`KeyboardEvent.key` on the web) into an
//! `InputController`, which turns them into `GameState` mutations. Nothing
//! here knows about a particular event system.

use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_SPEED;
use crate::sim::GameState;

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Pause,
    Reset,
    Autoplay,
}

/// Key identifiers for each action
///
/// Single-character bindings match case-insensitively (`r` and `R`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub pause: String,
    pub reset: String,
    pub autoplay: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
            pause: "Escape".to_string(),
            reset: "r".to_string(),
            autoplay: "i".to_string(),
        }
    }
}

impl KeyBindings {
    /// Resolve a key identifier; unknown keys yield `None`
    pub fn action(&self, key: &str) -> Option<KeyAction> {
        [
            (&self.left, KeyAction::Left),
            (&self.right, KeyAction::Right),
            (&self.pause, KeyAction::Pause),
            (&self.reset, KeyAction::Reset),
            (&self.autoplay, KeyAction::Autoplay),
        ]
        .into_iter()
        .find(|(binding, _)| key_matches(binding, key))
        .map(|(_, action)| action)
    }

    /// Every binding must be non-empty and distinct
    pub fn validate(&self) -> Result<(), String> {
        let all = [&self.left, &self.right, &self.pause, &self.reset, &self.autoplay];
        for (i, a) in all.iter().enumerate() {
            if a.is_empty() {
                return Err("key binding must not be empty".to_string());
            }
            if all[i + 1..].iter().any(|b| key_matches(a, b)) {
                return Err(format!("key '{}' is bound twice", a));
            }
        }
        Ok(())
    }
}

fn key_matches(binding: &str, key: &str) -> bool {
    if binding.chars().count() == 1 {
        binding.eq_ignore_ascii_case(key)
    } else {
        binding == key
    }
}

/// Demo steering: keeps the paddle under the ball
///
/// Aims slightly off-center with a slow oscillation so the ball does not
/// settle into a vertical loop.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub enabled: bool,
    frames: u64,
}

impl Autopilot {
    /// Paddle velocity for this frame
    pub fn steer(&mut self, state: &GameState) -> f32 {
        self.frames += 1;
        let t = self.frames as f32 * 0.01;
        let aim_offset = (t.sin() * 0.4 + (t * 0.7).sin() * 0.2) * state.paddle.width / 2.0;

        let target = state.ball.pos.x - aim_offset;
        let delta = target - state.paddle.center_x();
        if delta < -PADDLE_SPEED / 2.0 {
            -PADDLE_SPEED
        } else if delta > PADDLE_SPEED / 2.0 {
            PADDLE_SPEED
        } else {
            0.0
        }
    }
}

/// Routes key events into game state transitions
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pub bindings: KeyBindings,
    pub autopilot: Autopilot,
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            autopilot: Autopilot::default(),
        }
    }

    /// Handle a key press; returns the action taken, if the key is bound
    pub fn key_down(&mut self, state: &mut GameState, key: &str) -> Option<KeyAction> {
        let action = self.bindings.action(key)?;
        match action {
            KeyAction::Left => state.set_paddle_velocity(-PADDLE_SPEED),
            KeyAction::Right => state.set_paddle_velocity(PADDLE_SPEED),
            KeyAction::Pause => {
                let paused = state.toggle_pause();
                log::info!("{}", if paused { "Paused" } else { "Resumed" });
            }
            KeyAction::Reset => {
                if state.is_game_over() {
                    state.reset();
                    log::info!("Game reset");
                }
            }
            KeyAction::Autoplay => {
                self.autopilot.enabled = !self.autopilot.enabled;
                if !self.autopilot.enabled {
                    state.set_paddle_velocity(0.0);
                }
                log::info!("Autoplay: {}", self.autopilot.enabled);
            }
        }
        Some(action)
    }

    /// Handle a key release; either arrow stops the paddle
    pub fn key_up(&mut self, state: &mut GameState, key: &str) -> Option<KeyAction> {
        let action = self.bindings.action(key)?;
        if matches!(action, KeyAction::Left | KeyAction::Right) {
            state.set_paddle_velocity(0.0);
        }
        Some(action)
    }

    /// Per-frame hook run before `step()`
    pub fn update(&mut self, state: &mut GameState) {
        if self.autopilot.enabled && state.is_running() {
            let dx = self.autopilot.steer(state);
            state.set_paddle_velocity(dx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_arrow_keys_set_velocity() {
        let mut input = InputController::default();
        let mut state = GameState::default();

        input.key_down(&mut state, "ArrowLeft");
        assert_eq!(state.paddle.dx, -PADDLE_SPEED);
        input.key_down(&mut state, "ArrowRight");
        assert_eq!(state.paddle.dx, PADDLE_SPEED);

        // Releasing either arrow stops the paddle, even the one not held last
        input.key_up(&mut state, "ArrowLeft");
        assert_eq!(state.paddle.dx, 0.0);
    }

    #[test]
    fn test_pause_toggles() {
        let mut input = InputController::default();
        let mut state = GameState::default();

        assert_eq!(input.key_down(&mut state, "Escape"), Some(KeyAction::Pause));
        assert!(state.is_paused());
        input.key_down(&mut state, "Escape");
        assert!(!state.is_paused());
        // Key up does nothing for pause
        input.key_up(&mut state, "Escape");
        assert!(!state.is_paused());
    }

    #[test]
    fn test_reset_only_after_game_over() {
        let mut input = InputController::default();
        let mut state = GameState::default();

        state.step();
        let mid_game = state.clone();
        input.key_down(&mut state, "r");
        assert_eq!(state, mid_game);

        state.toggle_pause();
        let paused = state.clone();
        input.key_down(&mut state, "R");
        assert_eq!(state, paused);
        state.toggle_pause();

        state.ball.pos = Vec2::new(50.0, 1000.0);
        state.step();
        assert!(state.is_game_over());

        input.key_down(&mut state, "R");
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = InputController::default();
        let mut state = GameState::default();
        let before = state.clone();

        assert_eq!(input.key_down(&mut state, "q"), None);
        assert_eq!(input.key_up(&mut state, "Shift"), None);
        // Multi-character bindings are exact
        assert_eq!(input.key_down(&mut state, "arrowleft"), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_bindings_validate() {
        assert!(KeyBindings::default().validate().is_ok());

        let dup = KeyBindings {
            autoplay: "R".to_string(),
            ..Default::default()
        };
        assert!(dup.validate().is_err());

        let empty = KeyBindings {
            pause: String::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut input = InputController::default();
        let mut state = GameState::default();

        input.key_down(&mut state, "i");
        assert!(input.autopilot.enabled);

        state.ball.pos.x = 20.0;
        input.update(&mut state);
        assert_eq!(state.paddle.dx, -PADDLE_SPEED);

        state.ball.pos.x = 580.0;
        input.update(&mut state);
        assert_eq!(state.paddle.dx, PADDLE_SPEED);

        input.key_down(&mut state, "I");
        assert!(!input.autopilot.enabled);
        assert_eq!(state.paddle.dx, 0.0);
    }

    #[test]
    fn test_autopilot_keeps_ball_in_play() {
        let mut input = InputController::default();
        let mut state = GameState::default();
        input.key_down(&mut state, "i");

        for _ in 0..2_000 {
            input.update(&mut state);
            state.step();
        }
        assert!(!state.is_game_over());
        assert!(state.score > 0);
    }
}
