//! HUD snapshot
//!
//! The DOM side (score text, overlay messages) only needs to change when
//! this snapshot changes.

use crate::sim::GameState;

/// What the text overlay should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub show_paused: bool,
    pub show_game_over: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            show_paused: state.is_paused(),
            show_game_over: state.is_game_over(),
        }
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_hud_follows_state() {
        let mut state = GameState::default();
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score_text(), "0");
        assert!(!hud.show_paused && !hud.show_game_over);

        state.toggle_pause();
        assert!(Hud::from_state(&state).show_paused);
        state.toggle_pause();

        state.score = 17;
        state.ball.pos = Vec2::new(50.0, 1000.0);
        state.step();
        let hud = Hud::from_state(&state);
        assert!(hud.show_game_over);
        assert_eq!(hud.score_text(), "17");

        state.reset();
        assert_eq!(Hud::from_state(&state), Hud::from_state(&GameState::default()));
    }
}
