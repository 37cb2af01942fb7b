//! Game settings
//!
//! Persisted as JSON: LocalStorage on the web, a file on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyBindings;
use crate::sim::Surface;

/// Why settings could not be used
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size in pixels
    pub surface_width: f32,
    pub surface_height: f32,
    pub keys: KeyBindings,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Tick budget of the native headless session
    pub demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            keys: KeyBindings::default(),
            log_level: "info".to_string(),
            demo_ticks: 3_600,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.surface_width, self.surface_height)
    }

    /// Log level filter (`Info` if unparseable)
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// The surface must hold the block grid with the paddle below it
    pub fn validate(&self) -> Result<(), SettingsError> {
        let w = self.surface_width;
        let h = self.surface_height;
        if !w.is_finite() || !h.is_finite() {
            return Err(SettingsError::Invalid("surface size must be finite".to_string()));
        }

        let grid_right = BLOCK_OFFSET_LEFT
            + BLOCK_COLUMNS as f32 * BLOCK_WIDTH
            + (BLOCK_COLUMNS - 1) as f32 * BLOCK_PADDING;
        let grid_bottom = BLOCK_OFFSET_TOP
            + BLOCK_ROWS as f32 * BLOCK_HEIGHT
            + (BLOCK_ROWS - 1) as f32 * BLOCK_PADDING;

        if w < grid_right.max(PADDLE_WIDTH) {
            return Err(SettingsError::Invalid(format!(
                "surface width {} is narrower than the block grid ({})",
                w, grid_right
            )));
        }
        if h - PADDLE_BOTTOM_GAP <= grid_bottom {
            return Err(SettingsError::Invalid(format!(
                "surface height {} leaves no room for the paddle below the grid ({})",
                h, grid_bottom
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(SettingsError::Invalid(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        self.keys.validate().map_err(SettingsError::Invalid)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "block_breaker_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Read settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.surface(), Surface::new(600.0, 400.0));
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "surface_width": 800, "keys": { "pause": "p" } }"#).unwrap();
        assert_eq!(settings.surface_width, 800.0);
        assert_eq!(settings.surface_height, SURFACE_HEIGHT);
        assert_eq!(settings.keys.pause, "p");
        assert_eq!(settings.keys.left, "ArrowLeft");
    }

    #[test]
    fn test_rejects_small_surface() {
        let err = Settings::from_json(r#"{ "surface_width": 300 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "surface_height": 200 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Settings::from_json("{ not json").unwrap_err(),
            SettingsError::Json(_)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "log_level": "loud" }"#).unwrap_err(),
            SettingsError::Invalid(_)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "keys": { "left": "r" } }"#).unwrap_err(),
            SettingsError::Invalid(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::path::Path::new("/nonexistent/block_breaker.json");
        assert!(matches!(
            Settings::load_from_path(path).unwrap_err(),
            SettingsError::Io(_)
        ));
    }

    #[test]
    fn test_error_messages_and_sources() {
        use std::error::Error;

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed settings: "));
        assert!(err.source().is_some());

        let err = Settings::from_json(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid settings: unknown log level 'loud'");
        assert!(err.source().is_none());

        let io: SettingsError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(io.to_string().starts_with("cannot read settings: "));
        assert!(io.source().is_some());
    }
}
