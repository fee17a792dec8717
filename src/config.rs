use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::Deserialize;
use thiserror::Error;

/// Default board edge length in cells.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest board that still leaves room for a snake and one food.
pub const MIN_GRID_SIZE: u16 = 2;

/// Default tick interval in milliseconds (lower is faster).
pub const DEFAULT_SPEED_MS: u64 = 160;

/// Fastest recognized tick interval in milliseconds.
pub const MIN_SPEED_MS: u64 = 80;

/// Slowest recognized tick interval in milliseconds.
pub const MAX_SPEED_MS: u64 = 300;

/// Step applied by the faster/slower controls.
pub const SPEED_STEP_MS: u64 = 10;

/// Errors raised while loading or validating [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(u16),
    #[error("speed must be within 80..=300 ms, got {0}")]
    SpeedOutOfRange(u64),
}

/// Simulation settings shared by the engine and the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the square board.
    pub grid_size: u16,
    /// Tick interval in milliseconds.
    pub speed_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            speed_ms: DEFAULT_SPEED_MS,
        }
    }
}

impl GameConfig {
    /// Loads a JSON config file; absent fields fall back to defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()
    }

    /// Checks the recognized ranges and returns the config unchanged.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }

        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&self.speed_ms) {
            return Err(ConfigError::SpeedOutOfRange(self.speed_ms));
        }

        Ok(self)
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.grid_size) * usize::from(self.grid_size)
    }
}

/// Tick interval that would read as 0% on the speed gauge.
const SPEED_PERCENT_BASE: u64 = 400;

/// Speed as shown to players: `400 - speed_ms`, so 160 ms reads 240%.
#[must_use]
pub fn speed_percent(speed_ms: u64) -> u64 {
    SPEED_PERCENT_BASE.saturating_sub(speed_ms)
}

/// Clamps a tick interval into the recognized speed range.
#[must_use]
pub fn clamp_speed(speed_ms: u64) -> u64 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Emerald board with a rose food cell.
pub const THEME_EMERALD: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::LightRed,
    play_bg: Color::Black,
    border_fg: Color::Green,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::LightGreen,
    menu_footer: Color::DarkGray,
};

/// Rounded border around the play area.
pub const BORDER_BOARD: border::Set = border::ROUNDED;

/// Each logical cell is drawn two terminal columns wide to look square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";
pub const GLYPH_FOOD: &str = "◆◆";

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        clamp_speed, speed_percent, ConfigError, GameConfig, DEFAULT_GRID_SIZE, DEFAULT_SPEED_MS,
    };

    #[test]
    fn defaults_match_reference_board() {
        let config = GameConfig::default();

        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.speed_ms, DEFAULT_SPEED_MS);
        assert_eq!(config.total_cells(), 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let tiny = GameConfig {
            grid_size: 1,
            ..GameConfig::default()
        };
        assert!(matches!(tiny.validate(), Err(ConfigError::GridTooSmall(1))));

        let slow = GameConfig {
            speed_ms: 301,
            ..GameConfig::default()
        };
        assert!(matches!(
            slow.validate(),
            Err(ConfigError::SpeedOutOfRange(301))
        ));
    }

    #[test]
    fn speed_is_clamped_to_recognized_range() {
        assert_eq!(clamp_speed(10), 80);
        assert_eq!(clamp_speed(160), 160);
        assert_eq!(clamp_speed(1_000), 300);
    }

    #[test]
    fn speed_percent_grows_as_interval_shrinks() {
        assert_eq!(speed_percent(80), 320);
        assert_eq!(speed_percent(160), 240);
        assert_eq!(speed_percent(300), 100);
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let path = unique_test_path("partial");
        fs::write(&path, r#"{ "grid_size": 12 }"#).expect("test file write should succeed");

        let config = GameConfig::from_path(&path).expect("partial config should load");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.speed_ms, DEFAULT_SPEED_MS);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_config_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        fs::write(&path, "grid_size = 12").expect("test file write should succeed");

        assert!(matches!(
            GameConfig::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
        let _ = fs::remove_file(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir().join(format!("wrap-snake-config-{label}-{nanos}.json"))
    }
}
