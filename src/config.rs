use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{AppError, ConfigError};

const APP_DIR_NAME: &str = "torus-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 25;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 25;

/// Snake length at construction and after every reset.
pub const INITIAL_LENGTH: i32 = 3;

/// Weight of the fruit placed when a game starts.
pub const INITIAL_FRUIT_WEIGHT: i32 = 1;

/// Default delay between ticks, in seconds.
pub const DEFAULT_SPEED_SECS: f64 = 0.05;

/// Factor applied to the delay every time the snake grows.
pub const GROWTH_SPEED_FACTOR: f64 = 0.99;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Everything a [`crate::game::Game`] needs to be built and reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: u16,
    pub height: u16,
    pub direction: Direction,
    /// 0 is fully greedy; higher values blend in random and straight moves.
    pub exploration_rate: f64,
    /// Grow the snake every N ticks regardless of fruit.
    pub auto_grow_every: Option<u32>,
    /// Initial pacing hint in seconds.
    pub speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            direction: Direction::Down,
            exploration_rate: 0.0,
            auto_grow_every: None,
            speed: DEFAULT_SPEED_SECS,
        }
    }
}

impl SimConfig {
    /// Creates a default configuration with a custom grid size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Checks every field a game relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        // Room for a full-length snake plus one fruit.
        let required = INITIAL_LENGTH as usize + 1;
        let cells = self.grid_size().total_cells();
        if cells < required {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                cells,
                required,
            });
        }

        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(ConfigError::ExplorationRate(self.exploration_rate));
        }

        if self.auto_grow_every == Some(0) {
            return Err(ConfigError::AutoGrowInterval);
        }

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::Speed(self.speed));
        }

        Ok(())
    }

    /// Loads a configuration file.
    ///
    /// With an explicit path the file must exist. Without one, the platform
    /// config file is read when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => load_from_path(path)?.ok_or_else(|| {
                AppError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("config file {} does not exist", path.display()),
                ))
            }),
            None => Ok(load_from_path(&config_path())?.unwrap_or_default()),
        }
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

fn load_from_path(path: &Path) -> Result<Option<SimConfig>, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str::<SimConfig>(&raw)
        .map(Some)
        .map_err(|source| AppError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_from_path, SimConfig};
    use crate::direction::Direction;
    use crate::error::{AppError, ConfigError};

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.width, 25);
        assert_eq!(config.height, 25);
        assert_eq!(config.direction, Direction::Down);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = SimConfig::new(0, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn grid_without_room_for_snake_and_fruit_is_rejected() {
        assert!(matches!(
            SimConfig::new(1, 3).validate(),
            Err(ConfigError::GridTooSmall { cells: 3, .. })
        ));
        assert!(SimConfig::new(2, 2).validate().is_ok());
    }

    #[test]
    fn exploration_rate_outside_unit_interval_is_rejected() {
        let mut config = SimConfig::default();
        config.exploration_rate = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::ExplorationRate(1.5)));

        config.exploration_rate = f64::NAN;
        assert!(config.validate().is_err());

        config.exploration_rate = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_auto_grow_interval_is_rejected() {
        let mut config = SimConfig::default();
        config.auto_grow_every = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::AutoGrowInterval));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let mut config = SimConfig::default();
        config.speed = -0.1;
        assert_eq!(config.validate(), Err(ConfigError::Speed(-0.1)));
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "width": 12, "direction": "left" }"#);

        let config = load_from_path(&path)
            .expect("load should succeed")
            .expect("file should exist");

        assert_eq!(config.width, 12);
        assert_eq!(config.height, 25);
        assert_eq!(config.direction, Direction::Left);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_config_file_is_none() {
        let path = unique_test_path("missing");
        let loaded = load_from_path(&path).expect("missing file should not error");
        assert!(loaded.is_none());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let path = unique_test_path("explicit-missing");
        assert!(matches!(
            SimConfig::load(Some(path.as_path())),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn malformed_config_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            load_from_path(&path),
            Err(AppError::ConfigFile { .. })
        ));
        cleanup_test_path(&path);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("torus-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
