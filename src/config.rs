//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/twentyq/twentyq.toml`
//! 3. Local config: `<dir>/.twentyq.toml` (usually the working directory)
//! 4. Environment variables: `TWENTYQ_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub game_file: Option<PathBuf>,
    pub atomic_save: Option<bool>,
}

/// Unified configuration for twentyq.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Game file used when no file is given on the command line
    pub game_file: PathBuf,
    /// Save through a temporary file and rename (default: true).
    /// When false the game file is overwritten in place.
    pub atomic_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_file: default_game_file(),
            atomic_save: true,
        }
    }
}

/// Default game file: `<XDG data dir>/twentyq/game.txt`.
fn default_game_file() -> PathBuf {
    ProjectDirs::from("", "", "twentyq")
        .map(|dirs| dirs.data_dir().join("game.txt"))
        .unwrap_or_else(|| PathBuf::from("game.txt"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Get the XDG config directory for twentyq.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twentyq").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("twentyq.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".twentyq.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.game_file.to_string_lossy().as_ref());
        self.game_file = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            game_file: overlay
                .game_file
                .clone()
                .unwrap_or_else(|| self.game_file.clone()),
            atomic_save: overlay.atomic_save.unwrap_or(self.atomic_save),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.twentyq.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/twentyq/twentyq.toml`
    /// 3. Local config: `<local_dir>/.twentyq.toml`
    /// 4. Environment variables: `TWENTYQ_GAME_FILE`, `TWENTYQ_ATOMIC_SAVE`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, None)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply TWENTYQ_* environment variables as explicit overrides.
    ///
    /// `env` replaces the process environment when given.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TWENTYQ")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("game_file") {
            settings.game_file = PathBuf::from(val);
        }
        match config.get_bool("atomic_save") {
            Ok(val) => settings.atomic_save = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# twentyq configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/twentyq/twentyq.toml
#   Local:  ./.twentyq.toml
#   Env:    TWENTYQ_* environment variables (explicit overrides)

# Game file used when no file is given on the command line
# game_file = "~/.local/share/twentyq/game.txt"

# Save through a temporary file that replaces the game file.
# Set to false to overwrite the game file in place.
# atomic_save = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
