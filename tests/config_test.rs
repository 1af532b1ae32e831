//! Integration tests for Settings config loading with layered precedence.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use twentyq::application::ApplicationError;
use twentyq::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(settings.atomic_save);
    assert!(settings.game_file.ends_with("game.txt"));
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
game_file = "/srv/games/animals.txt"
atomic_save = false
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.game_file, PathBuf::from("/srv/games/animals.txt"));
    assert!(!settings.atomic_save);
}

#[test]
fn given_partial_local_config_when_load_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "atomic_save = false\n").unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.atomic_save);
    assert_eq!(settings.game_file, Settings::default().game_file);
}

#[test]
fn given_tilde_in_local_config_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "game_file = \"~/animals.txt\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.game_file, PathBuf::from(home).join("animals.txt"));
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "atomic_save = [not toml\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_when_written_as_local_config_then_loads() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(settings.atomic_save);
}
