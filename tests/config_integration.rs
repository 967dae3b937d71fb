//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use cubefield::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("CF_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("CF_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_numeric() {
    std::env::set_var("CF_SCENE__SPACING", "7.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.spacing, 7.5);
    std::env::remove_var("CF_SCENE__SPACING");
}

#[test]
#[serial]
fn test_file_config_loading() {
    // Remove env vars to test file-based config
    std::env::remove_var("CF_WINDOW__TITLE");

    let config = AppConfig::load().unwrap();
    // Values come from config/default.toml
    assert!(!config.window.title.is_empty());
    assert!(config.camera.far > config.camera.near);
    assert!(config.scene.rows > 0);
}
