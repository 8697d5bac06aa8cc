//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use vrig::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_loads() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.simulation.scene_path, "scenes/vr_rig.ron");
    assert_eq!(config.locomotion.holder, "vrHolder");
}

#[test]
#[serial]
fn test_env_override_number() {
    std::env::set_var("VRIG_LOCOMOTION__SPEED", "2.5");
    let config = AppConfig::load();
    std::env::remove_var("VRIG_LOCOMOTION__SPEED");
    assert_eq!(config.unwrap().locomotion.speed, 2.5);
}

#[test]
#[serial]
fn test_env_override_name() {
    std::env::set_var("VRIG_LOCOMOTION__HMD", "head");
    let config = AppConfig::load();
    std::env::remove_var("VRIG_LOCOMOTION__HMD");
    let settings = config.unwrap().locomotion.to_locomotion_settings();
    assert_eq!(settings.names.hmd, "head");
    assert_eq!(settings.names.holder, "vrHolder");
}

#[test]
#[serial]
fn test_env_bad_value_is_error() {
    std::env::set_var("VRIG_SIMULATION__FRAMES", "many");
    let result = AppConfig::load();
    std::env::remove_var("VRIG_SIMULATION__FRAMES");
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
