//! Viewer Configuration Tests
//!
//! Tests for:
//! - Defaults matching the stock viewer setup
//! - Partial JSON overrides
//! - Loading from disk and parse errors

use std::time::Duration;

use glam::Vec3;
use myth_avatar::config::{PlacementConfig, ViewerConfig};
use myth_avatar::errors::Error;

#[test]
fn defaults_match_stock_viewer() {
    let config = ViewerConfig::default();

    assert_eq!(config.tick_interval(), Duration::from_secs(1));
    assert_eq!(config.camera.position, [0.0, 1.5, 3.0]);
    assert!((config.camera.fov - 50.0).abs() < f32::EPSILON);
    assert!((config.camera.near - 0.1).abs() < f32::EPSILON);
    assert!((config.camera.far - 1000.0).abs() < f32::EPSILON);

    assert!((config.lights.ambient - 0.8).abs() < f32::EPSILON);
    assert_eq!(config.lights.directional.position, [5.0, 5.0, 5.0]);
    assert!(config.lights.directional.cast_shadows);
    assert_eq!(config.lights.point.position, [-5.0, 5.0, -5.0]);
}

#[test]
fn default_root_position() {
    let placement = PlacementConfig::default();
    assert_eq!(placement.root_position(), Vec3::new(0.0, -1.5, 0.2));
    assert!((placement.model_scale - 1.5).abs() < f32::EPSILON);
}

#[test]
fn taller_avatar_sits_lower() {
    let short = PlacementConfig {
        avatar_height: 4.0,
        ..PlacementConfig::default()
    };
    let tall = PlacementConfig {
        avatar_height: 10.0,
        ..PlacementConfig::default()
    };
    assert!(tall.root_position().y < short.root_position().y);
    assert!((tall.root_position().y + 2.5).abs() < 1e-6);
}

#[test]
fn partial_json_overrides() {
    let json = r#"{
        "model_path": "assets/avatar.glb",
        "tick_interval_ms": 250,
        "placement": { "avatar_height": 7.0 }
    }"#;
    let config = ViewerConfig::from_json_str(json).unwrap();

    assert_eq!(config.model_path.to_str(), Some("assets/avatar.glb"));
    assert_eq!(config.tick_interval(), Duration::from_millis(250));
    assert!((config.placement.avatar_height - 7.0).abs() < f32::EPSILON);
    // Untouched siblings keep their defaults
    assert!((config.placement.offset_z - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.width, 1280);
}

#[test]
fn zero_tick_interval_is_clamped() {
    let config = ViewerConfig::from_json_str(r#"{ "tick_interval_ms": 0 }"#).unwrap();
    assert_eq!(config.tick_interval(), Duration::from_millis(1));

    let viewer = myth_avatar::AvatarViewer::from_config(&config);
    assert_eq!(viewer.motion().period(), Duration::from_millis(1));
}

#[test]
fn empty_json_is_default() {
    let config = ViewerConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn malformed_json_is_error() {
    let result = ViewerConfig::from_json_str("{ \"width\": ");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("myth_avatar_{}_viewer.json", std::process::id()));
    std::fs::write(&path, r#"{ "title": "Idle" }"#).unwrap();

    let config = ViewerConfig::load(&path).unwrap();
    assert_eq!(config.title, "Idle");

    let _ = std::fs::remove_file(path);
}

#[test]
fn load_missing_file_is_io_error() {
    let result = ViewerConfig::load("/nonexistent/viewer.json");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn config_roundtrips_through_json() {
    let mut config = ViewerConfig::default();
    config.orbit.enable_damping = false;
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(ViewerConfig::from_json_str(&text).unwrap(), config);
}
