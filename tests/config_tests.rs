//! Integration tests for configuration loading and saving.

use keycapture::config::{CaptureConfig, MAX_POLL_INTERVAL, MIN_POLL_INTERVAL};
use keycapture::i18n::Language;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Returns a unique temporary file path for test isolation.
fn get_test_file_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "keycapture_config_test_{}_{}.toml",
        name,
        std::process::id()
    ));
    path
}

/// Removes a test file if it exists.
fn cleanup_test_file(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

/// Tests configuration save and load cycle preserves data.
#[test]
fn test_config_round_trip() {
    let path = get_test_file_path("round_trip");

    let mut config = CaptureConfig::default();
    config.language = Language::TraditionalChinese;
    config.dark_mode = true;
    config.poll_interval = 40;
    config.momentary_keys = vec!["Print Screen".to_string(), "Scroll Lock".to_string()];

    config.save_to_file(&path).expect("Failed to save config");
    let loaded = CaptureConfig::load_from_file(&path).expect("Failed to load config");

    assert_eq!(loaded.language, Language::TraditionalChinese);
    assert!(loaded.dark_mode);
    assert!(!loaded.always_on_top);
    assert_eq!(loaded.poll_interval(), Duration::from_millis(40));
    assert_eq!(loaded.momentary_keys, config.momentary_keys);

    cleanup_test_file(&path);
}

/// Tests that momentary key names with quotes and control characters survive a save.
#[test]
fn test_escaped_momentary_names_round_trip() {
    let path = get_test_file_path("escaped_names");

    let mut config = CaptureConfig::default();
    config.momentary_keys = vec![
        "\u{1b}".to_string(),
        "Say \"Pause\"".to_string(),
        "back\\slash".to_string(),
        "\t".to_string(),
    ];

    config.save_to_file(&path).expect("Failed to save config");
    let loaded = CaptureConfig::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.momentary_keys, config.momentary_keys);

    cleanup_test_file(&path);
}

/// Tests that the saved file carries explanatory comments.
#[test]
fn test_saved_config_is_commented() {
    let path = get_test_file_path("commented");

    CaptureConfig::default()
        .save_to_file(&path)
        .expect("Failed to save config");
    let content = fs::read_to_string(&path).expect("Failed to read config");

    assert!(content.contains("poll_interval = 25"));
    assert!(content.contains("# Keys that only report a transient press"));

    cleanup_test_file(&path);
}

/// Tests that out-of-range poll intervals are clamped on load.
#[test]
fn test_poll_interval_is_clamped() {
    let path = get_test_file_path("clamp");

    fs::write(&path, "poll_interval = 1\n").expect("Failed to write config");
    let loaded = CaptureConfig::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.poll_interval, MIN_POLL_INTERVAL);

    fs::write(&path, "poll_interval = 10000\n").expect("Failed to write config");
    let loaded = CaptureConfig::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.poll_interval, MAX_POLL_INTERVAL);

    cleanup_test_file(&path);
}

/// Tests that a missing file is created with defaults.
#[test]
fn test_load_or_create_writes_default() {
    let path = get_test_file_path("load_or_create");
    cleanup_test_file(&path);

    let config = CaptureConfig::load_or_create(&path).expect("Failed to create config");
    assert!(path.exists());
    assert_eq!(config.momentary_keys, vec!["Print Screen", "Pause"]);

    let reloaded = CaptureConfig::load_or_create(&path).expect("Failed to reload config");
    assert_eq!(reloaded.poll_interval, config.poll_interval);

    cleanup_test_file(&path);
}

/// Tests that malformed files are reported as errors.
#[test]
fn test_invalid_config_is_rejected() {
    let path = get_test_file_path("invalid");

    fs::write(&path, "poll_interval = \"fast\"\n").expect("Failed to write config");
    assert!(CaptureConfig::load_from_file(&path).is_err());

    fs::write(&path, "language = \"Klingon\"\n").expect("Failed to write config");
    assert!(CaptureConfig::load_from_file(&path).is_err());

    cleanup_test_file(&path);
}
