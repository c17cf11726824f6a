// Hide console window in release mode
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use keycapture::config::CaptureConfig;
use keycapture::gui::{ErrorChoice, KeyCaptureGui, show_config_error};
use keycapture::input;
use std::path::Path;

const CONFIG_PATH: &str = "KeyCapture.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load config or create default if not exists
    let config = match CaptureConfig::load_or_create(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => match show_config_error(Path::new(CONFIG_PATH), &e)? {
            ErrorChoice::UseDefaults => CaptureConfig::default(),
            ErrorChoice::Quit => return Ok(()),
        },
    };

    let input = input::platform_input();
    log::info!(
        "starting with poll interval {} ms, momentary keys {:?}",
        config.poll_interval,
        config.momentary_keys
    );

    KeyCaptureGui::run(config, input)
}
