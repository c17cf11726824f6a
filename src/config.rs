use crate::i18n::Language;
use crate::momentary::DEFAULT_MOMENTARY_KEYS;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Bounds applied to `poll_interval` on load.
pub const MIN_POLL_INTERVAL: u64 = 10;
pub const MAX_POLL_INTERVAL: u64 = 250;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    #[serde(default = "default_momentary_keys")]
    pub momentary_keys: Vec<String>,
}

fn default_poll_interval() -> u64 {
    25
}
fn default_momentary_keys() -> Vec<String> {
    DEFAULT_MOMENTARY_KEYS.iter().map(|s| s.to_string()).collect()
}

impl CaptureConfig {
    /// Create a default configuration
    pub fn default() -> Self {
        Self {
            language: Language::English,
            dark_mode: false,
            always_on_top: false,
            poll_interval: default_poll_interval(),
            momentary_keys: default_momentary_keys(),
        }
    }

    /// Load config from file, or create default if not exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if !path.as_ref().exists() {
            log::info!("writing default configuration to {}", path.as_ref().display());
            let default_config = Self::default();
            default_config.save_to_file(&path)?;
            return Ok(default_config);
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: CaptureConfig = toml::from_str(&content)?;

        // Validate configuration
        let clamped = config
            .poll_interval
            .clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL);
        if clamped != config.poll_interval {
            log::warn!(
                "poll_interval {} out of range, using {}",
                config.poll_interval,
                clamped
            );
            config.poll_interval = clamped;
        }

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        // Names are written as TOML strings; Debug escapes are not valid TOML.
        let momentary_keys = toml::Value::Array(
            self.momentary_keys
                .iter()
                .map(|name| toml::Value::String(name.clone()))
                .collect(),
        );

        // Add comments to make the config file more readable
        let content = format!(
            "language = \"{:?}\"        # English, SimplifiedChinese, TraditionalChinese, Japanese\n\
             dark_mode = {}               # Use dark theme (false = light theme, true = dark theme)\n\
             always_on_top = {}           # Keep window always on top of other windows\n\
             poll_interval = {}           # Input polling interval while capturing (ms, {}-{})\n\n\
             # Keys that only report a transient press and must be held for one poll\n\
             momentary_keys = {}\n",
            self.language,
            self.dark_mode,
            self.always_on_top,
            self.poll_interval,
            MIN_POLL_INTERVAL,
            MAX_POLL_INTERVAL,
            momentary_keys,
        );

        fs::write(path, content)?;
        Ok(())
    }

    /// Polling interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CaptureConfig::default();
        assert_eq!(config.language, Language::English);
        assert!(!config.dark_mode);
        assert_eq!(config.poll_interval(), crate::capture::POLL_INTERVAL);
        assert_eq!(config.momentary_keys, vec!["Print Screen", "Pause"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CaptureConfig = toml::from_str("dark_mode = true\n").unwrap();
        assert!(config.dark_mode);
        assert_eq!(config.poll_interval, 25);
        assert_eq!(config.momentary_keys.len(), 2);
    }

    #[test]
    fn test_language_parses_from_variant_name() {
        let config: CaptureConfig = toml::from_str("language = \"Japanese\"\n").unwrap();
        assert_eq!(config.language, Language::Japanese);
    }
}
