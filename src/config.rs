//! User configuration: transition timing, heavy modes, automated mode.
//!
//! Stored as JSON. When no path is given the platform config directory is
//! used, e.g. `~/.config/ui-orchestrator/config.json` on Linux.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{Mode, TransitionSet, TransitionTiming, DEFAULT_TRANSITION_MODES};

/// Config filename within the config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Effective configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Length of each overlay fade, in milliseconds.
    pub fade_ms: u64,
    /// Pause at full opacity before screens swap, in milliseconds.
    pub settle_ms: u64,
    /// Modes whose entry or exit is faded.
    pub transition_modes: Vec<Mode>,
    /// Skip every transition animation.
    pub automated: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            fade_ms: 250,
            settle_ms: 100,
            transition_modes: DEFAULT_TRANSITION_MODES.to_vec(),
            automated: false,
        }
    }
}

impl UiConfig {
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            fade: Duration::from_millis(self.fade_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }

    pub fn transition_set(&self) -> TransitionSet {
        TransitionSet::from_modes(self.transition_modes.iter().copied())
    }

    /// Pretty JSON, as written to disk.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Returns the default config file location.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("ui-orchestrator").join(CONFIG_FILENAME))
        .ok_or(ConfigError::NoDirFound)
}

/// Load config from an explicit file. The file must exist.
pub fn load_config(path: &Path) -> Result<UiConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&contents).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load config from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<UiConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = match default_config_path() {
        Ok(p) => p,
        Err(_) => return Ok(UiConfig::default()),
    };
    if !default_path.exists() {
        debug!(path = %default_path.display(), "No config file, using defaults");
        return Ok(UiConfig::default());
    }
    load_config(&default_path)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_match_stock_timing() {
        let config = UiConfig::default();
        assert_eq!(config.timing(), TransitionTiming::default());
        assert_eq!(config.transition_set(), TransitionSet::default());
        assert!(!config.automated);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), r#"{ "fade_ms": 400, "automated": true }"#);

        let config = load_config(&path).unwrap();
        assert_eq!(config.fade_ms, 400);
        assert_eq!(config.settle_ms, 100);
        assert!(config.automated);
        assert_eq!(config.transition_modes, DEFAULT_TRANSITION_MODES.to_vec());
    }

    #[test]
    fn transition_modes_use_snake_case_names() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"{ "transition_modes": ["modifier_select", "summary"] }"#,
        );

        let set = load_config(&path).unwrap().transition_set();
        assert!(set.contains(Mode::ModifierSelect));
        assert!(set.contains(Mode::Summary));
        assert!(!set.contains(Mode::Party));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), r#"{ "transition_modes": ["inventory"] }"#);

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let err = load_or_default(Some(temp.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn to_json_round_trips() {
        let config = UiConfig {
            settle_ms: 0,
            ..UiConfig::default()
        };
        let parsed: UiConfig = serde_json::from_str(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn default_config_path_is_reasonable() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("ui-orchestrator/config.json"));
        }
    }
}
