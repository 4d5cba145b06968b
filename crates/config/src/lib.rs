pub mod schema;
pub mod watcher;

pub use schema::{WidgetConfig, DEFAULT_HEIGHT, DEFAULT_OPACITY, DEFAULT_WIDTH};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use usage_core::{store, Result, UsageError};

/// Load configuration from a JSON file.  Returns `WidgetConfig::default()`
/// (field by field) for anything missing or malformed so the widget always
/// has sensible values.
pub fn load(path: impl AsRef<Path>) -> WidgetConfig {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return WidgetConfig::default();
    }

    store::load_or_default::<WidgetConfig>(path).sanitized()
}

/// Write every field of `config` to `path`, replacing the previous content.
pub fn save(path: impl AsRef<Path>, config: &WidgetConfig) -> Result<()> {
    let path = path.as_ref();
    store::save(path, config)
        .map_err(|e| UsageError::Config(format!("cannot write '{}': {e}", path.display())))
}

/// Return the default config path, `~/.claude_usage/config.json`.
pub fn default_path() -> PathBuf {
    usage_core::paths::app_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use usage_core::ResetDay;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path().join("config.json"));
        assert_eq!(config.reset_day, ResetDay::Monday);
        assert_eq!(config.opacity, 0.85);
        assert_eq!(config.width, 230);
        assert_eq!(config.height, 52);
        assert_eq!(config.position(), None);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "reset_day = Monday").unwrap();
        assert_eq!(load(&path), WidgetConfig::default());
    }

    #[test]
    fn partial_file_fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"reset_day": "Friday", "width": 300}"#).unwrap();

        let config = load(&path);
        assert_eq!(config.reset_day, ResetDay::Friday);
        assert_eq!(config.width, 300);
        assert_eq!(config.opacity, 0.85);
        assert_eq!(config.height, 52);
    }

    #[test]
    fn invalid_fields_fall_back_individually() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"reset_day": "Caturday", "opacity": 3.5, "width": -10, "height": 40}"#,
        )
        .unwrap();

        let config = load(&path);
        assert_eq!(config.reset_day, ResetDay::Monday);
        assert_eq!(config.opacity, 0.85);
        assert_eq!(config.width, 230);
        assert_eq!(config.height, 40);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = WidgetConfig {
            reset_day:  ResetDay::Thursday,
            opacity:    0.6,
            width:      260,
            height:     48,
            position_x: Some(1200),
            position_y: Some(-15),
        };

        save(&path, &config).unwrap();
        assert_eq!(load(&path), config);
    }

    #[test]
    fn saved_file_uses_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        save(&path, &WidgetConfig::default()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["reset_day"], "Monday");
        assert_eq!(raw["width"], 230);
        assert_eq!(raw["height"], 52);
        assert!((raw["opacity"].as_f64().unwrap() - 0.85).abs() < 1e-6);
    }

    #[test]
    fn position_ignored_when_comparing_for_reload() {
        let a = WidgetConfig::default();
        let b = WidgetConfig { position_x: Some(5), position_y: Some(5), ..a.clone() };
        assert!(!a.differs_ignoring_position(&b));

        let c = WidgetConfig { opacity: 0.5, ..a.clone() };
        assert!(a.differs_ignoring_position(&c));
    }
}
