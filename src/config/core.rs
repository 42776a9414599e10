use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{RenderConfig, WindowConfig};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Reads TOML config from `path`. A missing file is not an error for a
    /// tutorial binary; it falls back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(config.window.vsync);
        assert_eq!(config.render.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_parse_full() {
        let text = r#"
[window]
title = "demo"
width = 1280
height = 720
vsync = false

[render]
clear_color = [0.0, 0.0, 0.0, 1.0]
"#;
        let config: AppConfig = toml::from_str(text).unwrap();
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.window.width, 1280);
        assert!(!config.window.vsync);
        assert_eq!(config.render.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config: AppConfig = toml::from_str("[window]\ntitle = \"demo\"\n").unwrap();
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.render.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "window = 3").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
