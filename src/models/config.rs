//! Configuration model.

use crate::core::adapter::Orientation;
use crate::core::controller::RefreshPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Display configuration.
    pub display: DisplayConfig,
    /// Saved screen state file.
    pub state_file: PathBuf,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key or Bearer token.
    pub api_key: Option<String>,
    /// API base URL.
    pub api_base: String,
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Orientation used to pick poster row images.
    pub orientation: Orientation,
    /// What a refresh does with rows already on screen.
    pub refresh_policy: RefreshPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            display: DisplayConfig::default(),
            state_file: data_dir_path().join("state.json"),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: crate::services::tmdb::TMDB_BASE_URL.to_string(),
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flickster")
}

/// Get the data directory path.
fn data_dir_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flickster")
}

/// Load configuration from the default location.
///
/// `TMDB_API_KEY` takes precedence over a key in the file.
pub fn load_config() -> Config {
    let mut config = load_config_from(&dirs_config_path().join("config.toml"));
    if let Ok(key) = std::env::var("TMDB_API_KEY") {
        if !key.is_empty() {
            config.tmdb.api_key = Some(key);
        }
    }
    config
}

/// Load configuration from a file, falling back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }
    }

    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.display.refresh_policy, RefreshPolicy::Append);
        assert_eq!(config.display.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tmdb]\napi_key = \"abc\"\n\n[display]\nrefresh_policy = \"replace\"\n",
        )
        .unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.display.refresh_policy, RefreshPolicy::Replace);
        assert_eq!(config.display.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "tmdb = [not toml").unwrap();

        let config = load_config_from(&path);
        assert!(config.tmdb.api_key.is_none());
    }
}
