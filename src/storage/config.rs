//! Application configuration and user preferences.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// Weight unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms (default)
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}

/// User preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Theme preference
    pub theme: Theme,
    /// Weight unit preference
    pub weight_unit: WeightUnit,
    /// Last workout opened, restored on next launch
    pub last_visited_workout_id: Option<String>,
}

/// Backup subsystem settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    /// Whether automatic backups are enabled
    pub enabled: bool,
    /// Override for the backup root; defaults to the platform documents directory
    pub directory: Option<PathBuf>,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
        }
    }
}

impl BackupSettings {
    /// Resolve the effective backup root directory.
    ///
    /// `None` means the capability is absent: backups disabled in config,
    /// or no documents directory on this platform.
    pub fn resolve_root(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }

        self.directory.clone().or_else(|| {
            directories::UserDirs::new()
                .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        })
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Backup settings
    pub backup: BackupSettings,
    /// User preferences
    pub preferences: UserPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            backup: BackupSettings::default(),
            preferences: UserPreferences::default(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "replog", "RepLog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_backups_with_no_override_directory() {
        let config = AppConfig::default();
        assert!(config.backup.enabled);
        assert!(config.backup.directory.is_none());
        assert_eq!(config.preferences.theme, Theme::Dark);
        assert_eq!(config.preferences.weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn disabled_backups_resolve_to_no_root() {
        let settings = BackupSettings {
            enabled: false,
            directory: Some(PathBuf::from("/somewhere")),
        };
        assert!(settings.resolve_root().is_none());
    }

    #[test]
    fn configured_directory_overrides_the_platform_default() {
        let settings = BackupSettings {
            enabled: true,
            directory: Some(PathBuf::from("/somewhere")),
        };
        assert_eq!(settings.resolve_root(), Some(PathBuf::from("/somewhere")));
    }

    #[test]
    fn partial_config_file_fills_in_defaults() {
        let config: AppConfig = toml::from_str("[preferences]\ntheme = \"light\"").unwrap();
        assert_eq!(config.preferences.theme, Theme::Light);
        assert!(config.backup.enabled);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.preferences.weight_unit = WeightUnit::Lbs;
        config.preferences.last_visited_workout_id = Some("w1".to_string());

        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: AppConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.preferences.weight_unit, WeightUnit::Lbs);
        assert_eq!(
            decoded.preferences.last_visited_workout_id.as_deref(),
            Some("w1")
        );
    }
}
