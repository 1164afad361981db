use crate::constants::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_LOG_FILE_NAME, env};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_database_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the SQLite league database. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// How long SQLite waits on a locked database before failing, in milliseconds.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            log_file_path: None,
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, defaults are used; nothing here is mandatory.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `RINK_DATABASE_PATH` - Override database path
    /// - `RINK_LOG_FILE` - Override log file path
    /// - `RINK_BUSY_TIMEOUT_MS` - Override SQLite busy timeout (default: 5000)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `RINK_*` environment overrides on top of the loaded values.
    /// Unparseable numeric overrides are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(database_path) = std::env::var(env::DATABASE_PATH) {
            self.database_path = Some(database_path);
        }

        if let Ok(log_file_path) = std::env::var(env::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env::BUSY_TIMEOUT_MS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.busy_timeout_ms = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.database_path, &self.log_file_path, self.busy_timeout_ms)
    }

    /// The database file to open: the configured path, or the platform default.
    pub fn resolved_database_path(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(get_default_database_path)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Database:");
            println!("{}", config.resolved_database_path());
            if config.database_path.is_none() {
                println!("(Default location)");
            }
            println!("────────────────────────────────────");
            println!("Busy Timeout:");
            println!("{} ms", config.busy_timeout_ms);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{DEFAULT_LOG_FILE_NAME}");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Database (default):");
            println!("{}", get_default_database_path());
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        unsafe {
            std::env::remove_var(env::DATABASE_PATH);
            std::env::remove_var(env::LOG_FILE);
            std::env::remove_var(env::BUSY_TIMEOUT_MS);
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
database_path = "/srv/league/league.db"
log_file_path = "/custom/log/path"
busy_timeout_ms = 750
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.database_path, Some("/srv/league/league.db".to_string()));
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.busy_timeout_ms, 750);
    }

    #[tokio::test]
    async fn test_config_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("empty_config.toml");
        let config_path_str = config_path.to_string_lossy();

        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            database_path: Some("/data/league.db".to_string()),
            log_file_path: Some("/custom/log/path".to_string()),
            busy_timeout_ms: 1200,
        };

        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();

        assert!(config_path.exists());
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");
        let config_path_str = config_path.to_string_lossy();

        let malformed_content = r#"
database_path = "/data/league.db"
[invalid_section
malformed = "data
"#;
        tokio::fs::write(&config_path, malformed_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path_str).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_optional_fields_skipped_when_none() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(!toml_string.contains("database_path"));
        assert!(!toml_string.contains("log_file_path"));
        assert!(toml_string.contains("busy_timeout_ms = 5000"));
    }

    #[test]
    fn test_resolved_database_path_falls_back_to_default() {
        let config = Config::default();
        let resolved = config.resolved_database_path();
        assert!(resolved.contains("rink_stats"));
        assert!(resolved.ends_with("league.db"));

        let custom = Config {
            database_path: Some("/tmp/custom.db".to_string()),
            ..Config::default()
        };
        assert_eq!(custom.resolved_database_path(), "/tmp/custom.db");
    }

    #[test]
    fn test_config_path_generation() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("rink_stats"));
        assert!(config_path.ends_with("config.toml"));

        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("rink_stats"));
        assert!(log_dir_path.ends_with("logs"));
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        clear_env();
        unsafe {
            std::env::set_var(env::DATABASE_PATH, "/env/league.db");
            std::env::set_var(env::LOG_FILE, "/env/log/path.log");
            std::env::set_var(env::BUSY_TIMEOUT_MS, "250");
        }

        let mut config = Config {
            database_path: Some("/file/league.db".to_string()),
            log_file_path: None,
            busy_timeout_ms: 5000,
        };
        config.apply_env_overrides();

        assert_eq!(config.database_path, Some("/env/league.db".to_string()));
        assert_eq!(config.log_file_path, Some("/env/log/path.log".to_string()));
        assert_eq!(config.busy_timeout_ms, 250);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_timeout_override_is_ignored() {
        clear_env();
        unsafe {
            std::env::set_var(env::BUSY_TIMEOUT_MS, "soon");
        }

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);

        clear_env();
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let invalid_configs = vec![
            Config {
                database_path: Some(String::new()),
                ..Config::default()
            },
            Config {
                log_file_path: Some(String::new()),
                ..Config::default()
            },
            Config {
                busy_timeout_ms: 0,
                ..Config::default()
            },
        ];

        for config in invalid_configs {
            assert!(
                config.validate().is_err(),
                "Config should be invalid: {config:?}"
            );
        }
    }
}
