use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Stored {entity} row is invalid: {message}")]
    InvalidData { entity: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Recalculation task failed: {0}")]
    TaskJoin(String),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an error for a stored row that cannot be mapped into the model,
    /// e.g. an unknown game status or event type.
    pub fn invalid_data(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Check if the error came from the persistence layer.
    ///
    /// Storage failures are surfaced to the triggering collaborator unmodified;
    /// it owns the decision whether to retry the whole recompute.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::InvalidData { .. })
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_invalid_data_helper() {
        let error = AppError::invalid_data("game_events", "unknown event type 'fight'");
        assert!(matches!(error, AppError::InvalidData { .. }));
        assert_eq!(
            error.to_string(),
            "Stored game_events row is invalid: unknown event type 'fight'"
        );
    }

    #[test]
    fn test_error_from_rusqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let sql_error = conn
            .execute("SELECT * FROM table_that_does_not_exist", [])
            .unwrap_err();
        let app_error: AppError = sql_error.into();
        assert!(matches!(app_error, AppError::Storage(_)));
        assert!(app_error.to_string().starts_with("Storage error:"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::Json(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let invalid_toml = "invalid = [toml";
        let toml_error = toml::from_str::<serde_json::Value>(invalid_toml).unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_is_storage_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let sql_error: AppError = conn.execute("NOT SQL", []).unwrap_err().into();

        assert!(sql_error.is_storage_failure());
        assert!(AppError::invalid_data("games", "bad status").is_storage_failure());

        assert!(!AppError::config_error("message").is_storage_failure());
        assert!(!AppError::log_setup_error("message").is_storage_failure());
        assert!(!AppError::Custom("message".to_string()).is_storage_failure());
    }

    #[test]
    fn test_error_display_formats() {
        let errors = vec![
            AppError::config_error("test config error"),
            AppError::log_setup_error("test log error"),
            AppError::invalid_data("rounds", "missing scoring rule"),
            AppError::TaskJoin("task panicked".to_string()),
            AppError::Custom("custom message".to_string()),
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(
                display_string.len() > 5,
                "Error display should be descriptive: {error:?}"
            );
        }
    }
}
