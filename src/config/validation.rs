use crate::constants::MAX_BUSY_TIMEOUT_MS;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - If a database path is provided, it cannot be empty
/// - Busy timeout must be between 1 ms and `MAX_BUSY_TIMEOUT_MS`
/// - If a log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    database_path: &Option<String>,
    log_file_path: &Option<String>,
    busy_timeout_ms: u64,
) -> Result<(), AppError> {
    if let Some(db_path) = database_path
        && db_path.trim().is_empty()
    {
        return Err(AppError::config_error("Database path cannot be empty"));
    }

    if busy_timeout_ms == 0 || busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(AppError::config_error(format!(
            "Busy timeout must be between 1 and {MAX_BUSY_TIMEOUT_MS} ms, got {busy_timeout_ms}"
        )));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Try to create the directory to validate the path
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
