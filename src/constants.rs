//! Application-wide constants and configuration values
//!
//! This module centralizes the defaults and fixed formats used by the
//! recalculation engine, the storage backend and the binary.

/// Application directory name under the platform config/data directories
pub const APP_DIR_NAME: &str = "rink_stats";

/// Default log file name when no custom path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "rink_stats.log";

/// Default SQLite database file name under the platform data directory
pub const DEFAULT_DATABASE_FILE_NAME: &str = "league.db";

/// Default SQLite busy timeout in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Upper bound accepted for the busy timeout (2 minutes)
pub const MAX_BUSY_TIMEOUT_MS: u64 = 120_000;

/// Goals-against average shown for a goalie without counted games
pub const ZERO_GAA: &str = "0.00";

/// Environment variables that override config file values
pub mod env {
    pub const DATABASE_PATH: &str = "RINK_DATABASE_PATH";
    pub const LOG_FILE: &str = "RINK_LOG_FILE";
    pub const BUSY_TIMEOUT_MS: &str = "RINK_BUSY_TIMEOUT_MS";
}

/// Text report layout
pub mod report {
    /// Width of the team/player name column
    pub const NAME_COLUMN_WIDTH: usize = 22;

    /// Horizontal rule under report headers
    pub const RULE: &str = "────────────────────────────────────────────────────────────────";
}
