use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when a config management flag was given.
/// These run without touching the league database.
pub fn is_config_operation(args: &Args) -> bool {
    args.new_database_path.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Returns true when any single-procedure recompute flag was given.
pub fn has_single_recompute(args: &Args) -> bool {
    args.standings.is_some()
        || args.player_stats.is_some()
        || args.goalie_stats.is_some()
        || args.game.is_some()
}

/// Hockey league standings and season statistics recalculation
///
/// Rebuilds derived league tables in a SQLite database from the game
/// reports stored there: ranked standings per round, and skater and goalie
/// statistics per season. Every run recomputes its scope from scratch
/// inside one transaction and prints the resulting table.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Create the league schema in the database if it does not exist yet.
    #[arg(long = "init-db", help_heading = "Database")]
    pub init_db: bool,

    /// Use this database file for this run instead of the configured one.
    #[arg(long = "database", value_name = "PATH", help_heading = "Database")]
    pub database: Option<String>,

    /// Recalculate the standings of one round.
    #[arg(long = "standings", value_name = "ROUND_ID", help_heading = "Recalculation")]
    pub standings: Option<i64>,

    /// Recalculate skater statistics of one season.
    #[arg(long = "player-stats", value_name = "SEASON_ID", help_heading = "Recalculation")]
    pub player_stats: Option<i64>,

    /// Recalculate goalie statistics of one season.
    #[arg(long = "goalie-stats", value_name = "SEASON_ID", help_heading = "Recalculation")]
    pub goalie_stats: Option<i64>,

    /// Recalculate everything a changed game result affects:
    /// its round's standings and both statistics of its season.
    #[arg(long = "game", value_name = "GAME_ID", help_heading = "Recalculation")]
    pub game: Option<i64>,

    /// Recalculate every round's standings and both statistics of a season.
    #[arg(long = "season", value_name = "SEASON_ID", help_heading = "Recalculation")]
    pub season: Option<i64>,

    /// Print the recalculated rows as JSON instead of text tables.
    #[arg(long = "json", help_heading = "Output")]
    pub json: bool,

    /// Update the database path in config.
    #[arg(long = "set-database", value_name = "PATH", help_heading = "Configuration")]
    pub new_database_path: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug logging and mirror log output to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug")]
    pub log_file: Option<String>,
}
