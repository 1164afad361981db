//! Hockey League Standings & Season Statistics Library
//!
//! This library rebuilds the derived tables of a hockey league from its
//! source facts: ranked standings per round, and skater and goalie season
//! statistics. Every rebuild is a full recompute of its scope.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use rink_stats::error::AppError;
//! use rink_stats::recalc::on_game_result_changed;
//! use rink_stats::store::{LeagueStore, open_database, with_transaction};
//!
//! fn main() -> Result<(), AppError> {
//!     let mut conn = open_database(Path::new("league.db"), Duration::from_secs(5))?;
//!
//!     // Game 42 was just finalized
//!     let standings = with_transaction(&mut conn, |store| {
//!         let summary = on_game_result_changed(store, 42)?;
//!         match summary.standings_rounds.first() {
//!             Some(&round_id) => store.standings(round_id),
//!             None => Ok(Vec::new()),
//!         }
//!     })?;
//!
//!     for row in standings {
//!         println!("{}. team {} - {} pts", row.rank, row.team_id, row.total_points);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod recalc;
pub mod report;
pub mod store;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use recalc::{
    RecalcSummary, recalculate_goalie_stats, recalculate_player_stats, recalculate_season,
    recalculate_standings,
};
pub use store::{LeagueStore, MemoryStore, SqliteStore};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
