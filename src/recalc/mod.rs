//! Full-recompute procedures for derived league tables.
//!
//! Every procedure follows the same shape: read source facts through a
//! [`LeagueStore`], aggregate in memory, then replace the derived rows of
//! the scope in one call. Nothing is patched incrementally, so running a
//! procedure twice on unchanged data yields the same rows.
//!
//! The procedures do not open transactions themselves. Callers that share a
//! database with other writers run them inside
//! [`with_transaction`](crate::store::with_transaction).

pub mod goalie_stats;
pub mod player_stats;
pub mod standings;
pub mod triggers;

pub use goalie_stats::{aggregate_goalie_stats, goals_against_average, recalculate_goalie_stats};
pub use player_stats::{aggregate_player_stats, recalculate_player_stats};
pub use standings::{compare_standings, compute_standings, recalculate_standings};
pub use triggers::{
    RecalcSummary, on_bonus_points_changed, on_game_result_changed, on_round_rules_changed,
    recalculate_season,
};

use crate::error::AppError;
use crate::models::{GameId, SeasonId, StatsEligibility};
use crate::store::LeagueStore;
use tracing::debug;

/// Completed games of every round of `season_id` that counts for
/// `eligibility`. Empty when the season has no such round.
pub(crate) fn eligible_completed_game_ids<S: LeagueStore + ?Sized>(
    store: &S,
    season_id: SeasonId,
    eligibility: StatsEligibility,
) -> Result<Vec<GameId>, AppError> {
    let round_ids = store.list_eligible_round_ids(season_id, eligibility)?;
    if round_ids.is_empty() {
        debug!("Season {season_id} has no rounds eligible for {eligibility:?}");
        return Ok(Vec::new());
    }

    let game_ids: Vec<GameId> = store
        .list_completed_games(&round_ids)?
        .into_iter()
        .map(|game| game.id)
        .collect();
    debug!(
        "Season {season_id}: {} eligible rounds, {} completed games for {eligibility:?}",
        round_ids.len(),
        game_ids.len()
    );
    Ok(game_ids)
}
