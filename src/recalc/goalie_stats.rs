use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use super::eligible_completed_game_ids;
use crate::constants::ZERO_GAA;
use crate::error::AppError;
use crate::models::{GoalieGameStat, GoalieSeasonStat, PlayerId, SeasonId, StatsEligibility, TeamId};
use crate::store::LeagueStore;

/// Goals-against average with exactly two decimals, "0.00" for no games.
/// Halfway values round up (1 in 8 games is "0.13").
pub fn goals_against_average(goals_against: i32, games_played: i32) -> String {
    if games_played <= 0 {
        return ZERO_GAA.to_string();
    }
    let goals_against = i64::from(goals_against.max(0));
    let games_played = i64::from(games_played);
    let hundredths = (goals_against * 200 + games_played) / (2 * games_played);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// One row per (goalie, team): games are counted per game line, goals
/// against are summed.
pub fn aggregate_goalie_stats(
    season_id: SeasonId,
    game_stats: &[GoalieGameStat],
) -> Vec<GoalieSeasonStat> {
    let mut tallies: BTreeMap<(PlayerId, TeamId), (i32, i32)> = BTreeMap::new();
    for stat in game_stats {
        let (games, goals_against) = tallies.entry((stat.player_id, stat.team_id)).or_default();
        *games += 1;
        *goals_against += stat.goals_against;
    }

    tallies
        .into_iter()
        .map(|((player_id, team_id), (games_played, goals_against))| GoalieSeasonStat {
            season_id,
            player_id,
            team_id,
            games_played,
            goals_against,
            gaa: goals_against_average(goals_against, games_played),
        })
        .collect()
}

/// Rebuilds goalie statistics of one season from the per-game goalie lines
/// of completed games in rounds flagged `counts_for_goalie_stats`.
#[instrument(skip(store))]
pub fn recalculate_goalie_stats<S: LeagueStore + ?Sized>(
    store: &mut S,
    season_id: SeasonId,
) -> Result<(), AppError> {
    let game_ids = eligible_completed_game_ids(store, season_id, StatsEligibility::GoalieStats)?;
    if game_ids.is_empty() {
        store.replace_goalie_season_stats(season_id, &[])?;
        info!("Cleared goalie stats for season {season_id}: no eligible games");
        return Ok(());
    }

    let game_stats = store.list_goalie_game_stats(&game_ids)?;
    debug!("Season {season_id}: {} goalie game lines", game_stats.len());

    let rows = aggregate_goalie_stats(season_id, &game_stats);
    store.replace_goalie_season_stats(season_id, &rows)?;

    info!(
        "Recalculated goalie stats for season {season_id}: {} rows",
        rows.len()
    );
    Ok(())
}
