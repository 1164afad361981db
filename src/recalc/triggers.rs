//! Entry points for the mutations that invalidate derived tables.
//!
//! Each helper resolves which round and season a change touches and runs the
//! procedures for exactly that scope. They are meant to be called after the
//! triggering write has been made, ideally in the same transaction.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{recalculate_goalie_stats, recalculate_player_stats, recalculate_standings};
use crate::error::AppError;
use crate::models::{GameId, RoundId, SeasonId};
use crate::store::LeagueStore;

/// Scopes that were recomputed by a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecalcSummary {
    pub standings_rounds: Vec<RoundId>,
    pub player_stats_seasons: Vec<SeasonId>,
    pub goalie_stats_seasons: Vec<SeasonId>,
}

impl RecalcSummary {
    pub fn is_empty(&self) -> bool {
        self.standings_rounds.is_empty()
            && self.player_stats_seasons.is_empty()
            && self.goalie_stats_seasons.is_empty()
    }

    fn season_stats<S: LeagueStore + ?Sized>(
        &mut self,
        store: &mut S,
        season_id: SeasonId,
    ) -> Result<(), AppError> {
        recalculate_player_stats(store, season_id)?;
        self.player_stats_seasons.push(season_id);
        recalculate_goalie_stats(store, season_id)?;
        self.goalie_stats_seasons.push(season_id);
        Ok(())
    }
}

impl fmt::Display for RecalcSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing recalculated");
        }
        write!(
            f,
            "standings rounds {:?}, player stats seasons {:?}, goalie stats seasons {:?}",
            self.standings_rounds, self.player_stats_seasons, self.goalie_stats_seasons
        )
    }
}

/// A game's status or score changed: its round's standings and both season
/// aggregates of its season are rebuilt. Unknown games are ignored.
#[instrument(skip(store))]
pub fn on_game_result_changed<S: LeagueStore + ?Sized>(
    store: &mut S,
    game_id: GameId,
) -> Result<RecalcSummary, AppError> {
    let mut summary = RecalcSummary::default();
    let Some(scope) = store.get_game_scope(game_id)? else {
        debug!("Game {game_id} does not exist, nothing to recalculate");
        return Ok(summary);
    };

    recalculate_standings(store, scope.round_id)?;
    summary.standings_rounds.push(scope.round_id);
    summary.season_stats(store, scope.season_id)?;

    info!("Game {game_id} result change: {summary}");
    Ok(summary)
}

/// Bonus points of a round were added, edited or removed.
#[instrument(skip(store))]
pub fn on_bonus_points_changed<S: LeagueStore + ?Sized>(
    store: &mut S,
    round_id: RoundId,
) -> Result<RecalcSummary, AppError> {
    let mut summary = RecalcSummary::default();
    if store.get_round(round_id)?.is_none() {
        debug!("Round {round_id} does not exist, nothing to recalculate");
        return Ok(summary);
    }

    recalculate_standings(store, round_id)?;
    summary.standings_rounds.push(round_id);

    info!("Round {round_id} bonus change: {summary}");
    Ok(summary)
}

/// A round's scoring rule or eligibility flags changed. The flags decide
/// which games feed the season aggregates, so those are rebuilt as well.
#[instrument(skip(store))]
pub fn on_round_rules_changed<S: LeagueStore + ?Sized>(
    store: &mut S,
    round_id: RoundId,
) -> Result<RecalcSummary, AppError> {
    let mut summary = RecalcSummary::default();
    let Some(round) = store.get_round(round_id)? else {
        debug!("Round {round_id} does not exist, nothing to recalculate");
        return Ok(summary);
    };

    recalculate_standings(store, round_id)?;
    summary.standings_rounds.push(round_id);
    summary.season_stats(store, round.season_id)?;

    info!("Round {round_id} rule change: {summary}");
    Ok(summary)
}

/// Rebuilds every derived table of a season: standings of each round, then
/// skater and goalie statistics.
#[instrument(skip(store))]
pub fn recalculate_season<S: LeagueStore + ?Sized>(
    store: &mut S,
    season_id: SeasonId,
) -> Result<RecalcSummary, AppError> {
    let mut summary = RecalcSummary::default();

    for round_id in store.list_round_ids(season_id)? {
        recalculate_standings(store, round_id)?;
        summary.standings_rounds.push(round_id);
    }
    summary.season_stats(store, season_id)?;

    info!("Season {season_id} full recalculation: {summary}");
    Ok(summary)
}
