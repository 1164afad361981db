//! Data access boundary of the recalculation engine.
//!
//! The engine never talks to a database directly. It reads source facts and
//! replaces derived rows through [`LeagueStore`], which has two
//! implementations: [`SqliteStore`] for real league databases and
//! [`MemoryStore`] for tests and dry runs.

pub mod memory;
pub mod schema;
pub mod sqlite;

use crate::error::AppError;
use crate::models::{
    BonusTotal, Game, GameEvent, GameId, GameScope, GoalieGameStat, GoalieSeasonStat,
    LineupEntry, PlayerSeasonStat, Round, RoundId, SeasonId, StandingsRow, StatsEligibility,
    TeamRank,
};

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, open_database, with_transaction};

/// Reads and writes used by the recompute procedures.
///
/// Reads never modify anything. The `replace_*` writes delete every derived
/// row of the given scope and insert the new set; callers that need the pair
/// to be atomic run the whole recompute inside one transaction
/// (see [`with_transaction`]).
pub trait LeagueStore {
    /// Round with its scoring rule, eligibility flags and owning season.
    fn get_round(&self, round_id: RoundId) -> Result<Option<Round>, AppError>;

    /// Round and season a game belongs to.
    fn get_game_scope(&self, game_id: GameId) -> Result<Option<GameScope>, AppError>;

    /// Every round of a season, in id order.
    fn list_round_ids(&self, season_id: SeasonId) -> Result<Vec<RoundId>, AppError>;

    /// Rounds of a season whose flag for `eligibility` is set.
    fn list_eligible_round_ids(
        &self,
        season_id: SeasonId,
        eligibility: StatsEligibility,
    ) -> Result<Vec<RoundId>, AppError>;

    /// Games with status `completed` in any of the given rounds.
    fn list_completed_games(&self, round_ids: &[RoundId]) -> Result<Vec<Game>, AppError>;

    /// Goal events of the given games.
    fn list_goal_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError>;

    /// Penalty events of the given games.
    fn list_penalty_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError>;

    fn list_lineup_entries(&self, game_ids: &[GameId]) -> Result<Vec<LineupEntry>, AppError>;

    fn list_goalie_game_stats(&self, game_ids: &[GameId])
    -> Result<Vec<GoalieGameStat>, AppError>;

    /// Bonus points of a round summed per team.
    fn sum_bonus_points(&self, round_id: RoundId) -> Result<Vec<BonusTotal>, AppError>;

    /// Ranks currently stored for a round, read before they are replaced.
    fn list_existing_standings_ranks(&self, round_id: RoundId)
    -> Result<Vec<TeamRank>, AppError>;

    fn replace_standings(&mut self, round_id: RoundId, rows: &[StandingsRow])
    -> Result<(), AppError>;

    fn replace_player_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[PlayerSeasonStat],
    ) -> Result<(), AppError>;

    fn replace_goalie_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[GoalieSeasonStat],
    ) -> Result<(), AppError>;

    /// Stored standings of a round ordered by rank.
    fn standings(&self, round_id: RoundId) -> Result<Vec<StandingsRow>, AppError>;

    /// Stored skater stats of a season ordered by points, then goals.
    fn player_season_stats(&self, season_id: SeasonId)
    -> Result<Vec<PlayerSeasonStat>, AppError>;

    /// Stored goalie stats of a season ordered by player and team.
    fn goalie_season_stats(&self, season_id: SeasonId)
    -> Result<Vec<GoalieSeasonStat>, AppError>;
}
