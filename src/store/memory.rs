use super::LeagueStore;
use crate::error::AppError;
use crate::models::{
    BonusPoints, BonusTotal, Game, GameEvent, GameId, GameScope, GoalieGameStat,
    GoalieSeasonStat, LineupEntry, PlayerSeasonStat, Round, RoundId, SeasonId, StandingsRow,
    StatsEligibility, TeamRank,
};
use std::collections::HashSet;

/// In-memory league data.
///
/// Source facts are plain public vectors so fixtures can be built directly.
/// Query results come back in insertion order, which keeps recomputes
/// deterministic for a fixed fixture.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub rounds: Vec<Round>,
    pub games: Vec<Game>,
    pub events: Vec<GameEvent>,
    pub lineups: Vec<LineupEntry>,
    pub goalie_game_stats: Vec<GoalieGameStat>,
    pub bonus_points: Vec<BonusPoints>,
    pub standings: Vec<StandingsRow>,
    pub player_stats: Vec<PlayerSeasonStat>,
    pub goalie_stats: Vec<GoalieSeasonStat>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn events_where(
        &self,
        game_ids: &[GameId],
        keep: impl Fn(&GameEvent) -> bool,
    ) -> Vec<GameEvent> {
        let wanted: HashSet<GameId> = game_ids.iter().copied().collect();
        self.events
            .iter()
            .filter(|event| wanted.contains(&event.game_id) && keep(event))
            .cloned()
            .collect()
    }
}

impl LeagueStore for MemoryStore {
    fn get_round(&self, round_id: RoundId) -> Result<Option<Round>, AppError> {
        Ok(self.rounds.iter().find(|r| r.id == round_id).cloned())
    }

    fn get_game_scope(&self, game_id: GameId) -> Result<Option<GameScope>, AppError> {
        let Some(game) = self.games.iter().find(|g| g.id == game_id) else {
            return Ok(None);
        };
        Ok(self
            .rounds
            .iter()
            .find(|r| r.id == game.round_id)
            .map(|round| GameScope {
                game_id,
                round_id: round.id,
                season_id: round.season_id,
            }))
    }

    fn list_round_ids(&self, season_id: SeasonId) -> Result<Vec<RoundId>, AppError> {
        let mut ids: Vec<RoundId> = self
            .rounds
            .iter()
            .filter(|r| r.season_id == season_id)
            .map(|r| r.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn list_eligible_round_ids(
        &self,
        season_id: SeasonId,
        eligibility: StatsEligibility,
    ) -> Result<Vec<RoundId>, AppError> {
        let mut ids: Vec<RoundId> = self
            .rounds
            .iter()
            .filter(|r| r.season_id == season_id && r.counts_for(eligibility))
            .map(|r| r.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn list_completed_games(&self, round_ids: &[RoundId]) -> Result<Vec<Game>, AppError> {
        Ok(self
            .games
            .iter()
            .filter(|g| round_ids.contains(&g.round_id) && g.is_completed())
            .cloned()
            .collect())
    }

    fn list_goal_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError> {
        Ok(self.events_where(game_ids, |e| e.as_goal().is_some()))
    }

    fn list_penalty_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError> {
        Ok(self.events_where(game_ids, |e| e.as_penalty().is_some()))
    }

    fn list_lineup_entries(&self, game_ids: &[GameId]) -> Result<Vec<LineupEntry>, AppError> {
        Ok(self
            .lineups
            .iter()
            .filter(|l| game_ids.contains(&l.game_id))
            .cloned()
            .collect())
    }

    fn list_goalie_game_stats(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<GoalieGameStat>, AppError> {
        Ok(self
            .goalie_game_stats
            .iter()
            .filter(|s| game_ids.contains(&s.game_id))
            .cloned()
            .collect())
    }

    fn sum_bonus_points(&self, round_id: RoundId) -> Result<Vec<BonusTotal>, AppError> {
        let mut totals: Vec<BonusTotal> = Vec::new();
        for bonus in self.bonus_points.iter().filter(|b| b.round_id == round_id) {
            match totals.iter_mut().find(|t| t.team_id == bonus.team_id) {
                Some(total) => total.total += bonus.points,
                None => totals.push(BonusTotal {
                    team_id: bonus.team_id,
                    total: bonus.points,
                }),
            }
        }
        Ok(totals)
    }

    fn list_existing_standings_ranks(
        &self,
        round_id: RoundId,
    ) -> Result<Vec<TeamRank>, AppError> {
        Ok(self
            .standings
            .iter()
            .filter(|row| row.round_id == round_id)
            .map(|row| TeamRank {
                team_id: row.team_id,
                rank: row.rank,
            })
            .collect())
    }

    fn replace_standings(
        &mut self,
        round_id: RoundId,
        rows: &[StandingsRow],
    ) -> Result<(), AppError> {
        self.standings.retain(|row| row.round_id != round_id);
        self.standings.extend_from_slice(rows);
        Ok(())
    }

    fn replace_player_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[PlayerSeasonStat],
    ) -> Result<(), AppError> {
        self.player_stats.retain(|row| row.season_id != season_id);
        self.player_stats.extend_from_slice(rows);
        Ok(())
    }

    fn replace_goalie_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[GoalieSeasonStat],
    ) -> Result<(), AppError> {
        self.goalie_stats.retain(|row| row.season_id != season_id);
        self.goalie_stats.extend_from_slice(rows);
        Ok(())
    }

    fn standings(&self, round_id: RoundId) -> Result<Vec<StandingsRow>, AppError> {
        let mut rows: Vec<StandingsRow> = self
            .standings
            .iter()
            .filter(|row| row.round_id == round_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.rank);
        Ok(rows)
    }

    fn player_season_stats(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<PlayerSeasonStat>, AppError> {
        let mut rows: Vec<PlayerSeasonStat> = self
            .player_stats
            .iter()
            .filter(|row| row.season_id == season_id)
            .cloned()
            .collect();
        rows.sort_by(PlayerSeasonStat::leaderboard_cmp);
        Ok(rows)
    }

    fn goalie_season_stats(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<GoalieSeasonStat>, AppError> {
        let mut rows: Vec<GoalieSeasonStat> = self
            .goalie_stats
            .iter()
            .filter(|row| row.season_id == season_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.player_id, row.team_id));
        Ok(rows)
    }
}
