use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params, params_from_iter};
use tracing::{debug, info};

use super::LeagueStore;
use crate::error::AppError;
use crate::models::{
    BonusPoints, BonusTotal, EventKind, Game, GameEvent, GameId, GameScope, GameStatus,
    GoalDetail, GoalieGameStat, GoalieSeasonStat, LineupEntry, PenaltyDetail, PlayerId,
    PlayerSeasonStat, Round, RoundId, ScoringRule, SeasonId, StandingsRow, StatsEligibility,
    TeamId, TeamRank,
};

/// Ids bound per `IN (...)` query; larger sets are split into chunks.
const MAX_IDS_PER_QUERY: usize = 500;

/// Opens (creating if needed) a league database file.
///
/// Foreign keys are enforced and the busy timeout is applied so a
/// recompute waits for a concurrent writer instead of failing at once.
pub fn open_database(path: &Path, busy_timeout: Duration) -> Result<Connection, AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    info!("Opened league database {}", path.display());
    Ok(conn)
}

/// Runs `f` against a store bound to one `IMMEDIATE` transaction.
///
/// The write lock is taken before the first read, so previous ranks are read
/// from the same state the delete replaces. The transaction commits only when
/// `f` returns `Ok`; on error it is rolled back when dropped.
pub fn with_transaction<T, F>(conn: &mut Connection, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut SqliteStore<'_>) -> Result<T, AppError>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = {
        let mut store = SqliteStore::new(&tx);
        f(&mut store)?
    };
    tx.commit()?;
    Ok(value)
}

/// [`LeagueStore`] over a rusqlite connection or transaction.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

struct GameRow {
    id: GameId,
    round_id: RoundId,
    home_team_id: TeamId,
    away_team_id: TeamId,
    status: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
}

impl GameRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            round_id: row.get(1)?,
            home_team_id: row.get(2)?,
            away_team_id: row.get(3)?,
            status: row.get(4)?,
            home_score: row.get(5)?,
            away_score: row.get(6)?,
        })
    }
}

impl TryFrom<GameRow> for Game {
    type Error = AppError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        Ok(Game {
            id: row.id,
            round_id: row.round_id,
            home_team_id: row.home_team_id,
            away_team_id: row.away_team_id,
            status: row.status.parse()?,
            home_score: row.home_score,
            away_score: row.away_score,
        })
    }
}

/// `game_events` row: one table for both event shapes, split by `event_type`.
struct EventRow {
    id: i64,
    game_id: GameId,
    event_type: String,
    team_id: TeamId,
    period: i32,
    time_in_period: String,
    scorer_id: Option<PlayerId>,
    assist1_id: Option<PlayerId>,
    assist2_id: Option<PlayerId>,
    goalie_id: Option<PlayerId>,
    penalty_player_id: Option<PlayerId>,
    penalty_type: Option<String>,
    penalty_minutes: Option<i32>,
    penalty_description: Option<String>,
}

const EVENT_COLUMNS: &str = "id, game_id, event_type, team_id, period, time_in_period, \
     scorer_id, assist1_id, assist2_id, goalie_id, \
     penalty_player_id, penalty_type, penalty_minutes, penalty_description";

impl EventRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            game_id: row.get(1)?,
            event_type: row.get(2)?,
            team_id: row.get(3)?,
            period: row.get(4)?,
            time_in_period: row.get(5)?,
            scorer_id: row.get(6)?,
            assist1_id: row.get(7)?,
            assist2_id: row.get(8)?,
            goalie_id: row.get(9)?,
            penalty_player_id: row.get(10)?,
            penalty_type: row.get(11)?,
            penalty_minutes: row.get(12)?,
            penalty_description: row.get(13)?,
        })
    }
}

impl TryFrom<EventRow> for GameEvent {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let kind = match row.event_type.as_str() {
            "goal" => EventKind::Goal(GoalDetail {
                scorer_id: row.scorer_id,
                assist1_id: row.assist1_id,
                assist2_id: row.assist2_id,
                goalie_scored_on_id: row.goalie_id,
            }),
            "penalty" => EventKind::Penalty(PenaltyDetail {
                player_id: row.penalty_player_id,
                penalty_type: row.penalty_type.unwrap_or_default(),
                minutes: row.penalty_minutes.unwrap_or(0),
                description: row.penalty_description,
            }),
            other => {
                return Err(AppError::invalid_data(
                    "game_events",
                    format!("event {} has unknown type '{other}'", row.id),
                ));
            }
        };

        Ok(GameEvent {
            id: row.id,
            game_id: row.game_id,
            team_id: row.team_id,
            period: row.period,
            time_in_period: row.time_in_period,
            kind,
        })
    }
}

fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Runs `sql` once per chunk of `ids`, substituting `{ids}` with the
    /// placeholder list. Empty `ids` yields no rows without querying.
    fn query_by_ids<T, F>(&self, sql: &str, ids: &[i64], map: F) -> Result<Vec<T>, AppError>
    where
        F: Fn(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut out = Vec::new();
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let sql = sql.replace("{ids}", &in_placeholders(chunk.len()));
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), &map)?;
            for row in rows {
                out.push(row?);
            }
        }
        Ok(out)
    }

    fn events_of_type(
        &self,
        event_type: &str,
        game_ids: &[GameId],
    ) -> Result<Vec<GameEvent>, AppError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM game_events \
             WHERE event_type = '{event_type}' AND game_id IN ({{ids}}) \
             ORDER BY game_id, id"
        );
        self.query_by_ids(&sql, game_ids, EventRow::from_row)?
            .into_iter()
            .map(GameEvent::try_from)
            .collect()
    }

    pub fn insert_season(&self, id: SeasonId, name: &str) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO seasons (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
        Ok(())
    }

    pub fn insert_division(
        &self,
        id: i64,
        season_id: SeasonId,
        name: &str,
    ) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO divisions (id, season_id, name) VALUES (?1, ?2, ?3)",
            params![id, season_id, name],
        )?;
        Ok(())
    }

    /// Inserts a round. Its season comes from the division, which must exist.
    pub fn insert_round(&self, round: &Round) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO rounds (id, division_id, name, points_win, points_draw, points_loss,
                                 counts_for_player_stats, counts_for_goalie_stats)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                round.id,
                round.division_id,
                round.name,
                round.scoring.points_win,
                round.scoring.points_draw,
                round.scoring.points_loss,
                round.counts_for_player_stats,
                round.counts_for_goalie_stats,
            ],
        )?;
        Ok(())
    }

    /// Changes a round's scoring rule and eligibility flags.
    pub fn update_round_rules(
        &self,
        round_id: RoundId,
        scoring: ScoringRule,
        counts_for_player_stats: bool,
        counts_for_goalie_stats: bool,
    ) -> Result<(), AppError> {
        self.conn.execute(
            "UPDATE rounds SET points_win = ?2, points_draw = ?3, points_loss = ?4,
                               counts_for_player_stats = ?5, counts_for_goalie_stats = ?6
             WHERE id = ?1",
            params![
                round_id,
                scoring.points_win,
                scoring.points_draw,
                scoring.points_loss,
                counts_for_player_stats,
                counts_for_goalie_stats,
            ],
        )?;
        Ok(())
    }

    pub fn insert_team(&self, id: TeamId, name: &str) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO teams (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
        Ok(())
    }

    pub fn insert_player(
        &self,
        id: PlayerId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO players (id, first_name, last_name) VALUES (?1, ?2, ?3)",
            params![id, first_name, last_name],
        )?;
        Ok(())
    }

    pub fn insert_game(&self, game: &Game) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO games (id, round_id, home_team_id, away_team_id, status, home_score, away_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                game.id,
                game.round_id,
                game.home_team_id,
                game.away_team_id,
                game.status.as_str(),
                game.home_score,
                game.away_score,
            ],
        )?;
        Ok(())
    }

    /// Records a game's status and score, e.g. when a result is finalized.
    pub fn update_game_result(
        &self,
        game_id: GameId,
        status: GameStatus,
        home_score: Option<i32>,
        away_score: Option<i32>,
    ) -> Result<(), AppError> {
        self.conn.execute(
            "UPDATE games SET status = ?2, home_score = ?3, away_score = ?4 WHERE id = ?1",
            params![game_id, status.as_str(), home_score, away_score],
        )?;
        Ok(())
    }

    pub fn insert_event(&self, event: &GameEvent) -> Result<(), AppError> {
        let (goal, penalty) = match &event.kind {
            EventKind::Goal(goal) => (Some(goal), None),
            EventKind::Penalty(penalty) => (None, Some(penalty)),
        };

        self.conn.execute(
            &format!(
                "INSERT INTO game_events ({EVENT_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
            ),
            params![
                event.id,
                event.game_id,
                event.kind.as_str(),
                event.team_id,
                event.period,
                event.time_in_period,
                goal.and_then(|g| g.scorer_id),
                goal.and_then(|g| g.assist1_id),
                goal.and_then(|g| g.assist2_id),
                goal.and_then(|g| g.goalie_scored_on_id),
                penalty.and_then(|p| p.player_id),
                penalty.map(|p| p.penalty_type.as_str()),
                penalty.map(|p| p.minutes),
                penalty.and_then(|p| p.description.as_deref()),
            ],
        )?;
        Ok(())
    }

    pub fn insert_lineup(&self, entry: &LineupEntry) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO game_lineups (game_id, player_id, team_id, position)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.game_id, entry.player_id, entry.team_id, entry.position],
        )?;
        Ok(())
    }

    pub fn insert_goalie_game_stat(&self, stat: &GoalieGameStat) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO goalie_game_stats (game_id, player_id, team_id, goals_against)
             VALUES (?1, ?2, ?3, ?4)",
            params![stat.game_id, stat.player_id, stat.team_id, stat.goals_against],
        )?;
        Ok(())
    }

    /// Adds a bonus point row and returns its id.
    pub fn insert_bonus_points(&self, bonus: &BonusPoints) -> Result<i64, AppError> {
        self.conn.execute(
            "INSERT INTO bonus_points (team_id, round_id, points, reason) VALUES (?1, ?2, ?3, ?4)",
            params![bonus.team_id, bonus.round_id, bonus.points, bonus.reason],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete_bonus_points(&self, bonus_id: i64) -> Result<(), AppError> {
        self.conn
            .execute("DELETE FROM bonus_points WHERE id = ?1", params![bonus_id])?;
        Ok(())
    }

    pub fn team_names(&self) -> Result<HashMap<TeamId, String>, AppError> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM teams")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, TeamId>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.collect::<Result<HashMap<_, _>, _>>()?)
    }

    pub fn player_names(&self) -> Result<HashMap<PlayerId, String>, AppError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name || ' ' || last_name FROM players")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, PlayerId>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.collect::<Result<HashMap<_, _>, _>>()?)
    }
}

impl LeagueStore for SqliteStore<'_> {
    fn get_round(&self, round_id: RoundId) -> Result<Option<Round>, AppError> {
        let round = self
            .conn
            .query_row(
                "SELECT r.id, r.division_id, d.season_id, r.name,
                        r.points_win, r.points_draw, r.points_loss,
                        r.counts_for_player_stats, r.counts_for_goalie_stats
                 FROM rounds r
                 JOIN divisions d ON d.id = r.division_id
                 WHERE r.id = ?1",
                params![round_id],
                |row| {
                    Ok(Round {
                        id: row.get(0)?,
                        division_id: row.get(1)?,
                        season_id: row.get(2)?,
                        name: row.get(3)?,
                        scoring: ScoringRule::new(row.get(4)?, row.get(5)?, row.get(6)?),
                        counts_for_player_stats: row.get(7)?,
                        counts_for_goalie_stats: row.get(8)?,
                    })
                },
            )
            .optional()?;
        Ok(round)
    }

    fn get_game_scope(&self, game_id: GameId) -> Result<Option<GameScope>, AppError> {
        let scope = self
            .conn
            .query_row(
                "SELECT g.id, g.round_id, d.season_id
                 FROM games g
                 JOIN rounds r ON r.id = g.round_id
                 JOIN divisions d ON d.id = r.division_id
                 WHERE g.id = ?1",
                params![game_id],
                |row| {
                    Ok(GameScope {
                        game_id: row.get(0)?,
                        round_id: row.get(1)?,
                        season_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(scope)
    }

    fn list_round_ids(&self, season_id: SeasonId) -> Result<Vec<RoundId>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id FROM rounds r
             JOIN divisions d ON d.id = r.division_id
             WHERE d.season_id = ?1
             ORDER BY r.id",
        )?;
        let rows = stmt.query_map(params![season_id], |row| row.get::<_, RoundId>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_eligible_round_ids(
        &self,
        season_id: SeasonId,
        eligibility: StatsEligibility,
    ) -> Result<Vec<RoundId>, AppError> {
        let sql = format!(
            "SELECT r.id FROM rounds r
             JOIN divisions d ON d.id = r.division_id
             WHERE d.season_id = ?1 AND r.{} = 1
             ORDER BY r.id",
            eligibility.column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![season_id], |row| row.get::<_, RoundId>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_completed_games(&self, round_ids: &[RoundId]) -> Result<Vec<Game>, AppError> {
        let rows = self.query_by_ids(
            "SELECT id, round_id, home_team_id, away_team_id, status, home_score, away_score
             FROM games
             WHERE status = 'completed' AND round_id IN ({ids})
             ORDER BY id",
            round_ids,
            GameRow::from_row,
        )?;
        rows.into_iter().map(Game::try_from).collect()
    }

    fn list_goal_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError> {
        self.events_of_type("goal", game_ids)
    }

    fn list_penalty_events(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, AppError> {
        self.events_of_type("penalty", game_ids)
    }

    fn list_lineup_entries(&self, game_ids: &[GameId]) -> Result<Vec<LineupEntry>, AppError> {
        self.query_by_ids(
            "SELECT game_id, player_id, team_id, position
             FROM game_lineups
             WHERE game_id IN ({ids})
             ORDER BY game_id, player_id",
            game_ids,
            |row| {
                Ok(LineupEntry {
                    game_id: row.get(0)?,
                    player_id: row.get(1)?,
                    team_id: row.get(2)?,
                    position: row.get(3)?,
                })
            },
        )
    }

    fn list_goalie_game_stats(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<GoalieGameStat>, AppError> {
        self.query_by_ids(
            "SELECT game_id, player_id, team_id, goals_against
             FROM goalie_game_stats
             WHERE game_id IN ({ids})
             ORDER BY game_id, player_id",
            game_ids,
            |row| {
                Ok(GoalieGameStat {
                    game_id: row.get(0)?,
                    player_id: row.get(1)?,
                    team_id: row.get(2)?,
                    goals_against: row.get(3)?,
                })
            },
        )
    }

    fn sum_bonus_points(&self, round_id: RoundId) -> Result<Vec<BonusTotal>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT team_id, SUM(points) FROM bonus_points
             WHERE round_id = ?1
             GROUP BY team_id
             ORDER BY team_id",
        )?;
        let rows = stmt.query_map(params![round_id], |row| {
            Ok(BonusTotal {
                team_id: row.get(0)?,
                total: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_existing_standings_ranks(
        &self,
        round_id: RoundId,
    ) -> Result<Vec<TeamRank>, AppError> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, rank FROM standings WHERE round_id = ?1")?;
        let rows = stmt.query_map(params![round_id], |row| {
            Ok(TeamRank {
                team_id: row.get(0)?,
                rank: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn replace_standings(
        &mut self,
        round_id: RoundId,
        rows: &[StandingsRow],
    ) -> Result<(), AppError> {
        let deleted = self
            .conn
            .execute("DELETE FROM standings WHERE round_id = ?1", params![round_id])?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO standings (round_id, team_id, games_played, wins, draws, losses,
                                    goals_for, goals_against, goal_difference, points,
                                    bonus_points, total_points, rank, previous_rank)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )?;
        for row in rows {
            stmt.execute(params![
                round_id,
                row.team_id,
                row.games_played,
                row.wins,
                row.draws,
                row.losses,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points,
                row.bonus_points,
                row.total_points,
                row.rank,
                row.previous_rank,
            ])?;
        }

        debug!(
            "Replaced standings of round {round_id}: {deleted} deleted, {} inserted",
            rows.len()
        );
        Ok(())
    }

    fn replace_player_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[PlayerSeasonStat],
    ) -> Result<(), AppError> {
        let deleted = self.conn.execute(
            "DELETE FROM player_season_stats WHERE season_id = ?1",
            params![season_id],
        )?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO player_season_stats (season_id, player_id, team_id, games_played,
                                              goals, assists, total_points, penalty_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for row in rows {
            stmt.execute(params![
                season_id,
                row.player_id,
                row.team_id,
                row.games_played,
                row.goals,
                row.assists,
                row.total_points,
                row.penalty_minutes,
            ])?;
        }

        debug!(
            "Replaced player stats of season {season_id}: {deleted} deleted, {} inserted",
            rows.len()
        );
        Ok(())
    }

    fn replace_goalie_season_stats(
        &mut self,
        season_id: SeasonId,
        rows: &[GoalieSeasonStat],
    ) -> Result<(), AppError> {
        let deleted = self.conn.execute(
            "DELETE FROM goalie_season_stats WHERE season_id = ?1",
            params![season_id],
        )?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO goalie_season_stats (season_id, player_id, team_id, games_played,
                                              goals_against, gaa)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for row in rows {
            stmt.execute(params![
                season_id,
                row.player_id,
                row.team_id,
                row.games_played,
                row.goals_against,
                row.gaa,
            ])?;
        }

        debug!(
            "Replaced goalie stats of season {season_id}: {deleted} deleted, {} inserted",
            rows.len()
        );
        Ok(())
    }

    fn standings(&self, round_id: RoundId) -> Result<Vec<StandingsRow>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT round_id, team_id, games_played, wins, draws, losses, goals_for,
                    goals_against, goal_difference, points, bonus_points, total_points,
                    rank, previous_rank
             FROM standings
             WHERE round_id = ?1
             ORDER BY rank",
        )?;
        let rows = stmt.query_map(params![round_id], |row| {
            Ok(StandingsRow {
                round_id: row.get(0)?,
                team_id: row.get(1)?,
                games_played: row.get(2)?,
                wins: row.get(3)?,
                draws: row.get(4)?,
                losses: row.get(5)?,
                goals_for: row.get(6)?,
                goals_against: row.get(7)?,
                goal_difference: row.get(8)?,
                points: row.get(9)?,
                bonus_points: row.get(10)?,
                total_points: row.get(11)?,
                rank: row.get(12)?,
                previous_rank: row.get(13)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn player_season_stats(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<PlayerSeasonStat>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT season_id, player_id, team_id, games_played, goals, assists,
                    total_points, penalty_minutes
             FROM player_season_stats
             WHERE season_id = ?1
             ORDER BY total_points DESC, goals DESC, player_id, team_id",
        )?;
        let rows = stmt.query_map(params![season_id], |row| {
            Ok(PlayerSeasonStat {
                season_id: row.get(0)?,
                player_id: row.get(1)?,
                team_id: row.get(2)?,
                games_played: row.get(3)?,
                goals: row.get(4)?,
                assists: row.get(5)?,
                total_points: row.get(6)?,
                penalty_minutes: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn goalie_season_stats(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<GoalieSeasonStat>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT season_id, player_id, team_id, games_played, goals_against, gaa
             FROM goalie_season_stats
             WHERE season_id = ?1
             ORDER BY player_id, team_id",
        )?;
        let rows = stmt.query_map(params![season_id], |row| {
            Ok(GoalieSeasonStat {
                season_id: row.get(0)?,
                player_id: row.get(1)?,
                team_id: row.get(2)?,
                games_played: row.get(3)?,
                goals_against: row.get(4)?,
                gaa: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
