use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::AppError;
use crate::models::{
    BonusPoints, DivisionId, EventId, EventKind, Game, GameEvent, GameId, GameStatus,
    GoalDetail, GoalieGameStat, LineupEntry, PenaltyDetail, PlayerId, Round, RoundId,
    ScoringRule, SeasonId, StandingsRow, TeamId,
};
use crate::store::{MemoryStore, SqliteStore};

/// Test utilities for creating league fixtures
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a round counting for both season aggregates.
    /// The division id equals the season id.
    pub fn create_round(id: RoundId, season_id: SeasonId, scoring: ScoringRule) -> Round {
        Round {
            id,
            division_id: season_id,
            season_id,
            name: format!("Round {id}"),
            scoring,
            counts_for_player_stats: true,
            counts_for_goalie_stats: true,
        }
    }

    /// Creates a 2/1/0 round with explicit eligibility flags
    pub fn create_round_with_eligibility(
        id: RoundId,
        season_id: SeasonId,
        counts_for_player_stats: bool,
        counts_for_goalie_stats: bool,
    ) -> Round {
        Round {
            counts_for_player_stats,
            counts_for_goalie_stats,
            ..Self::create_round(id, season_id, ScoringRule::new(2, 1, 0))
        }
    }

    pub fn create_completed_game(
        id: GameId,
        round_id: RoundId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        home_score: i32,
        away_score: i32,
    ) -> Game {
        Game {
            id,
            round_id,
            home_team_id,
            away_team_id,
            status: GameStatus::Completed,
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }

    pub fn create_scheduled_game(
        id: GameId,
        round_id: RoundId,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Game {
        Game {
            id,
            round_id,
            home_team_id,
            away_team_id,
            status: GameStatus::Scheduled,
            home_score: None,
            away_score: None,
        }
    }

    pub fn create_goal(
        id: EventId,
        game_id: GameId,
        team_id: TeamId,
        scorer_id: Option<PlayerId>,
        assist1_id: Option<PlayerId>,
        assist2_id: Option<PlayerId>,
    ) -> GameEvent {
        GameEvent {
            id,
            game_id,
            team_id,
            period: 1,
            time_in_period: "10:00".to_string(),
            kind: EventKind::Goal(GoalDetail {
                scorer_id,
                assist1_id,
                assist2_id,
                goalie_scored_on_id: None,
            }),
        }
    }

    pub fn create_penalty(
        id: EventId,
        game_id: GameId,
        team_id: TeamId,
        player_id: Option<PlayerId>,
        minutes: i32,
    ) -> GameEvent {
        GameEvent {
            id,
            game_id,
            team_id,
            period: 2,
            time_in_period: "07:15".to_string(),
            kind: EventKind::Penalty(PenaltyDetail {
                player_id,
                penalty_type: "tripping".to_string(),
                minutes,
                description: None,
            }),
        }
    }

    pub fn create_lineup(game_id: GameId, player_id: PlayerId, team_id: TeamId) -> LineupEntry {
        LineupEntry {
            game_id,
            player_id,
            team_id,
            position: Some("F".to_string()),
        }
    }

    pub fn create_goalie_line(
        game_id: GameId,
        player_id: PlayerId,
        team_id: TeamId,
        goals_against: i32,
    ) -> GoalieGameStat {
        GoalieGameStat {
            game_id,
            player_id,
            team_id,
            goals_against,
        }
    }

    pub fn create_bonus(team_id: TeamId, round_id: RoundId, points: i32) -> BonusPoints {
        BonusPoints {
            team_id,
            round_id,
            points,
            reason: Some("league decision".to_string()),
        }
    }

    /// Round 1 of season 1 (2/1/0): team 1 beats team 2 4-2, then they draw 1-1.
    pub fn create_two_game_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .rounds
            .push(Self::create_round(1, 1, ScoringRule::new(2, 1, 0)));
        store.games = vec![
            Self::create_completed_game(1, 1, 1, 2, 4, 2),
            Self::create_completed_game(2, 1, 1, 2, 1, 1),
        ];
        store
    }

    /// Copies the source facts of a memory fixture into a SQLite database,
    /// creating the seasons, divisions, teams and players they reference.
    /// The schema must already exist.
    pub fn seed_sqlite(store: &SqliteStore<'_>, fixture: &MemoryStore) -> Result<(), AppError> {
        let mut divisions: BTreeMap<DivisionId, SeasonId> = BTreeMap::new();
        for round in &fixture.rounds {
            divisions.insert(round.division_id, round.season_id);
        }
        let seasons: BTreeSet<SeasonId> = divisions.values().copied().collect();

        let mut teams: BTreeSet<TeamId> = BTreeSet::new();
        let mut players: BTreeSet<PlayerId> = BTreeSet::new();
        for game in &fixture.games {
            teams.extend([game.home_team_id, game.away_team_id]);
        }
        for event in &fixture.events {
            teams.insert(event.team_id);
            match &event.kind {
                EventKind::Goal(goal) => players.extend(
                    [
                        goal.scorer_id,
                        goal.assist1_id,
                        goal.assist2_id,
                        goal.goalie_scored_on_id,
                    ]
                    .into_iter()
                    .flatten(),
                ),
                EventKind::Penalty(penalty) => players.extend(penalty.player_id),
            }
        }
        for entry in &fixture.lineups {
            teams.insert(entry.team_id);
            players.insert(entry.player_id);
        }
        for line in &fixture.goalie_game_stats {
            teams.insert(line.team_id);
            players.insert(line.player_id);
        }
        teams.extend(fixture.bonus_points.iter().map(|b| b.team_id));

        for season_id in seasons {
            store.insert_season(season_id, &format!("Season {season_id}"))?;
        }
        for (division_id, season_id) in divisions {
            store.insert_division(division_id, season_id, &format!("Division {division_id}"))?;
        }
        for team_id in teams {
            store.insert_team(team_id, &format!("Team {team_id}"))?;
        }
        for player_id in players {
            store.insert_player(player_id, "Player", &player_id.to_string())?;
        }
        for round in &fixture.rounds {
            store.insert_round(round)?;
        }
        for game in &fixture.games {
            store.insert_game(game)?;
        }
        for event in &fixture.events {
            store.insert_event(event)?;
        }
        for entry in &fixture.lineups {
            store.insert_lineup(entry)?;
        }
        for line in &fixture.goalie_game_stats {
            store.insert_goalie_game_stat(line)?;
        }
        for bonus in &fixture.bonus_points {
            store.insert_bonus_points(bonus)?;
        }
        Ok(())
    }
}

/// Property-based testing utilities
pub struct PropertyTesting;

impl PropertyTesting {
    /// Validates the internal consistency of one round's standings
    pub fn validate_standings(rows: &[StandingsRow]) -> Result<(), String> {
        let mut seen_teams = HashSet::new();

        for (i, row) in rows.iter().enumerate() {
            if !seen_teams.insert(row.team_id) {
                return Err(format!("Team {} appears more than once", row.team_id));
            }

            let expected_rank = i as i32 + 1;
            if row.rank != expected_rank {
                return Err(format!(
                    "Row {} has rank {}, expected {}",
                    i, row.rank, expected_rank
                ));
            }

            if row.wins + row.draws + row.losses != row.games_played {
                return Err(format!(
                    "Team {} results do not add up to games played",
                    row.team_id
                ));
            }

            if row.goal_difference != row.goals_for - row.goals_against {
                return Err(format!("Team {} goal difference is wrong", row.team_id));
            }

            if row.total_points != row.points + row.bonus_points {
                return Err(format!("Team {} total points is wrong", row.team_id));
            }
        }

        Ok(())
    }

    /// Games played across all teams must be twice the number of completed games
    pub fn validate_games_played_total(
        rows: &[StandingsRow],
        completed_games: usize,
    ) -> Result<(), String> {
        let total: i32 = rows.iter().map(|r| r.games_played).sum();
        if total as usize != completed_games * 2 {
            return Err(format!(
                "Games played total {} does not match {} completed games",
                total, completed_games
            ));
        }
        Ok(())
    }
}
