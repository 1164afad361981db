//! SQLite schema for league source facts and derived tables
//!
//! Source tables:
//! - seasons, divisions, rounds: league structure and round scoring rules
//! - teams, players: names used by reports
//! - games, game_events, game_lineups, goalie_game_stats: game reports
//! - bonus_points: manual standings adjustments
//!
//! Derived tables (rewritten by the recalculation engine):
//! - standings, player_season_stats, goalie_season_stats

use rusqlite::Connection;
use tracing::debug;

use crate::error::AppError;

/// Create all tables and indexes if they do not exist yet.
pub fn init_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS seasons (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS divisions (
            id INTEGER PRIMARY KEY,
            season_id INTEGER NOT NULL REFERENCES seasons(id),
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rounds (
            id INTEGER PRIMARY KEY,
            division_id INTEGER NOT NULL REFERENCES divisions(id),
            name TEXT NOT NULL,
            points_win INTEGER NOT NULL DEFAULT 2,
            points_draw INTEGER NOT NULL DEFAULT 1,
            points_loss INTEGER NOT NULL DEFAULT 0,
            counts_for_player_stats INTEGER NOT NULL DEFAULT 1,
            counts_for_goalie_stats INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY,
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            home_team_id INTEGER NOT NULL REFERENCES teams(id),
            away_team_id INTEGER NOT NULL REFERENCES teams(id),
            status TEXT NOT NULL DEFAULT 'scheduled'
                CHECK (status IN ('scheduled', 'in_progress', 'completed', 'postponed', 'cancelled')),
            home_score INTEGER,
            away_score INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_games_round_status ON games(round_id, status);

        CREATE TABLE IF NOT EXISTS game_events (
            id INTEGER PRIMARY KEY,
            game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            event_type TEXT NOT NULL CHECK (event_type IN ('goal', 'penalty')),
            team_id INTEGER NOT NULL REFERENCES teams(id),
            period INTEGER NOT NULL,
            time_in_period TEXT NOT NULL,
            scorer_id INTEGER REFERENCES players(id),
            assist1_id INTEGER REFERENCES players(id),
            assist2_id INTEGER REFERENCES players(id),
            goalie_id INTEGER REFERENCES players(id),
            penalty_player_id INTEGER REFERENCES players(id),
            penalty_type TEXT,
            penalty_minutes INTEGER,
            penalty_description TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_game_events_game ON game_events(game_id, event_type);

        CREATE TABLE IF NOT EXISTS game_lineups (
            game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            player_id INTEGER NOT NULL REFERENCES players(id),
            team_id INTEGER NOT NULL REFERENCES teams(id),
            position TEXT,
            PRIMARY KEY (game_id, player_id)
        );

        CREATE TABLE IF NOT EXISTS goalie_game_stats (
            game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            player_id INTEGER NOT NULL REFERENCES players(id),
            team_id INTEGER NOT NULL REFERENCES teams(id),
            goals_against INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (game_id, player_id)
        );

        CREATE TABLE IF NOT EXISTS bonus_points (
            id INTEGER PRIMARY KEY,
            team_id INTEGER NOT NULL REFERENCES teams(id),
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            points INTEGER NOT NULL,
            reason TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_bonus_points_round ON bonus_points(round_id);

        CREATE TABLE IF NOT EXISTS standings (
            round_id INTEGER NOT NULL,
            team_id INTEGER NOT NULL,
            games_played INTEGER NOT NULL,
            wins INTEGER NOT NULL,
            draws INTEGER NOT NULL,
            losses INTEGER NOT NULL,
            goals_for INTEGER NOT NULL,
            goals_against INTEGER NOT NULL,
            goal_difference INTEGER NOT NULL,
            points INTEGER NOT NULL,
            bonus_points INTEGER NOT NULL,
            total_points INTEGER NOT NULL,
            rank INTEGER NOT NULL,
            previous_rank INTEGER,
            PRIMARY KEY (round_id, team_id)
        );

        CREATE TABLE IF NOT EXISTS player_season_stats (
            season_id INTEGER NOT NULL,
            player_id INTEGER NOT NULL,
            team_id INTEGER NOT NULL,
            games_played INTEGER NOT NULL,
            goals INTEGER NOT NULL,
            assists INTEGER NOT NULL,
            total_points INTEGER NOT NULL,
            penalty_minutes INTEGER NOT NULL,
            PRIMARY KEY (season_id, player_id, team_id)
        );

        CREATE TABLE IF NOT EXISTS goalie_season_stats (
            season_id INTEGER NOT NULL,
            player_id INTEGER NOT NULL,
            team_id INTEGER NOT NULL,
            games_played INTEGER NOT NULL,
            goals_against INTEGER NOT NULL,
            gaa TEXT NOT NULL,
            PRIMARY KEY (season_id, player_id, team_id)
        );
        "#,
    )?;

    debug!("League schema ensured");
    Ok(())
}
