use crate::cli::{Args, has_single_recompute, is_config_operation};
use rink_stats::config::Config;
use rink_stats::error::AppError;
use rink_stats::models::{GoalieSeasonStat, PlayerSeasonStat, RoundId, SeasonId, StandingsRow};
use rink_stats::recalc::{
    RecalcSummary, on_game_result_changed, recalculate_goalie_stats, recalculate_player_stats,
    recalculate_season, recalculate_standings,
};
use rink_stats::report::{self, NameLookup};
use rink_stats::store::schema::init_schema;
use rink_stats::store::{LeagueStore, SqliteStore, open_database, with_transaction};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Validates command line argument combinations.
///
/// Returns an error if no action was requested, or if `--season` is mixed
/// with the single-procedure flags it already covers.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    let has_action = args.init_db
        || args.season.is_some()
        || has_single_recompute(args)
        || is_config_operation(args);
    if !has_action {
        return Err(AppError::config_error(
            "Nothing to do. Use --standings, --player-stats, --goalie-stats, --game, --season or --init-db (see --help)",
        ));
    }

    if args.season.is_some() && has_single_recompute(args) {
        return Err(AppError::config_error(
            "--season already recalculates every table of the season; do not combine it with --standings, --player-stats, --goalie-stats or --game",
        ));
    }
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-database, --set-log-file, --clear-log-file).
///
/// Starts from the config file as stored, so environment overrides are not
/// written back.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_database_path) = &args.new_database_path {
        config.database_path = Some(new_database_path.clone());
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// What one run should recalculate, detached from clap so it can move to a
/// blocking thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcPlan {
    pub init_db: bool,
    pub standings: Option<RoundId>,
    pub player_stats: Option<SeasonId>,
    pub goalie_stats: Option<SeasonId>,
    pub game: Option<i64>,
    pub season: Option<SeasonId>,
    pub json: bool,
}

impl RecalcPlan {
    pub fn from_args(args: &Args) -> Self {
        Self {
            init_db: args.init_db,
            standings: args.standings,
            player_stats: args.player_stats,
            goalie_stats: args.goalie_stats,
            game: args.game,
            season: args.season,
            json: args.json,
        }
    }

    fn has_recompute(&self) -> bool {
        self.standings.is_some()
            || self.player_stats.is_some()
            || self.goalie_stats.is_some()
            || self.game.is_some()
            || self.season.is_some()
    }
}

fn push_unique(ids: &mut Vec<i64>, id: i64) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Rows of every scope touched in one run, read back after the recompute.
#[derive(Debug, Default, Serialize)]
struct RecalcOutput {
    summary: RecalcSummary,
    standings: BTreeMap<RoundId, Vec<StandingsRow>>,
    player_stats: BTreeMap<SeasonId, Vec<PlayerSeasonStat>>,
    goalie_stats: BTreeMap<SeasonId, Vec<GoalieSeasonStat>>,
}

impl RecalcOutput {
    fn absorb(&mut self, summary: RecalcSummary) {
        for round_id in summary.standings_rounds {
            push_unique(&mut self.summary.standings_rounds, round_id);
        }
        for season_id in summary.player_stats_seasons {
            push_unique(&mut self.summary.player_stats_seasons, season_id);
        }
        for season_id in summary.goalie_stats_seasons {
            push_unique(&mut self.summary.goalie_stats_seasons, season_id);
        }
    }

    fn load_rows<S: LeagueStore + ?Sized>(&mut self, store: &S) -> Result<(), AppError> {
        for &round_id in &self.summary.standings_rounds {
            self.standings.insert(round_id, store.standings(round_id)?);
        }
        for &season_id in &self.summary.player_stats_seasons {
            self.player_stats
                .insert(season_id, store.player_season_stats(season_id)?);
        }
        for &season_id in &self.summary.goalie_stats_seasons {
            self.goalie_stats
                .insert(season_id, store.goalie_season_stats(season_id)?);
        }
        Ok(())
    }

    fn render_text(&self, names: &NameLookup) -> String {
        let mut sections = Vec::new();
        for (round_id, rows) in &self.standings {
            sections.push(report::render_standings(
                &format!("Standings, round {round_id}"),
                rows,
                names,
            ));
        }
        for (season_id, rows) in &self.player_stats {
            sections.push(report::render_player_stats(
                &format!("Player statistics, season {season_id}"),
                rows,
                names,
            ));
        }
        for (season_id, rows) in &self.goalie_stats {
            sections.push(report::render_goalie_stats(
                &format!("Goalie statistics, season {season_id}"),
                rows,
                names,
            ));
        }
        sections.join("\n")
    }
}

/// Runs `plan` against the database at `database_path` and returns the
/// report to print.
///
/// All recomputes of the run share one transaction, so a failure leaves the
/// derived tables as they were.
pub fn run_recalculation(
    plan: &RecalcPlan,
    database_path: &str,
    busy_timeout: Duration,
) -> Result<String, AppError> {
    let mut conn = open_database(Path::new(database_path), busy_timeout)?;
    let mut messages = Vec::new();

    if plan.init_db {
        init_schema(&conn)?;
        info!("Schema ready in {database_path}");
        messages.push(format!("League schema ready in {database_path}"));
    }

    if !plan.has_recompute() {
        return Ok(messages.join("\n"));
    }

    let (output, names) = with_transaction(&mut conn, |store| {
        let mut output = RecalcOutput::default();

        if let Some(season_id) = plan.season {
            output.absorb(recalculate_season(store, season_id)?);
        }
        if let Some(game_id) = plan.game {
            output.absorb(on_game_result_changed(store, game_id)?);
        }
        if let Some(round_id) = plan.standings {
            recalculate_standings(store, round_id)?;
            push_unique(&mut output.summary.standings_rounds, round_id);
        }
        if let Some(season_id) = plan.player_stats {
            recalculate_player_stats(store, season_id)?;
            push_unique(&mut output.summary.player_stats_seasons, season_id);
        }
        if let Some(season_id) = plan.goalie_stats {
            recalculate_goalie_stats(store, season_id)?;
            push_unique(&mut output.summary.goalie_stats_seasons, season_id);
        }

        output.load_rows(&*store)?;
        let names = if plan.json {
            NameLookup::default()
        } else {
            names_from(store)?
        };
        Ok((output, names))
    })?;

    info!("Recalculation finished: {}", output.summary);
    if plan.json {
        messages.push(report::to_json(&output)?);
    } else {
        if output.summary.is_empty() {
            messages.push("Nothing was recalculated".to_string());
        }
        messages.push(output.render_text(&names));
    }
    Ok(messages.join("\n"))
}

fn names_from(store: &SqliteStore<'_>) -> Result<NameLookup, AppError> {
    Ok(NameLookup {
        teams: store.team_names()?,
        players: store.player_names()?,
    })
}

/// Handles the recalculation flags.
///
/// rusqlite is blocking, so the whole run moves to tokio's blocking pool.
pub async fn handle_recalculate_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let plan = RecalcPlan::from_args(args);
    let database_path = args
        .database
        .clone()
        .unwrap_or_else(|| config.resolved_database_path());
    let busy_timeout = config.busy_timeout();

    info!("Using league database {database_path}");
    let report = tokio::task::spawn_blocking(move || {
        run_recalculation(&plan, &database_path, busy_timeout)
    })
    .await??;

    if !report.is_empty() {
        println!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rink_stats::testing_utils::TestDataBuilder;
    use rusqlite::Connection;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Args {
        let mut argv = vec!["rink_stats"];
        argv.extend_from_slice(list);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_validate_args_requires_an_action() {
        assert!(validate_args(&args(&[])).is_err());
        assert!(validate_args(&args(&["--json"])).is_err());
        assert!(validate_args(&args(&["--init-db"])).is_ok());
        assert!(validate_args(&args(&["--list-config"])).is_ok());
    }

    #[test]
    fn test_validate_args_rejects_season_with_single_flags() {
        assert!(validate_args(&args(&["--season", "1", "--standings", "2"])).is_err());
        assert!(validate_args(&args(&["--season", "1", "--game", "9"])).is_err());
        assert!(validate_args(&args(&["--season", "1", "--json"])).is_ok());
        assert!(validate_args(&args(&["--standings", "2", "--player-stats", "1"])).is_ok());
    }

    #[test]
    fn test_plan_from_args() {
        let plan = RecalcPlan::from_args(&args(&["--game", "7", "--json"]));
        assert_eq!(plan.game, Some(7));
        assert!(plan.json);
        assert!(plan.has_recompute());
        assert!(!RecalcPlan::from_args(&args(&["--init-db"])).has_recompute());
    }

    #[test]
    fn test_run_recalculation_end_to_end() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("league.db");
        let db_path = db_path.to_str().unwrap();

        let init = RecalcPlan {
            init_db: true,
            ..RecalcPlan::default()
        };
        let message = run_recalculation(&init, db_path, Duration::from_millis(500)).unwrap();
        assert!(message.contains("League schema ready"));

        {
            let conn = Connection::open(db_path).unwrap();
            let fixture = TestDataBuilder::create_two_game_store();
            TestDataBuilder::seed_sqlite(&SqliteStore::new(&conn), &fixture).unwrap();
        }

        let plan = RecalcPlan {
            standings: Some(1),
            ..RecalcPlan::default()
        };
        let text = run_recalculation(&plan, db_path, Duration::from_millis(500)).unwrap();
        assert!(text.contains("Standings, round 1"));
        assert!(text.contains("Team 1"));

        let plan = RecalcPlan {
            season: Some(1),
            json: true,
            ..RecalcPlan::default()
        };
        let json = run_recalculation(&plan, db_path, Duration::from_millis(500)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["standings"]["1"][0]["team_id"], 1);
        assert_eq!(parsed["standings"]["1"][0]["previous_rank"], 1);
        assert_eq!(parsed["summary"]["player_stats_seasons"][0], 1);

        // Game 1 is in round 1, so the round is listed once
        let plan = RecalcPlan {
            game: Some(1),
            standings: Some(1),
            player_stats: Some(1),
            json: true,
            ..RecalcPlan::default()
        };
        let json = run_recalculation(&plan, db_path, Duration::from_millis(500)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["standings_rounds"], serde_json::json!([1]));
        assert_eq!(parsed["summary"]["player_stats_seasons"], serde_json::json!([1]));
    }

    #[test]
    fn test_absorb_skips_scopes_already_listed() {
        let mut output = RecalcOutput::default();
        let summary = RecalcSummary {
            standings_rounds: vec![1, 2],
            player_stats_seasons: vec![1],
            goalie_stats_seasons: vec![1],
        };
        output.absorb(summary.clone());
        output.absorb(summary);
        assert_eq!(output.summary.standings_rounds, vec![1, 2]);
        assert_eq!(output.summary.player_stats_seasons, vec![1]);
        assert_eq!(output.summary.goalie_stats_seasons, vec![1]);
    }
}
