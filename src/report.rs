//! Text and JSON rendering of derived league tables.

use std::collections::HashMap;

use chrono::Local;
use serde::Serialize;

use crate::constants::report::{NAME_COLUMN_WIDTH, RULE};
use crate::error::AppError;
use crate::models::{GoalieSeasonStat, PlayerId, PlayerSeasonStat, StandingsRow, TeamId};

/// Id to display name lookups, usually loaded from the `teams` and `players` tables.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    pub teams: HashMap<TeamId, String>,
    pub players: HashMap<PlayerId, String>,
}

impl NameLookup {
    pub fn team(&self, id: TeamId) -> String {
        fit_name(self.teams.get(&id).map(String::as_str), id)
    }

    pub fn player(&self, id: PlayerId) -> String {
        fit_name(self.players.get(&id).map(String::as_str), id)
    }
}

/// Truncates a name to the name column, or shows `#id` when unknown.
fn fit_name(name: Option<&str>, id: i64) -> String {
    match name {
        Some(name) => name.chars().take(NAME_COLUMN_WIDTH).collect(),
        None => format!("#{id}"),
    }
}

fn header(title: &str) -> String {
    format!(
        "{title}\nGenerated {}\n{RULE}\n",
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

fn rank_change_marker(row: &StandingsRow) -> String {
    match row.rank_change() {
        Some(change) if change > 0 => format!("+{change}"),
        Some(change) if change < 0 => change.to_string(),
        Some(_) => "=".to_string(),
        None => "new".to_string(),
    }
}

pub fn render_standings(title: &str, rows: &[StandingsRow], names: &NameLookup) -> String {
    let mut out = header(title);
    out.push_str(&format!(
        "{:>3} {:<width$} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4} {:>4} {:>4}\n",
        "#",
        "Team",
        "GP",
        "W",
        "D",
        "L",
        "GF-GA",
        "DIFF",
        "BON",
        "PTS",
        "CHG",
        width = NAME_COLUMN_WIDTH
    ));

    for row in rows {
        out.push_str(&format!(
            "{:>3} {:<width$} {:>3} {:>3} {:>3} {:>3} {:>7} {:>+4} {:>4} {:>4} {:>4}\n",
            row.rank,
            names.team(row.team_id),
            row.games_played,
            row.wins,
            row.draws,
            row.losses,
            format!("{}-{}", row.goals_for, row.goals_against),
            row.goal_difference,
            row.bonus_points,
            row.total_points,
            rank_change_marker(row),
            width = NAME_COLUMN_WIDTH
        ));
    }

    if rows.is_empty() {
        out.push_str("No standings for this round\n");
    }
    out
}

pub fn render_player_stats(title: &str, rows: &[PlayerSeasonStat], names: &NameLookup) -> String {
    let mut out = header(title);
    out.push_str(&format!(
        "{:<width$} {:<width$} {:>3} {:>3} {:>3} {:>4} {:>4}\n",
        "Player",
        "Team",
        "GP",
        "G",
        "A",
        "PTS",
        "PIM",
        width = NAME_COLUMN_WIDTH
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<width$} {:<width$} {:>3} {:>3} {:>3} {:>4} {:>4}\n",
            names.player(row.player_id),
            names.team(row.team_id),
            row.games_played,
            row.goals,
            row.assists,
            row.total_points,
            row.penalty_minutes,
            width = NAME_COLUMN_WIDTH
        ));
    }

    if rows.is_empty() {
        out.push_str("No player statistics for this season\n");
    }
    out
}

pub fn render_goalie_stats(title: &str, rows: &[GoalieSeasonStat], names: &NameLookup) -> String {
    let mut out = header(title);
    out.push_str(&format!(
        "{:<width$} {:<width$} {:>3} {:>4} {:>6}\n",
        "Goalie",
        "Team",
        "GP",
        "GA",
        "GAA",
        width = NAME_COLUMN_WIDTH
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<width$} {:<width$} {:>3} {:>4} {:>6}\n",
            names.player(row.player_id),
            names.team(row.team_id),
            row.games_played,
            row.goals_against,
            row.gaa,
            width = NAME_COLUMN_WIDTH
        ));
    }

    if rows.is_empty() {
        out.push_str("No goalie statistics for this season\n");
    }
    out
}

/// Pretty-printed JSON for any derived row set.
pub fn to_json<T: Serialize + ?Sized>(rows: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(rows)?)
}
