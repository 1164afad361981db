use super::{GameId, PlayerId, RoundId, SeasonId, TeamId};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a game. Only `Completed` games count toward
/// standings and season statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Postponed => "postponed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "postponed" => Ok(Self::Postponed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::invalid_data(
                "games",
                format!("unknown game status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round_id: RoundId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub status: GameStatus,
    /// Null until the game is completed
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl Game {
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Home and away scores with missing values coalesced to zero.
    ///
    /// A completed game should always carry both scores, but aggregation
    /// does not rely on that.
    pub fn final_score(&self) -> (i32, i32) {
        (self.home_score.unwrap_or(0), self.away_score.unwrap_or(0))
    }

    pub fn has_missing_score(&self) -> bool {
        self.home_score.is_none() || self.away_score.is_none()
    }
}

/// Where a game sits in the league structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameScope {
    pub game_id: GameId,
    pub round_id: RoundId,
    pub season_id: SeasonId,
}

/// A player dressed for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub position: Option<String>,
}

/// Per-game goalie line, one per goalie who started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalieGameStat {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub goals_against: i32,
}

/// Manual standings adjustment for a team in a round. Points may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPoints {
    pub team_id: TeamId,
    pub round_id: RoundId,
    pub points: i32,
    pub reason: Option<String>,
}

/// Sum of all bonus point rows of one team in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusTotal {
    pub team_id: TeamId,
    pub total: i32,
}
