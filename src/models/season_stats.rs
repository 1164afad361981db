use super::{PlayerId, SeasonId, TeamId};
use serde::{Deserialize, Serialize};

/// Season totals of one skater for one team.
///
/// A player who changed teams during the season has one row per team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeasonStat {
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub games_played: i32,
    pub goals: i32,
    pub assists: i32,
    /// `goals + assists`
    pub total_points: i32,
    pub penalty_minutes: i32,
}

/// Season totals of one goalie for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalieSeasonStat {
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub games_played: i32,
    pub goals_against: i32,
    /// Goals-against average with exactly two decimals, e.g. "2.33"
    pub gaa: String,
}

impl PlayerSeasonStat {
    /// Scoring leaderboard order: points, then goals, both descending,
    /// then player and team id.
    pub fn leaderboard_cmp(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| b.goals.cmp(&a.goals))
            .then_with(|| a.player_id.cmp(&b.player_id))
            .then_with(|| a.team_id.cmp(&b.team_id))
    }
}
