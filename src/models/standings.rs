use super::{RoundId, TeamId};
use serde::{Deserialize, Serialize};

/// One ranked line of a round's standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub round_id: RoundId,
    pub team_id: TeamId,
    pub games_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    /// Points from results under the round's scoring rule
    pub points: i32,
    pub bonus_points: i32,
    /// `points + bonus_points`
    pub total_points: i32,
    /// 1-based, consecutive
    pub rank: i32,
    /// Rank from the row this one replaced, if the team had one
    pub previous_rank: Option<i32>,
}

impl StandingsRow {
    /// Positive when the team climbed since the previous recompute.
    pub fn rank_change(&self) -> Option<i32> {
        self.previous_rank.map(|previous| previous - self.rank)
    }
}

/// Rank a team held in the stored standings before a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRank {
    pub team_id: TeamId,
    pub rank: i32,
}
