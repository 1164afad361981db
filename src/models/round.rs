use super::{DivisionId, RoundId, SeasonId};
use serde::{Deserialize, Serialize};

/// Points awarded per result in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub points_win: i32,
    pub points_draw: i32,
    pub points_loss: i32,
}

impl ScoringRule {
    pub fn new(points_win: i32, points_draw: i32, points_loss: i32) -> Self {
        Self {
            points_win,
            points_draw,
            points_loss,
        }
    }

    pub fn points_for(&self, wins: i32, draws: i32, losses: i32) -> i32 {
        wins * self.points_win + draws * self.points_draw + losses * self.points_loss
    }
}

/// Which season aggregate a round may contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsEligibility {
    PlayerStats,
    GoalieStats,
}

impl StatsEligibility {
    /// Column holding the flag in the `rounds` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::PlayerStats => "counts_for_player_stats",
            Self::GoalieStats => "counts_for_goalie_stats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub division_id: DivisionId,
    /// Season of the round's division
    pub season_id: SeasonId,
    pub name: String,
    pub scoring: ScoringRule,
    pub counts_for_player_stats: bool,
    pub counts_for_goalie_stats: bool,
}

impl Round {
    pub fn counts_for(&self, eligibility: StatsEligibility) -> bool {
        match eligibility {
            StatsEligibility::PlayerStats => self.counts_for_player_stats,
            StatsEligibility::GoalieStats => self.counts_for_goalie_stats,
        }
    }
}
