use super::{EventId, GameId, PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// A goal or penalty recorded in a game report.
///
/// `team_id` is the team the event was credited to at the time it happened.
/// Season statistics are grouped by this team, not by the player's current
/// roster team, so points earned before a transfer stay with the old team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub game_id: GameId,
    pub team_id: TeamId,
    pub period: i32,
    /// Game clock within the period, "mm:ss"
    pub time_in_period: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Goal(GoalDetail),
    Penalty(PenaltyDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDetail {
    pub scorer_id: Option<PlayerId>,
    pub assist1_id: Option<PlayerId>,
    pub assist2_id: Option<PlayerId>,
    pub goalie_scored_on_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyDetail {
    pub player_id: Option<PlayerId>,
    pub penalty_type: String,
    pub minutes: i32,
    pub description: Option<String>,
}

impl EventKind {
    /// Discriminator value used by the storage layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Goal(_) => "goal",
            EventKind::Penalty(_) => "penalty",
        }
    }
}

impl GameEvent {
    pub fn as_goal(&self) -> Option<&GoalDetail> {
        match &self.kind {
            EventKind::Goal(goal) => Some(goal),
            EventKind::Penalty(_) => None,
        }
    }

    pub fn as_penalty(&self) -> Option<&PenaltyDetail> {
        match &self.kind {
            EventKind::Penalty(penalty) => Some(penalty),
            EventKind::Goal(_) => None,
        }
    }
}
