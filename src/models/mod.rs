//! Source facts read by the engine and the derived rows it owns.
//!
//! Source facts (rounds, games, events, lineups, goalie game stats, bonus
//! points) belong to the game-reporting side and are never written by the
//! recalculation procedures. Derived rows (standings, season stats) are fully
//! replaced on every recompute.

pub mod events;
pub mod game;
pub mod round;
pub mod season_stats;
pub mod standings;

pub type SeasonId = i64;
pub type DivisionId = i64;
pub type RoundId = i64;
pub type TeamId = i64;
pub type PlayerId = i64;
pub type GameId = i64;
pub type EventId = i64;

pub use events::{EventKind, GameEvent, GoalDetail, PenaltyDetail};
pub use game::{BonusPoints, BonusTotal, Game, GameScope, GameStatus, GoalieGameStat, LineupEntry};
pub use round::{Round, ScoringRule, StatsEligibility};
pub use season_stats::{GoalieSeasonStat, PlayerSeasonStat};
pub use standings::{StandingsRow, TeamRank};
