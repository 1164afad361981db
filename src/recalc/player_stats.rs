use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, instrument};

use super::eligible_completed_game_ids;
use crate::error::AppError;
use crate::models::{
    GameEvent, GameId, LineupEntry, PlayerId, PlayerSeasonStat, SeasonId, StatsEligibility,
    TeamId,
};
use crate::store::LeagueStore;

#[derive(Debug, Default)]
struct PlayerTally {
    games: HashSet<GameId>,
    goals: i32,
    assists: i32,
    penalty_minutes: i32,
}

/// Merges goals, assists, penalty minutes and lineup appearances into one
/// row per (player, team).
///
/// The team is always the one recorded on the event or lineup row, so a
/// player who moved mid-season gets one row per team. Games played counts
/// distinct games, not lineup rows. Rows come out ordered by player, then
/// team.
pub fn aggregate_player_stats(
    season_id: SeasonId,
    goal_events: &[GameEvent],
    penalty_events: &[GameEvent],
    lineups: &[LineupEntry],
) -> Vec<PlayerSeasonStat> {
    let mut tallies: BTreeMap<(PlayerId, TeamId), PlayerTally> = BTreeMap::new();

    for event in goal_events {
        let Some(goal) = event.as_goal() else {
            continue;
        };
        if let Some(scorer) = goal.scorer_id {
            tallies.entry((scorer, event.team_id)).or_default().goals += 1;
        }
        for assist in [goal.assist1_id, goal.assist2_id].into_iter().flatten() {
            tallies.entry((assist, event.team_id)).or_default().assists += 1;
        }
    }

    for event in penalty_events {
        let Some(penalty) = event.as_penalty() else {
            continue;
        };
        if let Some(player) = penalty.player_id {
            tallies
                .entry((player, event.team_id))
                .or_default()
                .penalty_minutes += penalty.minutes;
        }
    }

    for entry in lineups {
        tallies
            .entry((entry.player_id, entry.team_id))
            .or_default()
            .games
            .insert(entry.game_id);
    }

    tallies
        .into_iter()
        .map(|((player_id, team_id), tally)| PlayerSeasonStat {
            season_id,
            player_id,
            team_id,
            games_played: tally.games.len() as i32,
            goals: tally.goals,
            assists: tally.assists,
            total_points: tally.goals + tally.assists,
            penalty_minutes: tally.penalty_minutes,
        })
        .collect()
}

/// Rebuilds the skater statistics of one season from scratch.
///
/// Only completed games in rounds flagged `counts_for_player_stats` count.
/// A season without such games ends up with no rows.
#[instrument(skip(store))]
pub fn recalculate_player_stats<S: LeagueStore + ?Sized>(
    store: &mut S,
    season_id: SeasonId,
) -> Result<(), AppError> {
    let game_ids = eligible_completed_game_ids(store, season_id, StatsEligibility::PlayerStats)?;
    if game_ids.is_empty() {
        store.replace_player_season_stats(season_id, &[])?;
        info!("Cleared player stats for season {season_id}: no eligible games");
        return Ok(());
    }

    let goals = store.list_goal_events(&game_ids)?;
    let penalties = store.list_penalty_events(&game_ids)?;
    let lineups = store.list_lineup_entries(&game_ids)?;
    debug!(
        "Season {season_id}: {} goal events, {} penalty events, {} lineup rows",
        goals.len(),
        penalties.len(),
        lineups.len()
    );

    let rows = aggregate_player_stats(season_id, &goals, &penalties, &lineups);
    store.replace_player_season_stats(season_id, &rows)?;

    info!(
        "Recalculated player stats for season {season_id}: {} rows from {} games",
        rows.len(),
        game_ids.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, GoalDetail, PenaltyDetail};

    fn goal(
        game_id: GameId,
        team_id: TeamId,
        scorer: Option<PlayerId>,
        assist1: Option<PlayerId>,
        assist2: Option<PlayerId>,
    ) -> GameEvent {
        GameEvent {
            id: 0,
            game_id,
            team_id,
            period: 1,
            time_in_period: "05:00".to_string(),
            kind: EventKind::Goal(GoalDetail {
                scorer_id: scorer,
                assist1_id: assist1,
                assist2_id: assist2,
                goalie_scored_on_id: None,
            }),
        }
    }

    fn penalty(game_id: GameId, team_id: TeamId, player: Option<PlayerId>, minutes: i32) -> GameEvent {
        GameEvent {
            id: 0,
            game_id,
            team_id,
            period: 2,
            time_in_period: "11:30".to_string(),
            kind: EventKind::Penalty(PenaltyDetail {
                player_id: player,
                penalty_type: "hooking".to_string(),
                minutes,
                description: None,
            }),
        }
    }

    fn lineup(game_id: GameId, player_id: PlayerId, team_id: TeamId) -> LineupEntry {
        LineupEntry {
            game_id,
            player_id,
            team_id,
            position: None,
        }
    }

    #[test]
    fn test_assist1_and_assist2_are_summed() {
        let goals = vec![
            goal(1, 10, Some(1), Some(2), None),
            goal(1, 10, Some(3), Some(1), Some(2)),
        ];

        let rows = aggregate_player_stats(7, &goals, &[], &[]);
        let p2 = rows.iter().find(|r| r.player_id == 2).unwrap();
        assert_eq!((p2.goals, p2.assists, p2.total_points), (0, 2, 2));
        let p1 = rows.iter().find(|r| r.player_id == 1).unwrap();
        assert_eq!((p1.goals, p1.assists, p1.total_points), (1, 1, 2));
        assert!(rows.iter().all(|r| r.season_id == 7));
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let rows = aggregate_player_stats(
            1,
            &[goal(1, 10, Some(5), None, None)],
            &[penalty(1, 20, Some(6), 2)],
            &[],
        );

        assert_eq!(rows.len(), 2);
        let scorer = &rows[0];
        assert_eq!(scorer.player_id, 5);
        assert_eq!((scorer.games_played, scorer.penalty_minutes), (0, 0));
        let penalized = &rows[1];
        assert_eq!(penalized.player_id, 6);
        assert_eq!((penalized.goals, penalized.assists, penalized.penalty_minutes), (0, 0, 2));
    }

    #[test]
    fn test_penalty_minutes_are_summed_and_bench_penalties_skipped() {
        let rows = aggregate_player_stats(
            1,
            &[],
            &[
                penalty(1, 10, Some(4), 2),
                penalty(2, 10, Some(4), 5),
                penalty(2, 10, None, 2),
            ],
            &[],
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].penalty_minutes, 7);
    }

    #[test]
    fn test_games_played_counts_distinct_games() {
        let rows = aggregate_player_stats(
            1,
            &[],
            &[],
            &[lineup(1, 8, 10), lineup(1, 8, 10), lineup(2, 8, 10)],
        );

        assert_eq!(rows[0].games_played, 2);
    }

    #[test]
    fn test_rows_follow_event_team() {
        let rows = aggregate_player_stats(
            1,
            &[goal(1, 10, Some(9), None, None), goal(4, 20, Some(9), None, None)],
            &[],
            &[lineup(1, 9, 10), lineup(4, 9, 20)],
        );

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].team_id, rows[0].goals, rows[0].games_played), (10, 1, 1));
        assert_eq!((rows[1].team_id, rows[1].goals, rows[1].games_played), (20, 1, 1));
    }

    #[test]
    fn test_wrong_event_kind_is_ignored() {
        let rows = aggregate_player_stats(1, &[penalty(1, 10, Some(1), 2)], &[], &[]);
        assert!(rows.is_empty());
    }
}
