use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::models::{BonusTotal, Game, Round, RoundId, StandingsRow, TeamId, TeamRank};
use crate::store::LeagueStore;

#[derive(Debug, Default)]
struct TeamTally {
    team_id: TeamId,
    games_played: i32,
    wins: i32,
    draws: i32,
    losses: i32,
    goals_for: i32,
    goals_against: i32,
    bonus_points: i32,
}

impl TeamTally {
    fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }

    fn record(&mut self, score_for: i32, score_against: i32) {
        self.games_played += 1;
        self.goals_for += score_for;
        self.goals_against += score_against;

        match score_for.cmp(&score_against) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.draws += 1,
        }
    }
}

/// Team tallies kept in first-seen order.
#[derive(Default)]
struct Table {
    tallies: Vec<TeamTally>,
    index: HashMap<TeamId, usize>,
}

impl Table {
    fn entry(&mut self, team_id: TeamId) -> &mut TeamTally {
        let next = self.tallies.len();
        let slot = *self.index.entry(team_id).or_insert(next);
        if slot == next {
            self.tallies.push(TeamTally::new(team_id));
        }
        &mut self.tallies[slot]
    }
}

/// Standings order: total points desc, games played asc, goal difference
/// desc, goals for desc.
///
/// Rows equal on all four keys compare equal; a stable sort then keeps
/// their input order.
pub fn compare_standings(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.games_played.cmp(&b.games_played))
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Builds the ranked standings of `round` from its completed games and
/// bonus totals.
///
/// A team gets a row if it played a game or received bonus points. Teams
/// enter the table in game order (home before away), followed by teams that
/// only have bonus points; that order settles full ties. Missing scores
/// count as 0.
pub fn compute_standings(
    round: &Round,
    games: &[Game],
    bonuses: &[BonusTotal],
    previous: &[TeamRank],
) -> Vec<StandingsRow> {
    let mut table = Table::default();

    for game in games {
        let (home_score, away_score) = game.final_score();
        table.entry(game.home_team_id).record(home_score, away_score);
        table.entry(game.away_team_id).record(away_score, home_score);
    }

    for bonus in bonuses {
        table.entry(bonus.team_id).bonus_points += bonus.total;
    }

    let previous_ranks: HashMap<TeamId, i32> =
        previous.iter().map(|p| (p.team_id, p.rank)).collect();

    let mut rows: Vec<StandingsRow> = table
        .tallies
        .into_iter()
        .map(|tally| {
            let points = round
                .scoring
                .points_for(tally.wins, tally.draws, tally.losses);
            StandingsRow {
                round_id: round.id,
                team_id: tally.team_id,
                games_played: tally.games_played,
                wins: tally.wins,
                draws: tally.draws,
                losses: tally.losses,
                goals_for: tally.goals_for,
                goals_against: tally.goals_against,
                goal_difference: tally.goals_for - tally.goals_against,
                points,
                bonus_points: tally.bonus_points,
                total_points: points + tally.bonus_points,
                rank: 0,
                previous_rank: previous_ranks.get(&tally.team_id).copied(),
            }
        })
        .collect();

    rows.sort_by(compare_standings);
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position as i32 + 1;
    }
    rows
}

/// Rebuilds the standings of one round from scratch.
///
/// An unknown round is a no-op. Previous ranks are read before the old rows
/// are replaced. Storage errors propagate unchanged.
#[instrument(skip(store))]
pub fn recalculate_standings<S: LeagueStore + ?Sized>(
    store: &mut S,
    round_id: RoundId,
) -> Result<(), AppError> {
    let Some(round) = store.get_round(round_id)? else {
        debug!("Round {round_id} does not exist, skipping standings");
        return Ok(());
    };

    let games = store.list_completed_games(&[round_id])?;
    for game in games.iter().filter(|g| g.has_missing_score()) {
        warn!(
            "Completed game {} in round {round_id} is missing a score, counting it as 0",
            game.id
        );
    }

    let bonuses = store.sum_bonus_points(round_id)?;
    let previous = store.list_existing_standings_ranks(round_id)?;
    debug!(
        "Round {round_id}: {} completed games, {} teams with bonus points, {} previous rows",
        games.len(),
        bonuses.len(),
        previous.len()
    );

    let rows = compute_standings(&round, &games, &bonuses, &previous);
    store.replace_standings(round_id, &rows)?;

    info!(
        "Recalculated standings for round {round_id} ({}): {} teams",
        round.name,
        rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameStatus, ScoringRule};

    fn round() -> Round {
        Round {
            id: 1,
            division_id: 1,
            season_id: 1,
            name: "Regular season".to_string(),
            scoring: ScoringRule::new(2, 1, 0),
            counts_for_player_stats: true,
            counts_for_goalie_stats: true,
        }
    }

    fn game(id: i64, home: TeamId, away: TeamId, home_score: i32, away_score: i32) -> Game {
        Game {
            id,
            round_id: 1,
            home_team_id: home,
            away_team_id: away,
            status: GameStatus::Completed,
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }

    fn row(team_id: TeamId) -> StandingsRow {
        StandingsRow {
            round_id: 1,
            team_id,
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            bonus_points: 0,
            total_points: 0,
            rank: 0,
            previous_rank: None,
        }
    }

    #[test]
    fn test_win_draw_loss_tally() {
        let rows = compute_standings(
            &round(),
            &[game(1, 10, 20, 4, 2), game(2, 10, 20, 1, 1)],
            &[],
            &[],
        );

        assert_eq!(rows.len(), 2);
        let a = &rows[0];
        assert_eq!(a.team_id, 10);
        assert_eq!((a.wins, a.draws, a.losses), (1, 1, 0));
        assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (5, 3, 2));
        assert_eq!(a.points, 3);
        assert_eq!(a.rank, 1);

        let b = &rows[1];
        assert_eq!(b.team_id, 20);
        assert_eq!((b.wins, b.draws, b.losses), (0, 1, 1));
        assert_eq!(b.points, 1);
        assert_eq!(b.rank, 2);
    }

    #[test]
    fn test_bonus_only_team_gets_a_row() {
        let rows = compute_standings(
            &round(),
            &[game(1, 10, 20, 2, 0)],
            &[BonusTotal {
                team_id: 30,
                total: 1,
            }],
            &[],
        );

        let c = rows.iter().find(|r| r.team_id == 30).unwrap();
        assert_eq!(c.games_played, 0);
        assert_eq!(c.total_points, 1);
        assert_eq!(c.rank, 2);
    }

    #[test]
    fn test_negative_bonus_can_drop_below_zero() {
        let rows = compute_standings(
            &round(),
            &[game(1, 10, 20, 0, 3)],
            &[BonusTotal {
                team_id: 10,
                total: -2,
            }],
            &[],
        );

        let a = rows.iter().find(|r| r.team_id == 10).unwrap();
        assert_eq!(a.points, 0);
        assert_eq!(a.total_points, -2);
        assert_eq!(a.rank, 2);
    }

    #[test]
    fn test_fewer_games_played_ranks_higher_on_equal_points() {
        let mut a = row(1);
        a.total_points = 4;
        a.games_played = 3;
        let mut b = row(2);
        b.total_points = 4;
        b.games_played = 2;

        assert_eq!(compare_standings(&a, &b), Ordering::Greater);
        assert_eq!(compare_standings(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_goals_for_breaks_tie_after_goal_difference() {
        let mut a = row(1);
        a.goal_difference = 1;
        a.goals_for = 3;
        let mut b = row(2);
        b.goal_difference = 1;
        b.goals_for = 5;

        assert_eq!(compare_standings(&b, &a), Ordering::Less);
        assert_eq!(compare_standings(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_full_tie_keeps_game_order() {
        let rows = compute_standings(
            &round(),
            &[game(1, 30, 40, 2, 2), game(2, 10, 20, 2, 2)],
            &[],
            &[],
        );

        let order: Vec<TeamId> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(order, vec![30, 40, 10, 20]);
        let ranks: Vec<i32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_previous_rank_is_carried_per_team() {
        let rows = compute_standings(
            &round(),
            &[game(1, 10, 20, 0, 1)],
            &[],
            &[
                TeamRank {
                    team_id: 10,
                    rank: 1,
                },
                TeamRank {
                    team_id: 99,
                    rank: 2,
                },
            ],
        );

        let a = rows.iter().find(|r| r.team_id == 10).unwrap();
        assert_eq!(a.previous_rank, Some(1));
        assert_eq!(a.rank_change(), Some(-1));
        let b = rows.iter().find(|r| r.team_id == 20).unwrap();
        assert_eq!(b.previous_rank, None);
        assert!(rows.iter().all(|r| r.team_id != 99));
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let mut g = game(1, 10, 20, 0, 0);
        g.home_score = Some(2);
        g.away_score = None;

        let rows = compute_standings(&round(), &[g], &[], &[]);
        let b = rows.iter().find(|r| r.team_id == 20).unwrap();
        assert_eq!((b.goals_for, b.goals_against, b.losses), (0, 2, 1));
    }
}
