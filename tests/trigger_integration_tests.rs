//! Triggers resolve the right scopes and leave unrelated scopes alone

use rink_stats::{
    LeagueStore, MemoryStore,
    models::{GameStatus, ScoringRule},
    recalc::{
        on_bonus_points_changed, on_game_result_changed, on_round_rules_changed,
        recalculate_season,
    },
    testing_utils::TestDataBuilder,
};

/// Season 1 (rounds 1, 2) and season 2 (round 3), one game each.
fn league() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.rounds = vec![
        TestDataBuilder::create_round(1, 1, ScoringRule::new(2, 1, 0)),
        TestDataBuilder::create_round(2, 1, ScoringRule::new(2, 1, 0)),
        TestDataBuilder::create_round(3, 2, ScoringRule::new(2, 1, 0)),
    ];
    store.games = vec![
        TestDataBuilder::create_completed_game(1, 1, 10, 20, 2, 1),
        TestDataBuilder::create_scheduled_game(2, 2, 20, 10),
        TestDataBuilder::create_completed_game(3, 3, 10, 20, 0, 1),
    ];
    store.events = vec![
        TestDataBuilder::create_goal(1, 1, 10, Some(1), Some(2), None),
        TestDataBuilder::create_goal(2, 3, 20, Some(3), None, None),
    ];
    store.goalie_game_stats = vec![
        TestDataBuilder::create_goalie_line(1, 9, 20, 2),
        TestDataBuilder::create_goalie_line(3, 9, 20, 0),
    ];
    store
}

#[test]
fn test_game_result_trigger_rebuilds_round_and_season() {
    let mut store = league();
    store.games[1].status = GameStatus::Completed;
    store.games[1].home_score = Some(4);
    store.games[1].away_score = Some(4);
    store.events.push(TestDataBuilder::create_goal(3, 2, 20, Some(3), None, None));

    let summary = on_game_result_changed(&mut store, 2).unwrap();
    assert_eq!(summary.standings_rounds, vec![2]);
    assert_eq!(summary.player_stats_seasons, vec![1]);
    assert_eq!(summary.goalie_stats_seasons, vec![1]);

    let rows = store.standings(2).unwrap();
    assert!(rows.iter().all(|r| r.draws == 1 && r.points == 1));
    assert!(store.standings(1).unwrap().is_empty());
    assert!(store.player_season_stats(2).unwrap().is_empty());

    let players = store.player_season_stats(1).unwrap();
    assert_eq!(players.len(), 3);
    assert!(players.iter().any(|p| p.player_id == 3 && p.team_id == 20 && p.goals == 1));
}

#[test]
fn test_bonus_trigger_only_touches_standings() {
    let mut store = league();
    store.bonus_points.push(TestDataBuilder::create_bonus(20, 1, 2));

    let summary = on_bonus_points_changed(&mut store, 1).unwrap();
    assert_eq!(summary.standings_rounds, vec![1]);
    assert!(summary.player_stats_seasons.is_empty());
    assert!(summary.goalie_stats_seasons.is_empty());
    assert!(store.player_stats.is_empty());

    let rows = store.standings(1).unwrap();
    assert_eq!((rows[0].team_id, rows[0].total_points), (20, 2));
    assert_eq!(rows[1].team_id, 10);
}

#[test]
fn test_rule_trigger_rebuilds_season_of_round() {
    let mut store = league();
    recalculate_season(&mut store, 2).unwrap();
    assert_eq!(store.player_season_stats(2).unwrap().len(), 1);

    store.rounds[2].counts_for_player_stats = false;
    store.rounds[2].scoring = ScoringRule::new(3, 1, 0);
    let summary = on_round_rules_changed(&mut store, 3).unwrap();

    assert_eq!(summary.player_stats_seasons, vec![2]);
    assert!(store.player_season_stats(2).unwrap().is_empty());
    assert_eq!(store.goalie_season_stats(2).unwrap().len(), 1);
    assert_eq!(store.standings(3).unwrap()[0].points, 3);
}

#[test]
fn test_season_recompute_covers_every_round() {
    let mut store = league();
    let summary = recalculate_season(&mut store, 1).unwrap();

    assert_eq!(summary.standings_rounds, vec![1, 2]);
    assert_eq!(store.standings(1).unwrap().len(), 2);
    // Round 2 has no completed game yet
    assert!(store.standings(2).unwrap().is_empty());

    let goalies = store.goalie_season_stats(1).unwrap();
    assert_eq!(goalies.len(), 1);
    assert_eq!(goalies[0].gaa, "2.00");
    assert!(store.goalie_season_stats(2).unwrap().is_empty());
    assert!(summary.to_string().contains("standings rounds [1, 2]"));
}
