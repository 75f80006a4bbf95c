use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use resource_realms::cli::{Scenario, ScenarioError};
use resource_realms::coords::{Corner, Edge};
use resource_realms::game::{
    GameConfig, GameEvent, GameState, PlayerState, WinManager, calculate_longest_road,
    calculate_victory_points, get_victory_points_for_display, initialize_victory_points,
    play_knight, update_longest_road,
};
use resource_realms::types::{Achievement, Color};

fn five_road_chain() -> Vec<Edge> {
    (0..5).map(|e| Edge::new(0, 0, e)).collect()
}

#[test]
fn full_table_through_game_state() {
    let mut state = GameState::new(GameConfig {
        num_players: 2,
        ..GameConfig::default()
    });

    state.build_settlement(0, Corner::new(0, 0, 0)).unwrap();
    state.build_settlement(0, Corner::new(1, 1, 1)).unwrap();
    state.build_city(0, Corner::new(1, 1, 1)).unwrap();
    for edge in five_road_chain() {
        state.build_road(0, edge).unwrap();
    }
    for _ in 0..3 {
        state.play_knight(0).unwrap();
    }
    state.add_victory_point_card(0).unwrap();

    let own = state.victory_points_for_display(0, 0).unwrap();
    let seen_by_opponent = state.victory_points_for_display(0, 1).unwrap();
    assert_eq!(own.total, 8);
    assert_eq!(own.display, 8);
    assert_eq!(seen_by_opponent.display, 7);
    assert!(state.players[0].has_longest_road());
    assert!(state.players[0].has_largest_army());
    assert!(!state.is_finished());

    let awards: Vec<Achievement> = state
        .history()
        .iter()
        .filter_map(|event| match event {
            GameEvent::AchievementChanged { achievement, .. } => Some(*achievement),
            _ => None,
        })
        .collect();
    assert_eq!(awards, vec![Achievement::LongestRoad, Achievement::LargestArmy]);
}

#[test]
fn full_table_through_free_functions() {
    let mut players = vec![PlayerState::new(Color::Red), PlayerState::new(Color::Blue)];
    let red = &mut players[0];
    red.settlements.push(Corner::new(0, 0, 0));
    red.cities.push(Corner::new(1, 1, 1));
    red.roads = five_road_chain();
    red.add_dev_card(resource_realms::types::DevelopmentCard::VictoryPoint);
    initialize_victory_points(red);

    assert_eq!(calculate_longest_road(&players[0]), 5);
    update_longest_road(&mut players);
    for _ in 0..3 {
        play_knight(0, &mut players);
    }

    assert_eq!(calculate_victory_points(&players[0], true), 8);
    assert_eq!(calculate_victory_points(&players[0], false), 7);
    let display = get_victory_points_for_display(&players[0], false);
    assert_eq!(display.display, 7);
    assert_eq!(display.hidden, 1);
}

#[test]
fn four_roads_earn_no_bonus() {
    let mut players = vec![PlayerState::new(Color::Red), PlayerState::new(Color::Blue)];
    players[0].roads = five_road_chain()[..4].to_vec();
    let change = update_longest_road(&mut players);
    assert_eq!(change.current, None);
    assert_eq!(calculate_victory_points(&players[0], true), 0);
}

#[test]
fn tied_challenger_does_not_take_longest_road() {
    let mut players = vec![PlayerState::new(Color::Red), PlayerState::new(Color::Blue)];
    players[0].roads = five_road_chain();
    update_longest_road(&mut players);
    assert!(players[0].has_longest_road());

    players[1].roads = (0..5).map(|e| Edge::new(-2, 2, e)).collect();
    for _ in 0..3 {
        let change = update_longest_road(&mut players);
        assert!(!change.changed());
    }
    assert!(players[0].has_longest_road());
    assert!(!players[1].has_longest_road());

    players[1].roads.push(Edge::new(-2, 2, 5));
    let change = update_longest_road(&mut players);
    assert_eq!(change.current, Some(1));
    assert!(!players[0].has_longest_road());
}

#[test]
fn first_winner_sticks() {
    let mut players = vec![PlayerState::new(Color::Red), PlayerState::new(Color::Blue)];
    for player in players.iter_mut() {
        player.cities = (0..5).map(|q| Corner::new(q * 3, 0, 0)).collect();
        initialize_victory_points(player);
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut manager = WinManager::new(10);
    let sink = Rc::clone(&seen);
    manager.on_win(move |won| sink.borrow_mut().push(won.winner));

    assert!(manager.check_win_condition(1, &players));
    assert!(!manager.check_win_condition(0, &players));
    assert!(manager.check_win_condition(1, &players));
    assert_eq!(manager.winner(), Some(1));
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn scenario_scores_like_game_state() {
    let json = r#"{
        "config": {"vps_to_win": 8},
        "players": [
            {
                "color": "Red",
                "settlements": [{"q": 0, "r": 0, "corner": 0}],
                "cities": [{"q": 1, "r": 1, "corner": 1}],
                "roads": [
                    {"q": 0, "r": 0, "edge": 0},
                    {"q": 0, "r": 0, "edge": 1},
                    {"q": 0, "r": 0, "edge": 2},
                    {"q": 0, "r": 0, "edge": 3},
                    {"q": 0, "r": 0, "edge": 4}
                ],
                "knights_played": 3,
                "dev_cards": ["VictoryPoint"]
            },
            {"color": "Blue"}
        ]
    }"#;
    let state = Scenario::from_json(json).unwrap().into_state();
    assert_eq!(state.winner(), Some(0));
    let vp = state.victory_points_for_display(0, 1).unwrap();
    assert_eq!((vp.total, vp.public), (8, 7));
}

#[test]
fn missing_scenario_file_is_an_io_error() {
    let err = Scenario::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
}

proptest! {
    #[test]
    fn win_is_never_reassigned(order in proptest::collection::vec(0usize..3, 1..20)) {
        let mut players: Vec<PlayerState> =
            Color::ORDERED[..3].iter().map(|c| PlayerState::new(*c)).collect();
        for player in players.iter_mut() {
            player.cities = (0..5).map(|q| Corner::new(q * 3, 0, 0)).collect();
            initialize_victory_points(player);
        }
        let mut manager = WinManager::new(10);
        let first = order[0];
        for idx in order {
            let won = manager.check_win_condition(idx, &players);
            prop_assert_eq!(won, idx == first);
            prop_assert_eq!(manager.winner(), Some(first));
        }
    }
}
