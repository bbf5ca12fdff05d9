// Integration tests for the per-turn move selection
//
// Each scenario builds a board by hand, runs the full Bot decision many times
// and checks every drawn move against the set it must come from.

use serde_json::json;
use heuristic_snake::bot::Bot;
use heuristic_snake::config::Config;
use heuristic_snake::moves::Tier;
use heuristic_snake::types::{Battlesnake, Board, Coord, Direction, Game};

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
        squad: None,
    }
}

fn board(snakes: Vec<Battlesnake>, food: &[(i32, i32)]) -> Board {
    Board {
        height: 11,
        width: 11,
        food: food.iter().map(|&(x, y)| Coord { x, y }).collect(),
        snakes,
        hazards: vec![],
    }
}

fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: json!({}),
        timeout: 500,
        source: "test".to_string(),
    }
}

/// Head at (5, 5) facing right, food up and to the right
#[test]
fn test_center_snake_moves_toward_food() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(5, 5), (4, 5), (3, 5)]);
    let board = board(vec![you.clone()], &[(10, 10)]);

    let mut seen = Vec::new();
    for turn in 0..200 {
        let decision = bot.decide(&board, &you, turn);
        assert_eq!(decision.tier, Tier::Preferred);
        assert!(
            decision.direction == Direction::Up || decision.direction == Direction::Right,
            "unexpected move {:?}",
            decision.direction
        );
        if !seen.contains(&decision.direction) {
            seen.push(decision.direction);
        }
    }
    // Both desired moves should come up over 200 draws
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_corner_snake_never_leaves_board() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(0, 0), (0, 1)]);
    let board = board(vec![you.clone()], &[(0, 0)]);

    for turn in 0..100 {
        let decision = bot.decide(&board, &you, turn);
        assert_ne!(decision.direction, Direction::Down);
        assert_ne!(decision.direction, Direction::Left);
        assert_ne!(decision.direction, Direction::Up, "up is the neck");
        assert_eq!(decision.direction, Direction::Right);
    }
}

/// Fully boxed in: walls below and left, bodies above and right
#[test]
fn test_boxed_in_snake_returns_default_down() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(0, 0), (0, 1), (1, 1), (1, 0)]);
    let board = board(vec![you.clone()], &[(5, 5)]);

    for turn in 0..20 {
        let response = bot.get_move(&game(), &turn, &board, &you);
        assert_eq!(response["move"], "down");
    }
}

/// Head-to-head risk: the only food move ends next to another head
#[test]
fn test_food_move_next_to_other_head_is_dropped() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(5, 5), (4, 5), (3, 5)]);
    // Other head at (7, 5): stepping right to (6, 5) puts us next to it
    let other = snake("other", &[(7, 5), (8, 5), (9, 5)]);
    let board = board(vec![you.clone(), other], &[(10, 5)]);

    for turn in 0..100 {
        let decision = bot.decide(&board, &you, turn);
        assert_eq!(decision.tier, Tier::Safe);
        assert_ne!(decision.direction, Direction::Left);
    }
}

/// Neck avoidance with a snake above and another to the right, food in the corner behind
#[test]
fn test_neck_avoidance_with_neighbours() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(2, 0), (1, 0), (0, 0)]);
    let above = snake("above", &[(1, 1), (0, 1)]);
    let right = snake("right", &[(3, 0), (4, 0), (5, 0)]);
    let board = board(vec![you.clone(), above, right], &[(0, 0), (10, 10)]);

    for turn in 0..100 {
        let response = bot.get_move(&game(), &turn, &board, &you);
        let chosen = response["move"].as_str().unwrap();
        assert_ne!(chosen, "left", "snake moved onto its own neck");
        assert_ne!(chosen, "right", "snake moved into another snake's head");
        assert_ne!(chosen, "down", "snake moved off the board");
        assert_eq!(chosen, "up");
    }
}

#[test]
fn test_empty_food_list_falls_back_to_safe_moves() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(5, 5), (4, 5), (3, 5)]);
    let board = board(vec![you.clone()], &[]);

    for turn in 0..100 {
        let decision = bot.decide(&board, &you, turn);
        assert_eq!(decision.tier, Tier::Safe);
        assert_ne!(decision.direction, Direction::Left);
    }
}

#[test]
fn test_food_on_same_column_prefers_single_axis() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(5, 5), (4, 5)]);
    let board = board(vec![you.clone()], &[(5, 1), (0, 10)]);

    for turn in 0..50 {
        let decision = bot.decide(&board, &you, turn);
        assert_eq!(decision.tier, Tier::Preferred);
        assert_eq!(decision.direction, Direction::Down);
    }
}

#[test]
fn test_mover_missing_from_board_is_still_rasterized() {
    let bot = Bot::new(Config::default_hardcoded());
    let you = snake("me", &[(5, 5), (6, 5), (7, 5)]);
    // Our snake is not part of the board's snake list
    let board = board(vec![snake("other", &[(0, 10), (1, 10)])], &[(10, 5)]);

    for turn in 0..50 {
        let decision = bot.decide(&board, &you, turn);
        assert_ne!(decision.direction, Direction::Right, "right is our own neck");
    }
}
