// HTTP-level tests for the Battlesnake endpoints using Rocket's local client

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use heuristic_snake::bot::Bot;
use heuristic_snake::config::Config;
use heuristic_snake::server;

fn client() -> Client {
    Client::tracked(server::build(Bot::new(Config::default_hardcoded())))
        .expect("valid rocket instance")
}

fn game_state(head: (i32, i32), body: &[(i32, i32)], food: &[(i32, i32)]) -> String {
    let body: Vec<Value> = body.iter().map(|&(x, y)| json!({"x": x, "y": y})).collect();
    let food: Vec<Value> = food.iter().map(|&(x, y)| json!({"x": x, "y": y})).collect();
    let you = json!({
        "id": "me",
        "name": "me",
        "health": 90,
        "body": body,
        "head": {"x": head.0, "y": head.1},
        "length": body.len(),
        "latency": "12",
        "shout": ""
    });
    json!({
        "game": {
            "id": "http-game",
            "ruleset": {"name": "standard", "version": "v1.0.0"},
            "timeout": 500,
            "source": "custom"
        },
        "turn": 7,
        "board": {
            "height": 11,
            "width": 11,
            "food": food,
            "hazards": [],
            "snakes": [you.clone()]
        },
        "you": you
    })
    .to_string()
}

#[test]
fn test_index_returns_appearance() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some(server::SERVER_ID)
    );
    let body: Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["color"], "#880088");
    assert_eq!(body["head"], "default");
    assert_eq!(body["tail"], "default");
}

#[test]
fn test_start_and_end_acknowledge() {
    let client = client();
    let state = game_state((5, 5), &[(5, 5), (5, 5), (5, 5)], &[(1, 1)]);

    let start = client
        .post("/start")
        .header(ContentType::JSON)
        .body(state.clone())
        .dispatch();
    assert_eq!(start.status(), Status::Ok);

    let end = client
        .post("/end")
        .header(ContentType::JSON)
        .body(state)
        .dispatch();
    assert_eq!(end.status(), Status::Ok);
}

#[test]
fn test_move_returns_desired_direction() {
    let client = client();
    let state = game_state((5, 5), &[(5, 5), (4, 5), (3, 5)], &[(10, 10)]);

    for _ in 0..20 {
        let response = client
            .post("/move")
            .header(ContentType::JSON)
            .body(state.clone())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let body: Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
        let chosen = body["move"].as_str().unwrap().to_string();
        assert!(chosen == "up" || chosen == "right", "unexpected move {}", chosen);
    }
}

#[test]
fn test_move_rejects_malformed_body() {
    let client = client();
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body("{\"turn\": 1}")
        .dispatch();
    assert_ne!(response.status(), Status::Ok);
}
