//! Integration tests for habit and goal endpoints

mod common;

use axum::http::StatusCode;
use common::{TestApp, WriteOp};
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_habits() {
    let app = TestApp::new();

    let (status, habit) = app
        .post(
            "/api/v1/users/u1/habits",
            &json!({"name": "Evening Walk", "category": "fitness"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(habit["name"], "Evening Walk");
    assert_eq!(habit["completion_count"], 0);

    let (_, habits) = app.get("/api/v1/users/u1/habits").await;
    assert_eq!(habits.as_array().unwrap().len(), 1);

    let (_, other) = app.get("/api/v1/users/u2/habits").await;
    assert_eq!(other, json!([]));
}

#[tokio::test]
async fn test_create_goal_validation_names_field() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/users/u1/goals",
            &json!({"title": "Read more", "target_completions": 0}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "target_completions");
    assert_eq!(app.store.count(WriteOp::Create, "goals"), 0);
}

#[tokio::test]
async fn test_link_habit_to_goals() {
    let app = TestApp::new();
    let (_, habit) = app
        .post("/api/v1/users/u1/habits", &json!({"name": "Read"}))
        .await;
    let (_, first) = app
        .post(
            "/api/v1/users/u1/goals",
            &json!({"title": "Finish 12 books", "target_completions": 12}),
        )
        .await;
    let (_, second) = app
        .post("/api/v1/users/u1/goals", &json!({"title": "Learn daily"}))
        .await;

    let habit_id = habit["id"].as_str().unwrap();
    let path = format!("/api/v1/users/u1/habits/{habit_id}/link");
    let body = json!({"goal_ids": [first["id"], second["id"]]});

    let (status, goals) = app.post(&path, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals.as_array().unwrap().len(), 2);

    // Linking again does not duplicate the habit id
    app.post(&path, &body).await;
    let (_, goals) = app.get("/api/v1/users/u1/goals").await;
    for goal in goals.as_array().unwrap() {
        assert_eq!(goal["linked_habit_ids"], json!([habit_id]));
    }
}

#[tokio::test]
async fn test_link_to_foreign_goal_writes_nothing() {
    let app = TestApp::new();
    let (_, habit) = app
        .post("/api/v1/users/u1/habits", &json!({"name": "Read"}))
        .await;
    let (_, mine) = app
        .post("/api/v1/users/u1/goals", &json!({"title": "Mine"}))
        .await;
    let (_, theirs) = app
        .post("/api/v1/users/u2/goals", &json!({"title": "Theirs"}))
        .await;
    app.store.reset();

    let path = format!("/api/v1/users/u1/habits/{}/link", habit["id"].as_str().unwrap());
    let (status, _) = app
        .post(&path, &json!({"goal_ids": [mine["id"], theirs["id"]]}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.store.writes().is_empty());
}
