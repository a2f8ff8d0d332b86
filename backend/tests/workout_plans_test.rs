//! Integration tests for workout plan endpoints

mod common;

use axum::http::StatusCode;
use common::{TestApp, WriteOp};
use serde_json::{json, Value};

async fn seed_exercises(app: &TestApp) {
    app.seed_with_id(
        "exercises",
        "1",
        &json!({"name": "Back Squat", "category": "strength"}),
    )
    .await;
    app.seed_with_id(
        "exercises",
        "2",
        &json!({"name": "Treadmill Run", "category": "cardio"}),
    )
    .await;
    app.seed_with_id(
        "organisation_exercises",
        "kb",
        &json!({"name": "Kettlebell Swing", "category": "strength", "organisation_id": "gym"}),
    )
    .await;
}

async fn create_plan(app: &TestApp, body: Value) -> String {
    let (status, plan) = app.post("/api/v1/workout-plans", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{plan}");
    plan["id"].as_str().unwrap().to_string()
}

fn org_plan() -> Value {
    json!({
        "organisation_id": "gym",
        "name": "Strength Block",
        "difficulty": "intermediate",
        "duration_weeks": 8,
        "sessions_per_week": 3
    })
}

fn orders(plan: &Value) -> Vec<u64> {
    plan["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["order"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_plan_validation() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/workout-plans",
            &json!({"organisation_id": "gym", "name": "x", "duration_weeks": 4, "sessions_per_week": 8}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "sessions_per_week");

    let (status, _) = app
        .post(
            "/api/v1/workout-plans",
            &json!({"name": "Orphan", "duration_weeks": 4, "sessions_per_week": 3}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.writes().is_empty());
}

#[tokio::test]
async fn test_exercise_editing_keeps_order_contiguous() {
    let app = TestApp::new();
    seed_exercises(&app).await;
    let plan_id = create_plan(&app, org_plan()).await;
    let exercises = format!("/api/v1/workout-plans/{plan_id}/exercises");

    for (source_id, day_index) in [("1", 0), ("org:kb", 1), ("2", 1), ("1", 2)] {
        let (status, body) = app
            .post(
                &exercises,
                &json!({"source_id": source_id, "day_index": day_index}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, plan) = app.delete(&format!("{exercises}/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders(&plan), vec![1, 2, 3]);
    assert_eq!(plan["exercises"][1]["exercise_name"], "Treadmill Run");
    assert_eq!(plan["exercises"][1]["duration_seconds"], 300);

    let (status, plan) = app
        .patch(
            &format!("{exercises}/0"),
            &json!({"sets": null, "reps": 12, "notes": "pause at the bottom"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["exercises"][0]["sets"], Value::Null);
    assert_eq!(plan["exercises"][0]["reps"], 12);
    assert_eq!(plan["exercises"][0]["rest_seconds"], 60);

    let (status, _) = app.delete(&format!("{exercises}/9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_exercise_source() {
    let app = TestApp::new();
    seed_exercises(&app).await;
    let plan_id = create_plan(&app, org_plan()).await;
    let exercises = format!("/api/v1/workout-plans/{plan_id}/exercises");

    let (status, _) = app.post(&exercises, &json!({"source_id": "404"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post(&exercises, &json!({"source_id": "squat"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_day_groups_include_extra_days() {
    let app = TestApp::new();
    seed_exercises(&app).await;
    let plan_id = create_plan(&app, org_plan()).await;

    app.post(
        &format!("/api/v1/workout-plans/{plan_id}/exercises"),
        &json!({"source_id": "1", "day_index": 5}),
    )
    .await;

    let (status, body) = app
        .get(&format!("/api/v1/workout-plans/{plan_id}/days"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let days: Vec<u64> = body["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["day_index"].as_u64().unwrap())
        .collect();
    assert_eq!(days, vec![0, 1, 2, 5]);
    assert_eq!(body["days"][3]["exercises"][0]["index"], 0);
}

#[tokio::test]
async fn test_save_replaces_exercise_list_in_one_update() {
    let app = TestApp::new();
    seed_exercises(&app).await;
    let plan_id = create_plan(&app, org_plan()).await;
    app.store.reset();

    app.post(
        &format!("/api/v1/workout-plans/{plan_id}/exercises"),
        &json!({"source_id": "2"}),
    )
    .await;

    assert_eq!(app.store.count(WriteOp::Update, "workout_plans"), 1);
}

#[tokio::test]
async fn test_update_list_and_delete_plan() {
    let app = TestApp::new();
    let plan_id = create_plan(&app, org_plan()).await;
    create_plan(
        &app,
        json!({"user_id": "u1", "name": "Home Routine", "duration_weeks": 4, "sessions_per_week": 2}),
    )
    .await;

    let (status, plan) = app
        .put(
            &format!("/api/v1/workout-plans/{plan_id}"),
            &json!({"name": "Strength Block II", "assigned_user_id": "u1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["name"], "Strength Block II");
    assert_eq!(plan["sessions_per_week"], 3);

    let (_, plans) = app.get("/api/v1/workout-plans?user_id=u1").await;
    assert_eq!(plans.as_array().unwrap().len(), 2);

    let (_, plans) = app.get("/api/v1/workout-plans?organisation_id=gym").await;
    assert_eq!(plans.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/api/v1/workout-plans").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .delete(&format!("/api/v1/workout-plans/{plan_id}"))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/workout-plans/{plan_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
