//! Habit and goal API routes

use crate::error::ApiError;
use crate::services::GoalsService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use wellness_shared::models::{Goal, Habit};
use wellness_shared::types::{CreateGoalRequest, CreateHabitRequest, LinkHabitRequest};

/// Create habit and goal routes
pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/habits",
            get(list_habits).post(create_habit),
        )
        .route("/users/:user_id/habits/:habit_id/link", post(link_habit))
        .route("/users/:user_id/goals", get(list_goals).post(create_goal))
}

/// GET /api/v1/users/:user_id/habits
async fn list_habits(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = GoalsService::get_habits(state.store(), &user_id).await?;
    Ok(Json(habits))
}

/// POST /api/v1/users/:user_id/habits
async fn create_habit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let habit = GoalsService::create_habit(state.store(), &user_id, req).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

/// POST /api/v1/users/:user_id/habits/:habit_id/link - Link a habit to goals
async fn link_habit(
    State(state): State<AppState>,
    Path((user_id, habit_id)): Path<(String, String)>,
    Json(req): Json<LinkHabitRequest>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = GoalsService::link_habit(state.store(), &user_id, &habit_id, req).await?;
    Ok(Json(goals))
}

/// GET /api/v1/users/:user_id/goals
async fn list_goals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = GoalsService::get_goals(state.store(), &user_id).await?;
    Ok(Json(goals))
}

/// POST /api/v1/users/:user_id/goals
async fn create_goal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let goal = GoalsService::create_goal(state.store(), &user_id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}
