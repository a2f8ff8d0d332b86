//! Workout plan API routes

use crate::error::ApiError;
use crate::services::WorkoutPlanService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use wellness_shared::models::WorkoutPlan;
use wellness_shared::plan_editor::PlanExercisePatch;
use wellness_shared::types::{
    AddPlanExerciseRequest, CreateWorkoutPlanRequest, DayGroupsResponse, UpdateWorkoutPlanRequest,
    WorkoutPlanQuery,
};

/// Create workout plan routes
pub fn workout_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_plan).get(list_plans))
        .route("/:plan_id", get(get_plan).put(update_plan).delete(delete_plan))
        .route("/:plan_id/days", get(get_days))
        .route("/:plan_id/exercises", post(add_exercise))
        .route(
            "/:plan_id/exercises/:index",
            patch(update_exercise).delete(remove_exercise),
        )
}

/// POST /api/v1/workout-plans
async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreateWorkoutPlanRequest>,
) -> Result<(StatusCode, Json<WorkoutPlan>), ApiError> {
    let plan = WorkoutPlanService::create(state.store(), req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/workout-plans?organisation_id=|user_id=
async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<WorkoutPlanQuery>,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    let plans = WorkoutPlanService::list(state.store(), &query).await?;
    Ok(Json(plans))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = WorkoutPlanService::get(state.store(), &plan_id).await?;
    Ok(Json(plan))
}

/// PUT /api/v1/workout-plans/:plan_id - Partial update
async fn update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(req): Json<UpdateWorkoutPlanRequest>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = WorkoutPlanService::update(state.store(), &plan_id, req).await?;
    Ok(Json(plan))
}

async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    WorkoutPlanService::delete(state.store(), &plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/workout-plans/:plan_id/days - Exercises grouped by day
async fn get_days(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<DayGroupsResponse>, ApiError> {
    let (plan, days) = WorkoutPlanService::day_groups(state.store(), &plan_id).await?;
    Ok(Json(DayGroupsResponse {
        plan_id: plan.id,
        sessions_per_week: plan.sessions_per_week,
        days,
    }))
}

async fn add_exercise(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(req): Json<AddPlanExerciseRequest>,
) -> Result<(StatusCode, Json<WorkoutPlan>), ApiError> {
    let plan = WorkoutPlanService::add_exercise(state.store(), &plan_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update_exercise(
    State(state): State<AppState>,
    Path((plan_id, index)): Path<(String, usize)>,
    Json(patch): Json<PlanExercisePatch>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = WorkoutPlanService::update_exercise(state.store(), &plan_id, index, patch).await?;
    Ok(Json(plan))
}

async fn remove_exercise(
    State(state): State<AppState>,
    Path((plan_id, index)): Path<(String, usize)>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = WorkoutPlanService::remove_exercise(state.store(), &plan_id, index).await?;
    Ok(Json(plan))
}
