//! Exercise catalog routes

use crate::error::ApiError;
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use wellness_shared::models::Exercise;
use wellness_shared::types::{ExerciseCatalogQuery, ExerciseCatalogResponse, PutExerciseRequest};

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(get_catalog))
        .route("/exercises/:exercise_id", put(put_exercise))
}

/// GET /api/v1/exercises?organisation_id=
async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<ExerciseCatalogQuery>,
) -> Result<Json<ExerciseCatalogResponse>, ApiError> {
    let catalog =
        ExerciseService::catalog(state.store(), query.organisation_id.as_deref()).await?;
    Ok(Json(catalog))
}

/// PUT /api/v1/exercises/:exercise_id - Add or replace a global exercise
async fn put_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<String>,
    Json(req): Json<PutExerciseRequest>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = ExerciseService::put_global(state.store(), &exercise_id, req).await?;
    Ok(Json(exercise))
}
