//! Onboarding wizard API routes
//!
//! The wizard state lives with the client and is sent back with every
//! action; the server only loads context, applies the transition, and
//! persists the finished state.

use crate::error::ApiError;
use crate::services::OnboardingService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use wellness_shared::catalog::GOAL_TEMPLATES;
use wellness_shared::onboarding::OnboardingState;
use wellness_shared::types::{
    CompleteOnboardingRequest, CompletionOutcome, OnboardingActionRequest,
    OnboardingContextQuery, OnboardingContextResponse, StartOnboardingRequest,
};

pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/onboarding/context", get(get_context))
        .route("/users/:user_id/onboarding/start", post(start))
        .route("/users/:user_id/onboarding/actions", post(apply_action))
        .route("/users/:user_id/onboarding/complete", post(complete))
}

/// GET /api/v1/users/:user_id/onboarding/context?organisation_id=
async fn get_context(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<OnboardingContextQuery>,
) -> Result<Json<OnboardingContextResponse>, ApiError> {
    let context =
        OnboardingService::load_context(state.store(), &user_id, query.organisation_id.as_deref())
            .await?;
    Ok(Json(OnboardingContextResponse {
        goal_templates: GOAL_TEMPLATES.to_vec(),
        context,
    }))
}

/// POST /api/v1/users/:user_id/onboarding/start
async fn start(Json(req): Json<StartOnboardingRequest>) -> Json<OnboardingState> {
    Json(OnboardingService::start(req.mode, req.exit_allowed))
}

/// POST /api/v1/users/:user_id/onboarding/actions - Apply one transition
async fn apply_action(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<OnboardingActionRequest>,
) -> Result<Json<OnboardingState>, ApiError> {
    let next = OnboardingService::apply(
        state.store(),
        &user_id,
        req.organisation_id.as_deref(),
        req.state,
        req.action,
    )
    .await?;
    Ok(Json(next))
}

/// POST /api/v1/users/:user_id/onboarding/complete - Persist the wizard
async fn complete(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CompleteOnboardingRequest>,
) -> Result<Json<CompletionOutcome>, ApiError> {
    let outcome =
        OnboardingService::complete(state.store(), state.reporter(), &user_id, &req.state).await?;
    Ok(Json(outcome))
}
