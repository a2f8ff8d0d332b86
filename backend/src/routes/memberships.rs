//! Membership admin routes: packs, tiers, purchases

use crate::error::ApiError;
use crate::services::MembershipService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use wellness_shared::models::{MembershipTier, Pack};
use wellness_shared::types::{PurchaseView, ToggleActiveResponse};

pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/packs/:pack_id/toggle-active", post(toggle_pack))
        .route("/membership-tiers/:tier_id/toggle-active", post(toggle_tier))
        .route("/organisations/:org_id/packs", get(list_packs))
        .route("/organisations/:org_id/membership-tiers", get(list_tiers))
        .route("/organisations/:org_id/purchases", get(list_purchases))
}

async fn toggle_pack(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
) -> Result<Json<ToggleActiveResponse>, ApiError> {
    let toggled = MembershipService::toggle_pack_active(state.store(), &pack_id).await?;
    Ok(Json(toggled))
}

async fn toggle_tier(
    State(state): State<AppState>,
    Path(tier_id): Path<String>,
) -> Result<Json<ToggleActiveResponse>, ApiError> {
    let toggled = MembershipService::toggle_tier_active(state.store(), &tier_id).await?;
    Ok(Json(toggled))
}

async fn list_packs(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<Json<Vec<Pack>>, ApiError> {
    Ok(Json(MembershipService::list_packs(state.store(), &org_id).await?))
}

async fn list_tiers(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<Json<Vec<MembershipTier>>, ApiError> {
    Ok(Json(MembershipService::list_tiers(state.store(), &org_id).await?))
}

/// GET /api/v1/organisations/:org_id/purchases - Purchase ledger with labels
async fn list_purchases(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<Json<Vec<PurchaseView>>, ApiError> {
    Ok(Json(MembershipService::list_purchases(state.store(), &org_id).await?))
}
