//! Membership admin service: packs, tiers and the purchase ledger

use crate::error::ApiError;
use crate::repositories::MembershipRepository;
use crate::store::DocumentStore;
use std::collections::{BTreeSet, HashMap};
use tracing::info;
use wellness_shared::models::{MembershipTier, Pack, Purchase};
use wellness_shared::types::{PurchaseKind, PurchaseView, ToggleActiveResponse};

const UNKNOWN_PACK: &str = "Unknown Pack";
const UNKNOWN_TIER: &str = "Unknown Tier";
const UNKNOWN_USER: &str = "Unknown User";

pub struct MembershipService;

impl MembershipService {
    pub async fn list_packs(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> Result<Vec<Pack>, ApiError> {
        Ok(MembershipRepository::get_packs(store, organisation_id).await?)
    }

    pub async fn list_tiers(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> Result<Vec<MembershipTier>, ApiError> {
        Ok(MembershipRepository::get_tiers(store, organisation_id).await?)
    }

    /// Flip a pack's `active` flag: one read, one update
    pub async fn toggle_pack_active(
        store: &dyn DocumentStore,
        pack_id: &str,
    ) -> Result<ToggleActiveResponse, ApiError> {
        let pack = MembershipRepository::get_pack(store, pack_id).await?;
        let active = !pack.active;
        MembershipRepository::set_pack_active(store, pack_id, active).await?;
        info!(pack_id, active, "Pack active flag toggled");
        Ok(ToggleActiveResponse {
            id: pack.id,
            active,
        })
    }

    /// Flip a membership tier's `active` flag: one read, one update
    pub async fn toggle_tier_active(
        store: &dyn DocumentStore,
        tier_id: &str,
    ) -> Result<ToggleActiveResponse, ApiError> {
        let tier = MembershipRepository::get_tier(store, tier_id).await?;
        let active = !tier.active;
        MembershipRepository::set_tier_active(store, tier_id, active).await?;
        info!(tier_id, active, "Membership tier active flag toggled");
        Ok(ToggleActiveResponse {
            id: tier.id,
            active,
        })
    }

    /// Purchases joined with user, pack and tier labels.
    ///
    /// Referenced documents are fetched in one batch per collection;
    /// dangling references fall back to placeholder labels.
    pub async fn list_purchases(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> Result<Vec<PurchaseView>, ApiError> {
        let purchases = MembershipRepository::get_purchases(store, organisation_id).await?;

        let user_ids = collect_ids(purchases.iter().map(|p| Some(&p.user_id)));
        let pack_ids = collect_ids(purchases.iter().map(|p| p.pack_id.as_ref()));
        let tier_ids = collect_ids(purchases.iter().map(|p| p.tier_id.as_ref()));

        let (users, packs, tiers) = tokio::try_join!(
            MembershipRepository::get_users_by_ids(store, &user_ids),
            MembershipRepository::get_packs_by_ids(store, &pack_ids),
            MembershipRepository::get_tiers_by_ids(store, &tier_ids),
        )?;

        let user_names: HashMap<&str, &str> = users
            .iter()
            .map(|u| (u.id.as_str(), u.display_name.as_str()))
            .collect();
        let pack_names: HashMap<&str, &str> = packs
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();
        let tier_names: HashMap<&str, &str> = tiers
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect();

        Ok(purchases
            .into_iter()
            .map(|purchase| join_purchase(purchase, &user_names, &pack_names, &tier_names))
            .collect())
    }
}

fn collect_ids<'a>(ids: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
    ids.flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn join_purchase(
    purchase: Purchase,
    user_names: &HashMap<&str, &str>,
    pack_names: &HashMap<&str, &str>,
    tier_names: &HashMap<&str, &str>,
) -> PurchaseView {
    let (kind, item_name) = match (&purchase.pack_id, &purchase.tier_id) {
        (Some(pack_id), _) => (
            PurchaseKind::Pack,
            pack_names.get(pack_id.as_str()).copied().unwrap_or(UNKNOWN_PACK),
        ),
        (None, Some(tier_id)) => (
            PurchaseKind::Tier,
            tier_names.get(tier_id.as_str()).copied().unwrap_or(UNKNOWN_TIER),
        ),
        (None, None) => (PurchaseKind::Tier, UNKNOWN_TIER),
    };

    PurchaseView {
        user_name: user_names
            .get(purchase.user_id.as_str())
            .copied()
            .unwrap_or(UNKNOWN_USER)
            .to_string(),
        item_name: item_name.to_string(),
        kind,
        id: purchase.id,
        user_id: purchase.user_id,
        amount: purchase.amount,
        purchased_at: purchase.purchased_at,
    }
}
