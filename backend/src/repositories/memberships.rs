//! Packs, membership tiers and purchases

use super::DocumentRepository;
use crate::store::{DocumentStore, Fields, Filter, StoreResult};
use serde_json::json;
use wellness_shared::models::{MembershipTier, Pack, Purchase, User};

pub struct MembershipRepository;

impl MembershipRepository {
    pub async fn get_pack(store: &dyn DocumentStore, pack_id: &str) -> StoreResult<Pack> {
        DocumentRepository::<Pack>::new(store).require(pack_id).await
    }

    pub async fn get_packs(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<Pack>> {
        DocumentRepository::<Pack>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    pub async fn get_packs_by_ids(store: &dyn DocumentStore, ids: &[String]) -> StoreResult<Vec<Pack>> {
        DocumentRepository::<Pack>::new(store).get_many(ids).await
    }

    pub async fn set_pack_active(
        store: &dyn DocumentStore,
        pack_id: &str,
        active: bool,
    ) -> StoreResult<()> {
        DocumentRepository::<Pack>::new(store)
            .update(pack_id, active_patch(active))
            .await
    }

    pub async fn get_tier(store: &dyn DocumentStore, tier_id: &str) -> StoreResult<MembershipTier> {
        DocumentRepository::<MembershipTier>::new(store)
            .require(tier_id)
            .await
    }

    pub async fn get_tiers(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<MembershipTier>> {
        DocumentRepository::<MembershipTier>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    pub async fn get_tiers_by_ids(
        store: &dyn DocumentStore,
        ids: &[String],
    ) -> StoreResult<Vec<MembershipTier>> {
        DocumentRepository::<MembershipTier>::new(store)
            .get_many(ids)
            .await
    }

    pub async fn set_tier_active(
        store: &dyn DocumentStore,
        tier_id: &str,
        active: bool,
    ) -> StoreResult<()> {
        DocumentRepository::<MembershipTier>::new(store)
            .update(tier_id, active_patch(active))
            .await
    }

    /// Purchases made at an organisation, oldest first
    pub async fn get_purchases(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<Purchase>> {
        DocumentRepository::<Purchase>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    pub async fn get_users_by_ids(store: &dyn DocumentStore, ids: &[String]) -> StoreResult<Vec<User>> {
        DocumentRepository::<User>::new(store).get_many(ids).await
    }
}

fn active_patch(active: bool) -> Fields {
    let mut patch = Fields::new();
    patch.insert("active".to_string(), json!(active));
    patch
}
