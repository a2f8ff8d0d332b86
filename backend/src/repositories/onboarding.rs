//! Onboarding session repository

use super::DocumentRepository;
use crate::store::{DocumentStore, StoreResult};
use chrono::Utc;
use wellness_shared::models::OnboardingSession;
use wellness_shared::types::CompletionOutcome;

/// Completed onboarding runs, keyed by session id
pub struct OnboardingRepository;

impl OnboardingRepository {
    pub async fn get_session(
        store: &dyn DocumentStore,
        session_id: &str,
    ) -> StoreResult<Option<OnboardingSession>> {
        DocumentRepository::<OnboardingSession>::new(store)
            .get(session_id)
            .await
    }

    /// Store the outcome of a completion so a replay returns it unchanged
    pub async fn record_session(
        store: &dyn DocumentStore,
        session_id: &str,
        user_id: &str,
        outcome: &CompletionOutcome,
    ) -> StoreResult<()> {
        let session = OnboardingSession {
            id: session_id.to_string(),
            user_id: user_id.to_string(),
            outcome: outcome.clone(),
            completed_at: Utc::now(),
        };
        DocumentRepository::<OnboardingSession>::new(store)
            .set(session_id, &session)
            .await
    }
}
