//! Organisation catalog repository

use super::{DocumentRepository, OrganisationExercise};
use crate::store::{DocumentStore, Filter, StoreResult};
use wellness_shared::models::{Exercise, OrganisationGoal, OrganisationHabit};

pub struct OrganisationRepository;

impl OrganisationRepository {
    pub async fn get_organisation_goals(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<OrganisationGoal>> {
        DocumentRepository::<OrganisationGoal>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    pub async fn get_organisation_habits(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<OrganisationHabit>> {
        DocumentRepository::<OrganisationHabit>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    pub async fn get_organisation_exercises(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<Exercise>> {
        let exercises = DocumentRepository::<OrganisationExercise>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await?;
        Ok(exercises.into_iter().map(|e| e.0).collect())
    }
}
