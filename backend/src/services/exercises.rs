//! Exercise catalog service

use crate::error::ApiError;
use crate::repositories::{ExerciseRepository, OrganisationRepository};
use crate::store::DocumentStore;
use tracing::info;
use validator::Validate;
use wellness_shared::models::Exercise;
use wellness_shared::types::{ExerciseCatalogResponse, PutExerciseRequest};
use wellness_shared::validation::{check_field, validate_plan_name};

pub struct ExerciseService;

impl ExerciseService {
    /// Global exercises, plus the organisation's own when one is given
    pub async fn catalog(
        store: &dyn DocumentStore,
        organisation_id: Option<&str>,
    ) -> Result<ExerciseCatalogResponse, ApiError> {
        let (global, organisation) = match organisation_id {
            Some(organisation_id) => tokio::try_join!(
                ExerciseRepository::get_global_exercises(store),
                OrganisationRepository::get_organisation_exercises(store, organisation_id),
            )?,
            None => (ExerciseRepository::get_global_exercises(store).await?, Vec::new()),
        };
        Ok(ExerciseCatalogResponse {
            global,
            organisation,
        })
    }

    /// Add or replace a global exercise. Catalog ids are numeric.
    pub async fn put_global(
        store: &dyn DocumentStore,
        exercise_id: &str,
        request: PutExerciseRequest,
    ) -> Result<Exercise, ApiError> {
        let id: u32 = exercise_id.parse().map_err(|_| ApiError::Validation {
            message: format!("Global exercise ids are numeric, got {exercise_id:?}"),
            field: Some("exercise_id".to_string()),
        })?;
        request.validate()?;
        check_field("name", validate_plan_name(&request.name))?;

        let exercise = Exercise {
            id: id.to_string(),
            name: request.name.trim().to_string(),
            category: request.category,
            muscle_groups: request.muscle_groups,
            organisation_id: None,
        };
        ExerciseRepository::put_global_exercise(store, id, &exercise).await?;
        info!(exercise_id = id, name = %exercise.name, "Global exercise saved");
        Ok(exercise)
    }
}
