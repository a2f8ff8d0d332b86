//! Global exercise catalog repository

use super::{DocumentRepository, GlobalExercise};
use crate::store::{DocumentStore, StoreResult};
use wellness_shared::models::Exercise;

pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Global exercises; only documents with numeric ids are catalog entries
    pub async fn get_global_exercises(store: &dyn DocumentStore) -> StoreResult<Vec<Exercise>> {
        let exercises = DocumentRepository::<GlobalExercise>::new(store)
            .query(&[])
            .await?;
        Ok(exercises
            .into_iter()
            .map(|e| e.0)
            .filter(|e| e.id.parse::<u32>().is_ok())
            .collect())
    }

    /// Add or replace a global exercise under its numeric id
    pub async fn put_global_exercise(
        store: &dyn DocumentStore,
        id: u32,
        exercise: &Exercise,
    ) -> StoreResult<()> {
        DocumentRepository::<GlobalExercise>::new(store)
            .set(&id.to_string(), exercise)
            .await
    }
}
