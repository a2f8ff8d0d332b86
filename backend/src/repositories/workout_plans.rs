//! Workout plans repository

use super::DocumentRepository;
use crate::store::{DocumentStore, Fields, Filter, StoreResult};
use chrono::Utc;
use serde_json::json;
use wellness_shared::models::{NewWorkoutPlan, PlanExercise, WorkoutPlan};

/// Workout plan repository
pub struct WorkoutPlanRepository;

impl WorkoutPlanRepository {
    pub async fn create_workout_plan(
        store: &dyn DocumentStore,
        plan: NewWorkoutPlan,
    ) -> StoreResult<String> {
        DocumentRepository::<WorkoutPlan>::new(store).create(&plan).await
    }

    pub async fn get_workout_plan(
        store: &dyn DocumentStore,
        plan_id: &str,
    ) -> StoreResult<Option<WorkoutPlan>> {
        DocumentRepository::<WorkoutPlan>::new(store).get(plan_id).await
    }

    pub async fn require_workout_plan(
        store: &dyn DocumentStore,
        plan_id: &str,
    ) -> StoreResult<WorkoutPlan> {
        DocumentRepository::<WorkoutPlan>::new(store).require(plan_id).await
    }

    pub async fn get_workout_plans_for_organisation(
        store: &dyn DocumentStore,
        organisation_id: &str,
    ) -> StoreResult<Vec<WorkoutPlan>> {
        DocumentRepository::<WorkoutPlan>::new(store)
            .query(&[Filter::eq("organisation_id", organisation_id)])
            .await
    }

    /// Plans a user owns or has been assigned, oldest first
    pub async fn get_workout_plans_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> StoreResult<Vec<WorkoutPlan>> {
        let repo = DocumentRepository::<WorkoutPlan>::new(store);
        let owned_filter = [Filter::eq("user_id", user_id)];
        let assigned_filter = [Filter::eq("assigned_user_id", user_id)];
        let (owned, assigned) =
            tokio::try_join!(repo.query(&owned_filter), repo.query(&assigned_filter))?;

        let mut plans = owned;
        for plan in assigned {
            if !plans.iter().any(|p| p.id == plan.id) {
                plans.push(plan);
            }
        }
        plans.sort_by_key(|p| p.created_at);
        Ok(plans)
    }

    /// Merge `patch` into the plan and bump `updated_at`
    pub async fn update_workout_plan(
        store: &dyn DocumentStore,
        plan_id: &str,
        mut patch: Fields,
    ) -> StoreResult<()> {
        patch.insert("updated_at".to_string(), json!(Utc::now()));
        DocumentRepository::<WorkoutPlan>::new(store)
            .update(plan_id, patch)
            .await
    }

    /// Replace the stored exercise list wholesale
    pub async fn replace_exercises(
        store: &dyn DocumentStore,
        plan_id: &str,
        exercises: &[PlanExercise],
    ) -> StoreResult<()> {
        let mut patch = Fields::new();
        patch.insert("exercises".to_string(), serde_json::to_value(exercises)?);
        Self::update_workout_plan(store, plan_id, patch).await
    }

    pub async fn delete_workout_plan(store: &dyn DocumentStore, plan_id: &str) -> StoreResult<()> {
        DocumentRepository::<WorkoutPlan>::new(store).delete(plan_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use wellness_shared::models::{Difficulty, ExerciseRef};

    fn new_plan(user_id: Option<&str>, assigned: Option<&str>) -> NewWorkoutPlan {
        let now = Utc::now();
        NewWorkoutPlan {
            organisation_id: Some("o1".to_string()),
            user_id: user_id.map(str::to_string),
            name: "Full Body".to_string(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            category: "strength".to_string(),
            duration_weeks: 4,
            sessions_per_week: 3,
            exercises: vec![],
            tags: vec![],
            assigned_user_id: assigned.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_plans_for_user_include_assigned() {
        let store = InMemoryStore::new();
        let owned = WorkoutPlanRepository::create_workout_plan(&store, new_plan(Some("u1"), None))
            .await
            .unwrap();
        let assigned =
            WorkoutPlanRepository::create_workout_plan(&store, new_plan(None, Some("u1")))
                .await
                .unwrap();
        WorkoutPlanRepository::create_workout_plan(&store, new_plan(Some("u2"), None))
            .await
            .unwrap();

        let plans = WorkoutPlanRepository::get_workout_plans_for_user(&store, "u1")
            .await
            .unwrap();
        let ids: Vec<_> = plans.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![owned, assigned]);

        let org_plans = WorkoutPlanRepository::get_workout_plans_for_organisation(&store, "o1")
            .await
            .unwrap();
        assert_eq!(org_plans.len(), 3);
    }

    #[tokio::test]
    async fn test_replace_exercises() {
        let store = InMemoryStore::new();
        let id = WorkoutPlanRepository::create_workout_plan(&store, new_plan(Some("u1"), None))
            .await
            .unwrap();

        let exercises = vec![PlanExercise {
            exercise: ExerciseRef::Organisation("kb".to_string()),
            exercise_name: "Kettlebell Swing".to_string(),
            day_index: Some(1),
            sets: Some(3),
            reps: None,
            duration_seconds: None,
            rest_seconds: Some(60),
            order: 1,
            notes: None,
        }];
        WorkoutPlanRepository::replace_exercises(&store, &id, &exercises)
            .await
            .unwrap();

        let plan = WorkoutPlanRepository::require_workout_plan(&store, &id)
            .await
            .unwrap();
        assert_eq!(plan.exercises, exercises);
        assert!(plan.updated_at >= plan.created_at);
    }
}
