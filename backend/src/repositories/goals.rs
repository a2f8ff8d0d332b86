//! Goals repository

use super::{habits::HabitRepository, DocumentRepository};
use crate::store::{DocumentStore, Fields, Filter, StoreError, StoreResult};
use serde_json::json;
use tracing::debug;
use wellness_shared::models::{Goal, NewGoal};

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Create a goal, returning its id
    pub async fn create_goal(store: &dyn DocumentStore, goal: NewGoal) -> StoreResult<String> {
        DocumentRepository::<Goal>::new(store).create(&goal).await
    }

    pub async fn get_goal(store: &dyn DocumentStore, goal_id: &str) -> StoreResult<Option<Goal>> {
        DocumentRepository::<Goal>::new(store).get(goal_id).await
    }

    /// All goals owned by a user, oldest first
    pub async fn get_goals(store: &dyn DocumentStore, user_id: &str) -> StoreResult<Vec<Goal>> {
        DocumentRepository::<Goal>::new(store)
            .query(&[Filter::eq("user_id", user_id)])
            .await
    }

    /// Link a habit to each of `goal_ids`.
    ///
    /// Every goal must exist and belong to `user_id`; otherwise nothing is
    /// written. With `recalculate`, each goal's completed count and progress
    /// are recomputed from its linked habits.
    pub async fn link_habit_to_goals(
        store: &dyn DocumentStore,
        user_id: &str,
        habit_id: &str,
        goal_ids: &[String],
        recalculate: bool,
    ) -> StoreResult<()> {
        let repo = DocumentRepository::<Goal>::new(store);
        let found = repo.get_many(goal_ids).await?;

        let mut goals = Vec::with_capacity(goal_ids.len());
        for goal_id in goal_ids {
            let goal = found
                .iter()
                .find(|goal| &goal.id == goal_id && goal.user_id == user_id)
                .ok_or_else(|| StoreError::not_found("goals", goal_id))?;
            if !goals.iter().any(|g: &&Goal| g.id == goal.id) {
                goals.push(goal);
            }
        }

        for goal in goals {
            let mut linked = goal.linked_habit_ids.clone();
            if !goal.is_linked(habit_id) {
                linked.push(habit_id.to_string());
            }

            let mut patch = Fields::new();
            patch.insert("linked_habit_ids".to_string(), json!(linked));

            if recalculate {
                let habits = HabitRepository::get_habits_by_ids(store, &linked).await?;
                let completed: u32 = habits.iter().map(|h| h.completion_count).sum();
                let progress = Goal::calculate_progress(completed, goal.target_completions);
                patch.insert("completed_count".to_string(), json!(completed));
                patch.insert("progress_percent".to_string(), json!(progress));
            }

            repo.update(&goal.id, patch).await?;
            debug!(goal_id = %goal.id, habit_id, recalculate, "Linked habit to goal");
        }

        Ok(())
    }
}
