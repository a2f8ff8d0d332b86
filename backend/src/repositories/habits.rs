//! Habits repository

use super::DocumentRepository;
use crate::store::{DocumentStore, Filter, StoreResult};
use wellness_shared::models::{Habit, NewHabit};

/// Habit repository
pub struct HabitRepository;

impl HabitRepository {
    /// Create a habit, returning its id
    pub async fn create_habit(store: &dyn DocumentStore, habit: NewHabit) -> StoreResult<String> {
        DocumentRepository::<Habit>::new(store).create(&habit).await
    }

    pub async fn get_habit(store: &dyn DocumentStore, habit_id: &str) -> StoreResult<Option<Habit>> {
        DocumentRepository::<Habit>::new(store).get(habit_id).await
    }

    /// All habits owned by a user, oldest first
    pub async fn get_habits(store: &dyn DocumentStore, user_id: &str) -> StoreResult<Vec<Habit>> {
        DocumentRepository::<Habit>::new(store)
            .query(&[Filter::eq("user_id", user_id)])
            .await
    }

    pub async fn get_habits_by_ids(
        store: &dyn DocumentStore,
        habit_ids: &[String],
    ) -> StoreResult<Vec<Habit>> {
        DocumentRepository::<Habit>::new(store).get_many(habit_ids).await
    }
}
