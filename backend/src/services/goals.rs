//! Goal and habit service
//!
//! Validation in front of the goal and habit repositories, plus the
//! habit-to-goal linking operation.

use crate::error::ApiError;
use crate::repositories::{GoalRepository, HabitRepository};
use crate::store::DocumentStore;
use tracing::info;
use validator::Validate;
use wellness_shared::models::{Goal, GoalDraft, Habit, HabitDraft, NewGoal, NewHabit};
use wellness_shared::types::{CreateGoalRequest, CreateHabitRequest, LinkHabitRequest};
use wellness_shared::validation::{
    check_field, validate_description, validate_goal_title, validate_habit_name,
    validate_target_completions,
};

/// Goals service for business logic
pub struct GoalsService;

impl GoalsService {
    pub async fn create_habit(
        store: &dyn DocumentStore,
        user_id: &str,
        request: CreateHabitRequest,
    ) -> Result<Habit, ApiError> {
        request.validate()?;
        check_field("name", validate_habit_name(&request.name))?;
        check_field("description", validate_description(&request.description))?;

        let habit = NewHabit::from_draft(
            user_id,
            HabitDraft {
                name: request.name.trim().to_string(),
                description: request.description,
                category: request.category,
                schedule: request.schedule,
            },
        );
        let habit_id = HabitRepository::create_habit(store, habit).await?;
        info!(user_id, habit_id = %habit_id, "Habit created");

        HabitRepository::get_habit(store, &habit_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Habit {habit_id}")))
    }

    pub async fn get_habits(store: &dyn DocumentStore, user_id: &str) -> Result<Vec<Habit>, ApiError> {
        Ok(HabitRepository::get_habits(store, user_id).await?)
    }

    pub async fn create_goal(
        store: &dyn DocumentStore,
        user_id: &str,
        request: CreateGoalRequest,
    ) -> Result<Goal, ApiError> {
        request.validate()?;
        check_field("title", validate_goal_title(&request.title))?;
        check_field("description", validate_description(&request.description))?;
        check_field(
            "target_completions",
            validate_target_completions(request.target_completions),
        )?;

        let goal = NewGoal::from_draft(
            user_id,
            GoalDraft {
                title: request.title.trim().to_string(),
                description: request.description,
                target_completions: request.target_completions,
                source: request.source,
            },
        );
        let goal_id = GoalRepository::create_goal(store, goal).await?;
        info!(user_id, goal_id = %goal_id, "Goal created");

        GoalRepository::get_goal(store, &goal_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Goal {goal_id}")))
    }

    pub async fn get_goals(store: &dyn DocumentStore, user_id: &str) -> Result<Vec<Goal>, ApiError> {
        Ok(GoalRepository::get_goals(store, user_id).await?)
    }

    /// Link one of the user's habits to some of the user's goals
    pub async fn link_habit(
        store: &dyn DocumentStore,
        user_id: &str,
        habit_id: &str,
        request: LinkHabitRequest,
    ) -> Result<Vec<Goal>, ApiError> {
        request.validate()?;

        match HabitRepository::get_habit(store, habit_id).await? {
            Some(habit) if habit.user_id == user_id => {}
            _ => return Err(ApiError::NotFound(format!("Habit {habit_id}"))),
        }

        GoalRepository::link_habit_to_goals(
            store,
            user_id,
            habit_id,
            &request.goal_ids,
            request.recalculate,
        )
        .await?;

        let goals = Self::get_goals(store, user_id).await?;
        Ok(goals
            .into_iter()
            .filter(|goal| request.goal_ids.contains(&goal.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use proptest::prelude::*;

    fn habit_request(name: &str) -> CreateHabitRequest {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    fn goal_request(title: &str, target: Option<u32>) -> CreateGoalRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "target_completions": target
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_habit_trims_name() {
        let store = InMemoryStore::new();
        let habit = GoalsService::create_habit(&store, "u1", habit_request("  Stretch "))
            .await
            .unwrap();
        assert_eq!(habit.name, "Stretch");
        assert_eq!(habit.user_id, "u1");
    }

    #[tokio::test]
    async fn test_create_goal_rejects_blank_title() {
        let store = InMemoryStore::new();
        let result = GoalsService::create_goal(&store, "u1", goal_request("   ", None)).await;
        match result {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("title")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_link_habit_recalculates_progress() {
        let store = InMemoryStore::new();
        let habit = GoalsService::create_habit(&store, "u1", habit_request("Drink Water"))
            .await
            .unwrap();
        let goal = GoalsService::create_goal(&store, "u1", goal_request("Stay Hydrated", Some(10)))
            .await
            .unwrap();

        let linked = GoalsService::link_habit(
            &store,
            "u1",
            &habit.id,
            LinkHabitRequest {
                goal_ids: vec![goal.id.clone()],
                recalculate: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].linked_habit_ids, vec![habit.id]);
        assert_eq!(linked[0].progress_percent, 0.0);
    }

    #[tokio::test]
    async fn test_link_foreign_habit_is_not_found() {
        let store = InMemoryStore::new();
        let habit = GoalsService::create_habit(&store, "u2", habit_request("Read"))
            .await
            .unwrap();
        let result = GoalsService::link_habit(
            &store,
            "u1",
            &habit.id,
            LinkHabitRequest {
                goal_ids: vec!["g1".to_string()],
                recalculate: false,
            },
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn test_stored_habit_name_is_trimmed(
            name in "[A-Za-z][A-Za-z ]{0,30}[A-Za-z]",
            left in " {0,3}",
            right in " {0,3}"
        ) {
            let store = InMemoryStore::new();
            let padded = format!("{left}{name}{right}");
            let habit = tokio_test::block_on(GoalsService::create_habit(
                &store,
                "u1",
                habit_request(&padded),
            ))
            .unwrap();
            prop_assert_eq!(habit.name, name);
        }
    }
}
