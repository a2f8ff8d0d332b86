//! Onboarding service
//!
//! Loads the data the wizard reads, applies transitions, and runs the
//! completion routine once the wizard reaches its final step. Completion
//! never fails the request because of a write: the first failing write is
//! reported and whatever was persisted before it is returned.
//!
//! Each wizard carries a session id issued by [`OnboardingService::start`].
//! The outcome is recorded under that id, so completing the same session
//! again returns the recorded outcome without writing anything.

use super::reporter::ErrorReporter;
use crate::error::ApiError;
use crate::repositories::{
    GoalRepository, HabitRepository, OnboardingRepository, OrganisationRepository,
};
use crate::store::{DocumentStore, StoreResult};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wellness_shared::models::{NewGoal, NewHabit};
use wellness_shared::onboarding::{
    CompletionPlan, OnboardingAction, OnboardingContext, OnboardingMode, OnboardingState,
    OnboardingStep,
};
use wellness_shared::types::CompletionOutcome;

/// Onboarding service for business logic
pub struct OnboardingService;

impl OnboardingService {
    /// Fetch the user's habits and the organisation catalog concurrently
    pub async fn load_context(
        store: &dyn DocumentStore,
        user_id: &str,
        organisation_id: Option<&str>,
    ) -> Result<OnboardingContext, ApiError> {
        let Some(organisation_id) = organisation_id else {
            let existing_habits = HabitRepository::get_habits(store, user_id).await?;
            return Ok(OnboardingContext {
                existing_habits,
                ..Default::default()
            });
        };

        let (existing_habits, organisation_goals, organisation_habits) = tokio::try_join!(
            HabitRepository::get_habits(store, user_id),
            OrganisationRepository::get_organisation_goals(store, organisation_id),
            OrganisationRepository::get_organisation_habits(store, organisation_id),
        )?;

        Ok(OnboardingContext {
            existing_habits,
            organisation_goals,
            organisation_habits,
        })
    }

    /// Fresh wizard state with a new session id
    pub fn start(mode: OnboardingMode, exit_allowed: bool) -> OnboardingState {
        OnboardingState::new(mode, exit_allowed).with_session(Uuid::new_v4().to_string())
    }

    /// Apply one wizard action against freshly loaded context
    pub async fn apply(
        store: &dyn DocumentStore,
        user_id: &str,
        organisation_id: Option<&str>,
        state: OnboardingState,
        action: OnboardingAction,
    ) -> Result<OnboardingState, ApiError> {
        let context = Self::load_context(store, user_id, organisation_id).await?;
        let next = state.apply(action, &context)?;
        debug!(user_id, step = next.step.name(), "Applied onboarding action");
        Ok(next)
    }

    /// Persist a finished wizard.
    ///
    /// An exited wizard writes nothing. A wizard still on the goal or habit
    /// step, or one without a session id, cannot be completed.
    pub async fn complete(
        store: &dyn DocumentStore,
        reporter: &dyn ErrorReporter,
        user_id: &str,
        state: &OnboardingState,
    ) -> Result<CompletionOutcome, ApiError> {
        match state.step {
            OnboardingStep::Exited => return Ok(CompletionOutcome::default()),
            OnboardingStep::Complete => {}
            step => {
                return Err(ApiError::validation(format!(
                    "Onboarding cannot be completed from the {} step",
                    step.name()
                )))
            }
        }

        let session_id = state.session_id.as_deref().ok_or_else(|| {
            ApiError::validation("Onboarding must be started before it can be completed")
        })?;
        if let Some(session) = OnboardingRepository::get_session(store, session_id).await? {
            if session.user_id != user_id {
                return Err(ApiError::NotFound(format!("Onboarding session {session_id}")));
            }
            debug!(user_id, session_id, "Onboarding already completed");
            return Ok(session.outcome);
        }

        let plan = state.completion_plan();
        let mut outcome = CompletionOutcome::default();
        if let Err(err) = persist(store, user_id, plan, &mut outcome).await {
            reporter.report("onboarding.complete", &err);
            outcome.failed = true;
        }
        if let Err(err) =
            OnboardingRepository::record_session(store, session_id, user_id, &outcome).await
        {
            reporter.report("onboarding.record_session", &err);
        }

        info!(
            user_id,
            goal_id = ?outcome.goal_id,
            created = outcome.created_habit_ids.len(),
            linked = outcome.linked_habit_ids.len(),
            failed = outcome.failed,
            "Onboarding completed"
        );
        Ok(outcome)
    }
}

/// Goal first, then new habits linked without recalculation, then existing
/// habits linked with recalculation. Stops at the first failing write.
///
/// Only habits the user owns are linked; other ids are dropped.
async fn persist(
    store: &dyn DocumentStore,
    user_id: &str,
    plan: CompletionPlan,
    outcome: &mut CompletionOutcome,
) -> StoreResult<()> {
    let habits_to_link = if plan.habits_to_link.is_empty() || plan.goal.is_none() {
        Vec::new()
    } else {
        let owned: HashSet<String> = HabitRepository::get_habits(store, user_id)
            .await?
            .into_iter()
            .map(|habit| habit.id)
            .collect();
        plan.habits_to_link
            .into_iter()
            .filter(|habit_id| {
                let keep = owned.contains(habit_id);
                if !keep {
                    warn!(user_id, habit_id = %habit_id, "Skipping link to a habit the user does not own");
                }
                keep
            })
            .collect()
    };

    if let Some(draft) = plan.goal {
        let goal_id = GoalRepository::create_goal(store, NewGoal::from_draft(user_id, draft)).await?;
        outcome.goal_id = Some(goal_id);
    }
    let goal_ids: Vec<String> = outcome.goal_id.iter().cloned().collect();

    for draft in plan.habits_to_create {
        let habit_id =
            HabitRepository::create_habit(store, NewHabit::from_draft(user_id, draft)).await?;
        if !goal_ids.is_empty() {
            GoalRepository::link_habit_to_goals(store, user_id, &habit_id, &goal_ids, false)
                .await?;
        }
        outcome.created_habit_ids.push(habit_id);
    }

    if goal_ids.is_empty() {
        return Ok(());
    }
    for habit_id in habits_to_link {
        GoalRepository::link_habit_to_goals(store, user_id, &habit_id, &goal_ids, true).await?;
        outcome.linked_habit_ids.push(habit_id);
    }

    Ok(())
}
