//! Workout plan service
//!
//! Plan CRUD plus exercise editing. Every exercise edit loads the plan,
//! applies one [`WorkoutPlanEditor`] operation, and writes the whole
//! exercise list back.

use crate::error::ApiError;
use crate::repositories::{to_fields, ExerciseRepository, OrganisationRepository, WorkoutPlanRepository};
use crate::store::DocumentStore;
use chrono::Utc;
use tracing::info;
use validator::Validate;
use wellness_shared::models::{NewWorkoutPlan, WorkoutPlan};
use wellness_shared::plan_editor::{DayGroup, ExerciseCatalog, PlanExercisePatch, WorkoutPlanEditor};
use wellness_shared::types::{
    AddPlanExerciseRequest, CreateWorkoutPlanRequest, UpdateWorkoutPlanRequest, WorkoutPlanQuery,
};
use wellness_shared::validation::{
    check_field, validate_description, validate_duration_weeks, validate_plan_name,
    validate_sessions_per_week,
};

pub struct WorkoutPlanService;

impl WorkoutPlanService {
    pub async fn create(
        store: &dyn DocumentStore,
        request: CreateWorkoutPlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        request.validate()?;
        check_field("name", validate_plan_name(&request.name))?;
        check_field("description", validate_description(&request.description))?;
        check_field(
            "sessions_per_week",
            validate_sessions_per_week(request.sessions_per_week),
        )?;
        check_field("duration_weeks", validate_duration_weeks(request.duration_weeks))?;

        if request.organisation_id.is_none() && request.user_id.is_none() {
            return Err(ApiError::validation(
                "A workout plan needs an organisation_id or a user_id",
            ));
        }

        let now = Utc::now();
        let plan = NewWorkoutPlan {
            organisation_id: request.organisation_id,
            user_id: request.user_id,
            name: request.name.trim().to_string(),
            description: request.description,
            difficulty: request.difficulty,
            category: request.category,
            duration_weeks: request.duration_weeks,
            sessions_per_week: request.sessions_per_week,
            exercises: WorkoutPlanEditor::renumbered(request.exercises),
            tags: request.tags,
            assigned_user_id: request.assigned_user_id,
            created_at: now,
            updated_at: now,
        };

        let plan_id = WorkoutPlanRepository::create_workout_plan(store, plan).await?;
        info!(plan_id = %plan_id, "Workout plan created");
        Ok(WorkoutPlanRepository::require_workout_plan(store, &plan_id).await?)
    }

    pub async fn get(store: &dyn DocumentStore, plan_id: &str) -> Result<WorkoutPlan, ApiError> {
        Ok(WorkoutPlanRepository::require_workout_plan(store, plan_id).await?)
    }

    /// Plans of an organisation, or the plans a user owns or was assigned
    pub async fn list(
        store: &dyn DocumentStore,
        query: &WorkoutPlanQuery,
    ) -> Result<Vec<WorkoutPlan>, ApiError> {
        let plans = match (&query.organisation_id, &query.user_id) {
            (Some(organisation_id), _) => {
                WorkoutPlanRepository::get_workout_plans_for_organisation(store, organisation_id)
                    .await?
            }
            (None, Some(user_id)) => {
                WorkoutPlanRepository::get_workout_plans_for_user(store, user_id).await?
            }
            (None, None) => {
                return Err(ApiError::BadRequest(
                    "organisation_id or user_id is required".to_string(),
                ))
            }
        };
        Ok(plans)
    }

    /// Merge the present fields into the stored plan
    pub async fn update(
        store: &dyn DocumentStore,
        plan_id: &str,
        mut request: UpdateWorkoutPlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        request.validate()?;
        if let Some(name) = &request.name {
            check_field("name", validate_plan_name(name))?;
        }
        if let Some(sessions) = request.sessions_per_week {
            check_field("sessions_per_week", validate_sessions_per_week(sessions))?;
        }
        if let Some(weeks) = request.duration_weeks {
            check_field("duration_weeks", validate_duration_weeks(weeks))?;
        }
        request.exercises = request.exercises.map(WorkoutPlanEditor::renumbered);

        WorkoutPlanRepository::require_workout_plan(store, plan_id).await?;
        WorkoutPlanRepository::update_workout_plan(store, plan_id, to_fields(&request)?).await?;
        info!(plan_id, "Workout plan updated");
        Self::get(store, plan_id).await
    }

    pub async fn delete(store: &dyn DocumentStore, plan_id: &str) -> Result<(), ApiError> {
        WorkoutPlanRepository::delete_workout_plan(store, plan_id).await?;
        info!(plan_id, "Workout plan deleted");
        Ok(())
    }

    /// Resolve `source_id` against the global and organisation catalogs and
    /// append it to the plan
    pub async fn add_exercise(
        store: &dyn DocumentStore,
        plan_id: &str,
        request: AddPlanExerciseRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        let (plan, global) = tokio::try_join!(
            WorkoutPlanRepository::require_workout_plan(store, plan_id),
            ExerciseRepository::get_global_exercises(store),
        )?;
        let organisation = match &plan.organisation_id {
            Some(organisation_id) => {
                OrganisationRepository::get_organisation_exercises(store, organisation_id).await?
            }
            None => Vec::new(),
        };

        let mut editor = editor_for(&plan);
        editor.add_exercise(
            &ExerciseCatalog::new(&global, &organisation),
            &request.source_id,
            request.day_index,
        )?;
        save(store, plan_id, editor).await
    }

    pub async fn update_exercise(
        store: &dyn DocumentStore,
        plan_id: &str,
        index: usize,
        patch: PlanExercisePatch,
    ) -> Result<WorkoutPlan, ApiError> {
        let plan = WorkoutPlanRepository::require_workout_plan(store, plan_id).await?;
        let mut editor = editor_for(&plan);
        editor.update_exercise(index, patch)?;
        save(store, plan_id, editor).await
    }

    pub async fn remove_exercise(
        store: &dyn DocumentStore,
        plan_id: &str,
        index: usize,
    ) -> Result<WorkoutPlan, ApiError> {
        let plan = WorkoutPlanRepository::require_workout_plan(store, plan_id).await?;
        let mut editor = editor_for(&plan);
        editor.remove_exercise(index)?;
        save(store, plan_id, editor).await
    }

    pub async fn day_groups(
        store: &dyn DocumentStore,
        plan_id: &str,
    ) -> Result<(WorkoutPlan, Vec<DayGroup>), ApiError> {
        let plan = WorkoutPlanRepository::require_workout_plan(store, plan_id).await?;
        let days = editor_for(&plan).day_groups();
        Ok((plan, days))
    }
}

/// Organisation plans use the multi-day planner; personal plans are one list
fn editor_for(plan: &WorkoutPlan) -> WorkoutPlanEditor {
    if plan.organisation_id.is_some() {
        WorkoutPlanEditor::new(plan.exercises.clone(), plan.sessions_per_week)
    } else {
        WorkoutPlanEditor::single_list(plan.exercises.clone())
    }
}

async fn save(
    store: &dyn DocumentStore,
    plan_id: &str,
    editor: WorkoutPlanEditor,
) -> Result<WorkoutPlan, ApiError> {
    WorkoutPlanRepository::replace_exercises(store, plan_id, editor.exercises()).await?;
    WorkoutPlanService::get(store, plan_id).await
}
