//! API request and response types

use crate::catalog::GoalTemplate;
use crate::models::{
    Difficulty, Exercise, ExerciseCategory, GoalSource, HabitCategory, PlanExercise,
    WeeklySchedule,
};
use crate::onboarding::{OnboardingAction, OnboardingContext, OnboardingMode, OnboardingState};
use crate::plan_editor::DayGroup;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Response for create endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: String,
}

// ============================================================================
// Habits and Goals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    pub category: HabitCategory,
    #[serde(default)]
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub target_completions: Option<u32>,
    #[serde(default)]
    pub source: GoalSource,
}

/// Link one habit to a set of goals
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LinkHabitRequest {
    #[validate(length(min = 1))]
    pub goal_ids: Vec<String>,
    #[serde(default = "default_recalculate")]
    pub recalculate: bool,
}

fn default_recalculate() -> bool {
    true
}

// ============================================================================
// Onboarding
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingContextQuery {
    pub organisation_id: Option<String>,
}

/// Everything the goal step needs to render
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingContextResponse {
    pub goal_templates: Vec<GoalTemplate>,
    #[serde(flatten)]
    pub context: OnboardingContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOnboardingRequest {
    pub mode: OnboardingMode,
    #[serde(default)]
    pub exit_allowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingActionRequest {
    pub state: OnboardingState,
    pub action: OnboardingAction,
    #[serde(default)]
    pub organisation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteOnboardingRequest {
    pub state: OnboardingState,
}

/// What the completion routine managed to write.
///
/// `failed` is set when a write failed part way; everything listed before
/// the failure was persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub goal_id: Option<String>,
    pub created_habit_ids: Vec<String>,
    pub linked_habit_ids: Vec<String>,
    pub failed: bool,
}

// ============================================================================
// Workout Plans
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkoutPlanRequest {
    #[serde(default)]
    pub organisation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: String,
    #[validate(range(min = 1, max = 52))]
    pub duration_weeks: u32,
    #[validate(range(min = 1, max = 7))]
    pub sessions_per_week: u32,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assigned_user_id: Option<String>,
}

/// Partial plan update; absent fields are left untouched.
/// `exercises`, when present, replaces the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateWorkoutPlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 52))]
    pub duration_weeks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 7))]
    pub sessions_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<PlanExercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPlanQuery {
    pub organisation_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPlanExerciseRequest {
    /// `org:<id>` for organisation exercises, a numeric id otherwise
    pub source_id: String,
    #[serde(default)]
    pub day_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGroupsResponse {
    pub plan_id: String,
    pub sessions_per_week: u32,
    pub days: Vec<DayGroup>,
}

// ============================================================================
// Exercise catalog
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseCatalogQuery {
    pub organisation_id: Option<String>,
}

/// Exercises a plan editor can pick from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCatalogResponse {
    pub global: Vec<Exercise>,
    pub organisation: Vec<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PutExerciseRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
}

// ============================================================================
// Memberships
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleActiveResponse {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseKind {
    Pack,
    Tier,
}

/// Purchase row joined with user and item labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseView {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub kind: PurchaseKind,
    pub item_name: String,
    pub amount: Decimal,
    pub purchased_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_plan_request_ranges() {
        let request: CreateWorkoutPlanRequest = serde_json::from_value(serde_json::json!({
            "name": "Beginner Strength",
            "duration_weeks": 8,
            "sessions_per_week": 9
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sessions_per_week"));
        assert!(!errors.field_errors().contains_key("duration_weeks"));
    }

    #[test]
    fn test_update_plan_request_skips_absent_fields() {
        let request = UpdateWorkoutPlanRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed"}));
    }

    #[test]
    fn test_link_request_defaults_to_recalculate() {
        let request: LinkHabitRequest =
            serde_json::from_value(serde_json::json!({"goal_ids": ["g1"]})).unwrap();
        assert!(request.recalculate);
        assert!(request.validate().is_ok());

        let empty: LinkHabitRequest =
            serde_json::from_value(serde_json::json!({"goal_ids": []})).unwrap();
        assert!(empty.validate().is_err());
    }
}
