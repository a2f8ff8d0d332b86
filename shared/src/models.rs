//! Data models for the Wellness Platform
//!
//! Every stored model carries its document id in `id`. The `New*` inputs are
//! the same shapes without an id, used when creating documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::CompletionOutcome;

/// Prefix that marks an id as belonging to an organisation namespace
pub const ORGANISATION_PREFIX: &str = "org:";

// ============================================================================
// Habits
// ============================================================================

/// Habit category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HabitCategory {
    Fitness,
    Health,
    Productivity,
    MentalHealth,
    Nutrition,
    Other,
    #[default]
    Custom,
}

/// Which weekdays a habit is active on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::all_days()
    }
}

impl WeeklySchedule {
    pub const fn all_days() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
        }
    }

    pub const fn weekdays() -> Self {
        Self {
            saturday: false,
            sunday: false,
            ..Self::all_days()
        }
    }

    /// Monday / Wednesday / Friday
    pub const fn alternate_days() -> Self {
        Self {
            monday: true,
            tuesday: false,
            wednesday: true,
            thursday: false,
            friday: true,
            saturday: false,
            sunday: false,
        }
    }

    /// Apply the days set in `overrides` on top of this schedule
    pub fn merge(self, overrides: &ScheduleOverrides) -> Self {
        Self {
            monday: overrides.monday.unwrap_or(self.monday),
            tuesday: overrides.tuesday.unwrap_or(self.tuesday),
            wednesday: overrides.wednesday.unwrap_or(self.wednesday),
            thursday: overrides.thursday.unwrap_or(self.thursday),
            friday: overrides.friday.unwrap_or(self.friday),
            saturday: overrides.saturday.unwrap_or(self.saturday),
            sunday: overrides.sunday.unwrap_or(self.sunday),
        }
    }
}

/// Partial schedule as stored on organisation habits; unset days keep the default
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScheduleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<bool>,
}

/// A recurring action a user tracks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: HabitCategory,
    #[serde(default)]
    pub schedule: WeeklySchedule,
    #[serde(default)]
    pub completion_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHabit {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub schedule: WeeklySchedule,
    pub completion_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Habit fields decided by the onboarding wizard, before an owner is attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub schedule: WeeklySchedule,
}

impl NewHabit {
    pub fn from_draft(user_id: &str, draft: HabitDraft) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            schedule: draft.schedule,
            completion_count: 0,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Goals
// ============================================================================

/// Where a goal came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalSource {
    #[default]
    Custom,
    Template {
        template_id: String,
    },
    Organisation {
        organisation_goal_id: String,
    },
}

/// A user's aspirational target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_completions: Option<u32>,
    #[serde(default)]
    pub linked_habit_ids: Vec<String>,
    #[serde(default)]
    pub completed_count: u32,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub source: GoalSource,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Progress towards the target completion count, clamped to 0..=100.
    /// Goals without a target report no progress.
    pub fn calculate_progress(completed: u32, target: Option<u32>) -> f64 {
        match target {
            Some(target) if target > 0 => {
                let progress = f64::from(completed) / f64::from(target) * 100.0;
                progress.clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_linked(&self, habit_id: &str) -> bool {
        self.linked_habit_ids.iter().any(|id| id == habit_id)
    }
}

/// Input for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGoal {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target_completions: Option<u32>,
    pub linked_habit_ids: Vec<String>,
    pub completed_count: u32,
    pub progress_percent: f64,
    pub source: GoalSource,
    pub created_at: DateTime<Utc>,
}

/// Goal fields decided by the onboarding wizard, before an owner is attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_completions: Option<u32>,
    pub source: GoalSource,
}

impl NewGoal {
    pub fn from_draft(user_id: &str, draft: GoalDraft) -> Self {
        Self {
            user_id: user_id.to_string(),
            title: draft.title,
            description: draft.description,
            target_completions: draft.target_completions,
            linked_habit_ids: Vec::new(),
            completed_count: 0,
            progress_percent: 0.0,
            source: draft.source,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Organisation catalogs
// ============================================================================

/// Organisation-defined goal offered during onboarding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganisationGoal {
    pub id: String,
    pub organisation_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: HabitCategory,
    #[serde(default)]
    pub target_completions: Option<u32>,
    #[serde(default)]
    pub linked_habit_ids: Vec<String>,
}

/// Organisation-defined habit suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganisationHabit {
    pub id: String,
    pub organisation_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: HabitCategory,
    #[serde(default)]
    pub schedule: ScheduleOverrides,
}

// ============================================================================
// Exercises and workout plans
// ============================================================================

/// Exercise category; decides which parameters a plan exercise uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    #[default]
    Strength,
    Cardio,
    Flexibility,
    Balance,
    Other,
}

impl ExerciseCategory {
    pub fn is_cardio(self) -> bool {
        matches!(self, ExerciseCategory::Cardio)
    }
}

/// Exercise entry in the global or an organisation catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub organisation_id: Option<String>,
}

/// Reference from a plan exercise to its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum ExerciseRef {
    Global(u32),
    Organisation(String),
}

impl fmt::Display for ExerciseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseRef::Global(id) => write!(f, "{id}"),
            ExerciseRef::Organisation(id) => write!(f, "{ORGANISATION_PREFIX}{id}"),
        }
    }
}

/// Workout plan difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// One exercise assignment within a workout plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanExercise {
    pub exercise: ExerciseRef,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub day_index: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlanExercise {
    /// Day this exercise is shown under; absent means the first day
    pub fn day(&self) -> u32 {
        self.day_index.unwrap_or(0)
    }
}

/// A workout plan owned by an organisation or a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    #[serde(default)]
    pub organisation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: String,
    pub duration_weeks: u32,
    pub sessions_per_week: u32,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assigned_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a workout plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWorkoutPlan {
    pub organisation_id: Option<String>,
    pub user_id: Option<String>,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub duration_weeks: u32,
    pub sessions_per_week: u32,
    pub exercises: Vec<PlanExercise>,
    pub tags: Vec<String>,
    pub assigned_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Memberships (admin dashboard)
// ============================================================================

/// Prepaid class pack sold by an organisation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pack {
    pub id: String,
    pub organisation_id: String,
    pub name: String,
    #[serde(default)]
    pub class_count: u32,
    pub price: Decimal,
    #[serde(default)]
    pub active: bool,
}

/// Recurring membership tier sold by an organisation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipTier {
    pub id: String,
    pub organisation_id: String,
    pub name: String,
    pub monthly_price: Decimal,
    #[serde(default)]
    pub active: bool,
}

/// A user's purchase of a pack or a membership tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: String,
    pub organisation_id: String,
    pub user_id: String,
    #[serde(default)]
    pub pack_id: Option<String>,
    #[serde(default)]
    pub tier_id: Option<String>,
    pub amount: Decimal,
    pub purchased_at: DateTime<Utc>,
}

/// Platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

// ============================================================================
// Onboarding
// ============================================================================

/// Record of a finished onboarding run, stored under its session id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingSession {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub outcome: CompletionOutcome,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_schedule_merge_keeps_unset_days() {
        let overrides = ScheduleOverrides {
            saturday: Some(false),
            sunday: Some(false),
            ..Default::default()
        };
        let merged = WeeklySchedule::all_days().merge(&overrides);
        assert_eq!(merged, WeeklySchedule::weekdays());
        assert!(merged.friday);
        assert!(!merged.sunday);
    }

    #[test]
    fn test_habit_category_serialization() {
        let json = serde_json::to_string(&HabitCategory::MentalHealth).unwrap();
        assert_eq!(json, "\"mental-health\"");
        let parsed: HabitCategory = serde_json::from_str("\"nutrition\"").unwrap();
        assert_eq!(parsed, HabitCategory::Nutrition);
    }

    #[test]
    fn test_exercise_ref_serialization() {
        let global = serde_json::to_value(ExerciseRef::Global(42)).unwrap();
        assert_eq!(global, serde_json::json!({"source": "global", "id": 42}));

        let org: ExerciseRef =
            serde_json::from_value(serde_json::json!({"source": "organisation", "id": "abc"}))
                .unwrap();
        assert_eq!(org, ExerciseRef::Organisation("abc".to_string()));
        assert_eq!(org.to_string(), "org:abc");
    }

    #[test]
    fn test_plan_exercise_tolerates_missing_numbers() {
        let exercise: PlanExercise = serde_json::from_value(serde_json::json!({
            "exercise": {"source": "global", "id": 7},
            "order": 1
        }))
        .unwrap();
        assert_eq!(exercise.day(), 0);
        assert_eq!(exercise.sets, None);
        assert_eq!(exercise.rest_seconds, None);
    }

    #[rstest]
    #[case(0, Some(10), 0.0)]
    #[case(5, Some(10), 50.0)]
    #[case(15, Some(10), 100.0)]
    #[case(3, None, 0.0)]
    #[case(3, Some(0), 0.0)]
    fn test_goal_progress(#[case] completed: u32, #[case] target: Option<u32>, #[case] expected: f64) {
        assert_eq!(Goal::calculate_progress(completed, target), expected);
    }
}
