//! Wellness Platform Shared Library
//!
//! Domain models, the bundled goal/habit catalogs, and the pure engines
//! (suggestion matching, the onboarding wizard, the workout plan editor)
//! used by the backend and the WASM bindings.

pub mod catalog;
pub mod errors;
pub mod matcher;
pub mod models;
pub mod onboarding;
pub mod plan_editor;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use matcher::{GoalSelection, SuggestionMatch, SuggestionMatcher};
pub use models::*;
pub use onboarding::{
    CompletionPlan, OnboardingAction, OnboardingContext, OnboardingMode, OnboardingState,
    OnboardingStep,
};
pub use plan_editor::{DayGroup, ExerciseCatalog, PlanExercisePatch, WorkoutPlanEditor};
pub use types::*;
