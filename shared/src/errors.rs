//! Error types for the Wellness Platform

use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while editing a workout plan's exercise list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanEditError {
    #[error("Exercise not found in catalog: {0}")]
    UnknownExercise(String),

    #[error("Invalid exercise source id: {0:?}")]
    InvalidSourceId(String),

    #[error("Exercise index {index} out of range (plan has {len} exercises)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised by the onboarding wizard transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("Cannot {action} from the {step} step")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },

    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown habit suggestion: {0}")]
    UnknownSuggestion(String),

    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    #[error("Custom habit index {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<PlanEditError> for AppError {
    fn from(err: PlanEditError) -> Self {
        match err {
            PlanEditError::UnknownExercise(_) => AppError::NotFound(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

impl From<OnboardingError> for AppError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::UnknownGoal(_)
            | OnboardingError::UnknownSuggestion(_)
            | OnboardingError::UnknownHabit(_) => {
                AppError::NotFound(err.to_string())
            }
            _ => AppError::Validation(err.to_string()),
        }
    }
}
