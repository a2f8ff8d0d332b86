//! Input validation functions
//!
//! Hand-written field validators with user-facing messages. Request types
//! additionally derive `validator::Validate` for simple length and range checks.

use crate::onboarding::CUSTOM_GOAL_MAX_CHARS;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const MAX_SESSIONS_PER_WEEK: u32 = 7;
pub const MAX_DURATION_WEEKS: u32 = 52;

fn validate_required_text(value: &str, label: &str, max_chars: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(format!("{label} must be at most {max_chars} characters"));
    }
    Ok(())
}

/// Validate a goal title
pub fn validate_goal_title(title: &str) -> Result<(), String> {
    validate_required_text(title, "Title", CUSTOM_GOAL_MAX_CHARS)
}

/// Validate a habit name
pub fn validate_habit_name(name: &str) -> Result<(), String> {
    validate_required_text(name, "Name", NAME_MAX_CHARS)
}

/// Validate a workout plan name
pub fn validate_plan_name(name: &str) -> Result<(), String> {
    validate_required_text(name, "Name", NAME_MAX_CHARS)
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(format!(
            "Description must be at most {DESCRIPTION_MAX_CHARS} characters"
        ));
    }
    Ok(())
}

/// Validate sessions per week (1-7)
pub fn validate_sessions_per_week(sessions: u32) -> Result<(), String> {
    if sessions == 0 {
        return Err("At least one session per week is required".to_string());
    }
    if sessions > MAX_SESSIONS_PER_WEEK {
        return Err(format!(
            "Sessions per week cannot exceed {MAX_SESSIONS_PER_WEEK}"
        ));
    }
    Ok(())
}

/// Validate plan duration in weeks (1-52)
pub fn validate_duration_weeks(weeks: u32) -> Result<(), String> {
    if weeks == 0 {
        return Err("Duration must be at least 1 week".to_string());
    }
    if weeks > MAX_DURATION_WEEKS {
        return Err(format!("Duration cannot exceed {MAX_DURATION_WEEKS} weeks"));
    }
    Ok(())
}

/// Validate a goal's target completion count, when one is given
pub fn validate_target_completions(target: Option<u32>) -> Result<(), String> {
    match target {
        Some(0) => Err("Target must be at least 1 completion".to_string()),
        _ => Ok(()),
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "title" => "Goal Title",
        "name" => "Name",
        "description" => "Description",
        "target_completions" => "Target Completions",
        "sessions_per_week" => "Sessions per Week",
        "duration_weeks" => "Duration (weeks)",
        "goal_ids" => "Goals",
        "source_id" => "Exercise",
        "day_index" => "Day",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a validator and attach the field name to its error
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}
