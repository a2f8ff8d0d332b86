//! Wellness Platform WASM Module
//!
//! Browser bindings for the shared engines, so the onboarding wizard and the
//! plan editor can run client-side. Everything crosses the boundary as JSON
//! strings; failures become JS exceptions.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wellness_shared::matcher::{match_goal_suggestions as match_suggestions, GoalSelection};
use wellness_shared::models::PlanExercise;
use wellness_shared::onboarding::{
    OnboardingAction, OnboardingContext, OnboardingMode, OnboardingState,
};
use wellness_shared::plan_editor::group_by_day;
use wellness_shared::validation::validate_sessions_per_week;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse<'a, T: serde::Deserialize<'a>>(what: &str, json: &'a str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {what}: {e}"))
}

fn new_state_json(mode: &str, exit_allowed: bool) -> Result<String, String> {
    let mode: OnboardingMode = serde_json::from_value(serde_json::Value::String(mode.to_string()))
        .map_err(|_| format!("Unknown onboarding mode: {mode}"))?;
    to_json(&OnboardingState::new(mode, exit_allowed))
}

fn apply_action_json(state: &str, action: &str, context: &str) -> Result<String, String> {
    let state: OnboardingState = parse("state", state)?;
    let action: OnboardingAction = parse("action", action)?;
    let context: OnboardingContext = parse("context", context)?;
    let next = state.apply(action, &context).map_err(|e| e.to_string())?;
    to_json(&next)
}

fn match_suggestions_json(goal_id: &str, context: &str) -> Result<String, String> {
    let context: OnboardingContext = parse("context", context)?;
    let matches = match GoalSelection::parse(goal_id) {
        Some(selection) => match_suggestions(
            &selection,
            &context.existing_habits,
            &context.organisation_goals,
            &context.organisation_habits,
        )
        .map_err(|e| e.to_string())?,
        None => Vec::new(),
    };
    to_json(&matches)
}

fn group_days_json(exercises: &str, days_per_week: u32) -> Result<String, String> {
    validate_sessions_per_week(days_per_week)?;
    let exercises: Vec<PlanExercise> = parse("exercises", exercises)?;
    to_json(&group_by_day(&exercises, days_per_week))
}

/// Fresh wizard state; `mode` is `"onboarding"` or `"add_goal"`.
///
/// The state has no session id. A wizard that will be completed on the
/// server should start from the server's start endpoint instead.
#[wasm_bindgen]
pub fn new_onboarding_state(mode: &str, exit_allowed: bool) -> Result<String, JsValue> {
    new_state_json(mode, exit_allowed).map_err(|e| JsValue::from_str(&e))
}

/// Apply one action to a wizard state
#[wasm_bindgen]
pub fn apply_onboarding_action(
    state: &str,
    action: &str,
    context: &str,
) -> Result<String, JsValue> {
    apply_action_json(state, action, context).map_err(|e| JsValue::from_str(&e))
}

/// Suggestions for a goal id paired with the user's matching habits
#[wasm_bindgen]
pub fn match_goal_suggestions(goal_id: &str, context: &str) -> Result<String, JsValue> {
    match_suggestions_json(goal_id, context).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn group_plan_days(exercises: &str, days_per_week: u32) -> Result<String, JsValue> {
    group_days_json(exercises, days_per_week).map_err(|e| JsValue::from_str(&e))
}
