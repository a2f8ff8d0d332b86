//! Suggestion matching
//!
//! Given a selected goal and the user's existing habits, decides which of the
//! goal's suggested habits the user already has an equivalent for and which
//! would have to be created. Matching is a case-insensitive heuristic over
//! names; coincidental overlaps ("Read" inside "Already Read") are accepted.
//!
//! Rules are tried in order for each suggestion, across all habits, and the
//! first rule that finds a habit wins:
//! 1. the suggestion id with `-` replaced by spaces equals the habit name
//! 2. either of those two strings contains the other
//! 3. the habit name and the suggestion's display name contain one another

use crate::catalog::{goal_template, habit_suggestion, HabitSuggestion};
use crate::errors::OnboardingError;
use crate::models::{
    Habit, HabitCategory, OrganisationGoal, OrganisationHabit, WeeklySchedule,
    ORGANISATION_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal used by clients to pick the free-text goal
pub const CUSTOM_GOAL_ID: &str = "custom";

/// A goal choice: the custom goal, a bundled template, or an organisation goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GoalSelection {
    Custom,
    Template(String),
    Organisation(String),
}

impl GoalSelection {
    /// Parse a client goal id (`custom`, `org:<id>` or a template id).
    /// Blank input means nothing is selected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw == CUSTOM_GOAL_ID {
            return Some(GoalSelection::Custom);
        }
        match raw.strip_prefix(ORGANISATION_PREFIX) {
            Some(id) if !id.is_empty() => Some(GoalSelection::Organisation(id.to_string())),
            Some(_) => None,
            None => Some(GoalSelection::Template(raw.to_string())),
        }
    }
}

impl fmt::Display for GoalSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalSelection::Custom => f.write_str(CUSTOM_GOAL_ID),
            GoalSelection::Template(id) => f.write_str(id),
            GoalSelection::Organisation(id) => write!(f, "{ORGANISATION_PREFIX}{id}"),
        }
    }
}

/// Catalog a suggestion was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Template,
    Organisation,
}

/// A habit suggestion from either catalog, in one shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedHabit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub schedule: WeeklySchedule,
    pub source: SuggestionSource,
}

impl SuggestedHabit {
    pub fn from_template(suggestion: &HabitSuggestion) -> Self {
        Self {
            id: suggestion.id.to_string(),
            name: suggestion.name.to_string(),
            description: suggestion.description.to_string(),
            category: suggestion.category,
            schedule: suggestion.schedule,
            source: SuggestionSource::Template,
        }
    }

    /// Organisation habits only store the days they override; the rest stay active
    pub fn from_organisation(habit: &OrganisationHabit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            category: habit.category,
            schedule: WeeklySchedule::all_days().merge(&habit.schedule),
            source: SuggestionSource::Organisation,
        }
    }
}

/// Which rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    ExactId,
    IdSubstring,
    NameSubstring,
}

/// Existing habit found for a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedHabit {
    pub habit_id: String,
    pub habit_name: String,
    pub rule: MatchRule,
}

/// A suggestion paired with the existing habit it matched, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionMatch {
    pub suggestion: SuggestedHabit,
    pub matched: Option<MatchedHabit>,
}

impl SuggestionMatch {
    pub fn unmatched(suggestion: SuggestedHabit) -> Self {
        Self {
            suggestion,
            matched: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }
}

/// Resolve the habit suggestions attached to a goal selection.
///
/// The custom goal has no suggestions. Organisation goals may reference
/// habits that were deleted since; those references are skipped.
pub fn suggestions_for(
    selection: &GoalSelection,
    organisation_goals: &[OrganisationGoal],
    organisation_habits: &[OrganisationHabit],
) -> Result<Vec<SuggestedHabit>, OnboardingError> {
    match selection {
        GoalSelection::Custom => Ok(Vec::new()),
        GoalSelection::Template(id) => {
            let template =
                goal_template(id).ok_or_else(|| OnboardingError::UnknownGoal(id.clone()))?;
            Ok(template
                .suggested_habit_ids
                .iter()
                .filter_map(|id| habit_suggestion(id))
                .map(SuggestedHabit::from_template)
                .collect())
        }
        GoalSelection::Organisation(id) => {
            let goal = organisation_goals
                .iter()
                .find(|goal| &goal.id == id)
                .ok_or_else(|| OnboardingError::UnknownGoal(selection.to_string()))?;
            Ok(goal
                .linked_habit_ids
                .iter()
                .filter_map(|habit_id| organisation_habits.iter().find(|h| &h.id == habit_id))
                .map(SuggestedHabit::from_organisation)
                .collect())
        }
    }
}

/// Matches suggestions against a user's existing habits
pub struct SuggestionMatcher<'a> {
    habits: Vec<(&'a Habit, String)>,
}

impl<'a> SuggestionMatcher<'a> {
    pub fn new(existing_habits: &'a [Habit]) -> Self {
        // Blank names would be contained in every suggestion
        let habits = existing_habits
            .iter()
            .map(|habit| (habit, habit.name.trim().to_lowercase()))
            .filter(|(_, name)| !name.is_empty())
            .collect();
        Self { habits }
    }

    /// Find the existing habit equivalent to `suggestion`
    pub fn find(&self, suggestion: &SuggestedHabit) -> Option<MatchedHabit> {
        let normalized_id = suggestion.id.replace('-', " ").trim().to_lowercase();
        let display_name = suggestion.name.trim().to_lowercase();

        let exact = |name: &str| !normalized_id.is_empty() && name == normalized_id;
        let id_overlap = |name: &str| {
            !normalized_id.is_empty()
                && (name.contains(&normalized_id) || normalized_id.contains(name))
        };
        let name_overlap = |name: &str| {
            !display_name.is_empty()
                && (name.contains(&display_name) || display_name.contains(name))
        };

        let rules: [(MatchRule, &dyn Fn(&str) -> bool); 3] = [
            (MatchRule::ExactId, &exact),
            (MatchRule::IdSubstring, &id_overlap),
            (MatchRule::NameSubstring, &name_overlap),
        ];

        rules.iter().find_map(|(rule, test)| {
            self.habits
                .iter()
                .find(|(_, name)| test(name))
                .map(|(habit, _)| MatchedHabit {
                    habit_id: habit.id.clone(),
                    habit_name: habit.name.clone(),
                    rule: *rule,
                })
        })
    }

    /// Pair every suggestion with its match, preserving suggestion order
    pub fn partition(&self, suggestions: Vec<SuggestedHabit>) -> Vec<SuggestionMatch> {
        suggestions
            .into_iter()
            .map(|suggestion| {
                let matched = self.find(&suggestion);
                SuggestionMatch {
                    suggestion,
                    matched,
                }
            })
            .collect()
    }
}

/// Resolve and match the suggestions for `selection` in one step
pub fn match_goal_suggestions(
    selection: &GoalSelection,
    existing_habits: &[Habit],
    organisation_goals: &[OrganisationGoal],
    organisation_habits: &[OrganisationHabit],
) -> Result<Vec<SuggestionMatch>, OnboardingError> {
    let suggestions = suggestions_for(selection, organisation_goals, organisation_habits)?;
    Ok(SuggestionMatcher::new(existing_habits).partition(suggestions))
}
