//! Onboarding wizard state machine
//!
//! The wizard walks `goal -> habits -> complete`. Its progress is a plain
//! value: every transition consumes the current [`OnboardingState`] and
//! returns the next one, so clients can hold it, serialize it, and replay it
//! against the backend. Reaching `complete` is the signal to persist the
//! [`CompletionPlan`]; leaving through `exited` discards everything.

use crate::catalog::goal_template;
use crate::errors::OnboardingError;
use crate::matcher::{
    suggestions_for, GoalSelection, SuggestionMatch, SuggestionMatcher,
};
use crate::models::{
    GoalDraft, GoalSource, Habit, HabitCategory, HabitDraft, OrganisationGoal,
    OrganisationHabit, WeeklySchedule,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Longest custom goal title accepted, in characters
pub const CUSTOM_GOAL_MAX_CHARS: usize = 100;

/// Behavioural variant of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingMode {
    /// First-run setup: suggested habits are all selected for creation
    Onboarding,
    /// Adding a goal to an existing habit set: matching habits are linked instead
    AddGoal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Goal,
    Habits,
    Complete,
    Exited,
}

impl OnboardingStep {
    pub fn name(self) -> &'static str {
        match self {
            OnboardingStep::Goal => "goal",
            OnboardingStep::Habits => "habits",
            OnboardingStep::Complete => "complete",
            OnboardingStep::Exited => "exited",
        }
    }
}

/// Catalog goal picked in the goal step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedGoal {
    pub selection: GoalSelection,
    pub title: String,
    pub description: String,
    pub target_completions: Option<u32>,
}

/// Goal step outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalChoice {
    #[default]
    None,
    Custom {
        title: String,
    },
    Catalog(SelectedGoal),
}

/// Data the wizard reads but never writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OnboardingContext {
    #[serde(default)]
    pub existing_habits: Vec<Habit>,
    #[serde(default)]
    pub organisation_goals: Vec<OrganisationGoal>,
    #[serde(default)]
    pub organisation_habits: Vec<OrganisationHabit>,
}

/// User input driving the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OnboardingAction {
    SelectCustomGoal,
    SetCustomGoalTitle { title: String },
    SelectGoal { goal_id: String },
    ToggleSuggestion { suggestion_id: String },
    ToggleExistingHabit { habit_id: String },
    AddCustomHabit { name: String },
    UpdateCustomHabit { index: usize, name: String },
    RemoveCustomHabit { index: usize },
    Next,
    Back,
    Skip,
}

/// Writes the completion routine performs, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionPlan {
    pub goal: Option<GoalDraft>,
    pub habits_to_create: Vec<HabitDraft>,
    pub habits_to_link: Vec<String>,
}

impl CompletionPlan {
    pub fn is_empty(&self) -> bool {
        self.goal.is_none() && self.habits_to_create.is_empty() && self.habits_to_link.is_empty()
    }
}

/// Accumulated wizard progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub mode: OnboardingMode,
    pub step: OnboardingStep,
    /// Whether a parent flow accepts control back from the goal step
    pub exit_allowed: bool,
    #[serde(default)]
    pub goal: GoalChoice,
    #[serde(default)]
    pub suggestions: Vec<SuggestionMatch>,
    /// Unmatched suggestions the user wants created
    #[serde(default)]
    pub selected_suggestion_ids: BTreeSet<String>,
    /// Existing habits to link to the new goal
    #[serde(default)]
    pub linked_habit_ids: BTreeSet<String>,
    /// Free-text habits, possibly blank while the user is typing
    #[serde(default)]
    pub custom_habits: Vec<String>,
    /// Server-issued id that makes completion happen at most once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl OnboardingState {
    pub fn new(mode: OnboardingMode, exit_allowed: bool) -> Self {
        Self {
            mode,
            step: OnboardingStep::Goal,
            exit_allowed,
            goal: GoalChoice::None,
            suggestions: Vec::new(),
            selected_suggestion_ids: BTreeSet::new(),
            linked_habit_ids: BTreeSet::new(),
            custom_habits: Vec::new(),
            session_id: None,
        }
    }

    /// Attach the session id completion is recorded under
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn apply(
        self,
        action: OnboardingAction,
        context: &OnboardingContext,
    ) -> Result<Self, OnboardingError> {
        match action {
            OnboardingAction::SelectCustomGoal => self.select_custom_goal(),
            OnboardingAction::SetCustomGoalTitle { title } => self.set_custom_goal_title(&title),
            OnboardingAction::SelectGoal { goal_id } => self.select_goal(&goal_id, context),
            OnboardingAction::ToggleSuggestion { suggestion_id } => {
                self.toggle_suggestion(&suggestion_id)
            }
            OnboardingAction::ToggleExistingHabit { habit_id } => {
                self.toggle_existing_habit(&habit_id, context)
            }
            OnboardingAction::AddCustomHabit { name } => self.add_custom_habit(name),
            OnboardingAction::UpdateCustomHabit { index, name } => {
                self.update_custom_habit(index, name)
            }
            OnboardingAction::RemoveCustomHabit { index } => self.remove_custom_habit(index),
            OnboardingAction::Next => self.next(),
            OnboardingAction::Back => self.back(),
            OnboardingAction::Skip => self.skip(),
        }
    }

    fn invalid(&self, action: &'static str) -> OnboardingError {
        OnboardingError::InvalidTransition {
            step: self.step.name(),
            action,
        }
    }

    fn require_step(&self, step: OnboardingStep, action: &'static str) -> Result<(), OnboardingError> {
        if self.step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn require_editable(&self, action: &'static str) -> Result<(), OnboardingError> {
        match self.step {
            OnboardingStep::Goal | OnboardingStep::Habits => Ok(()),
            _ => Err(self.invalid(action)),
        }
    }

    fn clear_suggestions(mut self) -> Self {
        self.suggestions.clear();
        self.selected_suggestion_ids.clear();
        self.linked_habit_ids.clear();
        self
    }

    // ------------------------------------------------------------------
    // Goal step
    // ------------------------------------------------------------------

    /// Switch to the free-text goal, dropping any catalog selection
    pub fn select_custom_goal(self) -> Result<Self, OnboardingError> {
        self.require_step(OnboardingStep::Goal, "select a custom goal")?;
        if matches!(self.goal, GoalChoice::Custom { .. }) {
            return Ok(self);
        }
        let mut next = self.clear_suggestions();
        next.goal = GoalChoice::Custom {
            title: String::new(),
        };
        Ok(next)
    }

    /// Set the custom goal title, truncated to [`CUSTOM_GOAL_MAX_CHARS`]
    pub fn set_custom_goal_title(self, title: &str) -> Result<Self, OnboardingError> {
        let mut next = self.select_custom_goal()?;
        next.goal = GoalChoice::Custom {
            title: title.chars().take(CUSTOM_GOAL_MAX_CHARS).collect(),
        };
        Ok(next)
    }

    /// Pick a goal by client id. A blank id clears the selection.
    pub fn select_goal(
        self,
        goal_id: &str,
        context: &OnboardingContext,
    ) -> Result<Self, OnboardingError> {
        self.require_step(OnboardingStep::Goal, "select a goal")?;

        let selection = match GoalSelection::parse(goal_id) {
            None => {
                let mut next = self.clear_suggestions();
                next.goal = GoalChoice::None;
                return Ok(next);
            }
            Some(GoalSelection::Custom) => return self.select_custom_goal(),
            Some(selection) => selection,
        };

        let selected = resolve_goal(&selection, &context.organisation_goals)?;
        let suggestions = suggestions_for(
            &selection,
            &context.organisation_goals,
            &context.organisation_habits,
        )?;

        let mut next = self.clear_suggestions();
        match next.mode {
            OnboardingMode::AddGoal => {
                next.suggestions =
                    SuggestionMatcher::new(&context.existing_habits).partition(suggestions);
                next.linked_habit_ids = next
                    .suggestions
                    .iter()
                    .filter_map(|m| m.matched.as_ref().map(|h| h.habit_id.clone()))
                    .collect();
            }
            OnboardingMode::Onboarding => {
                next.selected_suggestion_ids = suggestions.iter().map(|s| s.id.clone()).collect();
                next.suggestions = suggestions.into_iter().map(SuggestionMatch::unmatched).collect();
            }
        }
        next.goal = GoalChoice::Catalog(selected);
        Ok(next)
    }

    // ------------------------------------------------------------------
    // Habit selection
    // ------------------------------------------------------------------

    /// Toggle a suggestion. Matched suggestions toggle the link to their
    /// existing habit; unmatched ones toggle creation.
    pub fn toggle_suggestion(mut self, suggestion_id: &str) -> Result<Self, OnboardingError> {
        self.require_editable("toggle a suggestion")?;

        let suggestion = self
            .suggestions
            .iter()
            .find(|m| m.suggestion.id == suggestion_id)
            .ok_or_else(|| OnboardingError::UnknownSuggestion(suggestion_id.to_string()))?;

        match &suggestion.matched {
            Some(matched) => {
                let habit_id = matched.habit_id.clone();
                toggle(&mut self.linked_habit_ids, habit_id);
            }
            None => toggle(&mut self.selected_suggestion_ids, suggestion_id.to_string()),
        }
        Ok(self)
    }

    /// Toggle linking one of the user's existing habits
    pub fn toggle_existing_habit(
        mut self,
        habit_id: &str,
        context: &OnboardingContext,
    ) -> Result<Self, OnboardingError> {
        self.require_editable("toggle a habit")?;
        if !context.existing_habits.iter().any(|h| h.id == habit_id) {
            return Err(OnboardingError::UnknownHabit(habit_id.to_string()));
        }
        toggle(&mut self.linked_habit_ids, habit_id.to_string());
        Ok(self)
    }

    pub fn add_custom_habit(mut self, name: String) -> Result<Self, OnboardingError> {
        self.require_editable("add a custom habit")?;
        self.custom_habits.push(name);
        Ok(self)
    }

    pub fn update_custom_habit(mut self, index: usize, name: String) -> Result<Self, OnboardingError> {
        self.require_editable("edit a custom habit")?;
        let len = self.custom_habits.len();
        let entry = self
            .custom_habits
            .get_mut(index)
            .ok_or(OnboardingError::IndexOutOfRange { index, len })?;
        *entry = name;
        Ok(self)
    }

    pub fn remove_custom_habit(mut self, index: usize) -> Result<Self, OnboardingError> {
        self.require_editable("remove a custom habit")?;
        if index >= self.custom_habits.len() {
            return Err(OnboardingError::IndexOutOfRange {
                index,
                len: self.custom_habits.len(),
            });
        }
        self.custom_habits.remove(index);
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Advance; moving on from the goal step never requires a selection
    pub fn next(mut self) -> Result<Self, OnboardingError> {
        self.step = match self.step {
            OnboardingStep::Goal => OnboardingStep::Habits,
            OnboardingStep::Habits => OnboardingStep::Complete,
            _ => return Err(self.invalid("continue")),
        };
        Ok(self)
    }

    pub fn back(mut self) -> Result<Self, OnboardingError> {
        match self.step {
            OnboardingStep::Habits => {
                self.step = OnboardingStep::Goal;
                Ok(self)
            }
            OnboardingStep::Goal if self.exit_allowed => Ok(self.exit()),
            _ => Err(self.invalid("go back")),
        }
    }

    /// Leave the wizard from the goal step without writing anything
    pub fn skip(self) -> Result<Self, OnboardingError> {
        match self.step {
            OnboardingStep::Goal if self.exit_allowed => Ok(self.exit()),
            _ => Err(self.invalid("skip")),
        }
    }

    fn exit(self) -> Self {
        Self {
            step: OnboardingStep::Exited,
            session_id: self.session_id,
            ..Self::new(self.mode, self.exit_allowed)
        }
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Describe the writes that completing this state performs
    pub fn completion_plan(&self) -> CompletionPlan {
        let goal = match &self.goal {
            GoalChoice::Custom { title } if !title.trim().is_empty() => Some(GoalDraft {
                title: title.trim().to_string(),
                description: String::new(),
                target_completions: None,
                source: GoalSource::Custom,
            }),
            GoalChoice::Catalog(selected) => Some(GoalDraft {
                title: selected.title.clone(),
                description: selected.description.clone(),
                target_completions: selected.target_completions,
                source: match &selected.selection {
                    GoalSelection::Organisation(id) => GoalSource::Organisation {
                        organisation_goal_id: id.clone(),
                    },
                    other => GoalSource::Template {
                        template_id: other.to_string(),
                    },
                },
            }),
            _ => None,
        };

        let suggested = self
            .suggestions
            .iter()
            .filter(|m| m.matched.is_none())
            .filter(|m| self.selected_suggestion_ids.contains(&m.suggestion.id))
            .map(|m| HabitDraft {
                name: m.suggestion.name.clone(),
                description: m.suggestion.description.clone(),
                category: m.suggestion.category,
                schedule: m.suggestion.schedule,
            });

        let custom = self
            .custom_habits
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| HabitDraft {
                name: name.to_string(),
                description: String::new(),
                category: HabitCategory::Custom,
                schedule: WeeklySchedule::all_days(),
            });

        let habits_to_link = if goal.is_some() {
            self.linked_habit_ids.iter().cloned().collect()
        } else {
            Vec::new()
        };

        CompletionPlan {
            goal,
            habits_to_create: suggested.chain(custom).collect(),
            habits_to_link,
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn resolve_goal(
    selection: &GoalSelection,
    organisation_goals: &[OrganisationGoal],
) -> Result<SelectedGoal, OnboardingError> {
    match selection {
        GoalSelection::Template(id) => {
            let template =
                goal_template(id).ok_or_else(|| OnboardingError::UnknownGoal(id.clone()))?;
            Ok(SelectedGoal {
                selection: selection.clone(),
                title: template.title.to_string(),
                description: template.description.to_string(),
                target_completions: template.target_completions,
            })
        }
        GoalSelection::Organisation(id) => {
            let goal = organisation_goals
                .iter()
                .find(|goal| &goal.id == id)
                .ok_or_else(|| OnboardingError::UnknownGoal(selection.to_string()))?;
            Ok(SelectedGoal {
                selection: selection.clone(),
                title: goal.title.clone(),
                description: goal.description.clone(),
                target_completions: goal.target_completions,
            })
        }
        GoalSelection::Custom => Err(OnboardingError::UnknownGoal(selection.to_string())),
    }
}
