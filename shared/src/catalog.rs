//! Bundled goal templates and habit suggestions
//!
//! These are read-only catalogs shipped with the application. Organisation
//! specific analogues are fetched at runtime by the backend.

use crate::models::{HabitCategory, WeeklySchedule};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

/// Static goal template offered during onboarding
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GoalTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: HabitCategory,
    pub target_completions: Option<u32>,
    /// Ids into [`HABIT_SUGGESTIONS`], in display order
    pub suggested_habit_ids: &'static [&'static str],
}

/// Static habit suggestion referenced by goal templates
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HabitSuggestion {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: HabitCategory,
    pub schedule: WeeklySchedule,
}

const SUNDAY_ONLY: WeeklySchedule = WeeklySchedule {
    monday: false,
    tuesday: false,
    wednesday: false,
    thursday: false,
    friday: false,
    saturday: false,
    sunday: true,
};

pub static GOAL_TEMPLATES: Lazy<Vec<GoalTemplate>> = Lazy::new(|| {
    vec![
        GoalTemplate {
            id: "get-fit",
            title: "Get Fit",
            description: "Build strength and endurance with regular movement.",
            category: HabitCategory::Fitness,
            target_completions: Some(60),
            suggested_habit_ids: &["morning-walk", "strength-training", "stretching"],
        },
        GoalTemplate {
            id: "sleep-better",
            title: "Sleep Better",
            description: "Wind down consistently and wake up rested.",
            category: HabitCategory::Health,
            target_completions: Some(30),
            suggested_habit_ids: &["sleep-schedule", "no-screens-before-bed", "meditation"],
        },
        GoalTemplate {
            id: "reduce-stress",
            title: "Reduce Stress",
            description: "Make space every day to slow down and reflect.",
            category: HabitCategory::MentalHealth,
            target_completions: Some(30),
            suggested_habit_ids: &["meditation", "deep-breathing", "journaling"],
        },
        GoalTemplate {
            id: "eat-healthier",
            title: "Eat Healthier",
            description: "Plan meals ahead and add more whole foods.",
            category: HabitCategory::Nutrition,
            target_completions: Some(40),
            suggested_habit_ids: &["eat-vegetables", "meal-prep", "water-intake"],
        },
        GoalTemplate {
            id: "stay-hydrated",
            title: "Stay Hydrated",
            description: "Drink enough water throughout the day.",
            category: HabitCategory::Health,
            target_completions: Some(30),
            suggested_habit_ids: &["water-intake"],
        },
        GoalTemplate {
            id: "be-more-productive",
            title: "Be More Productive",
            description: "Protect focused time and plan ahead.",
            category: HabitCategory::Productivity,
            target_completions: Some(20),
            suggested_habit_ids: &["plan-day", "deep-work", "read"],
        },
    ]
});

pub static HABIT_SUGGESTIONS: Lazy<BTreeMap<&'static str, HabitSuggestion>> = Lazy::new(|| {
    [
        HabitSuggestion {
            id: "morning-walk",
            name: "Morning Walk",
            description: "A 20 minute walk before starting the day.",
            category: HabitCategory::Fitness,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "strength-training",
            name: "Strength Training",
            description: "A full body strength session.",
            category: HabitCategory::Fitness,
            schedule: WeeklySchedule::alternate_days(),
        },
        HabitSuggestion {
            id: "stretching",
            name: "Stretch",
            description: "Ten minutes of mobility work.",
            category: HabitCategory::Fitness,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "meditation",
            name: "Meditate",
            description: "Sit quietly and focus on the breath.",
            category: HabitCategory::MentalHealth,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "deep-breathing",
            name: "Deep Breathing",
            description: "Five slow breathing cycles when stress builds up.",
            category: HabitCategory::MentalHealth,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "journaling",
            name: "Journal",
            description: "Write down three things from today.",
            category: HabitCategory::MentalHealth,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "sleep-schedule",
            name: "Consistent Bedtime",
            description: "Go to bed at the same time every night.",
            category: HabitCategory::Health,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "no-screens-before-bed",
            name: "No Screens Before Bed",
            description: "Put devices away an hour before sleeping.",
            category: HabitCategory::Health,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "water-intake",
            name: "Drink Water",
            description: "Eight glasses of water across the day.",
            category: HabitCategory::Health,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "eat-vegetables",
            name: "Eat Vegetables",
            description: "Vegetables with at least two meals.",
            category: HabitCategory::Nutrition,
            schedule: WeeklySchedule::all_days(),
        },
        HabitSuggestion {
            id: "meal-prep",
            name: "Meal Prep",
            description: "Prepare the week's lunches in one go.",
            category: HabitCategory::Nutrition,
            schedule: SUNDAY_ONLY,
        },
        HabitSuggestion {
            id: "plan-day",
            name: "Plan Tomorrow",
            description: "List the top three tasks for tomorrow.",
            category: HabitCategory::Productivity,
            schedule: WeeklySchedule::weekdays(),
        },
        HabitSuggestion {
            id: "deep-work",
            name: "Deep Work Block",
            description: "Ninety minutes without notifications.",
            category: HabitCategory::Productivity,
            schedule: WeeklySchedule::weekdays(),
        },
        HabitSuggestion {
            id: "read",
            name: "Read",
            description: "Read for at least fifteen minutes.",
            category: HabitCategory::Productivity,
            schedule: WeeklySchedule::all_days(),
        },
    ]
    .into_iter()
    .map(|suggestion| (suggestion.id, suggestion))
    .collect()
});

/// Look up a goal template by id
pub fn goal_template(id: &str) -> Option<&'static GoalTemplate> {
    GOAL_TEMPLATES.iter().find(|template| template.id == id)
}

/// Look up a habit suggestion by id
pub fn habit_suggestion(id: &str) -> Option<&'static HabitSuggestion> {
    HABIT_SUGGESTIONS.get(id)
}
