//! Workout plan exercise editor
//!
//! Keeps a plan's exercise list in memory while it is being edited and
//! maintains two invariants: `order` is always `1..=N` in list position, and
//! every exercise belongs to exactly one day group. Saving replaces the stored
//! list wholesale.

use crate::errors::PlanEditError;
use crate::models::{Exercise, ExerciseRef, PlanExercise, ORGANISATION_PREFIX};
use crate::validation::MAX_SESSIONS_PER_WEEK;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_DURATION_SECONDS: u32 = 300;
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// Parse a client exercise source id: `org:<id>` or a numeric global id
pub fn parse_source_id(raw: &str) -> Result<ExerciseRef, PlanEditError> {
    let raw = raw.trim();
    if let Some(id) = raw.strip_prefix(ORGANISATION_PREFIX) {
        if id.is_empty() {
            return Err(PlanEditError::InvalidSourceId(raw.to_string()));
        }
        return Ok(ExerciseRef::Organisation(id.to_string()));
    }
    raw.parse::<u32>()
        .map(ExerciseRef::Global)
        .map_err(|_| PlanEditError::InvalidSourceId(raw.to_string()))
}

/// The two exercise catalogs an editor resolves source ids against
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseCatalog<'a> {
    pub global: &'a [Exercise],
    pub organisation: &'a [Exercise],
}

impl<'a> ExerciseCatalog<'a> {
    pub fn new(global: &'a [Exercise], organisation: &'a [Exercise]) -> Self {
        Self {
            global,
            organisation,
        }
    }

    pub fn resolve(&self, reference: &ExerciseRef) -> Option<&'a Exercise> {
        match reference {
            ExerciseRef::Global(id) => {
                let id = id.to_string();
                self.global.iter().find(|exercise| exercise.id == id)
            }
            ExerciseRef::Organisation(id) => {
                self.organisation.iter().find(|exercise| &exercise.id == id)
            }
        }
    }
}

/// Partial update of a plan exercise.
///
/// Outer `None` leaves the field alone; `Some(None)` clears it, which is how
/// a half-typed numeric input arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanExercisePatch {
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub day_index: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub sets: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub reps: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PlanExercisePatch {
    fn apply_to(self, exercise: &mut PlanExercise) {
        if let Some(day_index) = self.day_index {
            exercise.day_index = day_index;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(duration) = self.duration_seconds {
            exercise.duration_seconds = duration;
        }
        if let Some(rest) = self.rest_seconds {
            exercise.rest_seconds = rest;
        }
        if let Some(notes) = self.notes {
            exercise.notes = notes;
        }
    }
}

/// Exercise together with its position in the flat list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedExercise {
    pub index: usize,
    pub exercise: PlanExercise,
}

/// Exercises shown under one workout day, sorted by `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub day_index: u32,
    pub exercises: Vec<IndexedExercise>,
}

/// Group exercises by day.
///
/// Days `0..days_per_week` are always present (clamped to `1..=7`), plus
/// any day that actually holds an exercise.
pub fn group_by_day(exercises: &[PlanExercise], days_per_week: u32) -> Vec<DayGroup> {
    let nominal = days_per_week.clamp(1, MAX_SESSIONS_PER_WEEK);
    let mut days: BTreeSet<u32> = (0..nominal).collect();
    days.extend(exercises.iter().map(PlanExercise::day));

    days.into_iter()
        .map(|day_index| {
            let mut grouped: Vec<IndexedExercise> = exercises
                .iter()
                .enumerate()
                .filter(|(_, exercise)| exercise.day() == day_index)
                .map(|(index, exercise)| IndexedExercise {
                    index,
                    exercise: exercise.clone(),
                })
                .collect();
            grouped.sort_by_key(|entry| entry.exercise.order);
            DayGroup {
                day_index,
                exercises: grouped,
            }
        })
        .collect()
}

/// In-memory editor over a plan's exercise list
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlanEditor {
    exercises: Vec<PlanExercise>,
    days_per_week: u32,
}

impl WorkoutPlanEditor {
    /// Multi-day planner showing `days_per_week` days
    pub fn new(exercises: Vec<PlanExercise>, days_per_week: u32) -> Self {
        Self {
            exercises,
            days_per_week,
        }
    }

    /// Consumer editor: everything on one list
    pub fn single_list(exercises: Vec<PlanExercise>) -> Self {
        Self::new(exercises, 1)
    }

    pub fn exercises(&self) -> &[PlanExercise] {
        &self.exercises
    }

    pub fn into_exercises(self) -> Vec<PlanExercise> {
        self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Resolve `source_id` and append a new exercise with category defaults
    pub fn add_exercise(
        &mut self,
        catalog: &ExerciseCatalog<'_>,
        source_id: &str,
        day_index: u32,
    ) -> Result<&PlanExercise, PlanEditError> {
        let reference = parse_source_id(source_id)?;
        let exercise = catalog
            .resolve(&reference)
            .ok_or_else(|| PlanEditError::UnknownExercise(reference.to_string()))?;

        let cardio = exercise.category.is_cardio();
        let entry = PlanExercise {
            exercise_name: exercise.name.clone(),
            exercise: reference,
            day_index: Some(day_index),
            sets: (!cardio).then_some(DEFAULT_SETS),
            reps: (!cardio).then_some(DEFAULT_REPS),
            duration_seconds: cardio.then_some(DEFAULT_DURATION_SECONDS),
            rest_seconds: Some(DEFAULT_REST_SECONDS),
            order: self.next_order(),
            notes: None,
        };

        self.exercises.push(entry);
        let last = self.exercises.len() - 1;
        Ok(&self.exercises[last])
    }

    /// Remove the exercise at `index` and renumber the rest
    pub fn remove_exercise(&mut self, index: usize) -> Result<PlanExercise, PlanEditError> {
        self.check_index(index)?;
        let removed = self.exercises.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Shallow-merge `patch` into the exercise at `index`
    pub fn update_exercise(
        &mut self,
        index: usize,
        patch: PlanExercisePatch,
    ) -> Result<&PlanExercise, PlanEditError> {
        self.check_index(index)?;
        patch.apply_to(&mut self.exercises[index]);
        Ok(&self.exercises[index])
    }

    /// Day indices shown by the planner
    pub fn day_indices(&self) -> Vec<u32> {
        self.day_groups().into_iter().map(|group| group.day_index).collect()
    }

    pub fn day_groups(&self) -> Vec<DayGroup> {
        group_by_day(&self.exercises, self.days_per_week)
    }

    fn next_order(&self) -> u32 {
        u32::try_from(self.exercises.len()).map_or(u32::MAX, |len| len.saturating_add(1))
    }

    /// Reassign `order` from list position, for lists that arrive wholesale
    pub fn renumbered(exercises: Vec<PlanExercise>) -> Vec<PlanExercise> {
        let mut editor = Self::single_list(exercises);
        editor.renumber();
        editor.into_exercises()
    }

    fn renumber(&mut self) {
        for (position, exercise) in (1u32..).zip(self.exercises.iter_mut()) {
            exercise.order = position;
        }
    }

    fn check_index(&self, index: usize) -> Result<(), PlanEditError> {
        if index < self.exercises.len() {
            Ok(())
        } else {
            Err(PlanEditError::IndexOutOfRange {
                index,
                len: self.exercises.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseCategory;
    use proptest::prelude::*;
    use rstest::rstest;

    fn exercise(id: &str, name: &str, category: ExerciseCategory) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            category,
            muscle_groups: vec![],
            organisation_id: None,
        }
    }

    fn global_catalog() -> Vec<Exercise> {
        vec![
            exercise("1", "Squat", ExerciseCategory::Strength),
            exercise("2", "Rowing", ExerciseCategory::Cardio),
        ]
    }

    fn org_catalog() -> Vec<Exercise> {
        vec![exercise("kb-swing", "Kettlebell Swing", ExerciseCategory::Strength)]
    }

    fn orders(editor: &WorkoutPlanEditor) -> Vec<u32> {
        editor.exercises().iter().map(|e| e.order).collect()
    }

    #[rstest]
    #[case("42", Ok(ExerciseRef::Global(42)))]
    #[case("org:abc", Ok(ExerciseRef::Organisation("abc".to_string())))]
    #[case("org:", Err(PlanEditError::InvalidSourceId("org:".to_string())))]
    #[case("squat", Err(PlanEditError::InvalidSourceId("squat".to_string())))]
    fn test_parse_source_id(#[case] raw: &str, #[case] expected: Result<ExerciseRef, PlanEditError>) {
        assert_eq!(parse_source_id(raw), expected);
    }

    #[test]
    fn test_add_strength_exercise_defaults() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::new(vec![], 3);

        let added = editor.add_exercise(&catalog, "1", 2).unwrap().clone();
        assert_eq!(added.exercise, ExerciseRef::Global(1));
        assert_eq!(added.exercise_name, "Squat");
        assert_eq!(added.sets, Some(DEFAULT_SETS));
        assert_eq!(added.reps, Some(DEFAULT_REPS));
        assert_eq!(added.duration_seconds, None);
        assert_eq!(added.rest_seconds, Some(DEFAULT_REST_SECONDS));
        assert_eq!(added.day_index, Some(2));
        assert_eq!(added.order, 1);
    }

    #[test]
    fn test_add_cardio_exercise_defaults() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::single_list(vec![]);

        let added = editor.add_exercise(&catalog, "2", 0).unwrap();
        assert_eq!(added.duration_seconds, Some(DEFAULT_DURATION_SECONDS));
        assert_eq!(added.sets, None);
        assert_eq!(added.reps, None);
    }

    #[test]
    fn test_add_organisation_exercise() {
        let global = global_catalog();
        let org = org_catalog();
        let catalog = ExerciseCatalog::new(&global, &org);
        let mut editor = WorkoutPlanEditor::new(vec![], 1);

        editor.add_exercise(&catalog, "1", 0).unwrap();
        let added = editor.add_exercise(&catalog, "org:kb-swing", 0).unwrap();
        assert_eq!(added.exercise, ExerciseRef::Organisation("kb-swing".to_string()));
        assert_eq!(added.order, 2);
    }

    #[test]
    fn test_add_unknown_exercise() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::new(vec![], 1);

        assert_eq!(
            editor.add_exercise(&catalog, "99", 0).unwrap_err(),
            PlanEditError::UnknownExercise("99".to_string())
        );
        assert_eq!(
            editor.add_exercise(&catalog, "org:1", 0).unwrap_err(),
            PlanEditError::UnknownExercise("org:1".to_string())
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn test_remove_renumbers() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::new(vec![], 2);
        for day in [0, 1, 0, 1] {
            editor.add_exercise(&catalog, "1", day).unwrap();
        }

        editor.remove_exercise(1).unwrap();
        assert_eq!(orders(&editor), vec![1, 2, 3]);

        assert_eq!(
            editor.remove_exercise(3),
            Err(PlanEditError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_renumbered_uses_list_position() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::single_list(vec![]);
        editor.add_exercise(&catalog, "1", 0).unwrap();
        editor.add_exercise(&catalog, "2", 0).unwrap();

        let mut exercises = editor.into_exercises();
        exercises.reverse();
        exercises[0].order = 7;
        let renumbered = WorkoutPlanEditor::renumbered(exercises);
        assert_eq!(renumbered[0].exercise_name, "Rowing");
        assert_eq!(
            renumbered.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_update_tolerates_cleared_numbers() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::new(vec![], 1);
        editor.add_exercise(&catalog, "1", 0).unwrap();

        let patch: PlanExercisePatch =
            serde_json::from_value(serde_json::json!({"reps": null, "sets": 5})).unwrap();
        let updated = editor.update_exercise(0, patch).unwrap();
        assert_eq!(updated.reps, None);
        assert_eq!(updated.sets, Some(5));
        assert_eq!(updated.rest_seconds, Some(DEFAULT_REST_SECONDS));
        assert_eq!(updated.order, 1);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut editor = WorkoutPlanEditor::new(vec![], 1);
        assert!(editor
            .update_exercise(0, PlanExercisePatch::default())
            .is_err());
    }

    #[test]
    fn test_day_groups_include_extra_days() {
        let global = global_catalog();
        let catalog = ExerciseCatalog::new(&global, &[]);
        let mut editor = WorkoutPlanEditor::new(vec![], 2);
        editor.add_exercise(&catalog, "1", 4).unwrap();
        editor.add_exercise(&catalog, "2", 0).unwrap();

        assert_eq!(editor.day_indices(), vec![0, 1, 4]);
        let groups = editor.day_groups();
        assert_eq!(groups[0].exercises[0].index, 1);
        assert!(groups[1].exercises.is_empty());
        assert_eq!(groups[2].exercises[0].exercise.exercise_name, "Squat");
    }

    #[test]
    fn test_zero_days_per_week_still_shows_one_day() {
        assert_eq!(WorkoutPlanEditor::new(vec![], 0).day_indices(), vec![0]);
    }

    #[test]
    fn test_nominal_days_capped_at_a_week() {
        let days: Vec<u32> = group_by_day(&[], u32::MAX)
            .iter()
            .map(|group| group.day_index)
            .collect();
        assert_eq!(days, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_groups_sorted_by_order() {
        let make = |order: u32| PlanExercise {
            exercise: ExerciseRef::Global(1),
            exercise_name: format!("e{order}"),
            day_index: None,
            sets: None,
            reps: None,
            duration_seconds: None,
            rest_seconds: None,
            order,
            notes: None,
        };
        let groups = group_by_day(&[make(3), make(1), make(2)], 1);
        let names: Vec<_> = groups[0]
            .exercises
            .iter()
            .map(|e| e.exercise.exercise_name.as_str())
            .collect();
        assert_eq!(names, vec!["e1", "e2", "e3"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..8).prop_map(Op::Add),
            (0usize..10).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// After every add or remove, orders are exactly 1..=N
        #[test]
        fn prop_order_contiguous(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let global = global_catalog();
            let catalog = ExerciseCatalog::new(&global, &[]);
            let mut editor = WorkoutPlanEditor::new(vec![], 3);

            for op in ops {
                match op {
                    Op::Add(day) => {
                        editor.add_exercise(&catalog, "1", day).unwrap();
                    }
                    Op::Remove(index) => {
                        let _ = editor.remove_exercise(index);
                    }
                }
                let expected: Vec<u32> = (1..=editor.len() as u32).collect();
                prop_assert_eq!(orders(&editor), expected);
            }
        }

        /// Every exercise lands in exactly one group, and the nominal days are always shown
        #[test]
        fn prop_day_grouping_complete(
            days in prop::collection::vec(prop::option::of(0u32..10), 0..30),
            days_per_week in 0u32..8,
        ) {
            let exercises: Vec<PlanExercise> = days
                .iter()
                .enumerate()
                .map(|(i, day)| PlanExercise {
                    exercise: ExerciseRef::Global(1),
                    exercise_name: String::new(),
                    day_index: *day,
                    sets: None,
                    reps: None,
                    duration_seconds: None,
                    rest_seconds: None,
                    order: i as u32 + 1,
                    notes: None,
                })
                .collect();

            let groups = group_by_day(&exercises, days_per_week);
            let mut seen: Vec<usize> = groups
                .iter()
                .flat_map(|g| g.exercises.iter().map(|e| e.index))
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..exercises.len()).collect::<Vec<_>>());

            let shown: BTreeSet<u32> = groups.iter().map(|g| g.day_index).collect();
            for day in 0..days_per_week.max(1) {
                prop_assert!(shown.contains(&day));
            }
        }
    }
}
