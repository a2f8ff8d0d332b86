//! Document repositories
//!
//! [`DocumentRepository`] implements the typed CRUD surface once for every
//! entity; the per-entity modules add the queries and side effects that are
//! specific to one collection.

use crate::store::{Document, DocumentStore, Fields, Filter, StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use wellness_shared::models::{
    Exercise, Goal, Habit, MembershipTier, OnboardingSession, OrganisationGoal, OrganisationHabit,
    Pack, Purchase, User, WorkoutPlan,
};

pub mod exercises;
pub mod goals;
pub mod habits;
pub mod memberships;
pub mod onboarding;
pub mod organisations;
pub mod workout_plans;

pub use exercises::ExerciseRepository;
pub use goals::GoalRepository;
pub use habits::HabitRepository;
pub use memberships::MembershipRepository;
pub use onboarding::OnboardingRepository;
pub use organisations::OrganisationRepository;
pub use workout_plans::WorkoutPlanRepository;

/// A model stored as documents in one collection
pub trait Entity: DeserializeOwned + Send {
    const COLLECTION: &'static str;
}

macro_rules! entity {
    ($($ty:ty => $collection:literal),* $(,)?) => {
        $(impl Entity for $ty {
            const COLLECTION: &'static str = $collection;
        })*
    };
}

entity! {
    Habit => "habits",
    Goal => "goals",
    OrganisationGoal => "organisation_goals",
    OrganisationHabit => "organisation_habits",
    WorkoutPlan => "workout_plans",
    Pack => "packs",
    MembershipTier => "membership_tiers",
    Purchase => "purchases",
    User => "users",
    OnboardingSession => "onboarding_sessions",
}

/// Global catalog exercises
pub struct GlobalExercise(pub Exercise);

/// Organisation-defined exercises
pub struct OrganisationExercise(pub Exercise);

impl<'de> serde::Deserialize<'de> for GlobalExercise {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Exercise::deserialize(deserializer).map(GlobalExercise)
    }
}

impl<'de> serde::Deserialize<'de> for OrganisationExercise {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Exercise::deserialize(deserializer).map(OrganisationExercise)
    }
}

entity! {
    GlobalExercise => "exercises",
    OrganisationExercise => "organisation_exercises",
}

/// Serialize a value into top-level document fields
pub fn to_fields<S: Serialize>(value: &S) -> StoreResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Decode a document, exposing its id as the `id` field
pub fn decode<T: Entity>(document: Document) -> StoreResult<T> {
    let mut fields = document.fields;
    fields.insert("id".to_string(), Value::String(document.id));
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Typed CRUD over one collection
pub struct DocumentRepository<'a, T> {
    store: &'a dyn DocumentStore,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> DocumentRepository<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        self.store
            .get_document(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Like [`get`](Self::get), but a missing document is an error
    pub async fn require(&self, id: &str) -> StoreResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
    }

    pub async fn get_many(&self, ids: &[String]) -> StoreResult<Vec<T>> {
        self.store
            .get_documents(T::COLLECTION, ids)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn query(&self, filters: &[Filter]) -> StoreResult<Vec<T>> {
        self.store
            .query_documents(T::COLLECTION, filters)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn create<N: Serialize + Sync>(&self, input: &N) -> StoreResult<String> {
        let mut fields = to_fields(input)?;
        fields.remove("id");
        self.store.create_document(T::COLLECTION, fields).await
    }

    pub async fn set<N: Serialize + Sync>(&self, id: &str, input: &N) -> StoreResult<()> {
        let mut fields = to_fields(input)?;
        fields.remove("id");
        self.store.set_document(T::COLLECTION, id, fields).await
    }

    pub async fn update(&self, id: &str, patch: Fields) -> StoreResult<()> {
        self.store.update_document(T::COLLECTION, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete_document(T::COLLECTION, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;
    use wellness_shared::models::{NewHabit, HabitDraft, HabitCategory, WeeklySchedule};

    fn new_habit(user_id: &str, name: &str) -> NewHabit {
        NewHabit::from_draft(
            user_id,
            HabitDraft {
                name: name.to_string(),
                description: String::new(),
                category: HabitCategory::Health,
                schedule: WeeklySchedule::all_days(),
            },
        )
    }

    #[tokio::test]
    async fn test_round_trip_injects_id() {
        let store = InMemoryStore::new();
        let repo = DocumentRepository::<Habit>::new(&store);

        let id = repo.create(&new_habit("u1", "Read")).await.unwrap();
        let habit = repo.require(&id).await.unwrap();
        assert_eq!(habit.id, id);
        assert_eq!(habit.name, "Read");

        let stored = store.get_document("habits", &id).await.unwrap().unwrap();
        assert!(!stored.fields.contains_key("id"));
    }

    #[tokio::test]
    async fn test_require_missing() {
        let store = InMemoryStore::new();
        let repo = DocumentRepository::<Pack>::new(&store);
        let err = repo.require("p1").await.err().unwrap();
        assert_eq!(err.to_string(), "Document not found: packs/p1");
    }

    #[tokio::test]
    async fn test_query_and_get_many() {
        let store = InMemoryStore::new();
        let repo = DocumentRepository::<Habit>::new(&store);
        let a = repo.create(&new_habit("u1", "A")).await.unwrap();
        repo.create(&new_habit("u2", "B")).await.unwrap();
        let c = repo.create(&new_habit("u1", "C")).await.unwrap();

        let mine = repo.query(&[Filter::eq("user_id", "u1")]).await.unwrap();
        assert_eq!(mine.len(), 2);

        let some = repo.get_many(&[c.clone(), "ghost".to_string(), a]).await.unwrap();
        let names: Vec<_> = some.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let store = InMemoryStore::new();
        store
            .set_document("habits", "h1", json!({"name": 7}).as_object().cloned().unwrap())
            .await
            .unwrap();
        let repo = DocumentRepository::<Habit>::new(&store);
        assert!(matches!(
            repo.get("h1").await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_to_fields_rejects_scalars() {
        assert!(matches!(
            to_fields(&42),
            Err(StoreError::InvalidDocument(_))
        ));
    }
}
