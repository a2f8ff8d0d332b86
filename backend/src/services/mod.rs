//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared engines.

pub mod exercises;
pub mod goals;
pub mod memberships;
pub mod onboarding;
pub mod reporter;
pub mod workout_plans;

pub use exercises::ExerciseService;
pub use goals::GoalsService;
pub use memberships::MembershipService;
pub use onboarding::OnboardingService;
pub use reporter::{ErrorReporter, TracingReporter};
pub use workout_plans::WorkoutPlanService;
