//! Idea lifecycle, weighted evaluation, and derived read views.
//!
//! Everything here is synchronous computation over aggregates already loaded
//! from the external stores; the traits in [`store`] and [`assist`] are the
//! only seams to the outside world.

pub mod assist;
pub mod domain;
pub mod grading;
pub(crate) mod intake;
pub mod ledger;
pub mod lifecycle;
pub mod queries;
pub mod router;
pub mod rubric;
pub mod service;
pub mod store;
pub mod users;

#[cfg(test)]
mod tests;

pub use assist::{AssistError, ContentAssistant, EvaluationAssistant, RatingSuggestion};
pub use domain::{
    fields, Actor, Comment, DynamicValue, FieldKind, FormField, FormTemplate, Idea, IdeaDraft,
    IdeaId, IdeaStatus, Rating, RatingDimension, Role, ScoreDetail, User, UserRegistration,
    UserStatus,
};
pub use grading::{Grade, GradeOutcome};
pub use intake::{validate_dynamic_data, IdeaIntake, ValidationError};
pub use ledger::RatingError;
pub use lifecycle::WorkflowViolation;
pub use queries::{IdeaSummaryView, LeaderboardEntry, DEFAULT_LEADERBOARD_SIZE};
pub use router::idea_router;
pub use service::{IdeaReviewService, IdeaServiceError};
pub use store::{IdeaStore, StoreError, TemplateStore, UserStore};
pub use users::{UserDirectory, UserDirectoryError};
