use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::assist::{ContentAssistant, EvaluationAssistant, RatingSuggestion};
use super::domain::{Actor, Comment, Idea, IdeaDraft, IdeaId, IdeaStatus, Role};
use super::intake::{IdeaIntake, ValidationError};
use super::ledger::{self, RatingError};
use super::lifecycle::{self, WorkflowViolation};
use super::queries::{self, IdeaSummaryView, LeaderboardEntry};
use super::rubric;
use super::store::{IdeaStore, StoreError, TemplateStore};

/// Service composing the intake guard, workflow rules, rating ledger, and
/// query layer over the external store boundaries.
pub struct IdeaReviewService<S, T> {
    intake: IdeaIntake,
    ideas: Arc<S>,
    templates: Arc<T>,
    evaluator: Option<Arc<dyn EvaluationAssistant>>,
    content: Option<Arc<dyn ContentAssistant>>,
}

static IDEA_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_idea_id() -> IdeaId {
    let id = IDEA_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    IdeaId(format!("idea-{id:06}"))
}

impl<S, T> IdeaReviewService<S, T>
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    pub fn new(ideas: Arc<S>, templates: Arc<T>) -> Self {
        Self {
            intake: IdeaIntake::default(),
            ideas,
            templates,
            evaluator: None,
            content: None,
        }
    }

    /// Attach the optional generative collaborators.
    pub fn with_assistants(
        mut self,
        evaluator: Option<Arc<dyn EvaluationAssistant>>,
        content: Option<Arc<dyn ContentAssistant>>,
    ) -> Self {
        self.evaluator = evaluator;
        self.content = content;
        self
    }

    /// Create a new idea from an authored draft.
    pub fn submit_idea(
        &self,
        draft: IdeaDraft,
        author: &Actor,
    ) -> Result<Idea, IdeaServiceError> {
        let templates = self.templates.list()?;
        let mut idea = self
            .intake
            .idea_from_draft(draft, author, &templates, Utc::now())?;
        idea.id = next_idea_id();

        Ok(self.ideas.save(idea)?)
    }

    /// Authored content edit, optionally carrying an explicit submit or
    /// resubmit. Nothing is persisted when authorization or validation fails.
    pub fn edit_idea(
        &self,
        id: &IdeaId,
        draft: IdeaDraft,
        author: &Actor,
    ) -> Result<Idea, IdeaServiceError> {
        let mut idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;
        let status = lifecycle::authorize_author_edit(&idea, author, draft.status)?;

        let templates = self.templates.list()?;
        self.intake
            .apply_edit(&mut idea, draft, &templates, Utc::now())?;
        idea.status = status;

        Ok(self.ideas.save(idea)?)
    }

    /// Move an idea along the review workflow.
    pub fn transition(
        &self,
        id: &IdeaId,
        to: IdeaStatus,
        actor: &Actor,
    ) -> Result<Idea, IdeaServiceError> {
        let mut idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;
        lifecycle::apply_transition(&mut idea, to, actor, Utc::now())?;

        Ok(self.ideas.save(idea)?)
    }

    /// Record a manager's evaluation, replacing any prior rating of theirs.
    pub fn submit_rating(
        &self,
        id: &IdeaId,
        reviewer: &Actor,
        scores: &BTreeMap<String, u8>,
        comment: impl Into<String>,
    ) -> Result<Idea, IdeaServiceError> {
        let mut idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;
        let templates = self.templates.list()?;
        let dimensions = rubric::resolve_dimensions(&idea, &templates);

        ledger::submit(&mut idea, reviewer, scores, comment, &dimensions, Utc::now())?;

        Ok(self.ideas.save(idea)?)
    }

    /// Ask the evaluation collaborator for a draft rating. Returns `None`
    /// when no assistant is wired up or the assistant fails; a suggestion is
    /// never persisted without a manager submitting it.
    pub fn suggest_rating(
        &self,
        id: &IdeaId,
        reviewer: &Actor,
    ) -> Result<Option<RatingSuggestion>, IdeaServiceError> {
        if reviewer.role != Role::Manager {
            return Err(RatingError::NotManager.into());
        }

        let idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;

        let Some(evaluator) = &self.evaluator else {
            return Ok(None);
        };

        let templates = self.templates.list()?;
        let dimensions = rubric::resolve_dimensions(&idea, &templates);

        match evaluator.suggest(&idea, &dimensions) {
            Ok(mut suggestion) => {
                for score in suggestion.scores.values_mut() {
                    *score = (*score).clamp(1, 5);
                }
                Ok(Some(suggestion))
            }
            Err(error) => {
                warn!(idea = %idea.id, %error, "evaluation assistant degraded, no suggestion");
                Ok(None)
            }
        }
    }

    /// Append a discussion entry. Guests are read-only; everyone else must
    /// pass the same visibility rule as search.
    pub fn add_comment(
        &self,
        id: &IdeaId,
        actor: &Actor,
        body: impl Into<String>,
    ) -> Result<Idea, IdeaServiceError> {
        if actor.role == Role::Guest {
            return Err(IdeaServiceError::CommentNotPermitted);
        }

        let mut idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;
        if !queries::can_view(&idea, actor) {
            return Err(IdeaServiceError::NotVisible(id.clone()));
        }

        let now = Utc::now();
        let next_id = idea.comments.last().map_or(1, |comment| comment.id + 1);
        idea.comments.push(Comment {
            id: next_id,
            author_id: actor.id.clone(),
            author_name: actor.name.clone(),
            body: body.into(),
            created_at: now,
        });
        idea.updated_at = now;

        Ok(self.ideas.save(idea)?)
    }

    /// Fetch one idea, applying the same visibility rule as search.
    pub fn get_idea(&self, id: &IdeaId, viewer: &Actor) -> Result<Idea, IdeaServiceError> {
        let idea = self.ideas.get(id)?.ok_or(StoreError::NotFound)?;
        if !queries::can_view(&idea, viewer) {
            return Err(IdeaServiceError::NotVisible(id.clone()));
        }

        Ok(idea)
    }

    /// Remove an idea. Contributions pointing at it through
    /// `parent_idea_id` are relations, not children, and stay untouched.
    pub fn delete_idea(&self, id: &IdeaId, actor: &Actor) -> Result<(), IdeaServiceError> {
        if actor.role != Role::Admin {
            return Err(IdeaServiceError::DeleteNotPermitted { role: actor.role });
        }

        Ok(self.ideas.delete(id)?)
    }

    /// Run text through the content collaborator, falling back to the
    /// original on any failure.
    pub fn polish_description(&self, text: &str) -> String {
        match &self.content {
            Some(assistant) => match assistant.enhance(text) {
                Ok(enhanced) => enhanced,
                Err(error) => {
                    warn!(%error, "content assistant degraded, keeping original text");
                    text.to_string()
                }
            },
            None => text.to_string(),
        }
    }

    /// Landing-page leaderboard over published ideas.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, IdeaServiceError> {
        let ideas = self.ideas.list()?;
        Ok(queries::top_ideas(&ideas, limit))
    }

    /// Free-text search constrained by the viewer's visibility.
    pub fn search(
        &self,
        query: &str,
        viewer: &Actor,
    ) -> Result<Vec<IdeaSummaryView>, IdeaServiceError> {
        let ideas = self.ideas.list()?;
        Ok(queries::search(&ideas, query, viewer))
    }

    /// Top-level ideas open for contributions.
    pub fn collaboration_feed(&self) -> Result<Vec<IdeaSummaryView>, IdeaServiceError> {
        let ideas = self.ideas.list()?;
        Ok(queries::collaboration_feed(&ideas))
    }
}

/// Error raised by the idea review service.
#[derive(Debug, thiserror::Error)]
pub enum IdeaServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Workflow(#[from] WorkflowViolation),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("idea {0} is not visible to this user")]
    NotVisible(IdeaId),
    #[error("guests may not comment on ideas")]
    CommentNotPermitted,
    #[error("role {role} may not delete ideas")]
    DeleteNotPermitted { role: Role },
}
