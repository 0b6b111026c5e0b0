use chrono::{DateTime, Utc};

use super::domain::{Actor, Idea, IdeaStatus, Role};

/// Rejection raised when a requested status change or edit is not allowed.
/// The message names the exact transition so callers can surface it as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowViolation {
    #[error("transition from {from} to {to} is not permitted")]
    IllegalTransition { from: IdeaStatus, to: IdeaStatus },
    #[error("role {role} may not move an idea from {from} to {to}")]
    ActorNotPermitted {
        role: Role,
        from: IdeaStatus,
        to: IdeaStatus,
    },
    #[error("only the author may edit this idea")]
    NotAuthor,
    #[error("an idea in {status} can no longer be edited by its author")]
    EditLocked { status: IdeaStatus },
}

/// Statuses a manager may move an idea to from the given state.
///
/// Rejected and Published are re-visitable; nothing in the model is a hard
/// terminal state. There is no shortcut from Draft to Published.
pub fn manager_destinations(from: IdeaStatus) -> &'static [IdeaStatus] {
    match from {
        IdeaStatus::Submitted => &[
            IdeaStatus::Approved,
            IdeaStatus::Rejected,
            IdeaStatus::NeedsRevision,
        ],
        IdeaStatus::Approved => &[
            IdeaStatus::Published,
            IdeaStatus::Rejected,
            IdeaStatus::NeedsRevision,
        ],
        IdeaStatus::Published => &[
            IdeaStatus::Approved,
            IdeaStatus::Rejected,
            IdeaStatus::NeedsRevision,
        ],
        IdeaStatus::Rejected => &[IdeaStatus::Approved, IdeaStatus::NeedsRevision],
        IdeaStatus::Draft | IdeaStatus::NeedsRevision => &[],
    }
}

/// Validate a review transition without applying it.
pub fn authorize_transition(
    from: IdeaStatus,
    to: IdeaStatus,
    actor: &Actor,
) -> Result<(), WorkflowViolation> {
    if actor.role != Role::Manager {
        return Err(WorkflowViolation::ActorNotPermitted {
            role: actor.role,
            from,
            to,
        });
    }

    if manager_destinations(from).contains(&to) {
        Ok(())
    } else {
        Err(WorkflowViolation::IllegalTransition { from, to })
    }
}

/// Apply a validated review transition. Status is the only field a
/// transition may change; `updated_at` is refreshed as a side effect.
pub fn apply_transition(
    idea: &mut Idea,
    to: IdeaStatus,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<(), WorkflowViolation> {
    authorize_transition(idea.status, to, actor)?;
    idea.status = to;
    idea.updated_at = now;
    Ok(())
}

/// Statuses in which the author may still touch content.
pub fn author_editable(status: IdeaStatus) -> bool {
    matches!(
        status,
        IdeaStatus::Draft | IdeaStatus::Submitted | IdeaStatus::NeedsRevision
    )
}

/// Authorize an authored save and resolve the status it results in.
///
/// Editing keeps the current status unless the author explicitly carries one:
/// the only author-driven moves are Draft -> Submitted (submit) and
/// NeedsRevision -> Submitted (resubmit).
pub fn authorize_author_edit(
    idea: &Idea,
    actor: &Actor,
    requested: Option<IdeaStatus>,
) -> Result<IdeaStatus, WorkflowViolation> {
    if !idea.is_authored_by(&actor.id) {
        return Err(WorkflowViolation::NotAuthor);
    }

    if !author_editable(idea.status) {
        return Err(WorkflowViolation::EditLocked {
            status: idea.status,
        });
    }

    match requested {
        None => Ok(idea.status),
        Some(status) if status == idea.status => Ok(status),
        Some(IdeaStatus::Submitted)
            if matches!(idea.status, IdeaStatus::Draft | IdeaStatus::NeedsRevision) =>
        {
            Ok(IdeaStatus::Submitted)
        }
        Some(status) => Err(WorkflowViolation::IllegalTransition {
            from: idea.status,
            to: status,
        }),
    }
}
