use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::domain::{Actor, Idea, Rating, RatingDimension, Role, ScoreDetail};
use super::grading;

/// Rejection raised before a rating touches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("only managers may rate ideas")]
    NotManager,
    #[error("score {score} for dimension '{dimension}' is outside the 1-5 range")]
    ScoreOutOfRange { dimension: String, score: u8 },
}

/// Record a manager's evaluation on the idea.
///
/// Any prior rating from the same manager is replaced (filter-then-append):
/// other managers' entries keep their insertion order and the new rating is
/// appended last. Derived fields come from the grading engine; absent
/// dimensions default to the minimum raw score there.
pub fn submit(
    idea: &mut Idea,
    reviewer: &Actor,
    scores: &BTreeMap<String, u8>,
    comment: impl Into<String>,
    dimensions: &[RatingDimension],
    now: DateTime<Utc>,
) -> Result<(), RatingError> {
    if reviewer.role != Role::Manager {
        return Err(RatingError::NotManager);
    }

    for (dimension, score) in scores {
        if !(1..=5).contains(score) {
            return Err(RatingError::ScoreOutOfRange {
                dimension: dimension.clone(),
                score: *score,
            });
        }
    }

    let outcome = grading::grade(dimensions, scores);
    let details = dimensions
        .iter()
        .map(|dimension| ScoreDetail {
            dimension_id: dimension.id.clone(),
            score: scores.get(&dimension.id).copied().unwrap_or(1),
        })
        .collect();

    idea.ratings
        .retain(|rating| rating.manager_id != reviewer.id);
    idea.ratings.push(Rating {
        manager_id: reviewer.id.clone(),
        manager_name: reviewer.name.clone(),
        details,
        total_score: outcome.total_score,
        percentage: outcome.percentage,
        grade: outcome.grade,
        comment: comment.into(),
        created_at: now,
    });
    idea.updated_at = now;

    Ok(())
}

/// Mean rating percentage across all raters; 0 with no ratings.
pub fn average_percentage(idea: &Idea) -> f64 {
    if idea.ratings.is_empty() {
        return 0.0;
    }

    let sum: f64 = idea
        .ratings
        .iter()
        .map(|rating| f64::from(rating.percentage))
        .sum();
    sum / idea.ratings.len() as f64
}
