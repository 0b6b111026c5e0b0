use serde::Serialize;

use super::domain::{Actor, Idea, IdeaId, IdeaStatus, Role};
use super::ledger;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// One row of the landing-page leaderboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: IdeaId,
    pub title: String,
    pub author_name: String,
    pub department: String,
    pub category: String,
    pub average_percentage: f64,
    pub ratings: usize,
}

/// Compact idea representation for search results and feeds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSummaryView {
    pub id: IdeaId,
    pub title: String,
    pub category: String,
    pub author_name: String,
    pub status: IdeaStatus,
    pub status_label: &'static str,
    pub average_percentage: f64,
    pub ratings: usize,
    pub collaboration_open: bool,
}

impl IdeaSummaryView {
    fn from_idea(idea: &Idea) -> Self {
        Self {
            id: idea.id.clone(),
            title: idea.title.clone(),
            category: idea.category.clone(),
            author_name: idea.author_name.clone(),
            status: idea.status,
            status_label: idea.status.label(),
            average_percentage: ledger::average_percentage(idea),
            ratings: idea.ratings.len(),
            collaboration_open: idea.collaboration_open(),
        }
    }
}

/// Published ideas ranked by mean rating percentage, best first. The sort is
/// stable, so ties keep the collection order.
pub fn top_ideas(ideas: &[Idea], limit: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(&Idea, f64)> = ideas
        .iter()
        .filter(|idea| idea.status == IdeaStatus::Published)
        .map(|idea| (idea, ledger::average_percentage(idea)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(limit)
        .map(|(idea, average_percentage)| LeaderboardEntry {
            id: idea.id.clone(),
            title: idea.title.clone(),
            author_name: idea.author_name.clone(),
            department: idea.department.clone(),
            category: idea.category.clone(),
            average_percentage,
            ratings: idea.ratings.len(),
        })
        .collect()
}

/// Whether the viewer may see the idea at all.
///
/// Authors always see their own ideas; Published ideas are visible to
/// everyone; Approved ideas open for collaboration are browsable; Admin,
/// Manager, and the read-only Guest role see the full collection. Draft
/// ideas of other employees stay hidden.
pub fn can_view(idea: &Idea, viewer: &Actor) -> bool {
    idea.is_authored_by(&viewer.id)
        || idea.status == IdeaStatus::Published
        || (idea.status == IdeaStatus::Approved && idea.collaboration_open())
        || matches!(viewer.role, Role::Admin | Role::Manager | Role::Guest)
}

/// Case-insensitive substring search over the visibility-passing set.
/// Results stay in collection order; there is no relevance ranking.
pub fn search(ideas: &[Idea], query: &str, viewer: &Actor) -> Vec<IdeaSummaryView> {
    let needle = query.trim().to_lowercase();

    ideas
        .iter()
        .filter(|idea| can_view(idea, viewer))
        .filter(|idea| matches_query(idea, &needle))
        .map(IdeaSummaryView::from_idea)
        .collect()
}

fn matches_query(idea: &Idea, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    idea.title.to_lowercase().contains(needle)
        || idea.description.to_lowercase().contains(needle)
        || idea.category.to_lowercase().contains(needle)
        || idea.author_name.to_lowercase().contains(needle)
        || idea
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Top-level ideas open for cross-team contributions.
pub fn collaboration_feed(ideas: &[Idea]) -> Vec<IdeaSummaryView> {
    ideas
        .iter()
        .filter(|idea| idea.collaboration_open())
        .filter(|idea| idea.parent_idea_id.is_none())
        .filter(|idea| {
            matches!(
                idea.status,
                IdeaStatus::Approved | IdeaStatus::Published | IdeaStatus::Submitted
            )
        })
        .map(IdeaSummaryView::from_idea)
        .collect()
}
