use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grading::Grade;

/// Identifier wrapper for idea aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdeaId(pub String);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle states an idea moves through between first draft and publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdeaStatus {
    Draft,
    Submitted,
    NeedsRevision,
    Approved,
    Rejected,
    Published,
}

impl IdeaStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::NeedsRevision => "Needs Revision",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Published => "Published",
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform roles as asserted by the authentication gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    Guest,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Employee => "Employee",
            Self::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller identity attached to every mutating request. Authentication itself
/// happens upstream; the core only reasons about the asserted id and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
}

/// Typed value stored in an idea's open `dynamic_data` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl DynamicValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DynamicValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Canonical `dynamic_data` keys the platform understands across templates.
/// Legacy exports use older spellings; the normalizer folds those into these.
pub mod fields {
    pub const COST: &str = "cost";
    pub const TIMELINE: &str = "timeline";
    pub const COLLABORATION: &str = "openForCollaboration";
}

/// One weighted criterion an idea is scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDimension {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weight: f32,
}

/// Data type a template field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    pub fn accepts(self, value: &DynamicValue) -> bool {
        matches!(
            (self, value),
            (Self::Text, DynamicValue::Text(_))
                | (Self::Number, DynamicValue::Number(_))
                | (Self::Boolean, DynamicValue::Boolean(_))
        )
    }
}

/// Schema entry for one dynamic field on a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

/// Template defining an idea's dynamic-field schema and grading rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FormField>,
    pub rating_config: Vec<RatingDimension>,
    pub is_active: bool,
}

/// Raw score one manager gave for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub dimension_id: String,
    pub score: u8,
}

/// One manager's evaluation of an idea. `total_score`, `percentage`, and
/// `grade` are derived from `details` and the rubric weights, never set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub manager_id: String,
    pub manager_name: String,
    pub details: Vec<ScoreDetail>,
    pub total_score: f64,
    pub percentage: u8,
    pub grade: Grade,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Discussion entry. Append-only; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub author_id: String,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// The central aggregate: a proposal with its content, workflow state,
/// ratings, and discussion. The field layout is the wire contract for the
/// external document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: IdeaId,
    pub author_id: String,
    pub author_name: String,
    pub department: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default)]
    pub dynamic_data: BTreeMap<String, DynamicValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_idea_id: Option<IdeaId>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    pub fn is_authored_by(&self, actor_id: &str) -> bool {
        self.author_id == actor_id
    }

    /// Whether the author opened this idea for cross-team contributions.
    pub fn collaboration_open(&self) -> bool {
        self.dynamic_data
            .get(fields::COLLABORATION)
            .and_then(DynamicValue::as_bool)
            .unwrap_or(false)
    }
}

/// Author-provided payload used to create or edit an idea. Authorship and
/// timestamps come from the caller identity and clock, not the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub dynamic_data: BTreeMap<String, DynamicValue>,
    #[serde(default)]
    pub parent_idea_id: Option<IdeaId>,
    #[serde(default)]
    pub status: Option<IdeaStatus>,
}

/// Account lifecycle for platform users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserStatus {
    Pending,
    Active,
    Disabled,
}

impl UserStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Disabled => "Disabled",
        }
    }
}

/// Platform user record mirrored from the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Self-registration payload; the id is the auth provider's subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
}
