use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::ideas::assist::{
    AssistError, ContentAssistant, EvaluationAssistant, RatingSuggestion,
};
use crate::workflows::ideas::domain::{
    fields, Actor, DynamicValue, FieldKind, FormField, FormTemplate, Idea, IdeaDraft, IdeaId,
    IdeaStatus, Rating, RatingDimension, Role, ScoreDetail, User, UserStatus,
};
use crate::workflows::ideas::grading::Grade;
use crate::workflows::ideas::router::idea_router;
use crate::workflows::ideas::rubric;
use crate::workflows::ideas::service::IdeaReviewService;
use crate::workflows::ideas::store::{
    IdeaStore, StoreError, TemplateStore, UserStore,
};

pub(super) fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn employee(id: &str, name: &str) -> Actor {
    Actor {
        id: id.to_string(),
        name: name.to_string(),
        role: Role::Employee,
        department: Some("Operations".to_string()),
    }
}

pub(super) fn manager(id: &str, name: &str) -> Actor {
    Actor {
        id: id.to_string(),
        name: name.to_string(),
        role: Role::Manager,
        department: None,
    }
}

pub(super) fn admin() -> Actor {
    Actor {
        id: "admin-1".to_string(),
        name: "Avery Admin".to_string(),
        role: Role::Admin,
        department: None,
    }
}

pub(super) fn guest() -> Actor {
    Actor {
        id: "guest-1".to_string(),
        name: "Visitor".to_string(),
        role: Role::Guest,
        department: None,
    }
}

pub(super) fn draft() -> IdeaDraft {
    let mut dynamic_data = BTreeMap::new();
    dynamic_data.insert(fields::COST.to_string(), DynamicValue::Number(4200.0));
    dynamic_data.insert(
        fields::TIMELINE.to_string(),
        DynamicValue::Text("Q3 2026".to_string()),
    );
    dynamic_data.insert(
        fields::COLLABORATION.to_string(),
        DynamicValue::Boolean(true),
    );

    IdeaDraft {
        title: "Reusable packaging loop".to_string(),
        description: "Switch outbound shipping to returnable crates.".to_string(),
        category: "Sustainability".to_string(),
        cover_image: None,
        tags: vec!["logistics".to_string(), "green".to_string()],
        template_id: Some("default".to_string()),
        dynamic_data,
        parent_idea_id: None,
        status: Some(IdeaStatus::Submitted),
    }
}

pub(super) fn custom_template() -> FormTemplate {
    FormTemplate {
        id: "pilot".to_string(),
        name: "Pilot Program".to_string(),
        description: "Short-form template for pilot proposals.".to_string(),
        fields: vec![
            FormField {
                id: "budget".to_string(),
                label: "Budget".to_string(),
                kind: FieldKind::Number,
                required: true,
            },
            FormField {
                id: "sponsor".to_string(),
                label: "Executive sponsor".to_string(),
                kind: FieldKind::Text,
                required: false,
            },
        ],
        rating_config: vec![
            RatingDimension {
                id: "value".to_string(),
                name: "Value".to_string(),
                description: String::new(),
                weight: 60.0,
            },
            RatingDimension {
                id: "effort".to_string(),
                name: "Effort".to_string(),
                description: String::new(),
                weight: 40.0,
            },
        ],
        is_active: true,
    }
}

/// Bare idea aggregate for query-layer tests that bypass the service.
pub(super) fn idea_with_status(id: &str, author_id: &str, status: IdeaStatus) -> Idea {
    let now = fixed_now();
    Idea {
        id: IdeaId(id.to_string()),
        author_id: author_id.to_string(),
        author_name: format!("Author {author_id}"),
        department: "Operations".to_string(),
        title: format!("Idea {id}"),
        description: "Body".to_string(),
        category: "General".to_string(),
        cover_image: None,
        tags: Vec::new(),
        status,
        template_id: None,
        template_name: None,
        dynamic_data: BTreeMap::new(),
        parent_idea_id: None,
        ratings: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn rating(manager_id: &str, percentage: u8) -> Rating {
    Rating {
        manager_id: manager_id.to_string(),
        manager_name: format!("Manager {manager_id}"),
        details: vec![ScoreDetail {
            dimension_id: "impact".to_string(),
            score: 3,
        }],
        total_score: f64::from(percentage) / 20.0,
        percentage,
        grade: Grade::from_percentage(percentage),
        comment: String::new(),
        created_at: fixed_now(),
    }
}

pub(super) fn spec_scores() -> BTreeMap<String, u8> {
    let mut scores = BTreeMap::new();
    scores.insert("impact".to_string(), 5);
    scores.insert("feasibility".to_string(), 4);
    scores.insert("roi".to_string(), 3);
    scores.insert("innovation".to_string(), 3);
    scores.insert("risk".to_string(), 2);
    scores
}

#[derive(Default)]
pub(super) struct MemoryIdeaStore {
    ideas: Mutex<Vec<Idea>>,
}

impl IdeaStore for MemoryIdeaStore {
    fn list(&self) -> Result<Vec<Idea>, StoreError> {
        Ok(self.ideas.lock().expect("idea store mutex poisoned").clone())
    }

    fn save(&self, idea: Idea) -> Result<Idea, StoreError> {
        let mut guard = self.ideas.lock().expect("idea store mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == idea.id) {
            Some(existing) => *existing = idea.clone(),
            None => guard.push(idea.clone()),
        }
        Ok(idea)
    }

    fn delete(&self, id: &IdeaId) -> Result<(), StoreError> {
        let mut guard = self.ideas.lock().expect("idea store mutex poisoned");
        let before = guard.len();
        guard.retain(|idea| &idea.id != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

pub(super) struct MemoryTemplateStore {
    templates: Mutex<Vec<FormTemplate>>,
}

impl MemoryTemplateStore {
    pub(super) fn seeded() -> Self {
        Self {
            templates: Mutex::new(vec![rubric::default_template()]),
        }
    }

    pub(super) fn with_templates(templates: Vec<FormTemplate>) -> Self {
        Self {
            templates: Mutex::new(templates),
        }
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn list(&self) -> Result<Vec<FormTemplate>, StoreError> {
        Ok(self
            .templates
            .lock()
            .expect("template store mutex poisoned")
            .clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl UserStore for MemoryUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().expect("user store mutex poisoned").clone())
    }

    fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .expect("user store mutex poisoned")
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    fn register(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.users.lock().expect("user store mutex poisoned");
        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(StoreError::Conflict);
        }
        guard.push(user.clone());
        Ok(user)
    }

    fn update_status(
        &self,
        id: &str,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<User, StoreError> {
        let mut guard = self.users.lock().expect("user store mutex poisoned");
        let user = guard
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(StoreError::NotFound)?;
        user.status = status;
        if let Some(role) = role {
            user.role = role;
        }
        Ok(user.clone())
    }
}

pub(super) struct UnavailableIdeaStore;

impl IdeaStore for UnavailableIdeaStore {
    fn list(&self) -> Result<Vec<Idea>, StoreError> {
        Err(StoreError::Unavailable("document store offline".to_string()))
    }

    fn save(&self, _idea: Idea) -> Result<Idea, StoreError> {
        Err(StoreError::Unavailable("document store offline".to_string()))
    }

    fn delete(&self, _id: &IdeaId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("document store offline".to_string()))
    }
}

pub(super) struct ScriptedAssistant {
    pub(super) suggestion: RatingSuggestion,
}

impl EvaluationAssistant for ScriptedAssistant {
    fn suggest(
        &self,
        _idea: &Idea,
        _dimensions: &[RatingDimension],
    ) -> Result<RatingSuggestion, AssistError> {
        Ok(self.suggestion.clone())
    }
}

pub(super) struct UnavailableAssistant;

impl EvaluationAssistant for UnavailableAssistant {
    fn suggest(
        &self,
        _idea: &Idea,
        _dimensions: &[RatingDimension],
    ) -> Result<RatingSuggestion, AssistError> {
        Err(AssistError::Unavailable("model endpoint offline".to_string()))
    }
}

impl ContentAssistant for UnavailableAssistant {
    fn enhance(&self, _text: &str) -> Result<String, AssistError> {
        Err(AssistError::Unavailable("model endpoint offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    IdeaReviewService<MemoryIdeaStore, MemoryTemplateStore>,
    Arc<MemoryIdeaStore>,
    Arc<MemoryTemplateStore>,
) {
    let ideas = Arc::new(MemoryIdeaStore::default());
    let templates = Arc::new(MemoryTemplateStore::seeded());
    let service = IdeaReviewService::new(ideas.clone(), templates.clone());
    (service, ideas, templates)
}

pub(super) fn idea_router_with_service(
    service: IdeaReviewService<MemoryIdeaStore, MemoryTemplateStore>,
) -> axum::Router {
    idea_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
