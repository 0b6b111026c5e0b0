use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use ideahub::workflows::ideas::{
    rubric, AssistError, EvaluationAssistant, FormTemplate, Idea, IdeaId, IdeaStore,
    RatingDimension, RatingSuggestion, Role, StoreError, TemplateStore, User, UserStatus,
    UserStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Idea collection held in memory. Insertion order is the collection order
/// the query layer sees, matching the backing document store's stable
/// listing.
#[derive(Default)]
pub(crate) struct InMemoryIdeaStore {
    ideas: Mutex<Vec<Idea>>,
}

impl IdeaStore for InMemoryIdeaStore {
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

pub(crate) struct InMemoryTemplateStore {
    templates: Mutex<Vec<FormTemplate>>,
}

impl InMemoryTemplateStore {
    /// Seed the default template so ideas always have a schema and rubric.
    pub(crate) fn seeded() -> Self {
        Self {
            templates: Mutex::new(vec![rubric::default_template()]),
        }
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn list(&self) -> Result<Vec<FormTemplate>, StoreError> {
        Ok(self
            .templates
            .lock()
            .expect("template store mutex poisoned")
            .clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl UserStore for InMemoryUserStore {
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

/// Canned evaluation collaborator for the CLI demo: scores every dimension
/// in the middle of the scale so the accept-or-override flow can be shown
/// without a live model endpoint.
pub(crate) struct DemoEvaluationAssistant;

impl EvaluationAssistant for DemoEvaluationAssistant {
    fn suggest(
        &self,
        idea: &Idea,
        dimensions: &[RatingDimension],
    ) -> Result<RatingSuggestion, AssistError> {
        let scores = dimensions
            .iter()
            .map(|dimension| (dimension.id.clone(), 3))
            .collect();

        Ok(RatingSuggestion {
            scores,
            comment: format!("Draft evaluation for '{}'; adjust before submitting.", idea.title),
        })
    }
}
