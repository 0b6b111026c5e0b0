use super::domain::{FormTemplate, Idea, IdeaId, Role, User, UserStatus};

/// Error enumeration for external store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Boundary to the external document store holding idea records.
///
/// `save` is an upsert by id with last-write-wins semantics; the core adds
/// no optimistic-concurrency check on top.
pub trait IdeaStore: Send + Sync {
    fn list(&self) -> Result<Vec<Idea>, StoreError>;
    fn save(&self, idea: Idea) -> Result<Idea, StoreError>;
    fn delete(&self, id: &IdeaId) -> Result<(), StoreError>;

    fn get(&self, id: &IdeaId) -> Result<Option<Idea>, StoreError> {
        Ok(self.list()?.into_iter().find(|idea| &idea.id == id))
    }
}

/// Boundary to the template collection. Implementations seed one default
/// template when the backing collection is empty.
pub trait TemplateStore: Send + Sync {
    fn list(&self) -> Result<Vec<FormTemplate>, StoreError>;
}

/// Boundary to the user directory mirrored from the auth provider.
pub trait UserStore: Send + Sync {
    fn list(&self) -> Result<Vec<User>, StoreError>;
    fn get(&self, id: &str) -> Result<Option<User>, StoreError>;
    fn register(&self, user: User) -> Result<User, StoreError>;
    fn update_status(
        &self,
        id: &str,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<User, StoreError>;
}
