use std::sync::Arc;

use super::domain::{Actor, Role, User, UserRegistration, UserStatus};
use super::store::{StoreError, UserStore};

/// Error raised by user-directory operations.
#[derive(Debug, thiserror::Error)]
pub enum UserDirectoryError {
    #[error("only admins may manage user accounts")]
    NotAdmin,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Facade over the auth-provider-backed user store. Registration is open;
/// account management is admin-gated.
pub struct UserDirectory<U> {
    users: Arc<U>,
}

impl<U> UserDirectory<U>
where
    U: UserStore + 'static,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Register a new account. New users start as pending employees until an
    /// admin activates them.
    pub fn register(&self, registration: UserRegistration) -> Result<User, UserDirectoryError> {
        let user = User {
            id: registration.id,
            name: registration.name,
            email: registration.email,
            department: registration.department,
            role: Role::Employee,
            status: UserStatus::Pending,
        };

        Ok(self.users.register(user)?)
    }

    /// Change an account's status, optionally reassigning its role.
    pub fn update_status(
        &self,
        actor: &Actor,
        id: &str,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<User, UserDirectoryError> {
        if actor.role != Role::Admin {
            return Err(UserDirectoryError::NotAdmin);
        }

        Ok(self.users.update_status(id, status, role)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.users.get(id)?)
    }

    pub fn list(&self, actor: &Actor) -> Result<Vec<User>, UserDirectoryError> {
        if !matches!(actor.role, Role::Admin | Role::Manager) {
            return Err(UserDirectoryError::NotAdmin);
        }

        Ok(self.users.list()?)
    }
}
