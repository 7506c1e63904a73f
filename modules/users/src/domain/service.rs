use std::sync::Arc;

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        debug!("Getting user by id");
        require_non_empty("id", id)?;

        let user = self.repo.find_by_id(id).await?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(name = "users.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list_all().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(
        name = "users.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email, name = %new_user.name)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        require_non_empty("name", &new_user.name)?;
        require_non_empty("email", &new_user.email)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(user.clone()).await?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");
        require_non_empty("id", id)?;

        let mut current = self.repo.find_by_id(id).await?;

        if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
            current.name = name;
        }
        if let Some(email) = patch.email.filter(|e| !e.is_empty()) {
            current.email = email;
        }
        // Clock skew must not move updated_at behind its previous value.
        current.updated_at = Utc::now().max(current.updated_at);

        self.repo.update(current.clone()).await?;

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "users.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");
        require_non_empty("id", id)?;

        self.repo.delete(id).await?;

        info!("Successfully deleted user");
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        debug!(field, "Rejecting empty input");
        return Err(DomainError::empty_field(field));
    }
    Ok(())
}
