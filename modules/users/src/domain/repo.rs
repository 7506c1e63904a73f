use async_trait::async_trait;

use crate::contract::model::User;
use crate::domain::error::DomainError;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Store a fully-formed user, overwriting any record with the same id.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, user: User) -> Result<(), DomainError>;
    /// Load a user by id; `UserNotFound` if absent.
    async fn find_by_id(&self, id: &str) -> Result<User, DomainError>;
    /// Snapshot of every stored user, in no particular order.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
    /// Replace an existing user (matched by `user.id`); `UserNotFound` if absent.
    async fn update(&self, user: User) -> Result<(), DomainError>;
    /// Remove a user by id; `UserNotFound` if absent.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
