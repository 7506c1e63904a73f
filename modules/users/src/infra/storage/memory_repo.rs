//! In-memory repository implementation for the domain port.
//!
//! One `HashMap` behind one reader/writer lock: writers (insert/update/delete)
//! exclude everyone, readers (find/list) share. The guard is never held
//! across an `.await`.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::contract::model::User;
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

/// Process-lifetime user store. Records are owned here; callers get clones.
#[derive(Default)]
pub struct InMemoryUsersRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn insert(&self, user: User) -> Result<(), DomainError> {
        // No uniqueness check: ids are generated by the service.
        self.users.write().insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<User, DomainError> {
        self.users
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<(), DomainError> {
        let mut users = self.users.write();
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(DomainError::user_not_found(user.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.users
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn user(id: &str, name: &str) -> User {
        let now = Utc::now();
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_overwrites_same_id() {
        let repo = InMemoryUsersRepository::new();
        repo.insert(user("u1", "alice")).await.unwrap();
        repo.insert(user("u1", "bob")).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id("u1").await.unwrap().name, "bob");
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let repo = InMemoryUsersRepository::new();
        assert_eq!(
            repo.find_by_id("nope").await,
            Err(DomainError::user_not_found("nope"))
        );
    }

    #[tokio::test]
    async fn update_requires_existing_record() {
        let repo = InMemoryUsersRepository::new();
        let err = repo.update(user("ghost", "casper")).await.unwrap_err();
        assert_eq!(err, DomainError::user_not_found("ghost"));
        assert!(repo.is_empty(), "failed update must not insert");

        repo.insert(user("u1", "alice")).await.unwrap();
        repo.update(user("u1", "alicia")).await.unwrap();
        assert_eq!(repo.find_by_id("u1").await.unwrap().name, "alicia");
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = InMemoryUsersRepository::new();
        repo.insert(user("u1", "alice")).await.unwrap();

        repo.delete("u1").await.unwrap();
        assert_eq!(
            repo.delete("u1").await,
            Err(DomainError::user_not_found("u1"))
        );
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn list_all_is_a_snapshot() {
        let repo = InMemoryUsersRepository::new();
        repo.insert(user("u1", "alice")).await.unwrap();
        repo.insert(user("u2", "bob")).await.unwrap();

        let snapshot = repo.list_all().await.unwrap();
        repo.delete("u1").await.unwrap();
        repo.update(user("u2", "robert")).await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.iter().any(|u| u.name == "bob"));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_never_see_a_torn_record() {
        let repo = Arc::new(InMemoryUsersRepository::new());
        repo.insert(user("u1", "v0")).await.unwrap();

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 1..=500 {
                    let name = format!("v{i}");
                    repo.update(user("u1", &name)).await.unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    for _ in 0..500 {
                        // name and email are written together; a torn read would mismatch
                        let u = repo.find_by_id("u1").await.unwrap();
                        assert_eq!(u.email, format!("{}@example.com", u.name));
                        for u in repo.list_all().await.unwrap() {
                            assert_eq!(u.email, format!("{}@example.com", u.name));
                        }
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for r in readers {
            r.await.unwrap();
        }
        assert_eq!(repo.find_by_id("u1").await.unwrap().name, "v500");
    }
}
