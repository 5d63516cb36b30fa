use async_trait::async_trait;

use crate::domain::{DomainError, Todo};

/// Record-level access to stored Todos.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Todo>, DomainError>;

    async fn count_unfinished(&self) -> Result<u64, DomainError>;

    /// Fails with a storage error if a Todo with the same id is already stored.
    async fn insert(&self, todo: &Todo) -> Result<(), DomainError>;

    /// Overwrites the stored Todo with the same id; fails with a storage error if absent.
    async fn update(&self, todo: &Todo) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}
