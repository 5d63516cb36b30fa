use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::{
    DomainError, Todo, TodoRepository, Transaction, TransactionManager, TransactionMode,
};

/// Process-local Todo store.
///
/// A transaction holds the store lock from `begin` until it is committed or
/// dropped, so transactions never interleave. Writes go to a private copy of
/// the map that replaces the committed state on `commit`.
pub struct InMemoryTodoRepository {
    todos: Arc<Mutex<HashMap<String, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionManager for InMemoryTodoRepository {
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn Transaction>, DomainError> {
        let committed = Arc::clone(&self.todos).lock_owned().await;
        let working = committed.clone();

        Ok(Box::new(InMemoryTransaction {
            committed,
            working: Mutex::new(working),
            mode,
        }))
    }
}

struct InMemoryTransaction {
    committed: OwnedMutexGuard<HashMap<String, Todo>>,
    working: Mutex<HashMap<String, Todo>>,
    mode: TransactionMode,
}

impl InMemoryTransaction {
    fn ensure_writable(&self) -> Result<(), DomainError> {
        match self.mode {
            TransactionMode::ReadWrite => Ok(()),
            TransactionMode::ReadOnly => {
                Err(DomainError::storage("Write attempted in a read-only transaction"))
            }
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTransaction {
    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, DomainError> {
        let todos = self.working.lock().await;
        Ok(todos.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        let todos = self.working.lock().await;
        let mut all: Vec<Todo> = todos.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(all)
    }

    async fn count_unfinished(&self) -> Result<u64, DomainError> {
        let todos = self.working.lock().await;
        Ok(todos.values().filter(|t| !t.is_finished()).count() as u64)
    }

    async fn insert(&self, todo: &Todo) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let mut todos = self.working.lock().await;
        if todos.contains_key(todo.id()) {
            return Err(DomainError::storage(format!(
                "Todo already exists: {}",
                todo.id()
            )));
        }
        todos.insert(todo.id().to_string(), todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let mut todos = self.working.lock().await;
        match todos.get_mut(todo.id()) {
            Some(stored) => {
                *stored = todo.clone();
                Ok(())
            }
            None => Err(DomainError::storage(format!(
                "Cannot update missing todo: {}",
                todo.id()
            ))),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let mut todos = self.working.lock().await;
        todos.remove(id);
        Ok(())
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let this = *self;
        let mut committed = this.committed;
        *committed = this.working.into_inner();
        debug!("Committed in-memory transaction ({} todos)", committed.len());
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        debug!("Rolled back in-memory transaction");
        Ok(())
    }
}
