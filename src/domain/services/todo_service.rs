use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, Todo, Transaction, TransactionManager, TransactionMode};

pub const DEFAULT_MAX_UNFINISHED: u64 = 5;

#[derive(Debug, Clone, Copy)]
pub struct TodoServiceConfig {
    /// Number of unfinished Todos allowed at once; `create` is rejected at this count.
    pub max_unfinished: u64,
}

impl Default for TodoServiceConfig {
    fn default() -> Self {
        Self {
            max_unfinished: DEFAULT_MAX_UNFINISHED,
        }
    }
}

/// Business rules for the Todo list.
///
/// Every public operation runs inside exactly one transaction obtained from the
/// [`TransactionManager`]; it is committed when the operation succeeds and
/// rolled back otherwise.
pub struct TodoService {
    transactions: Arc<dyn TransactionManager>,
    config: TodoServiceConfig,
}

impl TodoService {
    pub fn new(transactions: Arc<dyn TransactionManager>, config: TodoServiceConfig) -> Self {
        Self {
            transactions,
            config,
        }
    }

    pub async fn find_one(&self, id: &str) -> Result<Todo, DomainError> {
        let id = id.to_string();
        self.in_transaction(TransactionMode::ReadOnly, move |tx| {
            Box::pin(async move { load(tx, &id).await })
        })
        .await
    }

    /// Snapshot of every stored Todo, in whatever order the store yields them.
    pub async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        let todos = self
            .in_transaction(TransactionMode::ReadOnly, |tx| {
                Box::pin(async move { tx.find_all().await })
            })
            .await?;

        debug!("Loaded {} todos", todos.len());
        Ok(todos)
    }

    /// Stores a new unfinished Todo. The title is expected to be validated by the caller.
    pub async fn create(&self, title: &str) -> Result<Todo, DomainError> {
        let title = title.to_string();
        let max_unfinished = self.config.max_unfinished;

        let todo = self
            .in_transaction(TransactionMode::ReadWrite, move |tx| {
                Box::pin(async move {
                    let unfinished = tx.count_unfinished().await?;
                    if unfinished >= max_unfinished {
                        return Err(DomainError::business(
                            "E001",
                            format!(
                                "The count of un-finished Todo must not be over {}.",
                                max_unfinished
                            ),
                        ));
                    }

                    let todo = Todo::new(title);
                    tx.insert(&todo).await?;
                    Ok(todo)
                })
            })
            .await?;

        info!("Created todo {} ({})", todo.id(), todo.title());
        Ok(todo)
    }

    pub async fn finish(&self, id: &str) -> Result<Todo, DomainError> {
        let id = id.to_string();

        let todo = self
            .in_transaction(TransactionMode::ReadWrite, move |tx| {
                Box::pin(async move {
                    let mut todo = load(tx, &id).await?;
                    if todo.is_finished() {
                        return Err(DomainError::business(
                            "E002",
                            format!("The requested Todo is already finished. (id={})", id),
                        ));
                    }

                    todo.mark_finished();
                    tx.update(&todo).await?;
                    Ok(todo)
                })
            })
            .await?;

        info!("Finished todo {}", todo.id());
        Ok(todo)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = id.to_string();

        let todo = self
            .in_transaction(TransactionMode::ReadWrite, move |tx| {
                Box::pin(async move {
                    let todo = load(tx, &id).await?;
                    tx.delete_by_id(todo.id()).await?;
                    Ok(todo)
                })
            })
            .await?;

        info!("Deleted todo {}", todo.id());
        Ok(())
    }

    /// Runs `operation` inside one transaction: commit on `Ok`, roll back on `Err`.
    async fn in_transaction<T, F>(
        &self,
        mode: TransactionMode,
        operation: F,
    ) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t dyn Transaction) -> BoxFuture<'t, Result<T, DomainError>> + Send,
    {
        let tx = self.transactions.begin(mode).await?;
        let result = operation(&*tx).await;

        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Failed to roll back transaction: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

async fn load(tx: &dyn Transaction, id: &str) -> Result<Todo, DomainError> {
    tx.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(id))
}
