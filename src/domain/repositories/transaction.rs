use async_trait::async_trait;

use crate::domain::{DomainError, TodoRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

/// A unit of work over the Todo store.
///
/// Reads and writes issued through the transaction become visible to other
/// transactions only after `commit`. Dropping a transaction without committing
/// discards its writes.
#[async_trait]
pub trait Transaction: TodoRepository {
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}

/// Opens transactions. The implementation decides the isolation mechanism.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn Transaction>, DomainError>;
}
