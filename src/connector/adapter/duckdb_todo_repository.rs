use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use duckdb::{params, Connection};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::domain::{
    DomainError, Todo, TodoRepository, Transaction, TransactionManager, TransactionMode,
};

const SELECT_TODOS: &str = "SELECT todo_id, todo_title, finished, created_at FROM todos";

/// DuckDB-backed Todo store.
///
/// Transactions are serialized through `gate`: a transaction owns it from
/// `begin` until commit, rollback or drop. The connection lock itself is only
/// held for the duration of a single statement.
pub struct DuckdbTodoRepository {
    conn: Arc<Mutex<Connection>>,
    gate: Arc<Mutex<()>>,
}

impl DuckdbTodoRepository {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DomainError> {
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            gate: Arc::new(Mutex::new(())),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                todo_id TEXT PRIMARY KEY,
                todo_title TEXT NOT NULL,
                finished BOOLEAN NOT NULL DEFAULT FALSE,
                created_at BIGINT NOT NULL
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB todo schema initialized");
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for DuckdbTodoRepository {
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn Transaction>, DomainError> {
        let permit = Arc::clone(&self.gate).lock_owned().await;

        {
            let conn = self.conn.lock().await;
            conn.execute_batch("BEGIN TRANSACTION")
                .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;
        }

        Ok(Box::new(DuckdbTransaction {
            conn: Arc::clone(&self.conn),
            mode,
            open: true,
            _permit: permit,
        }))
    }
}

struct DuckdbTransaction {
    conn: Arc<Mutex<Connection>>,
    mode: TransactionMode,
    open: bool,
    _permit: OwnedMutexGuard<()>,
}

impl DuckdbTransaction {
    fn ensure_writable(&self) -> Result<(), DomainError> {
        match self.mode {
            TransactionMode::ReadWrite => Ok(()),
            TransactionMode::ReadOnly => {
                Err(DomainError::storage("Write attempted in a read-only transaction"))
            }
        }
    }

    async fn finish(&mut self, statement: &str) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(statement)
            .map_err(|e| DomainError::storage(format!("Failed to {}: {}", statement, e)))?;
        self.open = false;
        Ok(())
    }
}

impl Drop for DuckdbTransaction {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        // The gate is still held here, so nobody else can own the connection.
        match self.conn.try_lock() {
            Ok(conn) => {
                if let Err(e) = conn.execute_batch("ROLLBACK") {
                    warn!("Failed to roll back abandoned transaction: {}", e);
                }
            }
            Err(_) => warn!("Connection busy; abandoned transaction was not rolled back"),
        }
    }
}

type TodoRow = (String, String, bool, i64);

fn read_row(row: &duckdb::Row<'_>) -> duckdb::Result<TodoRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn to_todo((id, title, finished, created_at): TodoRow) -> Result<Todo, DomainError> {
    let created_at = DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
        DomainError::internal(format!("Invalid created_at {} for todo {}", created_at, id))
    })?;
    Ok(Todo::reconstitute(id, title, finished, created_at))
}

#[async_trait]
impl TodoRepository for DuckdbTransaction {
    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} WHERE todo_id = ?1", SELECT_TODOS))
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![id], read_row) {
            Ok(row) => Ok(Some(to_todo(row)?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Failed to query todo: {}", e))),
        }
    }

    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY created_at, todo_id", SELECT_TODOS))
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], read_row)
            .map_err(|e| DomainError::storage(format!("Failed to query todos: {}", e)))?;

        let mut todos = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            todos.push(to_todo(row)?);
        }
        Ok(todos)
    }

    async fn count_unfinished(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM todos WHERE finished = FALSE",
                [],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to count todos: {}", e)))?;
        Ok(count as u64)
    }

    async fn insert(&self, todo: &Todo) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO todos (todo_id, todo_title, finished, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                todo.id(),
                todo.title(),
                todo.is_finished(),
                todo.created_at().timestamp_millis(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to insert todo {}: {}", todo.id(), e)))?;
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let conn = self.conn.lock().await;
        let updated = conn
            .execute(
                "UPDATE todos SET todo_title = ?1, finished = ?2, created_at = ?3 WHERE todo_id = ?4",
                params![
                    todo.title(),
                    todo.is_finished(),
                    todo.created_at().timestamp_millis(),
                    todo.id(),
                ],
            )
            .map_err(|e| DomainError::storage(format!("Failed to update todo: {}", e)))?;

        if updated == 0 {
            return Err(DomainError::storage(format!(
                "Cannot update missing todo: {}",
                todo.id()
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        self.ensure_writable()?;
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM todos WHERE todo_id = ?1", params![id])
            .map_err(|e| DomainError::storage(format!("Failed to delete todo: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl Transaction for DuckdbTransaction {
    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let mut this = self;
        this.finish("COMMIT").await
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        let mut this = self;
        this.finish("ROLLBACK").await
    }
}
