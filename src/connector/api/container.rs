use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::{TodoService, TodoServiceConfig, TransactionManager};
use crate::{DuckdbTodoRepository, InMemoryTodoRepository};

pub const DATABASE_FILE: &str = "todolist.duckdb";

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep todos in process memory instead of the DuckDB file under `data_dir`.
    pub memory_storage: bool,
    pub max_unfinished: u64,
}

pub struct Container {
    todo_service: Arc<TodoService>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let store: Arc<dyn TransactionManager> = if config.memory_storage {
            debug!("Using in-memory todo storage");
            Arc::new(InMemoryTodoRepository::new())
        } else {
            let db_path = PathBuf::from(&config.data_dir).join(DATABASE_FILE);
            let duckdb = DuckdbTodoRepository::new(&db_path)
                .with_context(|| format!("Failed to open todo database {}", db_path.display()))?;
            debug!("Using DuckDB todo storage at {:?}", db_path);
            Arc::new(duckdb)
        };

        let todo_service = Arc::new(TodoService::new(
            store,
            TodoServiceConfig {
                max_unfinished: config.max_unfinished,
            },
        ));

        Ok(Self {
            todo_service,
            config,
        })
    }

    pub fn todo_service(&self) -> Arc<TodoService> {
        Arc::clone(&self.todo_service)
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }

    pub fn memory_storage(&self) -> bool {
        self.config.memory_storage
    }
}
