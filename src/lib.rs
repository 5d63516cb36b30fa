pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use connector::{DuckdbTodoRepository, InMemoryTodoRepository, ValidationError};

pub use domain::{
    DomainError, Todo, TodoRepository, TodoService, TodoServiceConfig, TodoStatus, Transaction,
    TransactionManager, TransactionMode, DEFAULT_MAX_UNFINISHED, MAX_TITLE_LENGTH,
};
