mod duckdb_todo_repository;
mod in_memory_todo_repository;

pub use duckdb_todo_repository::*;
pub use in_memory_todo_repository::*;
