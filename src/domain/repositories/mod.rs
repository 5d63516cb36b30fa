//! Repository traits defining interfaces for data persistence.

mod todo_repository;
mod transaction;

pub use todo_repository::*;
pub use transaction::*;
