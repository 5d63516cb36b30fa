//! Domain services containing the core business rules.

mod todo_service;

pub use todo_service::*;
