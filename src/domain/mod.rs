//! # Domain Layer
//!
//! The Todo entity, the repository contract it is persisted through, and the
//! service enforcing the business rules. Nothing here knows about HTTP,
//! DuckDB or the CLI.

mod error;
pub mod models;
pub mod repositories;
pub mod services;

pub use error::*;
pub use models::*;
pub use repositories::*;
pub use services::*;
