//! # Connector Layer
//!
//! Everything around the domain service:
//! - Storage (DuckDB on disk, in-memory for tests and throwaway runs)
//! - CLI controllers wired through the container
//! - HTTP front ends (JSON API and server-rendered pages)

pub mod adapter;
pub mod api;
pub mod http;
mod validation;

pub use adapter::*;
pub use validation::*;
