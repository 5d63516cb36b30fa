//! HTTP front ends: the JSON API under `/api/v1` and the list page under `/todo`.

mod dto;
mod error;
pub mod pages;
pub mod rest;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::response::Redirect;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::TodoService;

pub use dto::*;
pub use error::*;
pub use pages::{MessageKind, PageMessage};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<TodoService>,
    /// One-shot message shown by the next list page render.
    flash: Arc<Mutex<Option<PageMessage>>>,
}

impl AppState {
    pub fn new(service: Arc<TodoService>) -> Self {
        Self {
            service,
            flash: Arc::new(Mutex::new(None)),
        }
    }

    pub fn service(&self) -> &TodoService {
        &self.service
    }
}

pub fn router(service: Arc<TodoService>) -> axum::Router {
    axum::Router::new()
        .route("/", get(|| async { Redirect::to(pages::LIST_PATH) }))
        .route("/api/v1/todos", get(rest::get_todos).post(rest::post_todos))
        .route(
            "/api/v1/todos/{todo_id}",
            get(rest::get_todo).put(rest::put_todo).delete(rest::delete_todo),
        )
        .route(pages::LIST_PATH, get(pages::list))
        .route("/todo/create", post(pages::create))
        .route("/todo/finish", post(pages::finish))
        .route("/todo/delete", post(pages::delete))
        .with_state(AppState::new(service))
}

pub async fn serve(service: Arc<TodoService>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service)).await?;
    Ok(())
}
