//! JSON API handlers mounted under `/api/v1/todos`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{ApiError, AppState, CreateTodoRequest, TodoResource};
use crate::connector::validate_title;

/// `GET /api/v1/todos`
pub async fn get_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResource>>, ApiError> {
    let todos = state.service().find_all().await?;
    Ok(Json(todos.iter().map(TodoResource::from).collect()))
}

/// `POST /api/v1/todos`
///
/// - **201 Created**: the stored Todo
/// - **400 Bad Request**: malformed body or invalid title
/// - **409 Conflict**: unfinished limit reached
pub async fn post_todos(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResource>), ApiError> {
    let Json(request) = payload?;
    let title = validate_title(request.todo_title.as_deref())?;

    let todo = state.service().create(title).await?;
    Ok((StatusCode::CREATED, Json(TodoResource::from(&todo))))
}

/// `GET /api/v1/todos/{todo_id}`
pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<Json<TodoResource>, ApiError> {
    let todo = state.service().find_one(&todo_id).await?;
    Ok(Json(TodoResource::from(&todo)))
}

/// `PUT /api/v1/todos/{todo_id}` marks the Todo finished.
pub async fn put_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<Json<TodoResource>, ApiError> {
    let todo = state.service().finish(&todo_id).await?;
    Ok(Json(TodoResource::from(&todo)))
}

/// `DELETE /api/v1/todos/{todo_id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service().delete(&todo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
