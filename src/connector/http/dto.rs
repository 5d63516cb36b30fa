//! Wire shapes for the HTTP front ends and their conversions from [`Todo`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Todo;

/// JSON representation of a Todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResource {
    pub todo_id: String,
    pub todo_title: String,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResource {
    fn from(todo: &Todo) -> Self {
        Self {
            todo_id: todo.id().to_string(),
            todo_title: todo.title().to_string(),
            finished: todo.is_finished(),
            created_at: todo.created_at(),
        }
    }
}

/// Body of `POST /api/v1/todos`. Server-assigned fields sent by clients are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub todo_title: Option<String>,
}

/// Form fields posted by the list page. Which fields are required depends on the action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoForm {
    pub todo_id: Option<String>,
    pub todo_title: Option<String>,
}

/// Row of the rendered list page.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoView {
    pub id: String,
    pub title: String,
    pub finished: bool,
    pub created_at: String,
}

impl From<&Todo> for TodoView {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().to_string(),
            title: todo.title().to_string(),
            finished: todo.is_finished(),
            created_at: todo.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uses_camel_case_fields() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let todo = Todo::reconstitute("id-1".to_string(), "Buy milk".to_string(), true, created_at);

        let json = serde_json::to_value(TodoResource::from(&todo)).unwrap();

        assert_eq!(json["todoId"], "id-1");
        assert_eq!(json["todoTitle"], "Buy milk");
        assert_eq!(json["finished"], true);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_create_request_ignores_server_fields() {
        let request: CreateTodoRequest =
            serde_json::from_str(r#"{"todoId":"mine","todoTitle":"A","finished":true}"#).unwrap();

        assert_eq!(request.todo_title.as_deref(), Some("A"));
    }

    #[test]
    fn test_view_formats_timestamp() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let todo = Todo::reconstitute("id-1".to_string(), "t".to_string(), false, created_at);

        assert_eq!(TodoView::from(&todo).created_at, "2023-11-14 22:13:20");
    }
}
